//! Rendering configuration.

use crate::util::rect::Rect;

/// Renderer settings that are not controlled by scene commands.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The rectangle of the surface to render into.
    ///
    /// If `None`, the whole surface is used. A rectangle extending past
    /// the surface is clipped to it.
    pub viewport: Option<Rect>,

    /// The algorithm used to draw lines and wireframe edges.
    pub line_mode: LineMode,

    /// Whether to cull (discard) polygons facing away from the camera.
    ///
    /// If all geometry drawn is "solid" meshes without holes, back faces
    /// are always occluded by front faces and drawing them would be
    /// redundant. Lines are never culled.
    pub face_cull: bool,
}

/// Line drawing algorithms.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Parametric stepping with a fractional slope.
    #[default]
    Dda,
    /// Integer stepping with an error accumulator. Draws the same pixels
    /// as `Dda`.
    Bresenham,
    /// Anti-aliased lines, blended with the pixels already drawn.
    Smooth,
}

impl Config {
    /// Returns the viewport rectangle within a surface of size `w` × `h`.
    pub fn viewport_in(&self, w: usize, h: usize) -> Rect {
        let surf = Rect::of_size(w, h);
        match &self.viewport {
            Some(vp) => vp.intersect(&surf),
            None => surf,
        }
    }
}

impl Default for Config {
    /// Creates a rendering config with the following defaults:
    ///
    /// ```
    /// # use simp_core::render::ctx::*;
    /// let cfg = Config {
    ///     viewport: None,
    ///     line_mode: LineMode::Dda,
    ///     face_cull: true,
    /// };
    /// assert_eq!(cfg, Config::default());
    /// ```
    fn default() -> Self {
        Self {
            viewport: None,
            line_mode: LineMode::default(),
            face_cull: true,
        }
    }
}
