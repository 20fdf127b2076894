//! Render targets and depth-buffered compositing.
//!
//! A render target is any [`Surface`] that pixels can be written to and
//! read back from. The [`Framebuf`] combines a surface with a [`ZBuffer`]
//! and decides, fragment by fragment, which ones are visible.

use crate::math::color::Color;
use crate::util::{buf::Buf2, rect::Rect};

use super::raster::ScreenPt;

/// Trait for pixel surfaces that can be rendered to.
///
/// Pixels are packed as `0xAA_RR_GG_BB`. The renderer always writes an
/// alpha of `0xFF`.
pub trait Surface {
    /// Returns the width of `self` in pixels.
    fn width(&self) -> usize;
    /// Returns the height of `self` in pixels.
    fn height(&self) -> usize;

    /// Writes the pixel at (x, y).
    fn set_pixel(&mut self, x: usize, y: usize, argb: u32);
    /// Returns the pixel at (x, y).
    fn get_pixel(&self, x: usize, y: usize) -> u32;

    /// Presents a completed frame. Called once per rendered scene.
    ///
    /// The default implementation does nothing.
    fn update_screen(&mut self) {}

    /// Returns the rectangle covering all of `self`.
    fn rect(&self) -> Rect {
        Rect::of_size(self.width(), self.height())
    }
}

/// A depth buffer covering a viewport rectangle.
#[derive(Clone, Debug)]
pub struct ZBuffer {
    depth: Buf2<f32>,
    rect: Rect,
    near: f32,
}

/// Framebuffer, combining a color surface and a depth buffer.
pub struct Framebuf<'a, S: ?Sized> {
    pub color: &'a mut S,
    pub depth: &'a mut ZBuffer,
}

impl ZBuffer {
    /// Returns a depth buffer for `rect`, cleared for the depth range
    /// `near..=far`.
    pub fn new(rect: Rect, near: f32, far: f32) -> Self {
        let depth = Buf2::new_default(rect.width(), rect.height());
        let mut zb = Self { depth, rect, near };
        zb.reset(near, far);
        zb
    }

    /// Clears `self` for the depth range `near..=far`: every pixel is set
    /// to `far + 1`, behind anything that can be drawn.
    pub fn reset(&mut self, near: f32, far: f32) {
        self.near = near;
        self.depth.fill(far + 1.0);
    }

    /// Returns the viewport rectangle covered by `self`.
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Returns the stored depth at (x, y), or `None` if the point lies
    /// outside the viewport.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if !self.rect.contains(x, y) {
            return None;
        }
        self.depth
            .get(x - self.rect.left, y - self.rect.top)
            .copied()
    }

    /// Returns whether `pt` passes the depth test: it must lie inside the
    /// viewport, no farther than the stored depth, and no nearer than the
    /// near plane. Ties pass.
    pub fn test(&self, pt: &ScreenPt) -> bool {
        self.get(pt.x, pt.y)
            .is_some_and(|z| pt.z <= z && pt.z >= self.near)
    }

    /// Tests `pt` and, if it passes, stores its depth.
    pub fn test_and_set(&mut self, pt: &ScreenPt) -> bool {
        if !self.test(pt) {
            return false;
        }
        let (x, y) = (pt.x - self.rect.left, pt.y - self.rect.top);
        self.depth[(x, y)] = pt.z;
        true
    }
}

impl<S: Surface + ?Sized> Framebuf<'_, S> {
    /// Writes `color` at `pt` if `pt` passes the depth test.
    ///
    /// Returns whether the pixel was written.
    pub fn write(&mut self, pt: &ScreenPt, color: Color) -> bool {
        if !self.depth.test_and_set(pt) {
            return false;
        }
        self.color.set_pixel(pt.x, pt.y, color.to_argb_u32());
        true
    }

    /// Blends `color` over the pixel at `pt` with the given opacity if `pt`
    /// passes the depth test. The stored depth is not updated.
    ///
    /// Returns whether the pixel was written.
    pub fn blend(
        &mut self,
        pt: &ScreenPt,
        color: Color,
        opacity: f32,
    ) -> bool {
        if !self.depth.test(pt) {
            return false;
        }
        let old = Color::from_argb_u32(self.color.get_pixel(pt.x, pt.y));
        let new = color.blend(old, opacity);
        self.color.set_pixel(pt.x, pt.y, new.to_argb_u32());
        true
    }
}

impl Surface for Buf2<u32> {
    fn width(&self) -> usize {
        Buf2::width(self)
    }
    fn height(&self) -> usize {
        Buf2::height(self)
    }
    fn set_pixel(&mut self, x: usize, y: usize, argb: u32) {
        if let Some(px) = self.get_mut(x, y) {
            *px = argb;
        }
    }
    fn get_pixel(&self, x: usize, y: usize) -> u32 {
        self.get(x, y).copied().unwrap_or(0)
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> usize {
        (**self).width()
    }
    fn height(&self) -> usize {
        (**self).height()
    }
    fn set_pixel(&mut self, x: usize, y: usize, argb: u32) {
        (**self).set_pixel(x, y, argb);
    }
    fn get_pixel(&self, x: usize, y: usize) -> u32 {
        (**self).get_pixel(x, y)
    }
    fn update_screen(&mut self) {
        (**self).update_screen();
    }
}
