//! The scene command set.

use alloc::{string::String, vec::Vec};
use core::ops::Range;

use crate::geom::FaceRef;
use crate::math::{color::Color, mat::Axis, vec::Vec3, vec::Vec4};
use crate::render::shader::Lighting;

/// A single decoded scene command.
///
/// Colors given as `Vec3` are normalized, with channels in 0.0..=1.0.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Saves the current transform.
    PushScope,
    /// Restores the most recently saved transform. No-op if none is saved.
    PopScope,

    Scale(Vec3),
    Translate(Vec3),
    /// Rotates about a coordinate axis by an angle in degrees.
    Rotate { axis: Axis, degs: f32 },

    /// Draws a line segment.
    Line([CmdVertex; 2]),
    /// Draws a convex polygon with three or more vertices.
    Polygon(Vec<CmdVertex>),

    /// Appends a vertex to the current mesh vertex table.
    Vertex { pos: Vec4, color: Option<Color> },
    /// Appends a normal to the current mesh normal table.
    VertexNormal(Vec3),
    /// Adds a face to the current mesh.
    Face(Vec<FaceRef>),

    /// Marks an included scene file. The parser has already inlined its
    /// contents.
    Include(String),
    /// Starts an included object file with fresh mesh tables.
    ObjBegin(String),
    /// Ends the innermost object file, drawing its faces.
    ObjEnd,

    /// Places the camera at the current transform.
    Camera {
        xs: Range<f32>,
        ys: Range<f32>,
        near: f32,
        far: f32,
    },
    Ambient(Vec3),
    /// Enables depth fog.
    Depth { near: f32, far: f32, color: Vec3 },
    /// Sets the specular coefficient and exponent.
    Surface { ks: f32, exp: f32 },
    /// Adds a point light at the origin of the current transform.
    Light { color: Vec3, a: f32, b: f32 },

    Lighting(Lighting),
    Fill(FillMode),
}

/// A vertex of a line or polygon command.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CmdVertex {
    pub pos: Vec4,
    /// Defaults to white.
    pub color: Option<Color>,
}

/// How polygons are drawn.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FillMode {
    #[default]
    Filled,
    /// Only the boundary edges, as lines.
    Wireframe,
}

impl CmdVertex {
    /// Returns a vertex at `pos` with the default color.
    pub const fn new(pos: Vec4) -> Self {
        Self { pos, color: None }
    }

    /// Returns a vertex at `pos` with the given color.
    pub const fn colored(pos: Vec4, color: Color) -> Self {
        Self { pos, color: Some(color) }
    }

    pub(crate) fn color(&self) -> Color {
        self.color.unwrap_or(Color::WHITE)
    }
}

impl From<Vec4> for CmdVertex {
    fn from(pos: Vec4) -> Self {
        Self::new(pos)
    }
}
