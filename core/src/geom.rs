//! Basic geometric primitives.

use crate::math::vec::Vec3;

pub use mesh::{Face, FaceRef, IndexError, IndexKind, MeshVertex, Tables};

pub mod mesh;

/// Vertex with a position and arbitrary other attributes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// Triangle, defined by three vertices.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// Line segment between two vertices.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Edge<V>(pub [V; 2]);

/// Returns a new vertex with the given position and attribute values.
#[inline]
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

/// Returns the unit normal of the plane through `a`, `b`, and `c`, that is,
/// the normalized cross product of the edge vectors `b - a` and `c - a`.
///
/// Returns the zero vector if the points are collinear.
pub fn plane_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(&(c - a)).normalize()
}

/// Returns the arithmetic mean of `pts`, or the zero vector if empty.
pub fn centroid<'a>(pts: impl IntoIterator<Item = &'a Vec3>) -> Vec3 {
    let (sum, n) = pts
        .into_iter()
        .fold((Vec3::zero(), 0), |(sum, n), &p| (sum + p, n + 1));
    if n == 0 { sum } else { sum / n as f32 }
}
