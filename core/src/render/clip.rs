//! Trivial rejection and back-face culling.
//!
//! Primitives are never split. A primitive that crosses the near or the
//! far plane is rejected as a whole, and a polygon that faces away from
//! the camera is culled as a whole.

use crate::geom::{centroid, plane_normal};
use crate::math::vec::Vec3;

/// Returns whether every point in `pts` lies within the depth range
/// `near..=far`.
pub fn in_depth_range<'a>(
    pts: impl IntoIterator<Item = &'a Vec3>,
    near: f32,
    far: f32,
) -> bool {
    pts.into_iter().all(|p| (near..=far).contains(&p.z()))
}

/// Returns whether a polygon with the unit normal `normal` faces away
/// from a camera at the origin.
///
/// `pts` are the camera-space vertices of the polygon. The polygon faces
/// away if its normal points in the same general direction as the ray
/// from the camera to its centroid.
pub fn faces_away<'a>(
    pts: impl IntoIterator<Item = &'a Vec3>,
    normal: &Vec3,
) -> bool {
    centroid(pts).normalize().dot(normal) > 0.0
}

/// Returns whether the polygon `pts` is a back face.
///
/// The normal is computed from the first three vertices; see
/// [`plane_normal`]. Polygons with fewer than three vertices are never
/// back faces.
pub fn is_backface(pts: &[Vec3]) -> bool {
    match pts {
        [a, b, c, ..] => faces_away(pts, &plane_normal(*a, *b, *c)),
        _ => false,
    }
}
