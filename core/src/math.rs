//! Linear algebra and other useful mathematics.
//!
//! Includes [vectors][self::vec], [matrices][mat], [colors][color], and
//! support for [varying][vary] types that can be interpolated across a
//! rasterized primitive, as well as utilities such as approximate equality
//! comparisons.
//!
//! Points are represented as homogeneous [4-vectors][Vec4] so that affine
//! and projective transforms can both be expressed as [4×4 matrices][Mat4x4]
//! and composed by multiplication.

pub use {
    approx::ApproxEq,
    color::{Color, gray, rgb},
    mat::{Axis, Mat4x4, perspective, rotate, scale, translate, viewport},
    vary::{Vary, lerp},
    vec::{Vec3, Vec4, Vector, pt3, vec3, vec4},
};

pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod vary;
pub mod vec;

/// Returns the relative position of `t` between `min` and `max`.
///
/// That is, returns 0 when `t` = `min`, 1 when `t` = `max`, and linearly
/// interpolates in between.
///
/// The result is unspecified if any of the parameters is non-finite, or if
/// `min` = `max`.
///
/// # Examples
/// ```
/// use simp_core::math::inv_lerp;
///
/// // Two is one fourth of the way from one to five
/// assert_eq!(inv_lerp(2.0, 1.0, 5.0), 0.25);
/// ```
#[inline]
pub fn inv_lerp(t: f32, min: f32, max: f32) -> f32 {
    (t - min) / (max - min)
}
