//! Real vectors and homogeneous points.

use core::array;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, Div, Index, Mul, Neg, Sub};

use super::approx::ApproxEq;

//
// Types
//

/// A real vector with `N` components.
///
/// Three-vectors represent directions, normals, and camera-space positions.
/// Four-vectors are homogeneous points; a point with `w` = 1 is an ordinary
/// affine point, and after the perspective transform `w` carries the divisor
/// of the perspective divide.
#[derive(Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct Vector<const N: usize>(pub [f32; N]);

/// A 3D vector.
pub type Vec3 = Vector<3>;

/// A homogeneous 3D point.
pub type Vec4 = Vector<4>;

//
// Free functions
//

/// Returns a 3D vector with the given components.
#[inline]
pub const fn vec3(x: f32, y: f32, z: f32) -> Vec3 {
    Vector([x, y, z])
}

/// Returns a homogeneous vector with the given components.
#[inline]
pub const fn vec4(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
    Vector([x, y, z, w])
}

/// Returns an affine point (`w` = 1) at (x, y, z).
#[inline]
pub const fn pt3(x: f32, y: f32, z: f32) -> Vec4 {
    vec4(x, y, z, 1.0)
}

//
// Inherent impls
//

impl<const N: usize> Vector<N> {
    /// Returns the zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self([0.0; N])
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        (0..N).map(|i| self.0[i] * other.0[i]).sum()
    }

    /// Returns the Euclidean length of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        super::float::f32::sqrt(self.dot(self))
    }

    /// Returns `self` scaled to unit length.
    ///
    /// A zero vector has no direction and is returned unchanged.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let len = self.len();
        if len == 0.0 { *self } else { *self / len }
    }

    /// Returns `self` with each component mapped by `f`.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self(self.0.map(&mut f))
    }
}

impl Vec3 {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }

    /// Returns the cross product of `self` and `other`.
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }

    /// Returns `self` as an affine point with `w` = 1.
    #[inline]
    pub const fn to_pt(self) -> Vec4 {
        pt3(self.x(), self.y(), self.z())
    }

    /// Returns `self` as a direction with `w` = 0.
    #[inline]
    pub const fn to_dir(self) -> Vec4 {
        vec4(self.x(), self.y(), self.z(), 0.0)
    }
}

impl Vec4 {
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }

    /// Returns the x, y, and z components, ignoring w.
    #[inline]
    pub const fn xyz(&self) -> Vec3 {
        vec3(self.x(), self.y(), self.z())
    }

    /// Performs the perspective divide.
    ///
    /// Divides x, y, and w by w. The z component is left alone so that it
    /// keeps holding the camera-space depth used for depth testing and fog.
    #[must_use]
    pub fn project(&self) -> Self {
        let [x, y, z, w] = self.0;
        if w == 0.0 {
            return *self;
        }
        vec4(x / w, y / w, z, 1.0)
    }
}

//
// Trait impls
//

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    #[inline]
    fn from(arr: [f32; N]) -> Self {
        Self(arr)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<const N: usize> Mul<f32> for Vector<N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.map(|c| c * rhs)
    }
}

impl<const N: usize> Div<f32> for Vector<N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.map(|c| c / rhs)
    }
}

impl<const N: usize> ApproxEq<Self, f32> for Vector<N> {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, rel_eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

impl<const N: usize> Debug for Vector<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Vec{N}")?;
        Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn dot_and_len() {
        let v = vec3(2.0, -3.0, 6.0);
        assert_eq!(v.dot(&vec3(1.0, 1.0, 1.0)), 5.0);
        assert_eq!(v.len(), 7.0);
    }

    #[test]
    fn normalize() {
        assert_approx_eq!(vec3(0.0, 3.0, 4.0).normalize(), vec3(0.0, 0.6, 0.8));
        assert_eq!(Vec3::zero().normalize(), Vec3::zero());
    }

    #[test]
    fn cross_is_right_handed() {
        let x = vec3(1.0, 0.0, 0.0);
        let y = vec3(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), vec3(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn arithmetic() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(-1.0, 0.5, 2.0);
        assert_eq!(a + b, vec3(0.0, 2.5, 5.0));
        assert_eq!(a - b, vec3(2.0, 1.5, 1.0));
        assert_eq!(-a * 2.0, vec3(-2.0, -4.0, -6.0));
        assert_eq!(a / 2.0, vec3(0.5, 1.0, 1.5));
    }

    #[test]
    fn project_keeps_depth() {
        let p = vec4(4.0, -2.0, 8.0, 2.0).project();
        assert_eq!(p, vec4(2.0, -1.0, 8.0, 1.0));
    }

    #[test]
    fn debug_format() {
        use alloc::format;
        assert_eq!(format!("{:?}", vec3(1.0, 2.0, 3.0)), "Vec3[1.0, 2.0, 3.0]");
    }
}
