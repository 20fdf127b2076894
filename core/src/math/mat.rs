//! Matrices and homogeneous transforms.
//!
//! Matrices are stored in row-major order and applied to column vectors,
//! so `a * b` is the transform that first applies `b`, then `a`.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::ops::{Mul, Range};

use super::approx::ApproxEq;
use super::float::f32 as fp;
use super::vec::{Vec3, Vec4, Vector, vec3};
use crate::util::rect::Rect;

//
// Types
//

/// A 4×4 matrix of `f32`s, representing a projective transform of 3D space.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq)]
pub struct Mat4x4(pub [[f32; 4]; 4]);

/// A coordinate axis to rotate about.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

//
// Inherent impls
//

impl Mat4x4 {
    /// The identity transform.
    pub const IDENTITY: Self = Self([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Returns the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the `i`th row of `self`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        Vector(self.0[i])
    }

    /// Returns the `i`th column of `self`.
    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        Vector(self.0.map(|row| row[i]))
    }

    /// Applies `self` to a homogeneous vector.
    #[inline]
    pub fn apply(&self, v: &Vec4) -> Vec4 {
        Vector(array::from_fn(|i| self.row(i).dot(v)))
    }

    /// Applies the linear (upper-left 3×3) part of `self` to `v`,
    /// ignoring translation. Used to transform normals and directions.
    #[inline]
    pub fn apply_linear(&self, v: &Vec3) -> Vec3 {
        self.apply(&v.to_dir()).xyz()
    }

    /// Returns the composition of `self` and `other`, that is, the matrix
    /// that applies `other` first and `self` second.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self(array::from_fn(|i| {
            array::from_fn(|j| self.row(i).dot(&other.col(j)))
        }))
    }

    /// Returns the transpose of `self`.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self(array::from_fn(|i| self.0.map(|row| row[i])))
    }

    /// Returns the determinant of `self`, expanded along the first row.
    pub fn determinant(&self) -> f32 {
        (0..4).map(|j| self.0[0][j] * self.cofactor(0, j)).sum()
    }

    /// Returns the inverse of `self`, or `None` if `self` is singular.
    ///
    /// Uses the adjugate method: the inverse is the transpose of the
    /// cofactor matrix divided by the determinant.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if (-f32::EPSILON..=f32::EPSILON).contains(&det) {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self(array::from_fn(|i| {
            // Transpose of the cofactor matrix
            array::from_fn(|j| self.cofactor(j, i) * inv_det)
        })))
    }

    /// Returns the signed minor of the element at row `i`, column `j`.
    fn cofactor(&self, i: usize, j: usize) -> f32 {
        let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
        sign * self.minor(i, j)
    }

    /// Returns the determinant of the 3×3 submatrix that remains when
    /// row `i` and column `j` are removed.
    fn minor(&self, i: usize, j: usize) -> f32 {
        let rows = skip(i);
        let cols = skip(j);
        let m = |r: usize, c: usize| self.0[rows[r]][cols[c]];

        m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1))
            - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
            + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
    }
}

/// Returns the indices 0..4 with `i` removed.
fn skip(i: usize) -> [usize; 3] {
    array::from_fn(|k| if k < i { k } else { k + 1 })
}

//
// Free functions
//

/// Returns a matrix scaling by `s`.
pub fn scale(s: Vec3) -> Mat4x4 {
    Mat4x4([
        [s[0], 0.0, 0.0, 0.0],
        [0.0, s[1], 0.0, 0.0],
        [0.0, 0.0, s[2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix translating by `t`.
pub fn translate(t: Vec3) -> Mat4x4 {
    Mat4x4([
        [1.0, 0.0, 0.0, t[0]],
        [0.0, 1.0, 0.0, t[1]],
        [0.0, 0.0, 1.0, t[2]],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix rotating by `degs` degrees about `axis`.
///
/// The angle is negated before the matrix is built, so a positive angle
/// turns clockwise when looking down the axis towards the origin. For
/// example, rotating the point (1, 0, 0) by 90° about Z yields (0, -1, 0).
pub fn rotate(axis: Axis, degs: f32) -> Mat4x4 {
    let rads = -degs.to_radians();
    let (s, c) = (fp::sin(rads), fp::cos(rads));
    let rows = match axis {
        Axis::X => [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Axis::Y => [
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Axis::Z => [
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };
    Mat4x4(rows)
}

/// Returns the minimal perspective matrix that copies camera-space depth
/// into the w component.
///
/// After the [perspective divide][super::vec::Vec4::project], x and y are
/// divided by the original z, which maps points on the plane z = 1 to
/// themselves.
pub fn perspective() -> Mat4x4 {
    Mat4x4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ])
}

/// Returns a matrix mapping the view-plane window `xs` × `ys` to the pixel
/// rectangle `rect`.
///
/// The y axis is flipped so that screen y grows downward: `ys.end` maps to
/// the top edge of `rect` and `ys.start` to its bottom edge. Depth passes
/// through unchanged.
pub fn viewport(xs: Range<f32>, ys: Range<f32>, rect: &Rect) -> Mat4x4 {
    let sx = rect.width() as f32 / (xs.end - xs.start);
    let sy = rect.height() as f32 / (ys.end - ys.start);
    let (left, top) = (rect.left as f32, rect.top as f32);
    Mat4x4([
        [sx, 0.0, 0.0, left - xs.start * sx],
        [0.0, -sy, 0.0, top + ys.end * sy],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

//
// Trait impls
//

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4x4 {
    type Output = Self;

    /// Composes `self` and `rhs`; see [`Mat4x4::compose`].
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl Mul<Vec4> for Mat4x4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        self.apply(&rhs)
    }
}

impl From<[[f32; 4]; 4]> for Mat4x4 {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        Self(rows)
    }
}

impl ApproxEq<Self, f32> for Mat4x4 {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        <f32 as ApproxEq>::relative_epsilon()
    }
}

impl Debug for Mat4x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mat4x4[")?;
        for row in &self.0 {
            writeln!(f, "    {row:6.2?}")?;
        }
        write!(f, "]")
    }
}
