//! Interpolation of vertex attributes.

use super::color::Color;
use super::vec::Vec3;

/// A trait for types that can be interpolated across a rasterized primitive.
///
/// Types implementing `Vary` are *varyings:* per-vertex values such as
/// colors, normals, and camera-space positions that are blended along a
/// line or across the face of a triangle to produce per-pixel values.
///
/// The only required method is [`weighted`][Self::weighted]; linear
/// interpolation and sampling follow from it.
pub trait Vary: Clone {
    /// Returns the weighted combination `ws[0] * vs[0] + ws[1] * vs[1] +
    /// ws[2] * vs[2]`. The weights are expected to sum to one.
    fn weighted(vs: [&Self; 3], ws: [f32; 3]) -> Self;

    /// Linearly interpolates between `self` and `other`.
    ///
    /// If `t` = 0, returns `self`; if `t` = 1, returns `other`.
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::weighted([self, other, other], [1.0 - t, t, 0.0])
    }

    /// Returns an iterator yielding `n` + 1 evenly spaced samples from
    /// `self` to `other`, both endpoints included.
    ///
    /// # Examples
    /// ```
    /// # use simp_core::math::vary::Vary;
    /// let samples: Vec<f32> = 1.0f32.vary_to(&2.0, 4).collect();
    /// assert_eq!(samples, [1.0, 1.25, 1.5, 1.75, 2.0]);
    /// ```
    fn vary_to(&self, other: &Self, n: u32) -> Iter<Self> {
        Iter {
            from: self.clone(),
            to: other.clone(),
            i: 0,
            n,
        }
    }
}

/// Iterator returned by [`Vary::vary_to`].
#[derive(Clone, Debug)]
pub struct Iter<T> {
    from: T,
    to: T,
    i: u32,
    n: u32,
}

/// Linearly interpolates between two values.
#[inline]
pub fn lerp<T: Vary>(t: f32, from: &T, to: &T) -> T {
    from.lerp(to, t)
}

impl<T: Vary> Iterator for Iter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.i > self.n {
            return None;
        }
        let t = if self.n == 0 {
            0.0
        } else {
            self.i as f32 / self.n as f32
        };
        self.i += 1;
        Some(self.from.lerp(&self.to, t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = (self.n + 1).saturating_sub(self.i) as usize;
        (rem, Some(rem))
    }
}

impl Vary for f32 {
    #[inline]
    fn weighted([a, b, c]: [&Self; 3], [u, v, w]: [f32; 3]) -> Self {
        u * a + v * b + w * c
    }
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + t * (other - self)
    }
}

impl Vary for () {
    fn weighted(_: [&Self; 3], _: [f32; 3]) {}
}

impl Vary for Vec3 {
    #[inline]
    fn weighted([a, b, c]: [&Self; 3], [u, v, w]: [f32; 3]) -> Self {
        *a * u + *b * v + *c * w
    }
}

impl Vary for Color {
    /// Interpolates the normalized channels, rounding to the nearest `u8`.
    fn weighted(cs: [&Self; 3], ws: [f32; 3]) -> Self {
        let [a, b, c] = cs.map(|c| c.to_normalized());
        Color::from_normalized(Vec3::weighted([&a, &b, &c], ws))
    }
}

impl<T: Vary> Vary for Option<T> {
    /// Returns `None` if any of the inputs is `None`.
    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        match (a, b, c) {
            (Some(a), Some(b), Some(c)) => Some(T::weighted([a, b, c], ws)),
            _ => None,
        }
    }
}

impl<A: Vary, B: Vary> Vary for (A, B) {
    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        (
            A::weighted([&a.0, &b.0, &c.0], ws),
            B::weighted([&a.1, &b.1, &c.1], ws),
        )
    }
}

impl<A: Vary, B: Vary, C: Vary> Vary for (A, B, C) {
    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        (
            A::weighted([&a.0, &b.0, &c.0], ws),
            B::weighted([&a.1, &b.1, &c.1], ws),
            C::weighted([&a.2, &b.2, &c.2], ws),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::assert_approx_eq;
    use crate::math::{color::rgb, vec::vec3};

    #[test]
    fn vary_f32() {
        let varying = (-6.0f32).vary_to(&4.8, 9);
        assert_eq!(varying.size_hint(), (10, Some(10)));
        assert_approx_eq!(
            varying.collect::<Vec<_>>()[..],
            [-6.0, -4.8, -3.6, -2.4, -1.2, 0.0, 1.2, 2.4, 3.6, 4.8]
        );
    }

    #[test]
    fn vary_zero_steps_yields_start() {
        let v: Vec<_> = 3.0f32.vary_to(&5.0, 0).collect();
        assert_eq!(v, [3.0]);
    }

    #[test]
    fn weighted_vec3() {
        let [a, b, c] = [
            vec3(3.0, 0.0, 0.0),
            vec3(0.0, 3.0, 0.0),
            vec3(0.0, 0.0, 3.0),
        ];
        let v = Vec3::weighted([&a, &b, &c], [1.0 / 3.0; 3]);
        assert_approx_eq!(v, vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn weighted_color() {
        let (r, g, b) = (rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255));
        assert_eq!(Color::weighted([&r, &g, &b], [1.0, 0.0, 0.0]), r);
        assert_eq!(
            Color::weighted([&r, &g, &b], [0.5, 0.25, 0.25]),
            rgb(128, 64, 64)
        );
    }

    #[test]
    fn lerp_tuple_and_option() {
        let a = (0.0f32, Some(vec3(0.0, 0.0, 0.0)));
        let b = (4.0f32, Some(vec3(2.0, 2.0, 2.0)));
        let (x, v) = a.lerp(&b, 0.25);
        assert_eq!(x, 1.0);
        assert_approx_eq!(v, Some(vec3(0.5, 0.5, 0.5)));

        let c = (4.0f32, None);
        assert_eq!(a.lerp(&c, 0.5).1, None);
    }
}
