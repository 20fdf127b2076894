//! RGB colors.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, Mul};

use super::vec::{Vec3, vec3};

//
// Types
//

/// An RGB color with `u8` channels.
///
/// Arithmetic treats each channel as a normalized value in 0.0..=1.0:
/// multiplying two colors filters one by the other, and adding two colors
/// accumulates light, saturating at full intensity.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Color(pub [u8; 3]);

/// Returns a new color with `r`, `g`, and `b` channels.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color([r, g, b])
}

/// Returns a gray color with all channels equal to `v`.
#[inline]
pub const fn gray(v: u8) -> Color {
    rgb(v, v, v)
}

//
// Inherent impls
//

impl Color {
    pub const BLACK: Self = gray(0);
    pub const WHITE: Self = gray(0xFF);

    #[inline]
    pub const fn r(&self) -> u8 {
        self.0[0]
    }
    #[inline]
    pub const fn g(&self) -> u8 {
        self.0[1]
    }
    #[inline]
    pub const fn b(&self) -> u8 {
        self.0[2]
    }

    /// Returns a color from normalized channels.
    ///
    /// Each channel is clamped to 0.0..=1.0 and mapped to the nearest `u8`.
    #[inline]
    pub fn from_normalized(c: Vec3) -> Self {
        Self(c.0.map(denormalize))
    }

    /// Returns the channels of `self` mapped to 0.0..=1.0.
    #[inline]
    pub fn to_normalized(self) -> Vec3 {
        let [r, g, b] = self.0.map(|c| c as f32 / 255.0);
        vec3(r, g, b)
    }

    /// Blends `self` over `other` with the given opacity.
    ///
    /// Opacity 1.0 yields `self`, opacity 0.0 yields `other`.
    #[must_use]
    pub fn blend(self, other: Self, opacity: f32) -> Self {
        let t = opacity.clamp(0.0, 1.0);
        let [a, b] = [self, other].map(Self::to_normalized);
        Self::from_normalized(a * t + b * (1.0 - t))
    }

    /// Returns a `u32` containing the channels of `self` in format
    /// `0xAA_RR_GG_BB`, with alpha set to `0xFF`.
    #[inline]
    pub const fn to_argb_u32(self) -> u32 {
        let [r, g, b] = self.0;
        u32::from_be_bytes([0xFF, r, g, b])
    }

    /// Returns a color from the channels of a `0xAA_RR_GG_BB` value.
    /// Alpha is ignored.
    #[inline]
    pub const fn from_argb_u32(argb: u32) -> Self {
        let [_, r, g, b] = argb.to_be_bytes();
        rgb(r, g, b)
    }
}

fn denormalize(c: f32) -> u8 {
    // Also maps NaN to zero
    (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

//
// Trait impls
//

impl Mul for Color {
    type Output = Self;

    /// Filters `self` by `rhs`, channel by channel.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let [l, r] = [self, rhs].map(Self::to_normalized);
        Self::from_normalized(vec3(l.x() * r.x(), l.y() * r.y(), l.z() * r.z()))
    }
}

impl Add for Color {
    type Output = Self;

    /// Accumulates the channels of `self` and `rhs`, saturating at 255.
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let [r, g, b] = [0, 1, 2].map(|i| self.0[i].saturating_add(rhs.0[i]));
        rgb(r, g, b)
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from(rgb: [u8; 3]) -> Self {
        Self(rgb)
    }
}

impl Debug for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "rgb({r}, {g}, {b})")
    }
}
