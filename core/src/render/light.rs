//! Light sources, materials, and depth fog.

use alloc::vec::Vec;
use core::array;

use crate::math::{color::Color, float::f32 as fp, inv_lerp, vec::Vec3};

/// A point light source with inverse-linear attenuation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    /// Camera-space position.
    pub pos: Vec3,
    pub color: Color,
    /// Constant attenuation coefficient.
    pub a: f32,
    /// Linear attenuation coefficient.
    pub b: f32,
}

/// Specular reflectance of a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    /// Specular coefficient.
    pub ks: f32,
    /// Specular exponent. The larger, the smaller and sharper the
    /// highlights.
    pub exp: f32,
}

/// Depth cueing: blends distant pixels toward a fog color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fog {
    pub near: f32,
    pub far: f32,
    pub color: Color,
}

/// The lighting environment of a scene: the ambient light, the light
/// sources, and the current material.
#[derive(Clone, Debug, PartialEq)]
pub struct Illumination {
    pub ambient: Color,
    pub lights: Vec<Light>,
    pub material: Material,
}

impl Light {
    /// Returns the attenuation factor of `self` at point `pt`,
    /// `1 / (a + b * d)` where `d` is the distance from `self` to `pt`.
    pub fn attenuation(&self, pt: &Vec3) -> f32 {
        1.0 / (self.a + self.b * (self.pos - *pt).len())
    }

    /// Returns the normalized color reflected toward the camera by a point
    /// `pt` with unit normal `n` and normalized base color `base`.
    pub fn eval(
        &self,
        base: &Vec3,
        n: &Vec3,
        pt: &Vec3,
        mat: &Material,
    ) -> Vec3 {
        let l = (self.pos - *pt).normalize();
        let diffuse = n.dot(&l).max(0.0);

        let r = l - *n * (2.0 * l.dot(n));
        let spec = pt.normalize().dot(&r).max(0.0);
        let spec = mat.ks * fp::powf(spec, mat.exp);

        let att = self.attenuation(pt);
        let c = self.color.to_normalized();
        Vec3::from(array::from_fn::<_, 3, _>(|i| {
            c[i] * att * (base[i] * diffuse + spec)
        }))
    }
}

impl Default for Material {
    /// Returns a material with `ks` 0.3 and `exp` 8.
    fn default() -> Self {
        Self { ks: 0.3, exp: 8.0 }
    }
}

impl Fog {
    /// Applies fog to the color `c` of a pixel at depth `z`.
    ///
    /// Pixels nearer than `self.near` are unaffected, and pixels at or
    /// beyond `self.far` take the fog color. In between, the fog color is
    /// blended in linearly in depth.
    pub fn apply(&self, c: Color, z: f32) -> Color {
        if z < self.near {
            c
        } else if z >= self.far {
            self.color
        } else {
            let t = inv_lerp(z, self.near, self.far);
            self.color.blend(c, t)
        }
    }
}

impl Illumination {
    /// Returns the ambient term for a surface of color `base`.
    #[inline]
    pub fn ambient(&self, base: Color) -> Color {
        self.ambient * base
    }

    /// Returns the color of a point `pt` with base color `base`.
    ///
    /// If `normal` is `None`, only ambient light is applied. Otherwise the
    /// contribution of each light source is added to the ambient term.
    pub fn eval(
        &self,
        base: Color,
        normal: Option<&Vec3>,
        pt: &Vec3,
    ) -> Color {
        let amb = self.ambient(base);
        let Some(n) = normal else {
            return amb;
        };
        let b = base.to_normalized();
        self.lights
            .iter()
            .map(|l| Color::from_normalized(l.eval(&b, n, pt, &self.material)))
            .fold(amb, |acc, c| acc + c)
    }
}

impl Default for Illumination {
    /// Returns white ambient light, no light sources, and the default
    /// material.
    fn default() -> Self {
        Self {
            ambient: Color::WHITE,
            lights: Vec::new(),
            material: Material::default(),
        }
    }
}
