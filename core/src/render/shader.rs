//! Fragment shading and the lighting methods.
//!
//! Lighting can be evaluated at three granularities:
//!
//! * [`Flat`][Lighting::Flat]: once per polygon, at its centroid.
//! * [`Gouraud`][Lighting::Gouraud]: once per vertex. The resulting colors
//!   are interpolated across the polygon.
//! * [`Phong`][Lighting::Phong]: once per fragment, using the interpolated
//!   normal and camera-space position.
//!
//! All three use the same reflectance model; see
//! [`Illumination`][super::light::Illumination]. Flat and Gouraud lighting
//! happen before rasterization, when the polygon [vertices are shaded];
//! Phong lighting and depth fog happen in the
//! [fragment shader][FragmentShader].
//!
//! [vertices are shaded]: Shader::shade_polygon

use alloc::vec::Vec;

use crate::geom::centroid;
use crate::math::{color::Color, vary::Vary, vec::Vec3};

use super::light::{Fog, Illumination};
use super::raster::Frag;

/// Where lighting is evaluated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Lighting {
    /// Once per polygon.
    #[default]
    Flat,
    /// Once per vertex.
    Gouraud,
    /// Once per fragment.
    Phong,
}

/// Vertex attributes interpolated across a rasterized primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Attrib {
    pub color: Color,
    /// Unit normal, if known.
    pub normal: Option<Vec3>,
    /// Camera-space position, if carried.
    pub pos: Option<Vec3>,
}

/// Trait for fragment shaders, used to compute the color of each
/// individual pixel, or fragment, drawn.
pub trait FragmentShader<Var> {
    /// Computes the color of `frag`.
    fn shade_fragment(&self, frag: &Frag<Var>) -> Color;
}

/// Shades primitives using the current lighting method, illumination,
/// and fog.
#[derive(Copy, Clone, Debug)]
pub struct Shader<'a> {
    pub lighting: Lighting,
    pub illum: &'a Illumination,
    pub fog: Option<Fog>,
}

impl Attrib {
    /// Returns attributes with a color and a camera-space position.
    pub fn new(color: Color, pos: Vec3) -> Self {
        Self { color, normal: None, pos: Some(pos) }
    }
}

impl Shader<'_> {
    /// Shades the vertices of a polygon with face normal `face_normal`
    /// before the polygon is rasterized.
    ///
    /// * Flat: lights the polygon once at the centroid of the vertices.
    ///   The normal is the average of the vertex normals, or the face normal
    ///   if any vertex lacks one. Every vertex gets the resulting color.
    /// * Gouraud: lights each vertex with its own normal, or with the face
    ///   normal if it has none.
    /// * Phong: gives each vertex without a normal the face normal and
    ///   otherwise leaves the vertices unlit.
    pub fn shade_polygon(&self, verts: &mut [Attrib], face_normal: Vec3) {
        match self.lighting {
            Lighting::Flat => {
                let normals: Option<Vec<Vec3>> =
                    verts.iter().map(|v| v.normal).collect();
                let normal = match normals {
                    Some(ns) if !ns.is_empty() => centroid(&ns).normalize(),
                    _ => face_normal,
                };
                let pos = centroid(verts.iter().filter_map(|v| v.pos.as_ref()));
                let base = centroid(&colors(verts));
                let base = Color::from_normalized(base);

                let c = self.illum.eval(base, Some(&normal), &pos);
                for v in verts {
                    *v = Attrib { color: c, normal: None, pos: None };
                }
            }
            Lighting::Gouraud => {
                for v in verts {
                    let n = v.normal.unwrap_or(face_normal);
                    let pos = v.pos.unwrap_or_default();
                    v.color = self.illum.eval(v.color, Some(&n), &pos);
                    v.normal = None;
                    v.pos = None;
                }
            }
            Lighting::Phong => {
                for v in verts {
                    v.normal.get_or_insert(face_normal);
                }
            }
        }
    }

    /// Shades the vertices of a line. Lines are unaffected by light
    /// sources and receive only the ambient term.
    pub fn shade_line(&self, verts: &mut [Attrib]) {
        for v in verts {
            v.color = self.illum.ambient(v.color);
            v.normal = None;
        }
    }

    fn fog(&self, c: Color, z: f32) -> Color {
        match &self.fog {
            Some(fog) => fog.apply(c, z),
            None => c,
        }
    }
}

impl FragmentShader<Attrib> for Shader<'_> {
    /// Lights `frag` if its normal and position are carried, then applies
    /// fog.
    fn shade_fragment(&self, frag: &Frag<Attrib>) -> Color {
        let Attrib { color, normal, pos } = &frag.var;
        let c = match (self.lighting, normal, pos) {
            (Lighting::Phong, Some(n), Some(p)) => {
                self.illum.eval(*color, Some(&n.normalize()), p)
            }
            _ => *color,
        };
        self.fog(c, frag.pos.z)
    }
}

impl<F: Fn(&Frag<V>) -> Color, V> FragmentShader<V> for F {
    fn shade_fragment(&self, frag: &Frag<V>) -> Color {
        self(frag)
    }
}

impl Vary for Attrib {
    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        Self {
            color: Vary::weighted([&a.color, &b.color, &c.color], ws),
            normal: Vary::weighted([&a.normal, &b.normal, &c.normal], ws),
            pos: Vary::weighted([&a.pos, &b.pos, &c.pos], ws),
        }
    }
}

fn colors(verts: &[Attrib]) -> Vec<Vec3> {
    verts.iter().map(|v| v.color.to_normalized()).collect()
}
