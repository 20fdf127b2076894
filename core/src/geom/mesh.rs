//! Arena-based polygon meshes.
//!
//! A mesh is stored as a set of [`Tables`]: a vertex table, a table of
//! explicitly declared normals, and a table of [faces][Face] that refer to
//! vertices by index. Faces never point at vertices directly, so a vertex
//! can be shared by any number of faces without shared ownership, and the
//! per-vertex normals can be recomputed by a simple pass over the faces.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use crate::geom::{centroid, plane_normal};
use crate::math::{color::Color, vec::Vec3, vec::Vec4};

//
// Types
//

/// Which table an index refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Vertex,
    Normal,
}

/// Error returned when a face refers to a nonexistent table entry.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind} index {index} out of bounds for table of length {len}")]
pub struct IndexError {
    pub kind: IndexKind,
    /// The index as given, 1-based or negative.
    pub index: i32,
    pub len: usize,
}

/// A reference to a face corner, as in the OBJ format.
///
/// Indices are 1-based; a negative index counts backwards from the most
/// recently declared entry, so -1 refers to the last one. The texture
/// coordinate index is accepted for compatibility but otherwise ignored.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FaceRef {
    pub v: i32,
    pub t: Option<i32>,
    pub n: Option<i32>,
}

/// A mesh vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshVertex {
    /// Camera-space position.
    pub pos: Vec4,
    pub color: Color,
    /// Normal assigned explicitly by a face reference, if any.
    pub normal: Option<Vec3>,
    /// Normals of the faces sharing this vertex.
    adjacent: Vec<Vec3>,
}

/// A planar polygon with three or more vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Indices into the vertex table.
    pub verts: Vec<usize>,
    /// Unit normal computed from the first three vertices.
    pub normal: Vec3,
}

/// The vertex, normal, and face tables of a mesh.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    pub verts: Vec<MeshVertex>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

//
// Inherent impls
//

impl FaceRef {
    /// Returns a reference to vertex `v` without texture or normal indices.
    pub const fn vertex(v: i32) -> Self {
        Self { v, t: None, n: None }
    }
}

impl MeshVertex {
    /// Creates a vertex with no normals.
    pub fn new(pos: Vec4, color: Color) -> Self {
        Self {
            pos,
            color,
            normal: None,
            adjacent: Vec::new(),
        }
    }

    /// Returns the shading normal of `self`: the assigned normal if any,
    /// otherwise the normalized average of the adjacent face normals, or
    /// `None` if `self` is not part of any face.
    pub fn normal(&self) -> Option<Vec3> {
        if self.normal.is_some() {
            return self.normal;
        }
        if self.adjacent.is_empty() {
            return None;
        }
        Some(centroid(&self.adjacent).normalize())
    }
}

impl Tables {
    /// Returns new empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a face with the given corners.
    ///
    /// Resolves the vertex indices, assigns any referenced normals to their
    /// vertices, and computes the face normal. Faces with fewer than three
    /// corners are not added, and `Ok(false)` is returned.
    ///
    /// # Errors
    /// If any index is out of bounds. The tables are left unchanged.
    pub fn add_face(&mut self, refs: &[FaceRef]) -> Result<bool, IndexError> {
        let nverts = self.verts.len();
        let nnorms = self.normals.len();

        let mut verts = Vec::with_capacity(refs.len());
        let mut assigned = Vec::new();
        for r in refs {
            let vi = resolve(r.v, nverts, IndexKind::Vertex)?;
            if let Some(n) = r.n {
                let ni = resolve(n, nnorms, IndexKind::Normal)?;
                assigned.push((vi, self.normals[ni]));
            }
            verts.push(vi);
        }
        if verts.len() < 3 {
            return Ok(false);
        }
        for (vi, n) in assigned {
            self.verts[vi].normal = Some(n);
        }
        let [a, b, c] = [0, 1, 2].map(|i| self.verts[verts[i]].pos.xyz());
        let normal = plane_normal(a, b, c);
        self.faces.push(Face { verts, normal });
        Ok(true)
    }

    /// Recomputes the adjacent face normals of every vertex.
    pub fn accumulate_normals(&mut self) {
        for v in &mut self.verts {
            v.adjacent.clear();
        }
        for f in &self.faces {
            for &i in &f.verts {
                self.verts[i].adjacent.push(f.normal);
            }
        }
    }
}

/// Converts a 1-based or negative OBJ index into a 0-based table index.
///
/// # Errors
/// If `idx` is zero or refers past either end of a table of length `len`.
pub fn resolve(
    idx: i32,
    len: usize,
    kind: IndexKind,
) -> Result<usize, IndexError> {
    let err = IndexError { kind, index: idx, len };
    let i = if idx > 0 {
        idx as usize - 1
    } else if idx < 0 {
        len.checked_sub(idx.unsigned_abs() as usize).ok_or(err.clone())?
    } else {
        return Err(err);
    };
    if i < len { Ok(i) } else { Err(err) }
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::Vertex => "vertex",
            IndexKind::Normal => "normal",
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use super::*;
    use crate::assert_approx_eq;
    use crate::math::{color::Color, vec::pt3, vec::vec3};

    fn square() -> Tables {
        let mut t = Tables::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            t.verts.push(MeshVertex::new(pt3(x, y, 5.0), Color::WHITE));
        }
        t
    }

    #[test]
    fn resolve_positive_and_negative() {
        let k = IndexKind::Vertex;
        assert_eq!(resolve(1, 4, k), Ok(0));
        assert_eq!(resolve(4, 4, k), Ok(3));
        assert_eq!(resolve(-1, 4, k), Ok(3));
        assert_eq!(resolve(-4, 4, k), Ok(0));
    }

    #[test]
    fn resolve_out_of_bounds() {
        let k = IndexKind::Normal;
        for idx in [0, 5, -5, i32::MIN] {
            assert_eq!(
                resolve(idx, 4, k),
                Err(IndexError { kind: k, index: idx, len: 4 })
            );
        }
    }

    #[test]
    fn index_error_message() {
        let e = IndexError { kind: IndexKind::Vertex, index: 9, len: 3 };
        assert_eq!(
            format!("{e}"),
            "vertex index 9 out of bounds for table of length 3"
        );
    }

    #[test]
    fn add_face_computes_normal() {
        let mut t = square();
        let refs = [1, 2, 3, 4].map(FaceRef::vertex);
        assert_eq!(t.add_face(&refs), Ok(true));
        assert_eq!(t.faces[0].verts, vec![0, 1, 2, 3]);
        assert_eq!(t.faces[0].normal, vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn add_face_with_bad_index_leaves_tables_unchanged() {
        let mut t = square();
        t.normals.push(vec3(0.0, 1.0, 0.0));
        let refs = [
            FaceRef { v: 1, t: None, n: Some(1) },
            FaceRef::vertex(2),
            FaceRef::vertex(7),
        ];
        let err = t.add_face(&refs).unwrap_err();
        assert_eq!(err.index, 7);
        assert!(t.faces.is_empty());
        assert_eq!(t.verts[0].normal, None);
    }

    #[test]
    fn degenerate_face_is_skipped() {
        let mut t = square();
        let refs = [1, 2].map(FaceRef::vertex);
        assert_eq!(t.add_face(&refs), Ok(false));
        assert!(t.faces.is_empty());
    }

    #[test]
    fn vertex_normals_average_adjacent_faces() {
        let mut t = Tables::new();
        for p in [
            pt3(0.0, 0.0, 0.0),
            pt3(1.0, 0.0, 0.0),
            pt3(0.0, 1.0, 0.0),
            pt3(0.0, 0.0, 1.0),
        ] {
            t.verts.push(MeshVertex::new(p, Color::WHITE));
        }
        // Normal +z
        t.add_face(&[1, 2, 3].map(FaceRef::vertex)).unwrap();
        // Normal +x
        t.add_face(&[1, 3, 4].map(FaceRef::vertex)).unwrap();
        t.accumulate_normals();

        let s = core::f32::consts::FRAC_1_SQRT_2;
        assert_approx_eq!(t.verts[0].normal(), Some(vec3(s, 0.0, s)));
        assert_approx_eq!(t.verts[1].normal(), Some(vec3(0.0, 0.0, 1.0)));
        assert_eq!(t.verts[3].normal(), Some(vec3(1.0, 0.0, 0.0)));

        // Idempotent
        t.accumulate_normals();
        assert_approx_eq!(t.verts[0].normal(), Some(vec3(s, 0.0, s)));
    }

    #[test]
    fn assigned_normal_takes_precedence() {
        let mut t = square();
        t.normals.push(vec3(0.0, 1.0, 0.0));
        let refs = [
            FaceRef { v: -4, t: Some(1), n: Some(-1) },
            FaceRef::vertex(-3),
            FaceRef::vertex(-2),
        ];
        t.add_face(&refs).unwrap();
        t.accumulate_normals();
        assert_eq!(t.verts[0].normal(), Some(vec3(0.0, 1.0, 0.0)));
        assert_eq!(t.verts[1].normal(), Some(vec3(0.0, 0.0, 1.0)));
        assert_eq!(t.verts[3].normal(), None);
    }
}
