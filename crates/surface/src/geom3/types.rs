//! Core 3D types: triangulated surfaces and their error type.

use std::fmt;

use nalgebra::Vector3;

/// Vertex position in R^3.
pub type Vertex = Vector3<f64>;

/// Triangle given as three indices into the vertex sequence.
pub type Face = [usize; 3];

/// Errors surfaced while resolving faces against the vertex sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// Face `face` references `index`, but only `vertex_count` vertices exist.
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    /// Face position `face` was requested, but only `face_count` faces exist.
    FaceOutOfRange { face: usize, face_count: usize },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {face} references vertex {index}, but the surface has {vertex_count} vertices"
            ),
            Self::FaceOutOfRange { face, face_count } => {
                write!(f, "face {face} requested, but the surface has {face_count} faces")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Triangulated surface: an ordered vertex sequence plus an ordered face list.
///
/// Invariants:
/// - Both sequences are fixed after construction; every query is a pure read.
/// - Face indices are *not* validated here. Raw loader output is accepted as-is
///   and each measurement fails with `SurfaceError::IndexOutOfRange` on the
///   first face that points past the vertex sequence.
/// - Degenerate faces (repeated indices, collinear corners) are valid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Surface {
    #[inline]
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Resolve face `face` into its three corner positions.
    ///
    /// Both the face position and its vertex indices are checked.
    pub fn triangle(&self, face: usize) -> Result<[Vertex; 3], SurfaceError> {
        let &[a, b, c] = self.faces.get(face).ok_or(SurfaceError::FaceOutOfRange {
            face,
            face_count: self.faces.len(),
        })?;
        Ok([
            self.vertex(face, a)?,
            self.vertex(face, b)?,
            self.vertex(face, c)?,
        ])
    }

    /// Iterate resolved triangles in face order.
    pub fn triangles(&self) -> impl Iterator<Item = Result<[Vertex; 3], SurfaceError>> + '_ {
        (0..self.faces.len()).map(move |f| self.triangle(f))
    }

    /// Same vertices, every face `[a, b, c]` listed as `[c, b, a]`.
    pub fn with_reversed_winding(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            faces: self.faces.iter().map(|&[a, b, c]| [c, b, a]).collect(),
        }
    }

    /// Check every face index once; `Ok(())` means all measurements succeed.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        for (face, tri) in self.faces.iter().enumerate() {
            for &index in tri {
                self.vertex(face, index)?;
            }
        }
        Ok(())
    }

    #[inline]
    fn vertex(&self, face: usize, index: usize) -> Result<Vertex, SurfaceError> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(SurfaceError::IndexOutOfRange {
                face,
                index,
                vertex_count: self.vertices.len(),
            })
    }
}
