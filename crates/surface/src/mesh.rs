//! Seams to external mesh collaborators (loaders and renderers).
//!
//! The core never parses or renders meshes. A `MeshSource` hands over the
//! vertex/face sequences plus an opaque payload; a `ScalarSink` attaches a
//! scalar array to that payload for display. Both are black boxes here.

use std::fmt;

use crate::geom3::{triangle_area_list, vertex_area_list, Face, Surface, SurfaceError, Vertex};

/// Loader output: geometry for the core, payload passed through untouched.
#[derive(Clone, Debug)]
pub struct LoadedMesh<P> {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub payload: P,
}

/// External mesh loader.
pub trait MeshSource {
    type Payload;
    type Error;

    fn load(self) -> Result<LoadedMesh<Self::Payload>, Self::Error>;
}

/// Where a scalar array lives on the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScalarLocation {
    #[default]
    Faces,
    Vertices,
}

/// External "attach scalar array to mesh" operation.
///
/// `scalars.len()` equals the face count for `Faces` and the vertex count for
/// `Vertices`.
pub trait ScalarSink<P> {
    type Error;

    fn attach(
        &mut self,
        payload: P,
        name: &str,
        scalars: &[f64],
        location: ScalarLocation,
    ) -> Result<P, Self::Error>;
}

/// Failure while exporting scalars: either the geometry or the sink.
#[derive(Debug)]
pub enum ExportError<E> {
    Surface(SurfaceError),
    Sink(E),
}

impl<E: fmt::Display> fmt::Display for ExportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "surface: {e}"),
            Self::Sink(e) => write!(f, "scalar sink: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ExportError<E> {}

impl<E> From<SurfaceError> for ExportError<E> {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

/// Name under which area scalars are attached.
pub const AREA_SCALARS: &str = "area";

impl Surface {
    /// Load geometry from `source`; the payload is returned unmodified.
    pub fn from_source<S: MeshSource>(source: S) -> Result<(Self, S::Payload), S::Error> {
        let LoadedMesh {
            vertices,
            faces,
            payload,
        } = source.load()?;
        Ok((Self::new(vertices, faces), payload))
    }

    /// Area scalars for `location`: face areas, or per-vertex area shares.
    pub fn area_scalars(&self, location: ScalarLocation) -> Result<Vec<f64>, SurfaceError> {
        match location {
            ScalarLocation::Faces => triangle_area_list(self),
            ScalarLocation::Vertices => vertex_area_list(self),
        }
    }

    /// Attach the area scalars to `payload` through `sink`.
    pub fn export_area_scalars<P, K: ScalarSink<P>>(
        &self,
        payload: P,
        sink: &mut K,
        location: ScalarLocation,
    ) -> Result<P, ExportError<K::Error>> {
        let scalars = self.area_scalars(location)?;
        sink.attach(payload, AREA_SCALARS, &scalars, location)
            .map_err(ExportError::Sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes;

    /// Loader that tags its payload so pass-through can be checked.
    struct Fixed(Surface);

    impl MeshSource for Fixed {
        type Payload = &'static str;
        type Error = std::convert::Infallible;

        fn load(self) -> Result<LoadedMesh<Self::Payload>, Self::Error> {
            Ok(LoadedMesh {
                vertices: self.0.vertices().to_vec(),
                faces: self.0.faces().to_vec(),
                payload: "opaque",
            })
        }
    }

    /// Records what it was handed.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Vec<f64>, ScalarLocation)>,
    }

    impl ScalarSink<Vec<u8>> for Recorder {
        type Error = String;

        fn attach(
            &mut self,
            mut payload: Vec<u8>,
            name: &str,
            scalars: &[f64],
            location: ScalarLocation,
        ) -> Result<Vec<u8>, Self::Error> {
            if name.is_empty() {
                return Err("empty name".into());
            }
            self.seen.push((name.to_string(), scalars.to_vec(), location));
            payload.push(scalars.len() as u8);
            Ok(payload)
        }
    }

    #[test]
    fn from_source_passes_payload_through() {
        let (s, payload) = Surface::from_source(Fixed(shapes::unit_cube())).unwrap();
        assert_eq!(payload, "opaque");
        assert_eq!(s, shapes::unit_cube());
    }

    #[test]
    fn export_on_faces_and_vertices() {
        let s = shapes::unit_tetrahedron();
        let mut sink = Recorder::default();
        let out = s
            .export_area_scalars(Vec::new(), &mut sink, ScalarLocation::Faces)
            .unwrap();
        let out = s
            .export_area_scalars(out, &mut sink, ScalarLocation::Vertices)
            .unwrap();
        assert_eq!(out, vec![4, 4]);
        let (name, faces, loc) = &sink.seen[0];
        assert_eq!((name.as_str(), *loc), (AREA_SCALARS, ScalarLocation::Faces));
        assert_eq!(faces, &s.triangle_area_list().unwrap());
        let per_vertex: f64 = sink.seen[1].1.iter().sum();
        assert!((per_vertex - s.area().unwrap()).abs() < 1e-12);
    }

    #[test]
    fn export_surfaces_geometry_errors_before_sink() {
        let bad = Surface::new(vec![Vertex::zeros()], vec![[0, 0, 3]]);
        let mut sink = Recorder::default();
        let err = bad
            .export_area_scalars(Vec::new(), &mut sink, ScalarLocation::Faces)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::Surface(SurfaceError::IndexOutOfRange { index: 3, .. })
        ));
        assert!(sink.seen.is_empty());
    }
}
