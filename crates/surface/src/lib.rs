//! Surface area and enclosed volume of triangulated meshes.
//!
//! Layout
//! - `geom3`: surfaces, per-face measures, totals, edge diagnostics.
//! - `mesh`: seams to external loaders and scalar-attaching renderers.
//! - `shapes`: closed reference meshes with known answers.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; breaking
//!   changes are fine when they improve clarity.

pub mod api;
pub mod geom3;
pub mod mesh;
pub mod shapes;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom3::{Face, Surface, SurfaceError, Vertex};
pub use nalgebra::Vector3 as Vec3;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom3::{
        edge_report, measure, total_area, total_volume, triangle_area, triangle_area_list,
        triangle_volume, EdgeReport, Face, Measurement, Surface, SurfaceError, Vertex,
    };
    pub use crate::mesh::{LoadedMesh, MeshSource, ScalarLocation, ScalarSink};
    pub use nalgebra::Vector3 as Vec3;
}
