//! Curated internal API for the CLI and experiments (UNSTABLE).
//!
//! Not a public API. Prefer these re-exports for consistency across callers;
//! breaking changes are allowed.

// Geometry
pub use crate::geom3::{
    edge_report, measure, measure_with, total_area, total_volume, triangle_area,
    triangle_area_list, triangle_volume, triangle_volume_list, vertex_area_list, EdgeReport,
    MeasureCfg, Measurement,
};
// Collaborator seams
pub use crate::mesh::{
    ExportError, LoadedMesh, MeshSource, ScalarLocation, ScalarSink, AREA_SCALARS,
};
// Reference shapes
pub use crate::shapes::{octahedron, unit_cube, unit_tetrahedron, uv_sphere, ShapeError};

/// Surface area and signed volume, formatted the way the CLI prints them.
pub fn summary_line(m: &Measurement) -> String {
    format!(
        "The surface area and volume are {:.2} and {:.2} respectively.",
        m.area, m.volume
    )
}
