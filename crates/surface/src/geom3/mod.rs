//! Triangulated surfaces in R^3: areas and signed enclosed volumes.
//!
//! Purpose
//! - Measure a surface given as an ordered vertex sequence and an ordered
//!   list of index triples: per-face areas, per-face signed volumes, totals.
//! - Keep everything pure: queries allocate fresh results and never mutate the
//!   surface.
//!
//! Conventions
//! - Area uses Heron's formula with the radicand clamped at zero.
//! - Volume sums signed origin tetrahedra `((v0 × v1) · v2) / 6`; the sign
//!   follows face winding and is never made absolute. Use `edge_report` to
//!   check whether a surface is closed and consistently wound.
//! - Out-of-range face indices fail with `SurfaceError::IndexOutOfRange`.
//!   Empty surfaces measure as zero.

mod cfg;
mod measure;
pub mod topology;
mod triangle;
mod types;

pub use measure::{
    measure, measure_with, total_area, total_volume, triangle_area_list, triangle_volume_list,
    vertex_area_list, MeasureCfg, Measurement,
};
pub use topology::{edge_report, EdgeReport};
pub use triangle::{triangle_area, triangle_volume};
pub use types::{Face, Surface, SurfaceError, Vertex};

#[cfg(test)]
mod tests;
