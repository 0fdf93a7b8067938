//! Surface-level measures: per-face lists and totals.
//!
//! Every function returns a freshly built value; nothing is cached on the
//! `Surface`. Faces are resolved in order and the first out-of-range index
//! aborts the whole measurement.

use super::cfg::DEGENERATE_AREA_EPS;
use super::triangle::{triangle_area, triangle_volume};
use super::types::{Surface, SurfaceError};

/// Measurement configuration (diagnostic tolerances only).
#[derive(Clone, Copy, Debug)]
pub struct MeasureCfg {
    /// Faces with `area <= eps_degenerate` count as degenerate.
    pub eps_degenerate: f64,
}

impl Default for MeasureCfg {
    fn default() -> Self {
        Self {
            eps_degenerate: DEGENERATE_AREA_EPS,
        }
    }
}

/// Totals of one validated pass over the face list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub faces: usize,
    pub vertices: usize,
    pub area: f64,
    pub volume: f64,
    pub degenerate_faces: usize,
}

/// Heron area of every face, in face order.
pub fn triangle_area_list(surface: &Surface) -> Result<Vec<f64>, SurfaceError> {
    surface
        .triangles()
        .map(|tri| tri.map(|[a, b, c]| triangle_area(a, b, c)))
        .collect()
}

/// Signed origin-tetrahedron volume of every face, in face order.
pub fn triangle_volume_list(surface: &Surface) -> Result<Vec<f64>, SurfaceError> {
    surface
        .triangles()
        .map(|tri| tri.map(|[a, b, c]| triangle_volume(a, b, c)))
        .collect()
}

/// Total surface area; `0.0` for an empty face list.
pub fn total_area(surface: &Surface) -> Result<f64, SurfaceError> {
    Ok(triangle_area_list(surface)?.iter().sum())
}

/// Total signed volume. Negative for inward winding; garbage for mixed winding.
pub fn total_volume(surface: &Surface) -> Result<f64, SurfaceError> {
    let mut total = 0.0;
    for tri in surface.triangles() {
        let [a, b, c] = tri?;
        total += triangle_volume(a, b, c);
    }
    Ok(total)
}

/// Per-vertex area: each face hands a third of its area to each corner slot.
///
/// A face listing the same index twice gives that vertex two shares. Unused
/// vertices get `0.0`. The entries sum to `total_area`.
pub fn vertex_area_list(surface: &Surface) -> Result<Vec<f64>, SurfaceError> {
    let mut out = vec![0.0; surface.num_vertices()];
    for (face, tri) in surface.triangles().enumerate() {
        let [a, b, c] = tri?;
        let share = triangle_area(a, b, c) / 3.0;
        for &idx in &surface.faces()[face] {
            out[idx] += share;
        }
    }
    Ok(out)
}

/// Area and volume in one pass with default tolerances.
pub fn measure(surface: &Surface) -> Result<Measurement, SurfaceError> {
    measure_with(surface, MeasureCfg::default())
}

/// Area and volume in one pass.
pub fn measure_with(surface: &Surface, cfg: MeasureCfg) -> Result<Measurement, SurfaceError> {
    let mut area = 0.0;
    let mut volume = 0.0;
    let mut degenerate_faces = 0;
    for tri in surface.triangles() {
        let [a, b, c] = tri?;
        let t = triangle_area(a, b, c);
        if t <= cfg.eps_degenerate {
            degenerate_faces += 1;
        }
        area += t;
        volume += triangle_volume(a, b, c);
    }
    Ok(Measurement {
        faces: surface.num_faces(),
        vertices: surface.num_vertices(),
        area,
        volume,
        degenerate_faces,
    })
}

impl Surface {
    /// See [`triangle_area_list`].
    pub fn triangle_area_list(&self) -> Result<Vec<f64>, SurfaceError> {
        triangle_area_list(self)
    }

    /// See [`total_area`].
    pub fn area(&self) -> Result<f64, SurfaceError> {
        total_area(self)
    }

    /// See [`total_volume`].
    pub fn volume(&self) -> Result<f64, SurfaceError> {
        total_volume(self)
    }
}
