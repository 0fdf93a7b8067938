//! Edge diagnostics for triangulated surfaces.
//!
//! The signed volume is only meaningful on a closed, consistently wound
//! surface. This module reports on both conditions without touching the
//! measured values; callers decide what to do with a bad report.

use std::collections::HashMap;

use super::types::{Surface, SurfaceError};

/// Undirected edge key `(min, max)`.
type EdgeKey = (usize, usize);

/// Incidence counts of one undirected edge, split by traversal direction.
#[derive(Clone, Copy, Debug, Default)]
struct EdgeUse {
    /// Traversed `min → max`.
    forward: usize,
    /// Traversed `max → min`.
    backward: usize,
}

/// Summary of edge incidences over the whole face list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct undirected edges with two different endpoints.
    pub edges: usize,
    /// Edges used by exactly one face.
    pub boundary_edges: usize,
    /// Edges used by three or more faces.
    pub non_manifold_edges: usize,
    /// Two-face edges walked in the same direction by both faces.
    pub inconsistent_edges: usize,
    /// Face sides whose endpoints coincide (skipped above).
    pub degenerate_edges: usize,
}

impl EdgeReport {
    /// Every edge is shared by exactly two faces.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    /// No two-face edge contradicts its neighbour's winding.
    #[inline]
    pub fn is_consistently_oriented(&self) -> bool {
        self.inconsistent_edges == 0
    }

    /// Closed and consistently wound: `total_volume` is the enclosed volume
    /// (up to sign).
    #[inline]
    pub fn volume_is_trustworthy(&self) -> bool {
        self.is_closed() && self.is_consistently_oriented()
    }
}

/// Count boundary, non-manifold and inconsistently wound edges.
pub fn edge_report(surface: &Surface) -> Result<EdgeReport, SurfaceError> {
    surface.validate()?;
    let mut uses: HashMap<EdgeKey, EdgeUse> = HashMap::with_capacity(surface.num_faces() * 3 / 2);
    let mut report = EdgeReport::default();
    for &[a, b, c] in surface.faces() {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            if p == q {
                report.degenerate_edges += 1;
                continue;
            }
            let entry = uses.entry((p.min(q), p.max(q))).or_default();
            if p < q {
                entry.forward += 1;
            } else {
                entry.backward += 1;
            }
        }
    }
    report.edges = uses.len();
    for u in uses.values() {
        match u.forward + u.backward {
            1 => report.boundary_edges += 1,
            2 => {
                if u.forward != 1 {
                    report.inconsistent_edges += 1;
                }
            }
            _ => report.non_manifold_edges += 1,
        }
    }
    Ok(report)
}

impl Surface {
    /// See [`edge_report`].
    pub fn edge_report(&self) -> Result<EdgeReport, SurfaceError> {
        edge_report(self)
    }
}
