//! Closed reference surfaces with outward winding.
//!
//! Purpose
//! - Known-answer meshes for tests, benches and the CLI `demo` command.
//! - Every shape is closed and consistently wound so that `total_volume`
//!   equals the enclosed volume.

use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::geom3::{Face, Surface, Vertex};

/// Error for shape parameters that cannot produce a closed surface.
#[derive(Debug)]
pub enum ShapeError {
    InvalidParams { reason: String },
}

impl ShapeError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid shape params: {reason}"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Corner tetrahedron `(0,0,0), (1,0,0), (0,1,0), (0,0,1)`; volume 1/6.
pub fn unit_tetrahedron() -> Surface {
    let v = vec![
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(0.0, 1.0, 0.0),
        Vertex::new(0.0, 0.0, 1.0),
    ];
    let f = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
    Surface::new(v, f)
}

/// Cube `[0,1]^3`; vertex `i` sits at `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`.
pub fn unit_cube() -> Surface {
    let v = (0..8)
        .map(|i: usize| Vertex::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
        .collect();
    // Quads listed counterclockwise seen from outside.
    let quads = [
        [0, 2, 3, 1],
        [4, 5, 7, 6],
        [0, 1, 5, 4],
        [2, 6, 7, 3],
        [0, 4, 6, 2],
        [1, 3, 7, 5],
    ];
    let mut f = Vec::with_capacity(12);
    for [a, b, c, d] in quads {
        f.push([a, b, c]);
        f.push([a, c, d]);
    }
    Surface::new(v, f)
}

/// Regular octahedron with vertices at distance `radius` on the axes.
pub fn octahedron(radius: f64) -> Surface {
    let r = radius;
    // +x, -x, +y, -y, +z, -z
    let v = vec![
        Vertex::new(r, 0.0, 0.0),
        Vertex::new(-r, 0.0, 0.0),
        Vertex::new(0.0, r, 0.0),
        Vertex::new(0.0, -r, 0.0),
        Vertex::new(0.0, 0.0, r),
        Vertex::new(0.0, 0.0, -r),
    ];
    let mut f: Vec<Face> = Vec::with_capacity(8);
    for octant in 0..8usize {
        let (xi, yi, zi) = (octant & 1, (octant >> 1) & 1, (octant >> 2) & 1);
        let (x, y, z) = (xi, 2 + yi, 4 + zi);
        // Odd number of negative axes flips the orientation of (x, y, z).
        if (xi + yi + zi) % 2 == 0 {
            f.push([x, y, z]);
        } else {
            f.push([x, z, y]);
        }
    }
    Surface::new(v, f)
}

/// Latitude/longitude sphere: two poles plus `stacks - 1` rings of `slices`
/// vertices each.
pub fn uv_sphere(radius: f64, stacks: usize, slices: usize) -> Result<Surface, ShapeError> {
    if stacks < 2 {
        return Err(ShapeError::invalid(format!("stacks must be >= 2, got {stacks}")));
    }
    if slices < 3 {
        return Err(ShapeError::invalid(format!("slices must be >= 3, got {slices}")));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(ShapeError::invalid(format!("radius must be positive, got {radius}")));
    }
    let rings = stacks - 1;
    let mut v = Vec::with_capacity(2 + rings * slices);
    v.push(Vertex::new(0.0, 0.0, radius));
    for k in 1..stacks {
        let theta = PI * k as f64 / stacks as f64;
        for j in 0..slices {
            let phi = TAU * j as f64 / slices as f64;
            v.push(
                radius
                    * Vertex::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()),
            );
        }
    }
    let south = v.len();
    v.push(Vertex::new(0.0, 0.0, -radius));

    let ring = |k: usize, j: usize| 1 + k * slices + j % slices;
    let mut f: Vec<Face> = Vec::with_capacity(2 * slices * rings);
    for j in 0..slices {
        f.push([0, ring(0, j), ring(0, j + 1)]);
    }
    for k in 0..rings - 1 {
        for j in 0..slices {
            let (a, b, c, d) = (ring(k, j), ring(k + 1, j), ring(k + 1, j + 1), ring(k, j + 1));
            f.push([a, b, c]);
            f.push([a, c, d]);
        }
    }
    for j in 0..slices {
        f.push([ring(rings - 1, j), south, ring(rings - 1, j + 1)]);
    }
    Ok(Surface::new(v, f))
}
