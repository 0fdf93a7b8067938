//! Per-triangle measures: Heron area and signed origin-tetrahedron volume.

use super::types::Vertex;

/// Area of the triangle `(v0, v1, v2)` via Heron's formula.
///
/// Degenerate triangles (coincident or collinear corners) can produce a tiny
/// negative radicand through cancellation; it is clamped to zero, so the result
/// is always finite and `>= 0` for finite input.
#[inline]
pub fn triangle_area(v0: Vertex, v1: Vertex, v2: Vertex) -> f64 {
    let a = (v1 - v0).norm();
    let b = (v2 - v0).norm();
    let c = (v2 - v1).norm();
    let s = 0.5 * (a + b + c);
    let radicand = s * (s - a) * (s - b) * (s - c);
    radicand.max(0.0).sqrt()
}

/// Signed volume of the tetrahedron `(0, v0, v1, v2)`: `((v0 × v1) · v2) / 6`.
///
/// Positive when `(v0, v1, v2)` winds counterclockwise seen from outside the
/// origin's side. Summed over a consistently oriented closed surface this
/// gives the enclosed volume.
#[inline]
pub fn triangle_volume(v0: Vertex, v1: Vertex, v2: Vertex) -> f64 {
    ((v0.y * v1.z - v0.z * v1.y) * v2.x
        + (v0.z * v1.x - v0.x * v1.z) * v2.y
        + (v0.x * v1.y - v0.y * v1.x) * v2.z)
        / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn v(x: f64, y: f64, z: f64) -> Vertex {
        Vertex::new(x, y, z)
    }

    #[test]
    fn unit_right_triangle_area() {
        let a = triangle_area(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0));
        assert!((a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn coincident_and_collinear_corners_give_zero() {
        let p = v(0.3, -1.2, 2.5);
        assert_eq!(triangle_area(p, p, v(1.0, 1.0, 1.0)), 0.0);
        assert_eq!(triangle_area(p, p, p), 0.0);
        // Collinear, spacing chosen to provoke cancellation.
        let q = v(0.1, 0.2, 0.3);
        let r = v(0.7, 1.4, 2.1);
        let area = triangle_area(q, (q + r) * 0.5, r);
        assert!(area.is_finite());
        assert!(area.abs() < 1e-6);
    }

    #[test]
    fn area_matches_cross_product_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let mut p = || {
                v(
                    rng.gen_range(-3.0..3.0),
                    rng.gen_range(-3.0..3.0),
                    rng.gen_range(-3.0..3.0),
                )
            };
            let (a, b, c) = (p(), p(), p());
            let expected = 0.5 * (b - a).cross(&(c - a)).norm();
            let heron = triangle_area(a, b, c);
            assert!((heron - expected).abs() < 1e-9 * (1.0 + expected));
        }
    }

    #[test]
    fn volume_is_triple_product_over_six() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let mut p = || {
                v(
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                )
            };
            let (a, b, c) = (p(), p(), p());
            let expected = a.cross(&b).dot(&c) / 6.0;
            assert!((triangle_volume(a, b, c) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn volume_sign_follows_winding() {
        let (a, b, c) = (v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(0.0, 0.0, 1.0));
        let fwd = triangle_volume(a, b, c);
        assert!((fwd - 1.0 / 6.0).abs() < 1e-15);
        assert_eq!(triangle_volume(c, b, a), -fwd);
        // Faces through the origin contribute nothing.
        assert_eq!(triangle_volume(v(0.0, 0.0, 0.0), b, c), 0.0);
    }
}
