use super::*;
use crate::shapes;
use proptest::prelude::*;

fn v(x: f64, y: f64, z: f64) -> Vertex {
    Vertex::new(x, y, z)
}

#[test]
fn tetrahedron_faces_sum_to_one_sixth() {
    let t = shapes::unit_tetrahedron();
    let per_face: f64 = triangle_volume_list(&t).unwrap().iter().sum();
    assert!((per_face - 1.0 / 6.0).abs() < 1e-15);
    assert!((total_volume(&t).unwrap() - 1.0 / 6.0).abs() < 1e-15);
    // Three unit right triangles plus the equilateral face of side sqrt(2).
    let expected_area = 1.5 + 3f64.sqrt() / 2.0;
    assert!((total_area(&t).unwrap() - expected_area).abs() < 1e-12);
}

#[test]
fn empty_surfaces_measure_zero() {
    for s in [
        Surface::default(),
        Surface::new(vec![v(1.0, 2.0, 3.0)], Vec::new()),
    ] {
        assert_eq!(total_area(&s).unwrap(), 0.0);
        assert_eq!(total_volume(&s).unwrap(), 0.0);
        assert!(triangle_area_list(&s).unwrap().is_empty());
        let m = measure(&s).unwrap();
        assert_eq!((m.faces, m.area, m.volume), (0, 0.0, 0.0));
    }
}

#[test]
fn index_one_past_the_end_fails_everywhere() {
    let t = shapes::unit_tetrahedron();
    let mut faces = t.faces().to_vec();
    faces.push([1, 4, 2]);
    let s = Surface::new(t.vertices().to_vec(), faces);
    let expected = SurfaceError::IndexOutOfRange {
        face: 4,
        index: 4,
        vertex_count: 4,
    };
    assert_eq!(triangle_area_list(&s).unwrap_err(), expected);
    assert_eq!(triangle_volume_list(&s).unwrap_err(), expected);
    assert_eq!(total_area(&s).unwrap_err(), expected);
    assert_eq!(total_volume(&s).unwrap_err(), expected);
    assert_eq!(vertex_area_list(&s).unwrap_err(), expected);
    assert_eq!(measure(&s).unwrap_err(), expected);
}

#[test]
fn no_vertices_with_faces_is_out_of_range() {
    let s = Surface::new(Vec::new(), vec![[0, 0, 0]]);
    assert!(matches!(
        s.area(),
        Err(SurfaceError::IndexOutOfRange {
            face: 0,
            index: 0,
            vertex_count: 0
        })
    ));
}

#[test]
fn degenerate_faces_are_counted_not_rejected() {
    let verts = vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(2.0, 0.0, 0.0)];
    let s = Surface::new(verts, vec![[0, 1, 2], [0, 0, 1], [1, 1, 1]]);
    let m = measure(&s).unwrap();
    assert_eq!(m.degenerate_faces, 3);
    assert!(m.area.abs() < 1e-6);
    let strict = measure_with(&s, MeasureCfg { eps_degenerate: -1.0 }).unwrap();
    assert_eq!(strict.degenerate_faces, 0);
}

#[test]
fn area_list_tracks_face_order() {
    let cube = shapes::unit_cube();
    let mut verts = cube.vertices().to_vec();
    // Stretch one corner so face areas differ.
    verts[7] = v(2.0, 3.0, 1.5);
    let s = Surface::new(verts, cube.faces().to_vec());
    let areas = triangle_area_list(&s).unwrap();
    assert_eq!(areas.len(), s.num_faces());
    for (i, area) in areas.iter().enumerate() {
        let [a, b, c] = s.triangle(i).unwrap();
        assert_eq!(*area, triangle_area(a, b, c));
    }
}

#[test]
fn vertex_areas_sum_to_total() {
    let s = shapes::uv_sphere(1.0, 6, 9).unwrap();
    let per_vertex = vertex_area_list(&s).unwrap();
    assert_eq!(per_vertex.len(), s.num_vertices());
    let sum: f64 = per_vertex.iter().sum();
    assert!((sum - total_area(&s).unwrap()).abs() < 1e-12);
}

#[test]
fn measure_matches_separate_totals() {
    let s = shapes::octahedron(0.7);
    let m = measure(&s).unwrap();
    assert_eq!((m.faces, m.vertices), (8, 6));
    assert!((m.area - s.area().unwrap()).abs() < 1e-12);
    assert!((m.volume - s.volume().unwrap()).abs() < 1e-12);
}

fn coord() -> impl Strategy<Value = f64> {
    -10.0..10.0f64
}

fn vertex() -> impl Strategy<Value = Vertex> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vertex::new(x, y, z))
}

/// Random (not necessarily closed) surface with valid indices.
fn surface() -> impl Strategy<Value = Surface> {
    prop::collection::vec(vertex(), 3..24).prop_flat_map(|verts| {
        let n = verts.len();
        let face = [0..n, 0..n, 0..n];
        prop::collection::vec(face, 0..40)
            .prop_map(move |faces| Surface::new(verts.clone(), faces))
    })
}

proptest! {
    #[test]
    fn total_area_ignores_face_order(s in surface(), seed in any::<u64>()) {
        use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
        let mut faces = s.faces().to_vec();
        faces.shuffle(&mut StdRng::seed_from_u64(seed));
        let shuffled = Surface::new(s.vertices().to_vec(), faces);
        let a = total_area(&s).unwrap();
        let b = total_area(&shuffled).unwrap();
        prop_assert!(a >= 0.0);
        prop_assert!((a - b).abs() <= 1e-9 * (1.0 + a));
    }

    #[test]
    fn reversed_winding_negates_volume(s in surface()) {
        let fwd = total_volume(&s).unwrap();
        let rev = total_volume(&s.with_reversed_winding()).unwrap();
        let scale: f64 = triangle_volume_list(&s).unwrap().iter().map(|x| x.abs()).sum();
        prop_assert!((fwd + rev).abs() <= 1e-9 * (1.0 + scale));
        // Areas do not care about winding.
        prop_assert_eq!(
            triangle_area_list(&s).unwrap().len(),
            triangle_area_list(&s.with_reversed_winding()).unwrap().len()
        );
    }

    #[test]
    fn coincident_corners_have_zero_area(p in vertex(), q in vertex()) {
        prop_assert_eq!(triangle_area(p, p, q), 0.0);
        prop_assert_eq!(triangle_area(q, p, p), 0.0);
    }
}
