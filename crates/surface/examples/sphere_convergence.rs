//! UV-sphere convergence probe for the area and volume sums.
//!
//! Prints the relative error of the inscribed polyhedron against `4πr²` and
//! `4πr³/3` as the resolution doubles. Both errors should drop by roughly a
//! factor of four per step.

use std::f64::consts::PI;
use std::time::Instant;

use surface::geom3::measure;
use surface::shapes::uv_sphere;

fn main() {
    let r = 1.0;
    let exact_area = 4.0 * PI * r * r;
    let exact_volume = 4.0 / 3.0 * PI * r * r * r;
    for stacks in [8usize, 16, 32, 64, 128] {
        let s = uv_sphere(r, stacks, 2 * stacks).expect("valid sphere resolution");
        let start = Instant::now();
        let m = measure(&s).expect("sphere indices are in range");
        let elapsed = start.elapsed().as_secs_f64() * 1e3;
        println!(
            "stacks={stacks} faces={} area_err={:.3e} volume_err={:.3e} time_ms={elapsed:.3}",
            m.faces,
            (exact_area - m.area) / exact_area,
            (exact_volume - m.volume) / exact_volume,
        );
    }
}
