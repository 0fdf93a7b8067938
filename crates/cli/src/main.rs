mod mesh_io;
mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mesh_io::{write_vtk, MeshFile, VtkDocument, VtkSink};
use polars::prelude::{col, CsvWriter, DataFrame, IntoLazy, ParquetWriter, SerWriter};
use provenance::{write_sidecar, InputMesh, Payload};
use serde_json::{json, Value};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use surface::api::{
    edge_report, measure_with, octahedron, summary_line, triangle_area_list, triangle_volume_list,
    unit_cube, unit_tetrahedron, uv_sphere, EdgeReport, MeasureCfg, Measurement, ScalarLocation,
};
use surface::Surface;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Surface area and enclosed volume of triangulated meshes")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print counts, surface area and volume of a mesh (.vtk or .json)
    Measure {
        #[arg(long)]
        input: PathBuf,
        /// Optional JSON result file (a provenance sidecar is written next to it)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Faces with area at or below this are reported as degenerate
        #[arg(long, default_value_t = MeasureCfg::default().eps_degenerate)]
        eps_degenerate: f64,
    },
    /// Write the per-face area/volume table (.csv or .parquet)
    Areas {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the mesh as legacy VTK with an `area` scalar array attached
    Color {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = On::Faces)]
        on: On,
    },
    /// Measure a built-in closed shape and compare against its exact values
    Demo {
        #[arg(long, value_enum)]
        shape: Shape,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
        #[arg(long, default_value_t = 32)]
        stacks: usize,
        #[arg(long, default_value_t = 64)]
        slices: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum On {
    Faces,
    Vertices,
}

impl From<On> for ScalarLocation {
    fn from(on: On) -> Self {
        match on {
            On::Faces => ScalarLocation::Faces,
            On::Vertices => ScalarLocation::Vertices,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Tetrahedron,
    Cube,
    Octahedron,
    Sphere,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Measure {
            input,
            out,
            eps_degenerate,
        } => {
            let cfg = MeasureCfg { eps_degenerate };
            measure_cmd(&input, out.as_deref(), cfg, cmd.tag).map(|_| ())
        }
        Action::Areas { input, out } => areas_cmd(&input, &out, cmd.tag),
        Action::Color { input, out, on } => color_cmd(&input, &out, on.into(), cmd.tag),
        Action::Demo {
            shape,
            radius,
            stacks,
            slices,
        } => demo(shape, radius, stacks, slices),
        Action::Report => report(cmd.tag),
    }
}

fn load(input: &Path) -> Result<(Surface, VtkDocument)> {
    Surface::from_source(MeshFile(input.to_path_buf()))
        .with_context(|| format!("loading {}", input.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Warn when the signed volume cannot be read as an enclosed volume.
fn check_topology(surface: &Surface) -> Result<EdgeReport> {
    let edges = edge_report(surface)?;
    if !edges.is_closed() {
        tracing::warn!(
            boundary = edges.boundary_edges,
            non_manifold = edges.non_manifold_edges,
            "surface_not_closed"
        );
    }
    if !edges.is_consistently_oriented() {
        tracing::warn!(
            inconsistent = edges.inconsistent_edges,
            "inconsistent_winding"
        );
    }
    Ok(edges)
}

fn measurement_json(m: &Measurement, edges: &EdgeReport) -> Value {
    json!({
        "faces": m.faces,
        "vertices": m.vertices,
        "area": m.area,
        "volume": m.volume,
        "degenerate_faces": m.degenerate_faces,
        "edges": {
            "total": edges.edges,
            "boundary": edges.boundary_edges,
            "non_manifold": edges.non_manifold_edges,
            "inconsistent": edges.inconsistent_edges,
            "degenerate": edges.degenerate_edges
        }
    })
}

fn measure_cmd(
    input: &Path,
    out: Option<&Path>,
    cfg: MeasureCfg,
    tag: Option<String>,
) -> Result<Measurement> {
    tracing::info!(input = %input.display(), tag = ?tag, "measure");
    let (surface, _) = load(input)?;
    let m = measure_with(&surface, cfg)
        .with_context(|| format!("measuring {}", input.display()))?;
    let edges = check_topology(&surface)?;
    if m.degenerate_faces > 0 {
        tracing::warn!(degenerate_faces = m.degenerate_faces, "degenerate_faces");
    }
    println!("faces={} vertices={}", m.faces, m.vertices);
    println!("{}", summary_line(&m));

    if let Some(out) = out {
        ensure_parent(out)?;
        let doc = measurement_json(&m, &edges);
        fs::write(out, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {}", out.display()))?;
        let payload = Payload::new("measure", InputMesh::new(input, &surface))
            .with_params(json!({ "eps_degenerate": cfg.eps_degenerate }))
            .with_tag(tag);
        write_sidecar(out, payload)?;
    }
    Ok(m)
}

/// One row per face: index triple, Heron area, signed volume.
fn area_table(surface: &Surface) -> Result<DataFrame> {
    let areas = triangle_area_list(surface)?;
    let volumes = triangle_volume_list(surface)?;
    let faces = surface.faces();
    let corner = |k: usize| faces.iter().map(|f| f[k] as u64).collect::<Vec<_>>();
    let df = polars::df!(
        "face" => (0..faces.len() as u64).collect::<Vec<_>>(),
        "i0" => corner(0),
        "i1" => corner(1),
        "i2" => corner(2),
        "area" => areas,
        "volume" => volumes
    )?;
    Ok(df)
}

fn areas_cmd(input: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "areas");
    let (surface, _) = load(input)?;
    let mut df = area_table(&surface)?;

    let stats = df
        .clone()
        .lazy()
        .select([
            col("area").sum().alias("total"),
            col("area").min().alias("min"),
            col("area").max().alias("max"),
            col("volume").sum().alias("volume"),
        ])
        .collect()?;
    let stat = |name: &str| -> Result<Option<f64>> { Ok(stats.column(name)?.f64()?.get(0)) };
    tracing::info!(
        rows = df.height(),
        total_area = ?stat("total")?,
        min_area = ?stat("min")?,
        max_area = ?stat("max")?,
        volume = ?stat("volume")?,
        "area_table"
    );

    ensure_parent(out)?;
    let ext = out
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => {
            let mut file =
                File::create(out).with_context(|| format!("creating {}", out.display()))?;
            CsvWriter::new(&mut file).finish(&mut df)?;
        }
        Some("parquet") => {
            let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
        _ => bail!(
            "unsupported table format for {} (expected .csv or .parquet)",
            out.display()
        ),
    }

    let payload = Payload::new("areas", InputMesh::new(input, &surface))
        .with_params(json!({ "rows": df.height() }))
        .with_tag(tag);
    write_sidecar(out, payload)?;
    Ok(())
}

fn color_cmd(input: &Path, out: &Path, location: ScalarLocation, tag: Option<String>) -> Result<()> {
    tracing::info!(
        input = %input.display(),
        out = %out.display(),
        location = ?location,
        "color"
    );
    let (surface, doc) = load(input)?;
    check_topology(&surface)?;
    let doc = surface
        .export_area_scalars(doc, &mut VtkSink, location)
        .with_context(|| format!("attaching area scalars to {}", input.display()))?;
    write_vtk(&doc, out)?;

    let payload = Payload::new("color", InputMesh::new(input, &surface))
        .with_params(json!({ "location": format!("{location:?}") }))
        .with_tag(tag);
    write_sidecar(out, payload)?;
    Ok(())
}

/// Built-in shape plus its exact (smooth, for the sphere) area and volume.
fn demo_shape(shape: Shape, radius: f64, stacks: usize, slices: usize) -> Result<(Surface, f64, f64)> {
    use std::f64::consts::PI;
    let r = radius;
    Ok(match shape {
        Shape::Tetrahedron => (unit_tetrahedron(), 1.5 + 3f64.sqrt() / 2.0, 1.0 / 6.0),
        Shape::Cube => (unit_cube(), 6.0, 1.0),
        Shape::Octahedron => (
            octahedron(r),
            4.0 * 3f64.sqrt() * r * r,
            4.0 / 3.0 * r * r * r,
        ),
        Shape::Sphere => (
            uv_sphere(r, stacks, slices)?,
            4.0 * PI * r * r,
            4.0 / 3.0 * PI * r * r * r,
        ),
    })
}

fn demo(shape: Shape, radius: f64, stacks: usize, slices: usize) -> Result<()> {
    tracing::info!(shape = ?shape, radius, stacks, slices, "demo");
    let (surface, exact_area, exact_volume) = demo_shape(shape, radius, stacks, slices)?;
    let m = measure_with(&surface, MeasureCfg::default())?;
    check_topology(&surface)?;
    println!("shape={shape:?} faces={} vertices={}", m.faces, m.vertices);
    println!("{}", summary_line(&m));
    println!(
        "rel_error_area={:.3e} rel_error_volume={:.3e}",
        (m.area - exact_area).abs() / exact_area,
        (m.volume - exact_volume).abs() / exact_volume
    );
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::code_rev(),
        "surface_version": surface::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
