//! Mesh files on disk: legacy ASCII VTK polydata and a small JSON format.
//!
//! The geometry core only sees vertices and faces. The whole VTK document is
//! carried along as the opaque payload so it can be written back out with an
//! `area` scalar array attached (`VtkSink`).

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use surface::api::{LoadedMesh, MeshSource, ScalarLocation, ScalarSink};
use surface::{Face, Vertex};

/// Named scalar array attached to cells or points.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarArray {
    pub name: String,
    pub values: Vec<f64>,
}

/// In-memory legacy VTK `POLYDATA` document restricted to triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VtkDocument {
    pub title: String,
    pub points: Vec<Vertex>,
    pub polygons: Vec<Face>,
    pub cell_data: Vec<ScalarArray>,
    pub point_data: Vec<ScalarArray>,
}

impl VtkDocument {
    pub fn from_geometry(title: impl Into<String>, points: Vec<Vertex>, polygons: Vec<Face>) -> Self {
        Self {
            title: title.into(),
            points,
            polygons,
            ..Self::default()
        }
    }
}

/// JSON mesh: `{"vertices": [[x,y,z],...], "faces": [[i,j,k],...]}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonMesh {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[usize; 3]>,
}

/// Mesh file selected by extension (`.vtk` or `.json`).
pub struct MeshFile(pub PathBuf);

impl MeshSource for MeshFile {
    type Payload = VtkDocument;
    type Error = anyhow::Error;

    fn load(self) -> Result<LoadedMesh<VtkDocument>> {
        let path = self.0;
        let doc = match extension(&path).as_deref() {
            Some("vtk") => read_vtk(&path)?,
            Some("json") => read_json(&path)?,
            _ => bail!(
                "unsupported mesh format for {} (expected .vtk or .json)",
                path.display()
            ),
        };
        tracing::debug!(
            path = %path.display(),
            points = doc.points.len(),
            polygons = doc.polygons.len(),
            "mesh_loaded"
        );
        Ok(LoadedMesh {
            vertices: doc.points.clone(),
            faces: doc.polygons.clone(),
            payload: doc,
        })
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn read_json(path: &Path) -> Result<VtkDocument> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mesh: JsonMesh =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    Ok(VtkDocument::from_geometry(
        title,
        mesh.vertices
            .iter()
            .map(|&[x, y, z]| Vertex::new(x, y, z))
            .collect(),
        mesh.faces,
    ))
}

pub fn read_vtk(path: &Path) -> Result<VtkDocument> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_vtk(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_vtk(doc: &VtkDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let text = render_vtk(doc).context("rendering VTK text")?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

/// Whitespace tokens tagged with their 1-based line number.
struct Cursor<'a> {
    toks: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<(usize, &'a str)> {
        self.toks.get(self.pos).copied()
    }

    fn remaining(&self) -> usize {
        self.toks.len() - self.pos
    }

    fn next(&mut self, what: &str) -> Result<(usize, &'a str)> {
        let tok = self
            .peek()
            .ok_or_else(|| anyhow!("unexpected end of file while reading {what}"))?;
        self.pos += 1;
        Ok(tok)
    }

    fn parse<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let (line, tok) = self.next(what)?;
        tok.parse::<T>()
            .map_err(|e| anyhow!("line {line}: invalid {what} {tok:?}: {e}"))
    }

    fn keyword(&mut self, expected: &str) -> Result<()> {
        let (line, tok) = self.next(expected)?;
        if !tok.eq_ignore_ascii_case(expected) {
            bail!("line {line}: expected {expected}, found {tok:?}");
        }
        Ok(())
    }
}

pub fn parse_vtk(text: &str) -> Result<VtkDocument> {
    let mut lines = text.lines();
    let magic = lines.next().unwrap_or_default();
    if !magic.trim_start().to_ascii_lowercase().starts_with("# vtk") {
        bail!("line 1: missing '# vtk DataFile' header");
    }
    let title = lines.next().unwrap_or_default().trim().to_string();
    let encoding = lines.next().unwrap_or_default().trim();
    if !encoding.eq_ignore_ascii_case("ASCII") {
        bail!("line 3: only ASCII legacy VTK is supported, found {encoding:?}");
    }
    let toks = lines
        .enumerate()
        .flat_map(|(i, l)| l.split_whitespace().map(move |t| (i + 4, t)))
        .collect();
    let mut cur = Cursor { toks, pos: 0 };
    cur.keyword("DATASET")?;
    cur.keyword("POLYDATA")?;

    let mut doc = VtkDocument {
        title,
        ..VtkDocument::default()
    };
    let mut saw_points = false;
    let mut saw_polygons = false;
    while let Some((line, kw)) = cur.peek() {
        cur.pos += 1;
        match kw.to_ascii_uppercase().as_str() {
            "POINTS" => {
                if saw_points {
                    bail!("line {line}: repeated POINTS section");
                }
                let n: usize = cur.parse("point count")?;
                cur.next("point data type")?;
                // Header counts are untrusted; never reserve more than the file holds.
                doc.points.reserve(n.min(cur.remaining() / 3));
                for _ in 0..n {
                    let x = cur.parse("coordinate")?;
                    let y = cur.parse("coordinate")?;
                    let z = cur.parse("coordinate")?;
                    doc.points.push(Vertex::new(x, y, z));
                }
                saw_points = true;
            }
            "POLYGONS" => {
                if saw_polygons {
                    bail!("line {line}: repeated POLYGONS section");
                }
                let m: usize = cur.parse("polygon count")?;
                let size: usize = cur.parse("polygon list size")?;
                if m.checked_mul(4) != Some(size) {
                    bail!("line {line}: POLYGONS size {size} does not match {m} triangles");
                }
                doc.polygons.reserve(m.min(cur.remaining() / 4));
                for _ in 0..m {
                    let (pline, k) = cur.next("polygon vertex count")?;
                    if k != "3" {
                        bail!("line {pline}: only triangles are supported, found a polygon with {k} vertices");
                    }
                    let a = cur.parse("vertex index")?;
                    let b = cur.parse("vertex index")?;
                    let c = cur.parse("vertex index")?;
                    doc.polygons.push([a, b, c]);
                }
                saw_polygons = true;
            }
            "CELL_DATA" => {
                let n: usize = cur.parse("cell data count")?;
                doc.cell_data = parse_scalars(&mut cur, n)?;
            }
            "POINT_DATA" => {
                let n: usize = cur.parse("point data count")?;
                doc.point_data = parse_scalars(&mut cur, n)?;
            }
            other => bail!("line {line}: unsupported POLYDATA section {other}"),
        }
    }
    if !saw_points {
        bail!("missing POINTS section");
    }
    Ok(doc)
}

/// Consume consecutive single-component `SCALARS` blocks of length `n`.
fn parse_scalars(cur: &mut Cursor<'_>, n: usize) -> Result<Vec<ScalarArray>> {
    let mut out = Vec::new();
    while let Some((line, kw)) = cur.peek() {
        if !kw.eq_ignore_ascii_case("SCALARS") {
            break;
        }
        cur.pos += 1;
        let (_, name) = cur.next("scalar name")?;
        cur.next("scalar data type")?;
        // Optional component count before LOOKUP_TABLE.
        if let Some((_, t)) = cur.peek() {
            if !t.eq_ignore_ascii_case("LOOKUP_TABLE") {
                let comps: usize = cur.parse("component count")?;
                if comps != 1 {
                    bail!("line {line}: only single-component SCALARS are supported");
                }
            }
        }
        cur.keyword("LOOKUP_TABLE")?;
        cur.next("lookup table name")?;
        let values = (0..n)
            .map(|_| cur.parse::<f64>("scalar value"))
            .collect::<Result<Vec<_>>>()?;
        out.push(ScalarArray {
            name: name.to_string(),
            values,
        });
    }
    Ok(out)
}

pub fn render_vtk(doc: &VtkDocument) -> Result<String, fmt::Error> {
    let mut s = String::new();
    write_vtk_text(&mut s, doc)?;
    Ok(s)
}

fn write_vtk_text(s: &mut String, doc: &VtkDocument) -> fmt::Result {
    writeln!(s, "# vtk DataFile Version 3.0")?;
    let title = if doc.title.is_empty() { "mesh" } else { doc.title.as_str() };
    writeln!(s, "{title}")?;
    writeln!(s, "ASCII")?;
    writeln!(s, "DATASET POLYDATA")?;
    writeln!(s, "POINTS {} double", doc.points.len())?;
    for p in &doc.points {
        writeln!(s, "{} {} {}", p.x, p.y, p.z)?;
    }
    writeln!(s, "POLYGONS {} {}", doc.polygons.len(), 4 * doc.polygons.len())?;
    for [a, b, c] in &doc.polygons {
        writeln!(s, "3 {a} {b} {c}")?;
    }
    write_scalars(s, "CELL_DATA", doc.polygons.len(), &doc.cell_data)?;
    write_scalars(s, "POINT_DATA", doc.points.len(), &doc.point_data)
}

fn write_scalars(s: &mut String, section: &str, n: usize, arrays: &[ScalarArray]) -> fmt::Result {
    if arrays.is_empty() {
        return Ok(());
    }
    writeln!(s, "{section} {n}")?;
    for arr in arrays {
        writeln!(s, "SCALARS {} double 1", arr.name)?;
        writeln!(s, "LOOKUP_TABLE default")?;
        for v in &arr.values {
            writeln!(s, "{v}")?;
        }
    }
    Ok(())
}

/// Attaches scalar arrays to a `VtkDocument`, replacing same-named arrays.
pub struct VtkSink;

impl ScalarSink<VtkDocument> for VtkSink {
    type Error = anyhow::Error;

    fn attach(
        &mut self,
        mut doc: VtkDocument,
        name: &str,
        scalars: &[f64],
        location: ScalarLocation,
    ) -> Result<VtkDocument> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            bail!("scalar name {name:?} must be a single non-empty token");
        }
        let (expected, arrays) = match location {
            ScalarLocation::Faces => (doc.polygons.len(), &mut doc.cell_data),
            ScalarLocation::Vertices => (doc.points.len(), &mut doc.point_data),
        };
        if scalars.len() != expected {
            bail!(
                "{name}: {} scalars for {expected} {:?} entries",
                scalars.len(),
                location
            );
        }
        arrays.retain(|a| a.name != name);
        arrays.push(ScalarArray {
            name: name.to_string(),
            values: scalars.to_vec(),
        });
        Ok(doc)
    }
}
