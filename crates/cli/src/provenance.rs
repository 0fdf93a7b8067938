//! Provenance sidecars: every file the CLI writes gets a
//! `<artifact>.provenance.json` recording which mesh produced it and how.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;
use surface::Surface;

/// The mesh a command read, with the counts it was measured at.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InputMesh {
    pub path: String,
    pub faces: usize,
    pub vertices: usize,
}

impl InputMesh {
    pub fn new(path: &Path, surface: &Surface) -> Self {
        Self {
            path: path.to_string_lossy().into_owned(),
            faces: surface.num_faces(),
            vertices: surface.num_vertices(),
        }
    }
}

/// What one command run contributes to its sidecar.
#[derive(Clone, Debug)]
pub struct Payload {
    pub command: &'static str,
    pub input: InputMesh,
    /// Command-specific settings (tolerances, scalar location, row counts).
    pub params: Value,
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(command: &'static str, input: InputMesh) -> Self {
        Self {
            command,
            input,
            params: Value::Null,
            tag: None,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    surface_version: &'static str,
    callsite: Callsite,
    command: &'static str,
    tag: Option<&'a str>,
    input: &'a InputMesh,
    params: &'a Value,
    outputs: [String; 1],
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let callsite = Location::caller();
    let path = sidecar_path(artifact);
    let doc = Sidecar {
        code_rev: code_rev(),
        surface_version: surface::VERSION,
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        command: payload.command,
        tag: payload.tag.as_deref(),
        input: &payload.input,
        params: &payload.params,
        outputs: [artifact.to_string_lossy().into_owned()],
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(sidecar = %path.display(), command = payload.command, "provenance");
    Ok(path)
}

/// `res/cube.json` -> `res/cube.provenance.json`; the artifact's directory
/// already exists because the artifact was just written there.
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Commit the binary runs from: `GIT_COMMIT` if set, else `git rev-parse HEAD`.
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
