//! # gomanifest `go list` Runner (`common::golist`)
//!
//! File: cli/src/common/golist.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! Starts `go list -json -deps -mod=readonly ./...` in a module directory and
//! hands back the running [`ProcessStream`]. The output is one JSON object per
//! package of the transitive dependency graph, concatenated. It is passed
//! through untouched; nothing here parses it.
//!
//! `-mod=readonly` keeps the run reproducible: `go` refuses to touch `go.mod`
//! and fails instead, which surfaces through [`ProcessStream::wait`] as
//! `GoManifestError::ListFailed` with a `go mod tidy` hint.
//!
//! ## Usage
//!
//! ```no_run
//! use gomanifest::common::golist;
//! use std::path::Path;
//!
//! # fn run() -> anyhow::Result<()> {
//! let mut stream = golist::list_dependencies(Path::new("/usr/local/go/bin/go"), Path::new("."))?;
//! let mut json = Vec::new();
//! stream.drain_to(&mut json)?;
//! stream.wait()?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::process::{ProcessStream, StreamKind};
use crate::common::system;
use crate::core::error::{GoManifestError, Result};
use anyhow::{anyhow, bail, Context};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Name of the Go toolchain executable.
pub const GO_TOOL: &str = "go";

/// Arguments passed to `go` for a transitive, machine-readable listing of
/// every package under the working directory.
pub const GO_LIST_ARGS: [&str; 5] = ["list", "-json", "-deps", "-mod=readonly", "./..."];

/// Starts `go list` with the given Go executable, run inside `cwd`.
///
/// Fails before any output exists if `go` or `cwd` is missing, or if the
/// process cannot be spawned.
///
/// A relative `go` path is taken relative to the caller's directory, not `cwd`.
pub fn list_dependencies(go: &Path, cwd: &Path) -> Result<ProcessStream> {
    let program = program_path(go)?;
    if !cwd.is_dir() {
        bail!("Working directory '{}' does not exist or is not a directory", cwd.display());
    }

    let mut command = Command::new(&program);
    command.args(GO_LIST_ARGS).current_dir(cwd);
    info!("Listing dependencies in {}", cwd.display());
    ProcessStream::spawn(command, StreamKind::List)
        .with_context(|| format!("`go list` failed to start in {}", cwd.display()))
}

/// Pins a path-like `go` to an absolute path before the child changes into
/// its working directory. A bare name is left for the PATH lookup at spawn.
fn program_path(go: &Path) -> Result<PathBuf> {
    if go.components().count() <= 1 {
        return Ok(go.to_path_buf());
    }
    let program = std::path::absolute(go)
        .with_context(|| format!("Failed to resolve Go executable path '{}'", go.display()))?;
    if !program.exists() {
        return Err(anyhow!(GoManifestError::ToolNotFound {
            tool: go.display().to_string(),
        }));
    }
    debug!("Go executable {} resolved to {}", go.display(), program.display());
    Ok(program)
}

/// Like [`list_dependencies`], but finds `go` in the environment first.
pub fn list_dependencies_discovered(cwd: &Path) -> Result<ProcessStream> {
    let go = system::resolve_executable(GO_TOOL)?;
    info!("Go executable {}", go.display());
    list_dependencies(&go, cwd)
}
