//! # gomanifest System Utilities (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! Locates external tools on the host. The lookup itself runs as a subprocess
//! (`command -v <tool>` through `sh` on Unix, `where <tool>` on Windows) and is
//! returned as a [`ProcessStream`] whose output is the resolved path.
//! [`resolve_executable`] runs that stream to completion and turns it into a
//! `PathBuf`.
//!
//! Callers that already know where the tool lives should pass that path on
//! directly; discovery is only a fallback.
//!
use crate::common::process::{ProcessStream, StreamKind};
use crate::core::error::{GoManifestError, Result};
use anyhow::{anyhow, Context};
use std::io::Read;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Starts a lookup for `tool` in the invoking environment.
///
/// The returned stream yields the tool's location as text. Waiting on it
/// fails with `GoManifestError::ToolNotFound` when the lookup comes up empty.
pub fn locate_executable(tool: &str) -> Result<ProcessStream> {
    let command = if cfg!(windows) {
        let mut cmd = Command::new("where");
        cmd.arg(tool);
        cmd
    } else {
        // `command -v` is a shell builtin, so it has to run inside `sh`.
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "command -v \"$1\"", "sh", tool]);
        cmd
    };
    debug!("Looking up '{}' with {:?}", tool, command);
    ProcessStream::spawn(
        command,
        StreamKind::Locate {
            tool: tool.to_string(),
        },
    )
    .with_context(|| format!("Failed to start lookup for '{}'", tool))
}

/// Resolves `tool` to a path by draining a [`locate_executable`] stream.
///
/// Only the first line is used (`where` may list several matches).
pub fn resolve_executable(tool: &str) -> Result<PathBuf> {
    let mut stream = locate_executable(tool)?;
    let mut text = String::new();
    stream
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read lookup output for '{}'", tool))?;
    stream.wait()?;

    let resolved = text.lines().map(str::trim).find(|line| !line.is_empty());
    match resolved {
        Some(path) => {
            info!("Resolved '{}' to {}", tool, path);
            Ok(PathBuf::from(path))
        }
        None => Err(anyhow!(GoManifestError::ToolNotFound {
            tool: tool.to_string(),
        })),
    }
}
