//! # gomanifest Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! The top-level commands of the gomanifest CLI:
//!
//! - `locate`: print the Go executable that would be used
//! - `list`: stream the module's `go list -json -deps` output
//!
//! Each command defines its own arguments structure and handler function.
//! Both share [`resolve_go`], which picks the Go executable in this order:
//! explicit `--go` / `GOMANIFEST_GO`, then `go.executable` from the config,
//! then a PATH lookup.
//!

/// Command for printing the resolved Go executable.
pub mod locate;
/// Command for streaming the dependency listing.
pub mod list;

use gomanifest::common::{golist, system};
use gomanifest::core::config::Config;
use gomanifest::core::error::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Picks the Go executable to run. Only falls back to searching the
/// environment when neither the caller nor the config names one.
pub fn resolve_go(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(go) = explicit {
        debug!("Using Go executable from command line: {}", go.display());
        return Ok(go);
    }
    if let Some(go) = config.go_executable() {
        debug!("Using Go executable from configuration: {}", go.display());
        return Ok(go);
    }
    info!("No Go executable configured, searching PATH.");
    system::resolve_executable(golist::GO_TOOL)
}
