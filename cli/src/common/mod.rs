//! # gomanifest Common Utilities
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! The dependency lister itself, split by concern:
//!
//! - `process`: the subprocess handle (`ProcessStream`) shared by everything below
//! - `system`: locating external executables in the invoking environment
//! - `golist`: starting `go list` against a module directory
//!
//! A typical run resolves the Go binary once (or takes it from the caller),
//! starts the listing, drains the stream and waits:
//!
//! ```no_run
//! use gomanifest::common::{golist, system};
//! use std::path::Path;
//!
//! # fn run() -> anyhow::Result<()> {
//! let go = system::resolve_executable(golist::GO_TOOL)?;
//! let mut stream = golist::list_dependencies(&go, Path::new("."))?;
//! stream.drain_to(&mut std::io::stdout())?;
//! stream.wait()?;
//! # Ok(())
//! # }
//! ```
//!

/// Starting `go list` and returning its output stream.
pub mod golist;
/// The subprocess handle: a child process plus its stdout pipe.
pub mod process;
/// Locating external tools (`command -v` / `where`).
pub mod system;
