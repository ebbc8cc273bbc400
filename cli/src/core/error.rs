//! # gomanifest Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! This module defines the error types used throughout gomanifest. Every
//! failure of the dependency lister maps to one `GoManifestError` variant so
//! callers can tell the cases apart, while still flowing through the
//! `anyhow`-based `Result<T>` alias for context and propagation.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `GoManifestError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The variants cover:
//! - Tool lookup (`ToolNotFound`)
//! - Subprocess launch and pipes (`Launch`, `OutputUnavailable`)
//! - Listing failures (`ListFailed`, `TimedOut`)
//! - Configuration errors (`Config`)
//!
//! ## Examples
//!
//! Inspecting a failure returned by the lister:
//!
//! ```rust
//! # use gomanifest::core::error::GoManifestError;
//! # fn check(result: anyhow::Result<()>) {
//! match result {
//!     Ok(()) => println!("listing finished"),
//!     Err(e) if matches!(
//!         e.downcast_ref::<GoManifestError>(),
//!         Some(GoManifestError::ToolNotFound { .. })
//!     ) => {
//!         eprintln!("install Go or pass --go");
//!     }
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! # }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Remediation hint attached to a failed `go list` run.
pub const LIST_FAILED_HINT: &str = "use `go mod tidy` to know more";

/// Custom error type for gomanifest.
#[derive(Error, Debug)]
pub enum GoManifestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Executable '{tool}' not found. Install it or pass its path explicitly.")]
    ToolNotFound { tool: String },

    #[error("Failed to launch '{}': {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Subprocess output stream is not available (already taken or closed).")]
    OutputUnavailable,

    #[error("`{cmd}` exited with status {status}: {}", LIST_FAILED_HINT)]
    ListFailed { cmd: String, status: String },

    #[error("`go list` did not finish within {seconds}s and was killed.")]
    TimedOut { seconds: u64 },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
