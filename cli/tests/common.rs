//! # gomanifest CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and pulls these in.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// # Get gomanifest Command (`gomanifest_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `gomanifest` binary,
/// isolated from the caller's environment: the user config directory points at
/// `config_home` and `GOMANIFEST_GO` / `RUST_LOG` are cleared.
///
/// ## Panics
/// Panics if the `gomanifest` binary cannot be found via `Command::cargo_bin`.
pub fn gomanifest_cmd(config_home: &Path) -> Command {
    let mut cmd =
        Command::cargo_bin("gomanifest").expect("Failed to find gomanifest binary for testing");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("GOMANIFEST_GO")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes an executable `go` stand-in with the given shell body into `dir`.
#[cfg(unix)]
pub fn stub_go(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("go");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write stub go");
    let mut perms = fs::metadata(&path).expect("stub go metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to make stub go executable");
    path
}

/// A stub body printing two package records, the way `go list -json` does.
pub const TWO_PACKAGES: &str = r#"printf '{\n\t"ImportPath": "example.com/app"\n}\n{\n\t"ImportPath": "fmt"\n}\n'"#;
