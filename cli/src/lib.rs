//! # gomanifest Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! Runs `go list -json -deps -mod=readonly ./...` for a module and hands the
//! raw output stream to the caller. The `gomanifest` binary (`main.rs`) is a
//! thin command-line front-end over these modules.
//!
pub mod common;
pub mod core;
