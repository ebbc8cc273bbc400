//! # gomanifest Locate Command
//!
//! File: cli/src/commands/locate.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! Implements `gomanifest locate`, which prints the Go executable that
//! `gomanifest list` would run. Useful for checking what a config file or the
//! `GOMANIFEST_GO` variable resolves to.
//!
//! ```bash
//! $ gomanifest locate
//! /usr/local/go/bin/go
//! ```
//!
use crate::commands::resolve_go;
use clap::Parser;
use gomanifest::core::config::{self, Config};
use gomanifest::core::error::Result;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for the `locate` command.
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Use this Go executable instead of the configured one or a PATH lookup.
    #[arg(long, env = "GOMANIFEST_GO", value_name = "PATH")]
    go: Option<PathBuf>,
}

/// Handler for `gomanifest locate`.
pub async fn handle_locate(args: LocateArgs) -> Result<()> {
    info!("Handling locate command...");
    let cfg = config::load_config()?;
    let go = locate(args, &cfg)?;
    println!("{}", go.display());
    Ok(())
}

/// Resolves the Go executable, warning when a given path does not exist.
fn locate(args: LocateArgs, cfg: &Config) -> Result<PathBuf> {
    let go = resolve_go(args.go, cfg)?;
    if !go.exists() && go.components().count() > 1 {
        warn!("Go executable '{}' does not exist.", go.display());
    }
    Ok(go)
}
