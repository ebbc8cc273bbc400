//! # gomanifest List Command
//!
//! File: cli/src/commands/list.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! Implements `gomanifest list`, which runs `go list -json -deps -mod=readonly ./...`
//! in a module directory and copies the raw output, byte for byte, to stdout
//! or to a file.
//!
//! ## Architecture
//!
//! 1. Load configuration and resolve the Go executable
//! 2. Start the listing (`common::golist::list_dependencies`)
//! 3. Move the output pipe to a blocking task that copies it to stdout or to a
//!    temporary file next to the output file
//! 4. Wait for the copy and for `go` to exit, optionally bounded by
//!    `--timeout` (`go` is killed when it fires)
//! 5. Report a failed listing, or move the temporary file into place
//!
//! ## Usage
//!
//! ```bash
//! gomanifest list                       # current directory, to stdout
//! gomanifest list ./service -o deps.json
//! gomanifest list --go ~/sdk/go1.22/bin/go --timeout 120
//! ```
//!
use crate::commands::resolve_go;
use anyhow::{anyhow, Context};
use clap::Parser;
use gomanifest::common::golist;
use gomanifest::common::process::ProcessStream;
use gomanifest::core::config::{self, Config};
use gomanifest::core::error::{GoManifestError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Module directory to list (all packages under it are included).
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Use this Go executable instead of the configured one or a PATH lookup.
    #[arg(long, env = "GOMANIFEST_GO", value_name = "PATH")]
    go: Option<PathBuf>,
    /// Write the listing to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Kill `go list` if it has not finished after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

/// How often the exit status is polled once the output has been drained.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handler for `gomanifest list`.
pub async fn handle_list(args: ListArgs) -> Result<()> {
    info!("Handling list command for {}", args.dir.display());
    let cfg = config::load_config()?;
    run_list(args, &cfg).await
}

/// Runs the listing with an already loaded configuration.
async fn run_list(args: ListArgs, cfg: &Config) -> Result<()> {
    let go = resolve_go(args.go, cfg)?;
    let output_path = args.output.or_else(|| cfg.list_output());

    let mut stream = golist::list_dependencies(&go, &args.dir)?;
    let staged = output_path.as_deref().map(StagedOutput::new).transpose()?;
    let sink: Box<dyn Write + Send> = match &staged {
        Some(staged) => Box::new(staged.writer()?),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let output = stream.take_output()?;
    let drain = tokio::task::spawn_blocking(move || copy_output(output, sink));

    let finished = finish_listing(&mut stream, drain);
    let copied = match args.timeout {
        None => finished.await?,
        Some(seconds) => {
            let outcome = tokio::time::timeout(Duration::from_secs(seconds), finished).await;
            match outcome {
                Ok(result) => result?,
                Err(_) => {
                    warn!("`go list` still running after {}s", seconds);
                    stream.kill()?;
                    return Err(anyhow!(GoManifestError::TimedOut { seconds }));
                }
            }
        }
    };
    debug!("Copied {} bytes of `go list` output", copied);

    if let Some(staged) = staged {
        staged.commit()?;
    }
    Ok(())
}

/// Waits for the output copy, then for `go` itself to exit. Polls the exit
/// status so a surrounding timeout can still kill a process that closed its
/// output but keeps running.
async fn finish_listing(
    stream: &mut ProcessStream,
    drain: JoinHandle<Result<u64>>,
) -> Result<u64> {
    let copied = drain.await.context("Output copy task failed")??;
    while !stream.try_wait()? {
        tokio::time::sleep(EXIT_POLL_INTERVAL).await;
    }
    Ok(copied)
}

/// An output file written through a temporary file next to it. The real
/// file is only replaced by [`StagedOutput::commit`]; dropping the stage
/// leaves it untouched.
struct StagedOutput {
    temp: NamedTempFile,
    dest: PathBuf,
}

impl StagedOutput {
    fn new(dest: &Path) -> Result<Self> {
        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create output file in: {}", dir.display()))?;
        debug!("Staging {} at {}", dest.display(), temp.path().display());
        Ok(Self {
            temp,
            dest: dest.to_path_buf(),
        })
    }

    fn writer(&self) -> Result<BufWriter<File>> {
        let file = self
            .temp
            .as_file()
            .try_clone()
            .context("Failed to open staged output file")?;
        Ok(BufWriter::new(file))
    }

    fn commit(self) -> Result<()> {
        self.temp
            .persist(&self.dest)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write output file: {}", self.dest.display()))?;
        info!("Wrote dependency listing to {}", self.dest.display());
        Ok(())
    }
}

/// Copies the whole stream into `sink`. The reader is closed when this returns.
fn copy_output<R: Read>(mut output: R, mut sink: Box<dyn Write + Send>) -> Result<u64> {
    let copied = io::copy(&mut output, &mut sink).context("Failed to copy `go list` output")?;
    sink.flush().context("Failed to flush `go list` output")?;
    Ok(copied)
}
