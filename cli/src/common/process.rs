//! # gomanifest Process Streams (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! This module wraps a spawned external command together with its piped
//! standard output. A [`ProcessStream`] is the only subprocess handle in
//! gomanifest: the tool lookup (`common::system`) and the dependency listing
//! (`common::golist`) both hand one back to their caller.
//!
//! ## Lifecycle
//!
//! 1. [`ProcessStream::spawn`] starts the command with stdout piped. Stderr is
//!    inherited so the tool's own diagnostics reach the operator.
//! 2. The caller drains stdout, either through the `Read` impl, [`ProcessStream::drain_to`],
//!    or by moving the pipe out with [`ProcessStream::take_output`].
//! 3. [`ProcessStream::wait`] closes whatever is left of the pipe, reaps the
//!    process and maps a non-zero exit to a `GoManifestError`.
//!
//! The pipe is closed exactly once: it lives in an `Option` and is dropped when
//! taken, closed, or when the handle is waited on. A handle dropped without
//! `wait` (for example when the caller bails out mid-read) kills and reaps its
//! process.
//!
//! The caller must drain stdout before calling `wait`. A full pipe buffer
//! stalls the child; closing the pipe early instead makes the child fail with
//! a broken pipe, which `wait` then reports.
//!
//! ## Usage
//!
//! ```no_run
//! use gomanifest::common::process::{ProcessStream, StreamKind};
//! use std::process::Command;
//!
//! # fn run() -> anyhow::Result<()> {
//! let mut cmd = Command::new("go");
//! cmd.arg("version");
//! let mut stream = ProcessStream::spawn(cmd, StreamKind::List)?;
//! let mut out = Vec::new();
//! stream.drain_to(&mut out)?;
//! stream.wait()?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{GoManifestError, Result};
use anyhow::{anyhow, Context};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use tracing::{debug, info, warn};

/// What a stream is used for, which decides how a non-zero exit is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamKind {
    /// Looking up the location of `tool`. A failed lookup means the tool is missing.
    Locate { tool: String },
    /// A `go list` run. Failures carry the `go mod tidy` hint.
    List,
}

impl StreamKind {
    fn failure(&self, cmd: &str, status: ExitStatus) -> GoManifestError {
        match self {
            StreamKind::Locate { tool } => GoManifestError::ToolNotFound { tool: tool.clone() },
            StreamKind::List => GoManifestError::ListFailed {
                cmd: cmd.to_string(),
                status: status.to_string(),
            },
        }
    }
}

/// A running subprocess and its standard output pipe.
#[derive(Debug)]
pub struct ProcessStream {
    cmd: String,
    kind: StreamKind,
    child: Option<Child>,
    output: Option<ChildStdout>,
}

impl ProcessStream {
    /// Spawns `command` with stdout piped and stderr inherited.
    ///
    /// A program that does not exist is reported as `GoManifestError::ToolNotFound`;
    /// every other spawn failure as `GoManifestError::Launch`.
    pub fn spawn(mut command: Command, kind: StreamKind) -> Result<Self> {
        let program = PathBuf::from(command.get_program());
        let cmd = describe(&command);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        debug!("Spawning: {}", cmd);
        let mut child = command.spawn().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                anyhow!(GoManifestError::ToolNotFound {
                    tool: program.display().to_string(),
                })
            } else {
                anyhow!(GoManifestError::Launch { program, source })
            }
        })?;
        info!("Started '{}' (pid {})", cmd, child.id());

        let output = child.stdout.take();
        Ok(Self {
            cmd,
            kind,
            child: Some(child),
            output,
        })
    }

    /// The command line this stream was started with, for messages.
    pub fn command_line(&self) -> &str {
        &self.cmd
    }

    /// OS process id, if the process has not been reaped yet.
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Borrows the stdout pipe.
    pub fn output(&mut self) -> Result<&mut ChildStdout> {
        self.output
            .as_mut()
            .ok_or_else(|| anyhow!(GoManifestError::OutputUnavailable))
    }

    /// Moves the stdout pipe out of the handle, e.g. to drain it on another
    /// thread while this handle stays around for `kill` and `wait`.
    pub fn take_output(&mut self) -> Result<ChildStdout> {
        self.output
            .take()
            .ok_or_else(|| anyhow!(GoManifestError::OutputUnavailable))
    }

    /// Closes the stdout pipe. Calling it again is a no-op.
    pub fn close_output(&mut self) {
        if self.output.take().is_some() {
            debug!("Closed output of '{}'", self.cmd);
        }
    }

    /// Copies all remaining output into `sink` and returns the byte count.
    pub fn drain_to<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<u64> {
        let cmd = self.cmd.clone();
        let output = self.output()?;
        let copied = io::copy(output, sink)
            .with_context(|| format!("Failed to read output of '{}'", cmd))?;
        debug!("Drained {} bytes from '{}'", copied, cmd);
        Ok(copied)
    }

    /// Kills the process if it is still running. The handle still has to be
    /// waited on (or dropped) to reap it.
    pub fn kill(&mut self) -> Result<()> {
        if let Some(child) = self.child.as_mut() {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!("'{}' already exited with {}", self.cmd, status);
                }
                _ => {
                    warn!("Killing '{}'", self.cmd);
                    child
                        .kill()
                        .with_context(|| format!("Failed to kill '{}'", self.cmd))?;
                }
            }
        }
        Ok(())
    }

    /// Non-blocking [`ProcessStream::wait`]. Returns `Ok(false)` while the
    /// process is still running and `Ok(true)` once it exited successfully and
    /// was reaped. A failed exit is reported the same way `wait` reports it.
    /// Does not close the output.
    pub fn try_wait(&mut self) -> Result<bool> {
        let Some(child) = self.child.as_mut() else {
            return Ok(true);
        };
        let status = child
            .try_wait()
            .with_context(|| format!("Failed to poll '{}'", self.cmd))?;
        let Some(status) = status else {
            return Ok(false);
        };
        self.child = None;
        if status.success() {
            info!("'{}' finished successfully", self.cmd);
            Ok(true)
        } else {
            warn!("'{}' exited with {}", self.cmd, status);
            Err(anyhow!(self.kind.failure(&self.cmd, status)))
        }
    }

    /// Closes any undrained output, blocks until the process exits and reaps it.
    ///
    /// Returns an error built from the stream's [`StreamKind`] if the exit
    /// status is not success.
    pub fn wait(mut self) -> Result<()> {
        self.close_output();
        let mut child = match self.child.take() {
            Some(child) => child,
            None => return Ok(()),
        };
        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for '{}'", self.cmd))?;

        if status.success() {
            info!("'{}' finished successfully", self.cmd);
            Ok(())
        } else {
            warn!("'{}' exited with {}", self.cmd, status);
            Err(anyhow!(self.kind.failure(&self.cmd, status)))
        }
    }
}

impl Read for ProcessStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.output.as_mut() {
            Some(output) => output.read(buf),
            None => Err(io::Error::other(GoManifestError::OutputUnavailable)),
        }
    }
}

impl Drop for ProcessStream {
    fn drop(&mut self) {
        self.output = None;
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Ok(Some(_)) = child.try_wait() {
            return;
        }
        debug!("Reaping '{}' dropped before wait", self.cmd);
        if let Err(e) = child.kill() {
            debug!("Kill of '{}' failed: {}", self.cmd, e);
        }
        if let Err(e) = child.wait() {
            warn!("Failed to reap '{}': {}", self.cmd, e);
        }
    }
}

/// Renders a command as `program arg1 arg2 ...`.
fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

// --- Unit Tests ---
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn shell(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn test_read_output_then_wait() {
        let mut stream = ProcessStream::spawn(shell("printf hello"), StreamKind::List).unwrap();
        let mut text = String::new();
        stream.read_to_string(&mut text).unwrap();
        assert_eq!(text, "hello");
        assert!(stream.wait().is_ok());
    }

    #[test]
    fn test_command_line_is_rendered() {
        let stream = ProcessStream::spawn(shell("true"), StreamKind::List).unwrap();
        assert_eq!(stream.command_line(), "sh -c true");
        assert!(stream.id().is_some());
        stream.wait().unwrap();
    }

    #[test]
    fn test_nonzero_exit_reports_list_failure_with_hint() {
        let mut stream = ProcessStream::spawn(shell("exit 3"), StreamKind::List).unwrap();
        stream.drain_to(&mut io::sink()).unwrap();
        let err = stream.wait().unwrap_err();
        match err.downcast_ref::<GoManifestError>() {
            Some(GoManifestError::ListFailed { status, .. }) => assert!(status.contains('3')),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("go mod tidy"));
    }

    #[test]
    fn test_nonzero_exit_on_locate_means_tool_not_found() {
        let kind = StreamKind::Locate { tool: "go".into() };
        let stream = ProcessStream::spawn(shell("exit 1"), kind).unwrap();
        let err = stream.wait().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoManifestError>(),
            Some(GoManifestError::ToolNotFound { tool }) if tool == "go"
        ));
    }

    #[test]
    fn test_missing_program_fails_at_spawn() {
        let cmd = Command::new("/nonexistent/gomanifest-test/bin/go");
        let err = ProcessStream::spawn(cmd, StreamKind::List).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoManifestError>(),
            Some(GoManifestError::ToolNotFound { .. })
        ));
    }

    #[test]
    fn test_large_output_drains_without_deadlock() {
        // Well past the usual 64 KiB pipe buffer.
        let size = 2 * 1024 * 1024;
        let script = format!("yes 0123456789abcdef | head -c {}", size);
        let mut stream = ProcessStream::spawn(shell(&script), StreamKind::List).unwrap();
        let mut buf = Vec::new();
        let copied = stream.drain_to(&mut buf).unwrap();
        assert_eq!(copied, size as u64);
        assert_eq!(buf.len(), size);
        stream.wait().unwrap();
    }

    #[test]
    fn test_close_without_draining_is_safe() {
        let script = "yes 0123456789abcdef | head -c 4194304";
        let mut stream = ProcessStream::spawn(shell(script), StreamKind::List).unwrap();
        let mut head = [0u8; 16];
        stream.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"0123456789abcdef");
        stream.close_output();
        stream.close_output();
        // The child may die from the broken pipe; either outcome is fine as
        // long as wait returns.
        let _ = stream.wait();
    }

    #[test]
    fn test_output_can_only_be_taken_once() {
        let mut stream = ProcessStream::spawn(shell("printf x"), StreamKind::List).unwrap();
        let mut output = stream.take_output().unwrap();
        let mut text = String::new();
        output.read_to_string(&mut text).unwrap();
        assert_eq!(text, "x");

        let err = stream.take_output().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoManifestError>(),
            Some(GoManifestError::OutputUnavailable)
        ));
        let mut buf = [0u8; 1];
        assert!(stream.read(&mut buf).is_err());
        drop(output);
        stream.wait().unwrap();
    }

    #[test]
    fn test_drop_without_wait_kills_and_reaps() {
        let stream = ProcessStream::spawn(shell("exec sleep 30"), StreamKind::List).unwrap();
        let started = Instant::now();
        drop(stream);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_try_wait_polls_until_exit() {
        let mut stream =
            ProcessStream::spawn(shell("exec >&-; sleep 1"), StreamKind::List).unwrap();
        stream.drain_to(&mut io::sink()).unwrap();
        assert!(!stream.try_wait().unwrap());

        let started = Instant::now();
        while !stream.try_wait().unwrap() {
            assert!(started.elapsed() < Duration::from_secs(10));
            std::thread::sleep(Duration::from_millis(20));
        }
        assert!(stream.id().is_none());
        stream.wait().unwrap();
    }

    #[test]
    fn test_try_wait_reports_failed_exit() {
        let mut stream = ProcessStream::spawn(shell("exit 2"), StreamKind::List).unwrap();
        stream.drain_to(&mut io::sink()).unwrap();
        let started = Instant::now();
        let err = loop {
            match stream.try_wait() {
                Ok(false) => std::thread::sleep(Duration::from_millis(20)),
                Ok(true) => panic!("expected a failed exit"),
                Err(e) => break e,
            }
            assert!(started.elapsed() < Duration::from_secs(10));
        };
        assert!(matches!(
            err.downcast_ref::<GoManifestError>(),
            Some(GoManifestError::ListFailed { .. })
        ));
    }

    #[test]
    fn test_kill_then_wait_reports_failure() {
        let mut stream = ProcessStream::spawn(shell("exec sleep 30"), StreamKind::List).unwrap();
        stream.kill().unwrap();
        let err = stream.wait().unwrap_err();
        assert!(err.to_string().contains("signal"));
    }
}
