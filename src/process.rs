// SYNOID Growl SFX - External Process Runner
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Every external tool (edge-tts, ffmpeg) goes through `run`. The command
// line is echoed before execution and stdout/stderr are captured so a
// failure can carry the tool's diagnostics.

use crate::error::{PipelineError, PipelineResult};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Where `run` echoes the `>> cmd` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Echo {
    #[default]
    Stdout,
    /// Keeps stdout clean for machine-readable output.
    Stderr,
    Silent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// `None` waits forever.
    pub timeout: Option<Duration>,
    pub echo: Echo,
}

impl RunOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::default()
        }
    }
}

/// A fully resolved command line: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a launcher prefix such as `["python3", "-m", "edge_tts"]`.
    /// Returns `None` for an empty launcher.
    pub fn from_launcher(launcher: &[String]) -> Option<Self> {
        let (program, rest) = launcher.split_first()?;
        Some(Self {
            program: program.clone(),
            args: rest.to_vec(),
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Run `inv` to completion and return its combined output
/// (`stdout + "\n" + stderr`).
///
/// A non-zero exit becomes [`PipelineError::ProcessFailed`] carrying the
/// same combined text. With a timeout set, the child is killed once the
/// limit passes.
pub async fn run(inv: &Invocation, opts: &RunOptions) -> PipelineResult<String> {
    match opts.echo {
        Echo::Stdout => println!(">> {}", inv),
        Echo::Stderr => eprintln!(">> {}", inv),
        Echo::Silent => {}
    }
    debug!("[PROC] {}", inv);

    let child = Command::new(&inv.program)
        .args(&inv.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| PipelineError::SpawnFailed {
            program: inv.program.clone(),
            source,
        })?;

    let waited = match opts.timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| PipelineError::TimedOut {
                command: inv.to_string(),
                secs: limit.as_secs(),
            })?,
        None => child.wait_with_output().await,
    };
    let output = waited.map_err(|source| PipelineError::SpawnFailed {
        program: inv.program.clone(),
        source,
    })?;

    let combined = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        debug!("[PROC] `{}` failed with status {}", inv.program, code);
        return Err(PipelineError::process_failed(inv.to_string(), code, combined));
    }

    Ok(combined)
}
