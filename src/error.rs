// SYNOID Growl SFX - Error Types
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can abort a render.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// External process exited with non-zero status.
    #[error("Command `{command}` exited with status {code}:\n{output}")]
    ProcessFailed {
        command: String,
        code: i32,
        output: String,
    },

    /// External program could not be launched at all.
    #[error("Failed to launch `{program}`: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External process exceeded the configured timeout and was killed.
    #[error("Command `{command}` timed out after {secs} seconds")]
    TimedOut { command: String, secs: u64 },

    /// Filesystem error on a pipeline path.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preset file could not be read or parsed.
    #[error("Failed to load config preset {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    pub fn process_failed(command: impl Into<String>, code: i32, output: impl Into<String>) -> Self {
        Self::ProcessFailed {
            command: command.into(),
            code,
            output: output.into(),
        }
    }

    pub fn config_file(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConfigFile {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Captured stdout/stderr of a failed process, if this error carries one.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Self::ProcessFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}
