//! # shellrun Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout shellrun. Two flavours
//! of `Result` coexist:
//!
//! - `ExecResult<T>`: returned by the execution core (`common::process`). It carries
//!   a `ShellrunError` so callers and tests can match on the exact failure
//!   (spawn, read, parse) without parsing log output.
//! - `Result<T>`: an alias for `anyhow::Result<T>`, used by configuration loading
//!   and the CLI handlers where adding context matters more than matching.
//!
//! ## Examples
//!
//! ```rust,ignore
//! match process::try_run(&ctx, "missing-tool --flag", None) {
//!     Ok(()) => {}
//!     Err(ShellrunError::Spawn { command, .. }) => eprintln!("could not start {command}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! Charset detection failures are intentionally absent from this enum: the
//! resolver falls back to UTF-8 and never reports an error.
//!
use crate::common::process::StreamTag;
use std::io;
use thiserror::Error;

/// Custom error type for shellrun.
#[derive(Error, Debug)]
pub enum ShellrunError {
    #[error("Command line is empty")]
    EmptyCommand,

    #[error("Could not parse command line '{command}': {reason}")]
    Parse { command: String, reason: String },

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {stream} stream of '{command}': {source}")]
    Read {
        command: String,
        stream: StreamTag,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported charset '{0}'")]
    UnsupportedCharset(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShellrunError {
    /// The command text the error refers to, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            ShellrunError::Parse { command, .. }
            | ShellrunError::Spawn { command, .. }
            | ShellrunError::Read { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Result type of the execution core.
pub type ExecResult<T> = std::result::Result<T, ShellrunError>;

/// Type alias for Result using anyhow::Error for application-level code.
pub type Result<T> = anyhow::Result<T>;
