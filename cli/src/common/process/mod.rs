//! # shellrun Process Execution (`common::process`)
//!
//! File: cli/src/common/process/mod.rs
//!
//! ## Overview
//!
//! The command executor. Callers hand over a command string or an ordered list of
//! command strings; this module picks the right invocation syntax for the host,
//! resolves the console charset, runs the process and logs every line it prints.
//!
//! ## Architecture
//!
//! - **`invocation`**: pure construction of `Invocation`s (`cmd /c` wrapping and
//!   `&&` chaining on Windows, direct spawning elsewhere).
//! - **`runner`**: spawning, sequential stdout/stderr draining and child reaping.
//! - **`ShellContext`**: the platform classification and probe settings a call
//!   runs with. It is a plain value; nothing is shared between calls.
//!
//! Two call surfaces sit on top:
//!
//! - `run`, `run_all`, `run_with_charset`, `run_all_with_charset`: fire and
//!   forget. Failures are logged at debug level with the command text and the
//!   call returns normally.
//! - `try_run`, `try_run_all`: the same work, returning `ExecResult<()>`.
//!
//! ## Sequences
//!
//! On Windows a sequence becomes a single `cmd /c a && b && c`, so `cmd` stops at
//! the first failing entry. Elsewhere every entry runs as its own process, in
//! order, whatever the earlier entries did; the first failure is reported after
//! the last entry has run.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shellrun::common::process::{self, ShellContext};
//!
//! process::run("ping -c 1 qq.com");
//! process::run_all(&["uname -a", "ls -l"]);
//!
//! let ctx = ShellContext::detect();
//! process::try_run(&ctx, "git status", None)?;
//! ```
//!
pub mod invocation;
mod runner;

pub(crate) use runner::capture_stdout;

use crate::common::encoding::Charset;
use crate::common::system::charset::{self, ProbeSettings};
use crate::common::system::platform::Platform;
use crate::core::config::Config;
use crate::core::error::{ExecResult, Result, ShellrunError};
use anyhow::Context;
use std::fmt;
use tracing::debug;

/// Which output stream a logged line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTag {
    /// Standard output.
    Info,
    /// Standard error.
    Error,
}

impl StreamTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamTag::Info => "info",
            StreamTag::Error => "error",
        }
    }
}

impl fmt::Display for StreamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host classification and detection settings used by one or more calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellContext {
    pub platform: Platform,
    pub probes: ProbeSettings,
    /// Forces a charset instead of probing, unless a call passes its own.
    pub charset: Option<Charset>,
}

impl ShellContext {
    /// The running host with default probes.
    pub fn detect() -> Self {
        Self::for_platform(Platform::current())
    }

    /// A context for an explicit platform family with default probes.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            probes: ProbeSettings::default(),
            charset: None,
        }
    }

    /// The running host, with probes and charset override taken from `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let charset = cfg
            .exec
            .charset
            .as_deref()
            .map(str::parse::<Charset>)
            .transpose()
            .context("Invalid exec.charset in configuration")?;
        Ok(Self {
            platform: Platform::current(),
            probes: ProbeSettings {
                windows_probe: cfg.detect.windows_probe.clone(),
                posix_probe: cfg.detect.posix_probe.clone(),
                locale_variables: cfg.detect.locale_variables.clone(),
            },
            charset,
        })
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = Some(charset);
        self
    }

    /// Explicit charset, else the context override, else probe the host.
    pub fn resolve_charset(&self, explicit: Option<Charset>) -> Charset {
        explicit
            .or(self.charset)
            .unwrap_or_else(|| charset::detect_charset(self.platform, &self.probes))
    }
}

/// Runs one command string, logging its output. Never fails.
///
/// The string may itself contain `&&` chains; on Windows they are interpreted by
/// `cmd`, elsewhere the string is spawned as program + arguments.
pub fn run(command: &str) {
    let _ = try_run(&ShellContext::detect(), command, None);
}

/// Runs an ordered command sequence, logging its output. Never fails.
pub fn run_all<S: AsRef<str>>(commands: &[S]) {
    let _ = try_run_all(&ShellContext::detect(), commands, None);
}

/// Like `run`, decoding output with `charset` instead of probing.
pub fn run_with_charset(command: &str, charset: Charset) {
    let _ = try_run(&ShellContext::detect(), command, Some(charset));
}

/// Like `run_all`, decoding output with `charset` instead of probing.
pub fn run_all_with_charset<S: AsRef<str>>(commands: &[S], charset: Charset) {
    let _ = try_run_all(&ShellContext::detect(), commands, Some(charset));
}

/// Runs one command string and reports whether it could be spawned and drained.
///
/// The exit status of the command does not make this fail.
pub fn try_run(ctx: &ShellContext, command: &str, charset: Option<Charset>) -> ExecResult<()> {
    let result = invocation::single(ctx.platform, command).and_then(|inv| {
        let charset = ctx.resolve_charset(charset);
        debug!(%charset, "shell exec charset");
        runner::execute(&inv, charset)
    });
    if let Err(e) = &result {
        log_failure(e, command);
    }
    result
}

/// Runs an ordered command sequence. See the module docs for per-platform behaviour.
///
/// Returns the first failure, after every entry has been attempted. An empty
/// sequence spawns nothing and succeeds.
pub fn try_run_all<S: AsRef<str>>(
    ctx: &ShellContext,
    commands: &[S],
    charset: Option<Charset>,
) -> ExecResult<()> {
    let plan = invocation::sequence(ctx.platform, commands);
    if plan.is_empty() {
        debug!("Empty command sequence, nothing to run");
        return Ok(());
    }
    let charset = ctx.resolve_charset(charset);
    debug!(%charset, steps = plan.len(), "shell exec charset");

    // Windows plans hold a single step covering the whole chain.
    let chain = ctx.platform.is_windows().then(|| invocation::join_chain(commands));
    let mut first_failure: Option<ShellrunError> = None;
    for (index, step) in plan.into_iter().enumerate() {
        let fallback = match &chain {
            Some(chain) => chain.as_str(),
            None => commands.get(index).map(|c| c.as_ref()).unwrap_or_default(),
        };
        if let Err(e) = step.and_then(|inv| runner::execute(&inv, charset)) {
            log_failure(&e, fallback);
            first_failure.get_or_insert(e);
        }
    }
    match first_failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn log_failure(error: &ShellrunError, fallback_command: &str) {
    let command = error.command().unwrap_or(fallback_command);
    debug!(command, error = %error, "shell exec error");
}
