//! # shellrun Process Runner (`common::process::runner`)
//!
//! File: cli/src/common/process/runner.rs
//!
//! Spawns an `Invocation`, drains stdout and then stderr line by line, decodes
//! each line with the resolved `Charset` and logs it at debug level. Streams are
//! read to end-of-file before the child is reaped, so a chatty process never
//! stalls on a full stdout pipe. stderr is only read after stdout closes.
//!
use super::invocation::Invocation;
use super::StreamTag;
use crate::common::encoding::Charset;
use crate::core::error::{ExecResult, ShellrunError};
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, ExitStatus, Stdio};
use tracing::debug;

/// Owns a spawned child until it has been reaped.
///
/// Dropping an unfinished guard kills the child if it is still running and
/// waits for it, so error paths never leak a process.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn finish(mut self) -> io::Result<ExitStatus> {
        self.reaped = true;
        self.child.wait()
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// Runs `invocation` to completion, logging every decoded output line.
pub(crate) fn execute(invocation: &Invocation, charset: Charset) -> ExecResult<()> {
    let command_line = invocation.command_line();
    debug!(command = command_line, %charset, "Spawning process");

    let child = invocation
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ShellrunError::Spawn {
            command: command_line.to_string(),
            source,
        })?;
    let mut guard = ChildGuard::new(child);
    let stdout = guard.child.stdout.take();
    let stderr = guard.child.stderr.take();

    if let Some(stdout) = stdout {
        drain(stdout, StreamTag::Info, charset, command_line)?;
    }
    if let Some(stderr) = stderr {
        drain(stderr, StreamTag::Error, charset, command_line)?;
    }

    match guard.finish() {
        Ok(status) => debug!(command = command_line, %status, "Process exited"),
        Err(e) => debug!(command = command_line, error = %e, "Failed to reap process"),
    }
    Ok(())
}

/// Reads `stream` to end-of-file, logging each decoded line. Returns the line count.
pub(crate) fn drain<R: Read>(
    stream: R,
    tag: StreamTag,
    charset: Charset,
    command: &str,
) -> ExecResult<usize> {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut lines = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ShellrunError::Read {
                command: command.to_string(),
                stream: tag,
                source,
            })?;
        if read == 0 {
            break;
        }
        let text = charset.decode(strip_line_ending(&buf));
        debug!(stream = tag.as_str(), "shell {} >>> {}", tag, text);
        lines += 1;
    }
    Ok(lines)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Runs a diagnostic command and returns its stdout as (lossy) UTF-8 text.
///
/// stderr is discarded; the exit status is ignored.
pub(crate) fn capture_stdout(invocation: &Invocation) -> ExecResult<String> {
    let output = invocation
        .to_command()
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|source| ShellrunError::Spawn {
            command: invocation.command_line().to_string(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
