//! # shellrun Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a handle on the
//! compiled `shellrun` binary, and a scoped `tracing` subscriber that records
//! log output so tests can assert on what the executor logged.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::io;
use std::sync::{Arc, Mutex};

/// # Get shellrun Command (`shellrun_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `shellrun` binary, with
/// `SHELLRUN_CONFIG` cleared so the developer's environment does not leak in.
///
/// ## Panics
/// Panics if the `shellrun` binary cannot be found via `Command::cargo_bin`.
pub fn shellrun_cmd() -> Command {
    let mut cmd = Command::cargo_bin("shellrun").expect("Failed to find shellrun binary for testing");
    cmd.env_remove("SHELLRUN_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a debug-level subscriber installed and returns everything it logged.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}
