//! # shellrun Library
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! Cross-platform command execution with console charset detection. Hand it a
//! command line (or an ordered list of them) and it takes care of the
//! OS-specific invocation syntax, works out which encoding the console speaks,
//! and logs every decoded output line through `tracing`.
//!
//! ## Architecture
//!
//! - `common::process`: the executor (`run`, `run_all`, `try_run`, `try_run_all`, ...)
//! - `common::system`: platform detection and charset probing
//! - `common::encoding`: the `Charset` type
//! - `core`: configuration and error types
//!
//! ## Examples
//!
//! ```rust,no_run
//! use shellrun::common::encoding::Charset;
//! use shellrun::common::process;
//!
//! // Fire and forget: failures only show up in the log.
//! process::run("ping -c 1 qq.com");
//! process::run_all(&["uname -a", "ls -l"]);
//! process::run_with_charset("dir", Charset::Gbk);
//! ```
//!
pub mod common;
pub mod core;
