//! # shellrun Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module is the root of the reusable machinery behind the `shellrun`
//! commands. The CLI handlers in `commands::` are thin; the work happens here.
//!
//! ## Architecture
//!
//! - **`encoding`**: the `Charset` value type and byte-to-text decoding.
//! - **`process`**: the command executor (invocation building, spawning, output draining).
//! - **`system`**: host inspection (platform family, console charset detection).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shellrun::common::{encoding::Charset, process};
//!
//! process::run_with_charset("dir", Charset::Gbk);
//! ```
//!

/// Text encodings used to decode process output.
pub mod encoding;
/// Command execution: invocation building, spawning and output logging.
pub mod process;
/// Host inspection: platform family and console charset.
pub mod system;
