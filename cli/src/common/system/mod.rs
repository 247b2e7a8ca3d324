//! # shellrun System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Inspection of the host the commands run on:
//!
//! - **`platform`**: classifies the operating system family (Windows, Linux, other).
//!   The executor uses it to decide between `cmd /c` wrapping and direct spawning.
//! - **`charset`**: finds the console encoding by running `chcp` or `locale` and
//!   parsing the result.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shellrun::common::system::{charset, platform::Platform};
//!
//! let platform = Platform::current();
//! let encoding = charset::detect_charset(platform, &charset::ProbeSettings::default());
//! println!("{platform}: {encoding}");
//! ```

/// Console charset probing and probe-output parsing.
pub mod charset;
/// Operating system family detection.
pub mod platform;
