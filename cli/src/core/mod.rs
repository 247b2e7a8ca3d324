//! # shellrun Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the library and the CLI:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and result aliases
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shellrun::core::config; // For loading configuration
//! use shellrun::core::error::{ExecResult, Result, ShellrunError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
