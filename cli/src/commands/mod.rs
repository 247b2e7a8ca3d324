//! # shellrun Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the `shellrun` binary. Each
//! subcommand defines its own `clap` arguments struct and a `handle_*` function
//! that receives the parsed arguments and the `ShellContext` built from the
//! loaded configuration.
//!
//! ## Commands
//!
//! - `run`: Run one command line (which may contain `&&` chains)
//! - `chain`: Run several commands as one ordered sequence
//! - `charset`: Show the detected platform and console charset
//! - `demo`: Run (or list) a small set of example commands
//!

/// `shellrun chain`: runs an ordered command sequence.
pub mod chain;
/// `shellrun charset`: reports platform and console charset.
pub mod charset;
/// `shellrun demo`: example command set.
pub mod demo;
/// `shellrun run`: runs a single command line.
pub mod run;

/// Rebuilds one command line from trailing CLI arguments.
///
/// A single argument is used as-is, so a quoted `"a && b"` keeps its operators.
/// Several arguments are re-quoted so `sh -c 'echo hi'` survives the round trip.
pub fn command_line_from_args(args: &[String]) -> String {
    match args {
        [single] => single.clone(),
        _ => shell_words::join(args),
    }
}
