//! # shellrun Run Handler
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `shellrun run`: runs a single command line and logs everything it
//! prints. On Windows the line is handed to `cmd /c`, so `a && b` chains work;
//! elsewhere it is spawned directly as program + arguments.
//!
//! Output lines are logged at debug level, so pass `-vv` to see them.
//!
//! ## Usage
//!
//! ```bash
//! # Run a command, decoding output with the detected console charset
//! shellrun -vv run ping -c 4 qq.com
//!
//! # Force the charset used for decoding
//! shellrun -vv run --charset GBK "dir"
//!
//! # Fail (exit code 1) when the command cannot be spawned
//! shellrun run --strict missing-tool
//! ```
//!
use super::command_line_from_args;
use anyhow::Context;
use clap::Parser;
use shellrun::common::encoding::Charset;
use shellrun::common::process::{self, ShellContext};
use shellrun::core::error::Result;
use tracing::{debug, info};

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
#[command(
    about = "Run a single command line and log its output",
    long_about = "Runs one command line. On Windows it is wrapped in `cmd /c`; elsewhere it is spawned directly.\n\
                  Output is decoded with the console charset and logged at debug level (use -vv)."
)]
pub struct RunArgs {
    /// Charset used to decode output (UTF-8, GBK, ISO-8859-1, ...). Detected when omitted.
    #[arg(long, short = 'c')]
    charset: Option<Charset>,

    /// Exit with an error when the command cannot be spawned or its output cannot be read.
    #[arg(long)]
    strict: bool,

    /// The command line to run. Quote it to keep `&&` chains in one argument.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// Handler for `shellrun run`.
///
/// Without `--strict` failures are only logged and the handler returns `Ok(())`.
pub fn handle_run(args: RunArgs, ctx: &ShellContext) -> Result<()> {
    debug!("Run args: {:?}", args);
    let command = command_line_from_args(&args.command);
    info!(command = %command, "Running command");

    let result = process::try_run(ctx, &command, args.charset);
    if args.strict {
        result.with_context(|| format!("Command '{}' failed", command))?;
    }
    Ok(())
}
