//! # shellrun Chain Handler
//!
//! File: cli/src/commands/chain.rs
//!
//! ## Overview
//!
//! Implements `shellrun chain`: every positional argument is one command, run in
//! the given order.
//!
//! - **Windows**: the commands are joined with `&&` and run as a single
//!   `cmd /c` call, so `cmd` stops at the first failing command.
//! - **Other platforms**: each command runs as its own process, one after the
//!   other, regardless of how the previous one exited.
//!
//! ## Usage
//!
//! ```bash
//! shellrun -vv chain ipconfig "ping www.baidu.com" dir
//! shellrun -vv chain "uname -a" "ls -l"
//! ```
//!
use anyhow::Context;
use clap::Parser;
use shellrun::common::encoding::Charset;
use shellrun::common::process::{self, ShellContext};
use shellrun::core::error::Result;
use tracing::{debug, info};

/// Arguments for the `chain` subcommand.
#[derive(Parser, Debug)]
#[command(
    about = "Run several commands as one ordered sequence",
    long_about = "Runs the given commands in order. On Windows they are joined with `&&` into one `cmd /c` call;\n\
                  elsewhere each command runs as its own process regardless of earlier exit statuses."
)]
pub struct ChainArgs {
    /// Charset used to decode output (UTF-8, GBK, ISO-8859-1, ...). Detected when omitted.
    #[arg(long, short = 'c')]
    charset: Option<Charset>,

    /// Exit with an error when any command cannot be spawned or its output cannot be read.
    #[arg(long)]
    strict: bool,

    /// The commands to run, one per argument.
    #[arg(required = true)]
    commands: Vec<String>,
}

/// Handler for `shellrun chain`.
pub fn handle_chain(args: ChainArgs, ctx: &ShellContext) -> Result<()> {
    debug!("Chain args: {:?}", args);
    info!(
        steps = args.commands.len(),
        platform = %ctx.platform,
        "Running command sequence"
    );

    let result = process::try_run_all(ctx, &args.commands, args.charset);
    if args.strict {
        result.context("Command sequence failed")?;
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use shellrun::common::system::platform::Platform;

    #[test]
    fn test_chain_args_parsing() {
        let args = ChainArgs::try_parse_from(["chain", "-c", "ISO-8859-1", "ipconfig", "ping www.baidu.com", "dir"])
            .unwrap();
        assert_eq!(args.charset, Some(Charset::Latin1));
        assert_eq!(args.commands, vec!["ipconfig", "ping www.baidu.com", "dir"]);
        assert!(!args.strict);
    }

    #[test]
    fn test_chain_args_requires_commands() {
        assert!(ChainArgs::try_parse_from(["chain", "--strict"]).is_err());
    }

    #[test]
    fn test_handle_chain_strict_reports_failure() {
        let ctx = ShellContext::for_platform(Platform::Linux).with_charset(Charset::Utf8);
        let args =
            ChainArgs::try_parse_from(["chain", "--strict", "shellrun-no-such-binary-12345"]).unwrap();
        let err = handle_chain(args, &ctx).unwrap_err();
        assert!(format!("{err:#}").contains("shellrun-no-such-binary-12345"));
    }

    #[test]
    fn test_handle_chain_lenient_swallows_failure() {
        let ctx = ShellContext::for_platform(Platform::Linux).with_charset(Charset::Utf8);
        let args = ChainArgs::try_parse_from(["chain", "shellrun-no-such-binary-12345"]).unwrap();
        assert!(handle_chain(args, &ctx).is_ok());
    }
}
