//! # shellrun Demo Handler
//!
//! File: cli/src/commands/demo.rs
//!
//! Implements `shellrun demo`: runs a short, platform-appropriate command
//! sequence followed by a single command, separated by a divider line. With
//! `--list` the commands are only printed.
//!
use clap::Parser;
use shellrun::common::process::{self, ShellContext};
use shellrun::common::system::platform::Platform;
use shellrun::core::error::Result;
use tracing::info;

const WINDOWS_SEQUENCE: &[&str] = &["ipconfig", "ping www.baidu.com", "dir"];
const WINDOWS_SINGLE: &str = "ping qq.com";
const POSIX_SEQUENCE: &[&str] = &["uname -a", "ls -l"];
const POSIX_SINGLE: &str = "ping -c 4 qq.com";
const DIVIDER: &str = "=======================";

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
#[command(about = "Run a small set of example commands")]
pub struct DemoArgs {
    /// Only print the commands that would run.
    #[arg(long)]
    list: bool,
}

fn demo_commands(platform: Platform) -> (&'static [&'static str], &'static str) {
    if platform.is_windows() {
        (WINDOWS_SEQUENCE, WINDOWS_SINGLE)
    } else {
        (POSIX_SEQUENCE, POSIX_SINGLE)
    }
}

/// Handler for `shellrun demo`. Failures are logged, never returned.
pub fn handle_demo(args: DemoArgs, ctx: &ShellContext) -> Result<()> {
    let (sequence, single) = demo_commands(ctx.platform);
    if args.list {
        for command in sequence {
            println!("chain: {}", command);
        }
        println!("run:   {}", single);
        return Ok(());
    }

    info!(platform = %ctx.platform, "Running demo commands");
    let _ = process::try_run_all(ctx, sequence, None);
    println!("{}", DIVIDER);
    let _ = process::try_run(ctx, single, None);
    Ok(())
}
