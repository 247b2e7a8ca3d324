//! # shellrun Charset Report Handler
//!
//! File: cli/src/commands/charset.rs
//!
//! Implements `shellrun charset`: prints the detected platform family, the probe
//! that would be run, and the charset output will be decoded with. A charset
//! forced in the configuration is reported as such and no probe runs.
//!
use clap::Parser;
use shellrun::common::encoding::Charset;
use shellrun::common::process::ShellContext;
use shellrun::core::error::Result;

/// Arguments for the `charset` subcommand.
#[derive(Parser, Debug)]
#[command(about = "Show the detected platform and console charset")]
pub struct CharsetArgs {
    /// Print only the charset name.
    #[arg(long, short)]
    quiet: bool,
}

/// Handler for `shellrun charset`.
pub fn handle_charset(args: CharsetArgs, ctx: &ShellContext) -> Result<()> {
    let charset = ctx.resolve_charset(None);
    if args.quiet {
        println!("{}", charset);
    } else {
        println!("{}", render_report(ctx, charset));
    }
    Ok(())
}

fn render_report(ctx: &ShellContext, charset: Charset) -> String {
    let source = if ctx.charset.is_some() {
        "configured".to_string()
    } else {
        format!("probe: {}", ctx.probes.probe_for(ctx.platform))
    };
    format!("Platform: {}\nCharset:  {} ({})", ctx.platform, charset, source)
}
