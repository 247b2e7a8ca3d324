//! # shellrun Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `shellrun` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and building the `ShellContext`
//! - Routing execution to the subcommand handlers
//!
//! Command output is logged at debug level, so `-vv` is the usual way to watch it.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! shellrun --help
//!
//! # Run a command and show its output
//! shellrun -vv run "ls -l"
//!
//! # Run a sequence using a specific configuration file
//! shellrun -vv --config ~/shellrun.toml chain "uname -a" "ls -l"
//! ```
//!
use clap::{Parser, Subcommand};
use shellrun::common::process::ShellContext;
use shellrun::core::config;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand argument structs and handlers.

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "shellrun",
    about = "Run shell commands with platform-aware chaining and console charset decoding",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of the project/user files.
    #[arg(long, global = true, env = "SHELLRUN_CONFIG")]
    config: Option<String>,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    #[command(alias = "c")]
    Chain(commands::chain::ChainArgs),
    Charset(commands::charset::CharsetArgs),
    Demo(commands::demo::DemoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = config::load_config(cli.config.as_deref())
        .and_then(|cfg| ShellContext::from_config(&cfg))
        .and_then(|ctx| match cli.command {
            Commands::Run(args) => commands::run::handle_run(args, &ctx),
            Commands::Chain(args) => commands::chain::handle_chain(args, &ctx),
            Commands::Charset(args) => commands::charset::handle_charset(args, &ctx),
            Commands::Demo(args) => commands::demo::handle_demo(args, &ctx),
        });

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["shellrun", "-vv", "run", "--config", "/tmp/x.toml", "ls"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("/tmp/x.toml"));
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_aliases() {
        let cli = Cli::try_parse_from(["shellrun", "c", "dir", "ipconfig"]).unwrap();
        assert!(matches!(cli.command, Commands::Chain(_)));
    }
}
