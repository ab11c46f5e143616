//! # ezv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ezv_cli::check::{run_check, CheckArgs};
use ezv_cli::config::resolve_options;
use ezv_cli::lint::{run_lint, LintArgs};

/// ezv: recursive schema validation for JSON and YAML documents.
#[derive(Parser, Debug)]
#[command(name = "ezv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to an engine configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum nesting depth, overriding the configuration file.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Emit log lines as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate data files against a rule document.
    Check(CheckArgs),

    /// Check that a rule document compiles into a sound schema.
    Lint(LintArgs),
}

/// Level used when `RUST_LOG` is unset.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ezv starting");

    let result = resolve_options(cli.config.as_deref(), cli.max_depth).and_then(|options| {
        match &cli.command {
            Commands::Check(args) => run_check(args, &options),
            Commands::Lint(args) => run_lint(args, &options),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
