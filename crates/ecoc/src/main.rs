//! ecoc - a small scripting-language toolchain: run, check, and bundle.
//!
//! This is the CLI entry point. It parses arguments with clap, initializes
//! logging, loads configuration, and dispatches to the matching command
//! handler.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    bundle::{run_bundle, BundleArgs},
    check::{run_check, CheckArgs},
    run::{run_run, RunArgs},
};
use config::Config;
use error::{EcocError, Result};

/// A small scripting-language toolchain: run, check, and bundle scripts.
#[derive(Parser, Debug)]
#[command(name = "ecoc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run, check, and bundle scripts", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true, env = "ECOC_VERBOSE")]
    verbose: bool,

    /// Path to an eco.toml configuration file.
    #[arg(short, long, global = true, env = "ECOC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse and evaluate a script, printing its result.
    Run(RunCommandArgs),

    /// Parse a script and report diagnostics without evaluating it.
    Check(CheckCommandArgs),

    /// Bundle an entry module and its imports into one script.
    Bundle(BundleCommandArgs),
}

#[derive(Parser, Debug)]
struct RunCommandArgs {
    /// Script to run.
    file: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckCommandArgs {
    /// Script to check.
    file: PathBuf,
}

#[derive(Parser, Debug)]
struct BundleCommandArgs {
    /// Entry module.
    entry: PathBuf,

    /// Where to write the bundled script (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Strip the emitted script's insignificant whitespace.
    #[arg(long)]
    minify: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    let config = load_config(cli.config.as_deref())?;

    execute_command(cli.command, cli.verbose, config)
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| EcocError::Config(format!("failed to initialize logging: {e}")))?;
    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn execute_command(command: Commands, verbose: bool, config: Config) -> Result<()> {
    match command {
        Commands::Run(args) => execute_run(args, verbose),
        Commands::Check(args) => execute_check(args),
        Commands::Bundle(args) => execute_bundle(args, config),
    }
}

fn execute_run(args: RunCommandArgs, verbose: bool) -> Result<()> {
    run_run(RunArgs { file: args.file, verbose })
}

fn execute_check(args: CheckCommandArgs) -> Result<()> {
    run_check(CheckArgs { file: args.file })
}

fn execute_bundle(args: BundleCommandArgs, config: Config) -> Result<()> {
    run_bundle(BundleArgs { entry: args.entry, output: args.output, minify: args.minify || config.minify })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["ecoc", "run", "main.eco"]);
        if let Commands::Run(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("main.eco"));
        } else {
            panic!("expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["ecoc", "check", "main.eco"]);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_bundle_with_output() {
        let cli = Cli::parse_from(["ecoc", "bundle", "main.eco", "--output", "out.js"]);
        if let Commands::Bundle(args) = cli.command {
            assert_eq!(args.entry, PathBuf::from("main.eco"));
            assert_eq!(args.output, Some(PathBuf::from("out.js")));
            assert!(!args.minify);
        } else {
            panic!("expected Bundle command");
        }
    }

    #[test]
    fn test_cli_parse_bundle_with_minify() {
        let cli = Cli::parse_from(["ecoc", "bundle", "main.eco", "--minify"]);
        if let Commands::Bundle(args) = cli.command {
            assert!(args.minify);
        } else {
            panic!("expected Bundle command");
        }
    }

    #[test]
    fn test_cli_parse_verbose_global_flag() {
        let cli = Cli::parse_from(["ecoc", "--verbose", "run", "main.eco"]);
        assert!(cli.verbose);
    }
}
