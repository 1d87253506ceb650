//! Chebyshev CLI - command-line front end for the streaming detector
//!
//! Reads `{"timestamp": ..., "value": ...}` records as JSON lines and writes
//! one scored record per input record:
//! - `chebyshev score` scores a file or stdin
//! - `chebyshev config` prints the effective detector configuration

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
pub mod config;
mod error;
pub mod output;

use commands::score;
use config::CliConfig;
pub use error::{CliError, CliResult};

/// Chebyshev CLI application
#[derive(Parser)]
#[command(name = "chebyshev")]
#[command(about = "Two-stage Chebyshev anomaly scoring for value streams", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CHEBYSHEV_CONFIG")]
    config: Option<String>,

    /// Stage-1 tail probability (overrides the config file)
    #[arg(long)]
    stage1_probability: Option<f64>,

    /// Stage-2 tail probability (overrides the config file)
    #[arg(long)]
    stage2_probability: Option<f64>,

    /// Output format (jsonl, json)
    #[arg(short, long, value_enum, default_value = "jsonl")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Score a JSON-lines record stream
    Score(score::ScoreArgs),

    /// Show the effective configuration
    Config,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing; stdout carries records, so logs go to stderr
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();

    // Load config, then layer flag overrides on top
    let config = CliConfig::load(cli.config.as_deref())?
        .with_overrides(cli.stage1_probability, cli.stage2_probability);

    match cli.command {
        Commands::Score(args) => score::execute(args, &config, cli.output),
        Commands::Config => {
            config.detector.validate()?;
            print!("{}", config.to_toml()?);
            println!("# k1 = {}", config.detector.stage1_multiplier());
            println!("# k2 = {}", config.detector.stage2_multiplier());
            Ok(())
        }
    }
}
