//! bsput - Black-Scholes put pricing over a strike vector
//!
//! Command-line entry point for the batched put kernel.
//!
//! # Commands
//!
//! - `bsput run` - Price the strike ramp on the sequential and the selected backend
//! - `bsput price --strike <K>...` - Price individual strikes
//! - `bsput check` - Show the resolved configuration
//!
//! # Architecture
//!
//! As the service layer, this crate resolves configuration and hands
//! validated inputs to `pricer_kernel`.

use clap::{Parser, Subcommand};
use pricer_kernel::backend::BackendKind;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{CliArgs, LogLevel, Precision};

pub use error::{CliError, Result};

/// Black-Scholes put pricing over a strike vector
#[derive(Parser)]
#[command(name = "bsput")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "BSPUT_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the strike ramp sequentially, then on the selected backend
    Run {
        /// Backend (sequential, parallel, batched)
        #[arg(short, long)]
        backend: Option<BackendKind>,

        /// Precision (f32, f64)
        #[arg(short, long)]
        precision: Option<Precision>,

        /// Number of strikes in the ramp
        #[arg(short, long)]
        num_strikes: Option<usize>,

        /// Dedicated thread pool size for the parallel backend
        #[arg(short = 't', long)]
        threads: Option<usize>,
    },

    /// Price one put per strike with the configured market scalars
    Price {
        /// Strike price (repeatable)
        #[arg(short = 'k', long = "strike", required = true)]
        strikes: Vec<f64>,

        /// Backend (sequential, parallel, batched)
        #[arg(short, long)]
        backend: Option<BackendKind>,

        /// Precision (f32, f64)
        #[arg(short, long)]
        precision: Option<Precision>,
    },

    /// Show the resolved configuration and available threads
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut args = CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level,
        ..Default::default()
    };
    match &cli.command {
        Commands::Run {
            backend,
            precision,
            num_strikes,
            threads,
        } => {
            args.backend = *backend;
            args.precision = *precision;
            args.num_strikes = *num_strikes;
            args.num_threads = *threads;
        }
        Commands::Price {
            backend, precision, ..
        } => {
            args.backend = *backend;
            args.precision = *precision;
        }
        Commands::Check => {}
    }
    if cli.verbose && args.log_level.is_none() {
        args.log_level = Some(LogLevel::Debug);
    }

    let config = config::build_config(&args)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Run { .. } => commands::run::run(&config),
        Commands::Price { strikes, .. } => commands::price::run(&config, &strikes),
        Commands::Check => commands::check::run(&config),
    }
}
