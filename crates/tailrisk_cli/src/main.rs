//! tailrisk CLI
//!
//! # Commands
//!
//! - `tailrisk analyse --prices <csv>` - Simulate and report tail risk
//! - `tailrisk check-config --config <toml>` - Print the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tailrisk_cli::config::{build_config, CliArgs, LogLevel};
use tailrisk_cli::report::OutputFormat;
use tailrisk_cli::{commands, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Monte Carlo tail-risk analysis of daily price histories
#[derive(Parser)]
#[command(name = "tailrisk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate forward prices and report tail risk
    #[command(alias = "analyze")]
    Analyse {
        /// CSV with Date and Close/Adj Close columns
        #[arg(short, long, value_name = "CSV")]
        prices: PathBuf,

        /// Instrument label
        #[arg(short, long)]
        symbol: Option<String>,

        /// Price to locate in the simulated distribution
        #[arg(short, long)]
        target_price: Option<f64>,

        /// Starting price override (defaults to the last close)
        #[arg(long)]
        price: Option<f64>,

        /// Horizon in trading days
        #[arg(short, long)]
        days: Option<usize>,

        /// Paths per stress scenario
        #[arg(short, long)]
        num_simulations: Option<usize>,

        /// Master seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Validate configuration and print the effective analysis request
    CheckConfig,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut args = CliArgs {
        config_file: cli.config,
        log_level: cli.log_level,
        ..CliArgs::default()
    };
    if let Commands::Analyse {
        symbol,
        target_price,
        price,
        days,
        num_simulations,
        seed,
        ..
    } = &cli.command
    {
        args.symbol = symbol.clone();
        args.target_price = *target_price;
        args.custom_price = *price;
        args.days_to_simulate = *days;
        args.num_simulations = *num_simulations;
        args.seed = *seed;
    }

    let config = build_config(&args)?;
    init_tracing(config.log_level.as_filter_str());
    tracing::info!("tailrisk v{}", tailrisk_cli::VERSION);

    match cli.command {
        Commands::Analyse {
            prices,
            format,
            output,
            ..
        } => commands::analyse::run(&config, &prices, format, output.as_deref()),
        Commands::CheckConfig => commands::check_config::run(&config),
    }
}
