//! antpay CLI: route payments over a channel network with an ant colony.
//!
//! Subcommands: init, route, demo.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{AntpayConfig, LoggingConfig};

/// antpay: low-fee payment routing by Ant Colony Optimization.
#[derive(Parser, Debug)]
#[command(name = "antpay", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "antpay.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default antpay.toml.
    Init(commands::init::InitArgs),
    /// Find a route through a network snapshot file.
    Route(commands::route::RouteArgs),
    /// Route a payment through the built-in five-channel sample network.
    Demo(commands::demo::DemoArgs),
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the configuration file, apply CLI overrides, and install logging.
fn setup(cli: &Cli) -> anyhow::Result<AntpayConfig> {
    let mut config = AntpayConfig::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);
    tracing::debug!(path = %cli.config.display(), "configuration loaded");
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Route(args) => commands::route::run(args, setup(&cli)?.colony),
        Commands::Demo(args) => commands::demo::run(args, setup(&cli)?.colony),
    }
}
