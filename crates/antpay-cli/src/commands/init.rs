//! `antpay init`: Write a default configuration file.

use clap::Args;
use std::path::PathBuf;

use crate::config::AntpayConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = args.dir.join("antpay.toml");

    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }

    AntpayConfig::default().save(&config_path)?;
    println!("Initialized antpay at {}", config_path.display());
    println!("Edit antpay.toml to tune the colony.");
    println!("Run 'antpay demo' to try the sample network.");

    Ok(())
}
