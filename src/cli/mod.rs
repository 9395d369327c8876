//! CLI module for the auth chain tool
//!
//! Provides subcommands for working with configured authentication policies:
//! - `check`: load and validate every policy
//! - `list`: show registered policies and available module kinds
//! - `simulate`: run the chain selected for a layer and application context

pub mod check;
pub mod list;
pub mod simulate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Auth Chain - evaluate server authentication module chains
#[derive(Parser)]
#[command(name = "auth-chain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the configured policies
    Check(ConfigArgs),

    /// List registered policies and module kinds
    List(ConfigArgs),

    /// Evaluate the chain selected for a layer and application context
    Simulate(simulate::SimulateArgs),
}

/// Arguments shared by every command
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// Configuration file; defaults to config/default and config/local
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load configuration and install logging
    pub fn load(&self) -> anyhow::Result<AppConfig> {
        dotenvy::dotenv().ok();

        let config = AppConfig::load(self.config.as_deref())?;
        logging::init_logging(&config.logging)?;

        Ok(config)
    }
}
