//! # ttnotifier
//!
//! Class timetable with reminders before each class.
//!
//! Usage: `ttnotifier login alice`, `ttnotifier add -d Monday -t 09:00 -s Math`,
//! `ttnotifier watch`

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use log::{debug, error};

use ttnotifier::commands::{self, Cli};
use ttnotifier::core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    debug!(
        "Using data directory {} ({} notifier)",
        config.data_dir.display(),
        config.notifier
    );

    if let Err(e) = commands::run(cli, config).await {
        error!("Command failed: {e:#}");
        return Err(e);
    }

    Ok(())
}
