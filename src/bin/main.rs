//! Aura admin console entry point
//!
//! Parses flags, loads the config file, points tracing at a log file
//! (the terminal itself belongs to the UI), then hands off to the
//! event loop.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use aura_admin::config::AppConfig;
use aura_admin::data::store::DataStore;
use aura_admin::utils::logger::init_logging;

#[derive(Parser)]
#[command(name = "aura-admin")]
#[command(about = "Terminal admin console for the Aura platform")]
#[command(version)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log to this file instead of ~/.aura-admin/admin.log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Event-loop tick rate in milliseconds
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write the seed fixtures as JSON to the given path and exit
    #[arg(long)]
    export_seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.export_seeds {
        let json = DataStore::seeded().export_json()?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Seed fixtures written to {}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load_or_default()?,
    };
    if let Some(tick_rate) = args.tick_rate {
        config.tick_rate_ms = tick_rate;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = Some(log_file);
    }
    if args.debug {
        config.log_filter = "debug".to_string();
    }

    let log_path = init_logging(config.log_file.clone(), &config.log_filter)?;
    tracing::info!(
        tick_rate_ms = config.tick_rate_ms,
        log = %log_path.display(),
        "starting aura-admin"
    );

    aura_admin::terminal::run(&config).await?;
    Ok(())
}
