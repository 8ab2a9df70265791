// Sub-pool tool: validate the sub-pool config and normalize pool API snapshots.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use subpool::config::{self, SubPoolConfig};
use subpool::{PoolBackend, ShareNormalizer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sub-pool share normalization and config checks", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate the sub-pool config, then print a redacted summary
    CheckConfig {
        /// Path to the config JSON (falls back to SUBPOOL_CONFIG, then ./subpool_config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Normalize a saved pool API response into canonical worker shares
    Normalize {
        /// Pool backend: enigmapool or herominers
        #[arg(long)]
        backend: String,

        /// Path to the JSON response body
        payload: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    match args.command {
        Command::CheckConfig { config } => check_config(config),
        Command::Normalize { backend, payload } => normalize(&backend, &payload),
    }
}

fn check_config(explicit: Option<PathBuf>) -> Result<()> {
    let path = config::config_path(explicit);
    let cfg = SubPoolConfig::from_path(&path)
        .with_context(|| format!("Refusing to start: config {} is unusable", path.display()))?;

    println!("{}", serde_json::to_string_pretty(&cfg.summary())?);
    Ok(())
}

fn normalize(backend: &str, payload: &Path) -> Result<()> {
    let backend: PoolBackend = backend.parse()?;
    let text = std::fs::read_to_string(payload)
        .with_context(|| format!("Failed to read payload {}", payload.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Payload {} is not JSON", payload.display()))?;

    let snapshot = ShareNormalizer::new().normalize_value(backend, &value)?;
    info!(
        "{}: {} workers, share sum {}, reported total {:?} ({:?} counts)",
        backend,
        snapshot.shares.len(),
        snapshot.share_sum(),
        snapshot.reported_total,
        backend.share_semantics()
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
