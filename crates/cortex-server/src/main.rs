//! cortex-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use cortex_server::{ServerConfig, app, build_engine};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Cortex study server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  let engine = build_engine(&cfg).await?;
  tracing::info!(
    model = %cfg.generator.model,
    target_date = %cfg.target_date,
    "engine ready"
  );

  let address = cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(Arc::new(engine)))
    .await
    .context("server error")?;

  Ok(())
}
