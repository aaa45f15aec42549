//! HTTP host for the Cortex API.
//!
//! Wires a SQLite store, the model client and the glossary into one
//! [`StudyEngine`] and mounts [`cortex_api::api_router`] under `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::{Router, routing::get};
use chrono::{DateTime, Utc};
use cortex_core::{collab::ContextResolver, metrics::default_target_date, store::StudyStore};
use cortex_engine::{EngineConfig, Generator, StudyEngine};
use cortex_llm::{GeneratorConfig, GlossaryResolver, OllamaClient, config::GlossaryConfig};
use cortex_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// The engine as the server runs it.
pub type ServerEngine = StudyEngine<SqliteStore, OllamaClient, GlossaryResolver>;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CORTEX_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:        String,
  #[serde(default = "default_port")]
  pub port:        u16,
  #[serde(default = "default_store_path")]
  pub store_path:  PathBuf,
  #[serde(default = "default_target_date")]
  pub target_date: DateTime<Utc>,
  #[serde(default)]
  pub generator:   GeneratorConfig,
  /// Extra acronym expansions, e.g. `HTA = "Hipertensión Arterial"`.
  #[serde(default)]
  pub glossary:    GlossaryConfig,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8700 }
fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/cortex/cortex.db") }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `CORTEX_*` variables.
  /// Nested keys use a double underscore: `CORTEX_GENERATOR__MODEL`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("CORTEX")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Wiring ──────────────────────────────────────────────────────────────────

/// Open the store and build the engine described by `cfg`.
pub async fn build_engine(cfg: &ServerConfig) -> anyhow::Result<ServerEngine> {
  let store_path = expand_tilde(&cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let generator =
    OllamaClient::new(cfg.generator.clone()).context("failed to build model client")?;
  let glossary = GlossaryResolver::new(&cfg.glossary);

  Ok(StudyEngine::new(store, generator, glossary, EngineConfig { target_date: cfg.target_date }))
}

/// The full application: the API nested under `/api` plus `/health`, wrapped in request tracing.
pub fn app<S, G, R>(engine: Arc<StudyEngine<S, G, R>>) -> Router
where
  S: StudyStore + 'static,
  G: Generator + 'static,
  R: ContextResolver + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", cortex_api::api_router(engine))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
