//! `cortex`: command-line front end for the Cortex study engine.
//!
//! Every command prints JSON on stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! cortex --db ~/study.db import syllabus.toml
//! cortex challenge
//! cortex feedback "Dengue" easy
//! cortex baseline record '[{"topic_id":3,"correct":false}]'
//! ```

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cortex_core::{
  baseline::BaselineAnswer,
  progress::Rating,
  topic::{JournalEntry, TopicId},
};
use cortex_engine::{EngineConfig, StudyEngine};
use cortex_llm::{GlossaryResolver, OllamaClient};
use cortex_store_sqlite::SqliteStore;
use serde::Serialize;
use serde_json::json;
use settings::{ConfigFile, Overrides, Settings, SyllabusFile};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type Engine = StudyEngine<SqliteStore, OllamaClient, GlossaryResolver>;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cortex", version, about = "Spaced-repetition study engine")]
struct Args {
  /// Path to a TOML config file (db, target_date, [generator], [glossary]).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database path (default: cortex.db).
  #[arg(long, env = "CORTEX_DB")]
  db: Option<PathBuf>,

  /// Base URL of the model server (default: http://localhost:11434).
  #[arg(long, env = "CORTEX_LLM_URL")]
  llm_url: Option<String>,

  /// Model name passed to the model server.
  #[arg(long, env = "CORTEX_MODEL")]
  model: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create the database and its schema.
  Setup,
  /// Load topics from a TOML syllabus (`[[topics]]` with title, priority).
  Import { file: PathBuf },
  /// List every topic.
  Topics,
  /// Pick the next topic: due reviews first, then new topics.
  Next,
  /// Rate a topic directly by id.
  Update { topic_id: TopicId, rating: Rating },
  /// Show the challenge for the active curriculum node.
  Challenge,
  /// Rate the current challenge (again|hard|good|easy or 1-4).
  Feedback { label: String, rating: Rating },
  /// Daily goal and mastery progress.
  Metrics,
  /// Per-topic mastery levels.
  Roadmap,
  /// Syllabus totals.
  Stats,
  /// Ask the model for sub-topics and append them to the curriculum.
  Expand { label: String },
  /// Archive a question; ENTRY is a JSON object (question, answer, explanation).
  Journal { topic: String, entry: String },
  /// Placement pass over high-priority topics that were never studied.
  Baseline {
    #[command(subcommand)]
    action: BaselineAction,
  },
}

#[derive(Subcommand, Debug)]
enum BaselineAction {
  /// List topics waiting for a baseline answer.
  Topics {
    #[arg(long, default_value_t = 20)]
    limit: usize,
  },
  /// Generate a diagnosis question for one topic.
  Question { topic_id: TopicId },
  /// Seed progress; ANSWERS is a JSON array of {topic_id, correct}.
  Record { answers: String },
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::read(path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(
    Overrides { db: args.db, llm_url: args.llm_url, model: args.model },
    file_cfg,
  );

  let engine = open_engine(&settings).await?;
  run(&engine, &settings, args.command).await
}

async fn open_engine(settings: &Settings) -> Result<Engine> {
  let store = SqliteStore::open(&settings.db)
    .await
    .with_context(|| format!("opening database {}", settings.db.display()))?;
  let generator = OllamaClient::new(settings.generator.clone()).context("building model client")?;
  let glossary = GlossaryResolver::new(&settings.glossary);
  Ok(StudyEngine::new(
    store,
    generator,
    glossary,
    EngineConfig { target_date: settings.target_date },
  ))
}

async fn run(engine: &Engine, settings: &Settings, command: Command) -> Result<()> {
  match command {
    Command::Setup => print(&json!({ "status": "ready", "db": settings.db })),
    Command::Import { file } => {
      let syllabus = SyllabusFile::read(&file)?;
      print(&engine.load_syllabus(syllabus.topics).await?)
    }
    Command::Topics => print(&engine.list_topics().await?),
    Command::Next => print(&engine.next_topic().await?),
    Command::Update { topic_id, rating } => print(&engine.update_progress(topic_id, rating).await?),
    Command::Challenge => print(&engine.get_current_target().await?),
    Command::Feedback { label, rating } => print(&engine.submit_feedback(&label, rating).await?),
    Command::Metrics => print(&engine.get_daily_metrics().await?),
    Command::Roadmap => print(&engine.roadmap().await?),
    Command::Stats => print(&engine.stats().await?),
    Command::Expand { label } => print(&engine.expand_topic(&label).await?),
    Command::Journal { topic, entry } => {
      let entry: JournalEntry = serde_json::from_str(&entry).context("parsing journal entry")?;
      print(&engine.log_question(&topic, entry).await?)
    }
    Command::Baseline { action } => match action {
      BaselineAction::Topics { limit } => print(&engine.baseline_topics(limit).await?),
      BaselineAction::Question { topic_id } => print(&engine.baseline_challenge(topic_id).await?),
      BaselineAction::Record { answers } => {
        let answers: Vec<BaselineAnswer> =
          serde_json::from_str(&answers).context("parsing baseline answers")?;
        print(&engine.record_baseline(answers).await?)
      }
    },
  }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
