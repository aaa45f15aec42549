//! Flag, file and default precedence for the CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cortex_core::{metrics::default_target_date, topic::NewTopic};
use cortex_llm::{GeneratorConfig, config::GlossaryConfig};
use serde::Deserialize;

pub const DEFAULT_DB: &str = "cortex.db";

/// Shape of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
  #[serde(default)]
  pub db:          Option<PathBuf>,
  #[serde(default)]
  pub target_date: Option<DateTime<Utc>>,
  #[serde(default)]
  pub generator:   Option<GeneratorConfig>,
  #[serde(default)]
  pub glossary:    GlossaryConfig,
}

impl ConfigFile {
  pub fn read(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// Values taken from flags or their environment fallbacks.
#[derive(Debug, Default)]
pub struct Overrides {
  pub db:      Option<PathBuf>,
  pub llm_url: Option<String>,
  pub model:   Option<String>,
}

/// Everything needed to open the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub db:          PathBuf,
  pub target_date: DateTime<Utc>,
  pub generator:   GeneratorConfig,
  pub glossary:    GlossaryConfig,
}

impl Settings {
  /// Flags override the config file, which overrides defaults.
  pub fn resolve(flags: Overrides, file: ConfigFile) -> Self {
    let mut generator = file.generator.unwrap_or_default();
    if let Some(url) = flags.llm_url {
      generator.base_url = url;
    }
    if let Some(model) = flags.model {
      generator.model = model;
    }
    Self {
      db: flags
        .db
        .or(file.db)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB)),
      target_date: file.target_date.unwrap_or_else(default_target_date),
      generator,
      glossary: file.glossary,
    }
  }
}

/// A syllabus import file: `[[topics]]` tables with `title` and an optional
/// `priority`.
#[derive(Debug, Deserialize)]
pub struct SyllabusFile {
  pub topics: Vec<NewTopic>,
}

impl SyllabusFile {
  pub fn read(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading syllabus {}", path.display()))?;
    Self::parse(&raw).with_context(|| format!("parsing syllabus {}", path.display()))
  }

  pub fn parse(raw: &str) -> Result<Self> {
    let file: Self = toml::from_str(raw)?;
    if let Some(blank) = file.topics.iter().position(|t| t.title.trim().is_empty()) {
      anyhow::bail!("topic {blank} has an empty title");
    }
    Ok(file)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_beat_file_beats_defaults() {
    let file: ConfigFile = toml::from_str(
      r#"
db = "/data/file.db"
target_date = "2027-06-01T00:00:00Z"

[generator]
model    = "file-model"
base_url = "http://file:11434"
"#,
    )
    .unwrap();
    let flags = Overrides { model: Some("flag-model".into()), ..Default::default() };

    let settings = Settings::resolve(flags, file);
    assert_eq!(settings.db, PathBuf::from("/data/file.db"));
    assert_eq!(settings.generator.model, "flag-model");
    assert_eq!(settings.generator.base_url, "http://file:11434");
    assert_eq!(settings.generator.timeout_secs, 60);
    assert_eq!(settings.target_date.to_rfc3339(), "2027-06-01T00:00:00+00:00");
  }

  #[test]
  fn empty_everything_uses_defaults() {
    let settings = Settings::resolve(Overrides::default(), ConfigFile::default());
    assert_eq!(settings.db, PathBuf::from(DEFAULT_DB));
    assert_eq!(settings.generator, GeneratorConfig::default());
    assert_eq!(settings.target_date, default_target_date());
  }

  #[test]
  fn syllabus_defaults_priority() {
    let file = SyllabusFile::parse(
      r#"
[[topics]]
title    = "Dengue"
priority = 80

[[topics]]
title = "Asma"
"#,
    )
    .unwrap();
    assert_eq!(file.topics, vec![NewTopic::new("Dengue", 80), NewTopic::new("Asma", 50)]);
  }

  #[test]
  fn syllabus_rejects_blank_titles() {
    assert!(SyllabusFile::parse("[[topics]]\ntitle = \" \"\n").is_err());
    assert!(SyllabusFile::parse("topics = 3").is_err());
  }
}
