//! Connection settings for the model endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "dr-epi-es:latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Settings for [`crate::OllamaClient`]. Every field has a default, so an
/// empty `[generator]` table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  #[serde(default = "default_model")]
  pub model:        String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Sampling temperature for challenges. Sub-topic suggestions use a
  /// warmer fixed value.
  #[serde(default = "default_temperature")]
  pub temperature:  f32,
  /// Token cap passed as `num_predict`.
  #[serde(default = "default_max_tokens")]
  pub max_tokens:   u32,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }
fn default_model() -> String { DEFAULT_MODEL.to_owned() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_temperature() -> f32 { DEFAULT_TEMPERATURE }
fn default_max_tokens() -> u32 { 1500 }

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      base_url:     default_base_url(),
      model:        default_model(),
      timeout_secs: default_timeout_secs(),
      temperature:  default_temperature(),
      max_tokens:   default_max_tokens(),
    }
  }
}

/// Extra glossary entries, keyed by acronym, merged over the built-in table.
pub type GlossaryConfig = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_table_uses_defaults() {
    let cfg: GeneratorConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, GeneratorConfig::default());
    assert_eq!(cfg.base_url, "http://localhost:11434");
    assert_eq!(cfg.timeout_secs, 60);
  }

  #[test]
  fn partial_table_keeps_other_defaults() {
    let cfg: GeneratorConfig =
      serde_json::from_str(r#"{"model":"llama3","temperature":0.4}"#).unwrap();
    assert_eq!(cfg.model, "llama3");
    assert_eq!(cfg.temperature, 0.4);
    assert_eq!(cfg.max_tokens, 1500);
  }
}
