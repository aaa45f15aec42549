//! Async client for an Ollama-compatible `/api/generate` endpoint.

use std::time::Duration;

use cortex_core::{
  challenge::Content,
  collab::{ChallengeRequest, ContentGenerator, ResolvedContext, SubtopicSuggester},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, GeneratorConfig, Result, extract, prompt};

/// Sub-topic suggestions want some variety.
pub const SUBTOPIC_TEMPERATURE: f32 = 0.7;

const SUBTOPIC_MAX_TOKENS: u32 = 200;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
  model:   &'a str,
  prompt:  &'a str,
  stream:  bool,
  options: GenerateOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct GenerateOptions {
  temperature: f32,
  num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  response: String,
}

/// Non-streaming text generation against a local model server.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OllamaClient {
  client: Client,
  config: GeneratorConfig,
}

impl OllamaClient {
  pub fn new(config: GeneratorConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &GeneratorConfig { &self.config }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Send one prompt and return the model's full reply.
  pub async fn generate(&self, prompt: &str, temperature: f32, num_predict: u32) -> Result<String> {
    let body = GenerateRequest {
      model: &self.config.model,
      prompt,
      stream: false,
      options: GenerateOptions { temperature, num_predict },
    };
    debug!(model = %self.config.model, chars = prompt.len(), "POST /api/generate");

    let resp = self.client.post(self.url("/generate")).json(&body).send().await?;
    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      warn!(%status, "model endpoint rejected request");
      return Err(Error::Status { status: status.as_u16(), body });
    }

    let reply: GenerateResponse = resp.json().await?;
    if reply.response.trim().is_empty() {
      return Err(Error::EmptyResponse);
    }
    Ok(reply.response)
  }
}

impl ContentGenerator for OllamaClient {
  type Error = Error;

  async fn generate_challenge(&self, request: &ChallengeRequest) -> Result<Content> {
    let prompt = prompt::challenge(request);
    let reply = self
      .generate(&prompt, self.config.temperature, self.config.max_tokens)
      .await?;
    extract::parse_content(&reply)
      .inspect_err(|e| warn!(topic = %request.topic, error = %e, "unusable challenge reply"))
  }
}

impl SubtopicSuggester for OllamaClient {
  type Error = Error;

  async fn suggest_subtopics(&self, topic: &str, context: &ResolvedContext) -> Result<String> {
    let prompt = prompt::subtopics(topic, context);
    self
      .generate(&prompt, SUBTOPIC_TEMPERATURE, SUBTOPIC_MAX_TOKENS)
      .await
  }
}
