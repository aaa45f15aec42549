//! Error type for `cortex-llm`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("model endpoint returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("model returned an empty response")]
  EmptyResponse,

  #[error("no JSON object found in model output")]
  NoJson,

  #[error("malformed model output: {0}")]
  Json(#[from] serde_json::Error),

  /// The glossary has no entry for the topic.
  #[error("no glossary entry for {0:?}")]
  UnknownTopic(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
