//! Error type for `cortex-store-sqlite`.

use cortex_core::topic::TopicId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] cortex_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored enum column holds a value this build does not know.
  #[error("unknown {column} value: {value:?}")]
  UnknownValue { column: &'static str, value: String },

  #[error("topic not found: {0}")]
  TopicNotFound(TopicId),

  #[error("graph node not found at position {0}")]
  NodeNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
