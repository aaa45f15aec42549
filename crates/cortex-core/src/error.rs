//! Error types for `cortex-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("topic not found: {0}")]
  TopicNotFound(String),

  #[error("graph node not found: {0:?}")]
  NodeNotFound(String),

  #[error("invalid rating: {0}")]
  InvalidRating(String),

  /// A computed or loaded state breaks one of the engine's invariants. The
  /// write that produced it must be rejected.
  #[error("invariant violation: {0}")]
  InvariantViolation(String),

  #[error("malformed content: {0}")]
  MalformedContent(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
