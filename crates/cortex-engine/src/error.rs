//! Error type for `cortex-engine`.

use std::error::Error as StdError;

use thiserror::Error;
use tracing::error;

type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("topic not found: {0}")]
  TopicNotFound(String),

  #[error("graph node not found: {0}")]
  NodeNotFound(String),

  #[error("invalid rating: {0}")]
  InvalidRating(String),

  /// A write would have broken an invariant and was rejected; prior state is
  /// kept.
  #[error("invariant violation: {0}")]
  InvariantViolation(String),

  /// The content generator or sub-topic suggester produced nothing usable.
  /// Nothing was cached; the caller may retry.
  #[error("generation failed: {0}")]
  Generation(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

impl Error {
  /// Wrap a backend error, surfacing an invariant violation found anywhere
  /// in its source chain.
  pub fn store<E: StdError + Send + Sync + 'static>(err: E) -> Self {
    let mut cause: Option<&(dyn StdError + 'static)> = Some(&err);
    while let Some(e) = cause {
      if let Some(cortex_core::Error::InvariantViolation(msg)) =
        e.downcast_ref::<cortex_core::Error>()
      {
        error!(%msg, "store rejected a write");
        return Self::InvariantViolation(msg.clone());
      }
      cause = e.source();
    }
    Self::Store(Box::new(err))
  }

  pub fn generation<E: StdError + Send + Sync + 'static>(err: E) -> Self {
    Self::Generation(Box::new(err))
  }

  /// Whether retrying the same call may succeed.
  pub fn is_retryable(&self) -> bool { matches!(self, Self::Generation(_)) }
}

impl From<cortex_core::Error> for Error {
  fn from(err: cortex_core::Error) -> Self {
    use cortex_core::Error as Core;
    match err {
      Core::TopicNotFound(t) => Self::TopicNotFound(t),
      Core::NodeNotFound(n) => Self::NodeNotFound(n),
      Core::InvalidRating(r) => Self::InvalidRating(r),
      Core::InvariantViolation(m) => Self::InvariantViolation(m),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
