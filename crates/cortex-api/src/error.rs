//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Seconds a client should wait before retrying a failed generation.
pub const RETRY_AFTER_SECS: &str = "5";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// Generation failed; the same request may succeed later.
  #[error("unavailable: {0}")]
  Unavailable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<cortex_engine::Error> for ApiError {
  fn from(err: cortex_engine::Error) -> Self {
    use cortex_engine::Error as E;
    match err {
      E::TopicNotFound(t) => Self::NotFound(format!("topic {t} not found")),
      E::NodeNotFound(n) => Self::NotFound(format!("graph node {n} not found")),
      E::InvalidRating(r) => Self::BadRequest(format!("invalid rating: {r}")),
      E::InvariantViolation(m) => Self::Conflict(m),
      E::Generation(e) => Self::Unavailable(e.to_string()),
      E::Store(e) => Self::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, json!({ "error": m })),
      ApiError::Unavailable(m) => (
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": m, "retryable": true }),
      ),
      ApiError::Store(e) => {
        error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
    };

    let mut response = (status, Json(body)).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
      response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
    }
    response
  }
}
