//! Handlers for the mastery flow.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/metrics`  | Daily progress toward the exam date |
//! | `GET`  | `/target`   | Current challenge; 503 if generation fails |
//! | `POST` | `/feedback` | Body: `{"label":"Dengue","rating":"easy"}` |

use std::str::FromStr;

use axum::{Json, extract::State};
use cortex_core::{
  challenge::CurrentTarget,
  collab::ContextResolver,
  metrics::DailyMetrics,
  progress::Rating,
  store::StudyStore,
};
use cortex_engine::{FeedbackOutcome, Generator};
use serde::Deserialize;

use crate::{EngineState, error::ApiError};

/// A rating as clients send it: a grade `1`–`4` or a name like `"easy"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
  Grade(u8),
  Name(String),
}

impl RatingInput {
  pub fn parse(&self) -> Result<Rating, ApiError> {
    match self {
      Self::Grade(n) => Rating::try_from(*n),
      Self::Name(s) => Rating::from_str(s),
    }
    .map_err(|e| ApiError::BadRequest(e.to_string()))
  }
}

// ─── Metrics ─────────────────────────────────────────────────────────────────

/// `GET /metrics`
pub async fn metrics<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
) -> Result<Json<DailyMetrics>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.get_daily_metrics().await?))
}

// ─── Target ──────────────────────────────────────────────────────────────────

/// `GET /target`
pub async fn target<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
) -> Result<Json<CurrentTarget>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.get_current_target().await?))
}

// ─── Feedback ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FeedbackBody {
  pub label:  String,
  pub rating: RatingInput,
}

/// `POST /feedback`
pub async fn feedback<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Json(body): Json<FeedbackBody>,
) -> Result<Json<FeedbackOutcome>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  let rating = body.rating.parse()?;
  Ok(Json(engine.submit_feedback(&body.label, rating).await?))
}
