//! Handlers for the diagnostic baseline.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/baseline` | Query: `?limit=20` |
//! | `GET`  | `/baseline/{topic_id}/question` | 503 when generation fails |
//! | `POST` | `/baseline` | Body: `{"answers":[{"topic_id":1,"correct":true}]}` |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use cortex_core::{
  baseline::{BaselineAnswer, BaselineReport, BaselineTopic},
  challenge::Content,
  collab::ContextResolver,
  store::StudyStore,
  topic::TopicId,
};
use cortex_engine::Generator;
use serde::Deserialize;

use crate::{EngineState, error::ApiError};

const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
  pub limit: Option<usize>,
}

/// `GET /baseline`
pub async fn topics<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Query(query): Query<TopicsQuery>,
) -> Result<Json<Vec<BaselineTopic>>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
  Ok(Json(engine.baseline_topics(limit).await?))
}

/// `GET /baseline/{topic_id}/question`
pub async fn question<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Path(topic_id): Path<TopicId>,
) -> Result<Json<Content>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.baseline_challenge(topic_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct RecordBody {
  pub answers: Vec<BaselineAnswer>,
}

/// `POST /baseline`
pub async fn record<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Json(body): Json<RecordBody>,
) -> Result<Json<BaselineReport>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.record_baseline(body.answers).await?))
}
