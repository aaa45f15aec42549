//! Handlers for direct scheduling and read models.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/next` | `null` when nothing is due and nothing is new |
//! | `POST` | `/progress/{topic_id}` | Body: `{"rating":3}` |
//! | `GET`  | `/roadmap` | |
//! | `GET`  | `/stats` | |

use axum::{
  Json,
  extract::{Path, State},
};
use cortex_core::{
  collab::ContextResolver,
  metrics::SyllabusStats,
  progress::ReviewRecord,
  roadmap::RoadmapEntry,
  selector::Target,
  store::StudyStore,
  topic::TopicId,
};
use cortex_engine::Generator;
use serde::Deserialize;

use crate::{EngineState, error::ApiError, study::RatingInput};

/// `GET /next`
pub async fn next<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
) -> Result<Json<Option<Target>>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.next_topic().await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub rating: RatingInput,
}

/// `POST /progress/{topic_id}`
pub async fn update<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Path(topic_id): Path<TopicId>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<ReviewRecord>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  let rating = body.rating.parse()?;
  Ok(Json(engine.update_progress(topic_id, rating).await?))
}

/// `GET /roadmap`
pub async fn roadmap<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
) -> Result<Json<Vec<RoadmapEntry>>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.roadmap().await?))
}

/// `GET /stats`
pub async fn stats<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
) -> Result<Json<SyllabusStats>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.stats().await?))
}
