//! Handlers for the syllabus: topics, branching and the question journal.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/topics` | |
//! | `POST` | `/topics` | Body: `[{"title":"Dengue","priority":60}]` |
//! | `POST` | `/topics/{label}/expand` | 404 if no node has that label |
//! | `POST` | `/journal` | Body: `{"topic":"Dengue","question":"...",...}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use cortex_core::{
  collab::ContextResolver,
  mastery::GraphNode,
  store::StudyStore,
  topic::{JournalEntry, NewTopic, Topic},
};
use cortex_engine::Generator;
use serde::Deserialize;

use crate::{EngineState, error::ApiError};

// ─── Topics ──────────────────────────────────────────────────────────────────

/// `GET /topics`
pub async fn list<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
) -> Result<Json<Vec<Topic>>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.list_topics().await?))
}

/// `POST /topics`: idempotent syllabus load.
pub async fn load<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Json(entries): Json<Vec<NewTopic>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  if let Some(blank) = entries.iter().position(|e| e.title.trim().is_empty()) {
    return Err(ApiError::BadRequest(format!("entry {blank} has an empty title")));
  }
  let report = engine.load_syllabus(entries).await?;
  Ok((StatusCode::CREATED, Json(report)))
}

// ─── Branching ───────────────────────────────────────────────────────────────

/// `POST /topics/{label}/expand`
pub async fn expand<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Path(label): Path<String>,
) -> Result<Json<Vec<GraphNode>>, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  Ok(Json(engine.expand_topic(&label).await?))
}

// ─── Journal ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JournalBody {
  pub topic: String,
  #[serde(flatten)]
  pub entry: JournalEntry,
}

/// `POST /journal`
pub async fn journal<S, G, R>(
  State(engine): State<EngineState<S, G, R>>,
  Json(body): Json<JournalBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  let record = engine.log_question(&body.topic, body.entry).await?;
  Ok((StatusCode::CREATED, Json(record)))
}
