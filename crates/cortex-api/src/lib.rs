//! JSON REST API for Cortex.
//!
//! Exposes an axum [`Router`] over a shared [`StudyEngine`]. Auth, TLS and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", cortex_api::api_router(engine.clone()))
//! ```

pub mod baseline;
pub mod error;
pub mod schedule;
pub mod study;
pub mod syllabus;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use cortex_core::{collab::ContextResolver, store::StudyStore};
use cortex_engine::{Generator, StudyEngine};

pub use error::ApiError;

/// Shared engine handle threaded through every handler.
pub type EngineState<S, G, R> = Arc<StudyEngine<S, G, R>>;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G, R>(engine: EngineState<S, G, R>) -> Router<()>
where
  S: StudyStore + 'static,
  G: Generator + 'static,
  R: ContextResolver + 'static,
{
  Router::new()
    // Mastery flow
    .route("/metrics", get(study::metrics::<S, G, R>))
    .route("/target", get(study::target::<S, G, R>))
    .route("/feedback", post(study::feedback::<S, G, R>))
    // Scheduling
    .route("/next", get(schedule::next::<S, G, R>))
    .route("/progress/{topic_id}", post(schedule::update::<S, G, R>))
    .route("/roadmap", get(schedule::roadmap::<S, G, R>))
    .route("/stats", get(schedule::stats::<S, G, R>))
    // Baseline
    .route("/baseline", get(baseline::topics::<S, G, R>).post(baseline::record::<S, G, R>))
    .route("/baseline/{topic_id}/question", get(baseline::question::<S, G, R>))
    // Syllabus
    .route("/topics", get(syllabus::list::<S, G, R>).post(syllabus::load::<S, G, R>))
    .route("/topics/{label}/expand", post(syllabus::expand::<S, G, R>))
    .route("/journal", post(syllabus::journal::<S, G, R>))
    .with_state(engine)
}

#[cfg(test)]
mod tests;
