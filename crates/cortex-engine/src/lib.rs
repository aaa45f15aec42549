//! The Cortex progression engine.
//!
//! [`StudyEngine`] ties a [`cortex_core::store::StudyStore`] to the external
//! collaborators and runs every learner-facing operation as one serialized
//! read-modify-write sequence. Challenge generation goes through a
//! single-flight cache so concurrent readers share one generator call.

pub mod engine;
pub mod error;
pub mod flight;

pub use engine::{EngineConfig, FeedbackOutcome, Generator, StudyEngine};
pub use error::{Error, Result};
