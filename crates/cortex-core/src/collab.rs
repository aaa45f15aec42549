//! Traits for the external collaborators the engine consumes: a context
//! resolver (acronym expansion, knowledge-base lookup), a challenge generator,
//! and a sub-topic suggester. All three may block on a remote call.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{challenge::Content, mastery::StudyAngle};

// ─── Context ─────────────────────────────────────────────────────────────────

/// An expanded topic title plus grounding text for the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedContext {
  pub full_title: String,
  pub context:    String,
}

impl ResolvedContext {
  /// The context used whenever resolution fails.
  pub fn fallback(topic: &str) -> Self {
    Self {
      full_title: topic.to_owned(),
      context:    format!("generic guidance on {topic}"),
    }
  }
}

pub trait ContextResolver: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Expand `topic` into a full title and context. Callers fall back to
  /// [`ResolvedContext::fallback`] on error.
  fn resolve_context<'a>(
    &'a self,
    topic: &'a str,
  ) -> impl Future<Output = Result<ResolvedContext, Self::Error>> + Send + 'a;
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Everything a generator needs to write one challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRequest {
  pub topic:      String,
  pub full_title: String,
  pub context:    String,
  pub angle:      StudyAngle,
}

pub trait ContentGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Produce challenge content. An error means no usable content was
  /// produced (timeout, transport failure, malformed output).
  fn generate_challenge<'a>(
    &'a self,
    request: &'a ChallengeRequest,
  ) -> impl Future<Output = Result<Content, Self::Error>> + Send + 'a;
}

// ─── Branching ───────────────────────────────────────────────────────────────

pub trait SubtopicSuggester: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Ask for high-yield sub-topics of a topic. Returns the raw reply; the
  /// caller extracts names with [`crate::branching::parse_subtopics`].
  fn suggest_subtopics<'a>(
    &'a self,
    topic: &'a str,
    context: &'a ResolvedContext,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
