//! Generated challenges and the key they are cached under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  mastery::{GraphNode, MASTERY_TARGET, StudyAngle},
};

/// Number of answer options every challenge carries.
pub const OPTION_COUNT: usize = 4;
const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// The text a content generator produces for one challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
  pub body:           String,
  pub options:        Vec<String>,
  /// The letter (`A`–`D`) of the correct option.
  pub correct_option: String,
  pub explanation:    String,
}

impl Content {
  /// Check the shape of generated content and normalise the answer letter.
  pub fn validate(mut self) -> Result<Self> {
    if self.body.trim().is_empty() {
      return Err(Error::MalformedContent("empty body".into()));
    }
    if self.options.len() != OPTION_COUNT {
      return Err(Error::MalformedContent(format!(
        "expected {OPTION_COUNT} options, got {}",
        self.options.len()
      )));
    }
    let letter = self
      .correct_option
      .trim()
      .chars()
      .next()
      .map(|c| c.to_ascii_uppercase())
      .filter(|c| OPTION_LETTERS.contains(c))
      .ok_or_else(|| {
        Error::MalformedContent(format!(
          "correct option {:?} is not one of A-D",
          self.correct_option
        ))
      })?;
    self.correct_option = letter.to_string();
    Ok(self)
  }
}

/// Cache key for the pending challenge: the active topic and its level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChallengeKey {
  pub topic_key:     String,
  pub mastery_level: u8,
}

impl ChallengeKey {
  pub fn for_node(node: &GraphNode) -> Self {
    Self {
      topic_key:     node.label_key.clone(),
      mastery_level: node.mastery_level,
    }
  }
}

/// A generated challenge ready to present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
  pub challenge_id: Uuid,
  /// Normalized label of the topic; feedback is submitted against it.
  pub topic:        String,
  #[serde(flatten)]
  pub key:          ChallengeKey,
  pub angle:        StudyAngle,
  /// Presentation banner, e.g. `MASTERY 2/3`.
  pub mode:         String,
  pub created_at:   DateTime<Utc>,
  #[serde(flatten)]
  pub content:      Content,
}

impl Challenge {
  pub fn new(node: &GraphNode, content: Content, created_at: DateTime<Utc>) -> Self {
    Self {
      challenge_id: Uuid::new_v4(),
      topic: node.label_key.clone(),
      key: ChallengeKey::for_node(node),
      angle: node.angle(),
      mode: format!("MASTERY {}/{MASTERY_TARGET}", node.mastery_level + 1),
      created_at,
      content,
    }
  }
}

/// What `get_current_target` hands back to a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurrentTarget {
  Ready { challenge: Challenge },
  /// Every node in the curriculum is mastered.
  Completed,
}
