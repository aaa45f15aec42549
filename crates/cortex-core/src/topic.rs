//! Syllabus entities: topics, their angles, and journal entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::label::normalize_label;

pub type TopicId = i64;
pub type AngleId = i64;

/// Name and variant of the angle created lazily when a topic is first rated.
pub const DEFAULT_ANGLE_NAME: &str = "General";
pub const DEFAULT_ANGLE_VARIANT: &str = "V1";

/// Name and variant of the angle that collects archived recall questions.
pub const JOURNAL_ANGLE_NAME: &str = "Journal";
pub const JOURNAL_ANGLE_VARIANT: &str = "Socratic";

/// Priority assigned to syllabus entries that do not state one.
pub const DEFAULT_PRIORITY: i64 = 50;

/// Priority assigned to sub-topics discovered by branching.
pub const SUBTOPIC_PRIORITY: i64 = 40;

// ─── Topic ───────────────────────────────────────────────────────────────────

/// A syllabus topic. Identity is fixed at load time; only the priority may
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub topic_id:  TopicId,
  pub title:     String,
  /// Normalized form of `title`, see [`normalize_label`].
  pub title_key: String,
  /// Higher ranks are studied first among new topics.
  pub priority:  i64,
}

/// Input to [`crate::store::StudyStore::load_syllabus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTopic {
  pub title:    String,
  #[serde(default = "default_priority")]
  pub priority: i64,
}

fn default_priority() -> i64 { DEFAULT_PRIORITY }

impl NewTopic {
  pub fn new(title: impl Into<String>, priority: i64) -> Self {
    Self { title: title.into(), priority }
  }

  pub fn title_key(&self) -> String { normalize_label(&self.title) }
}

/// Outcome of a syllabus load. Entries whose key already exists are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusReport {
  pub topics_added: usize,
  pub nodes_added:  usize,
}

// ─── Angle ───────────────────────────────────────────────────────────────────

/// A sub-aspect of a topic. This is the unit the scheduler tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Angle {
  pub angle_id: AngleId,
  pub topic_id: TopicId,
  pub name:     String,
  pub variant:  String,
}

// ─── Journal ─────────────────────────────────────────────────────────────────

/// An active-recall question archived against a topic's journal angle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
  pub question:    String,
  #[serde(default)]
  pub options:     Vec<String>,
  pub answer:      String,
  pub explanation: String,
  #[serde(default)]
  pub context:     Option<String>,
}

/// A journal entry as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
  pub question_id: i64,
  pub angle_id:    AngleId,
  pub entry:       JournalEntry,
  pub created_at:  DateTime<Utc>,
}
