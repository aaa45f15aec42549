//! Spaced-repetition state for a single angle, and the ratings that drive it.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
  Error, Result,
  topic::{AngleId, TopicId},
};

/// Lower bound of the ease factor.
pub const MIN_EASE: f64 = 1.3;
/// Upper bound of the ease factor.
pub const MAX_EASE: f64 = 3.0;
/// Ease factor of an angle that has never been rated.
pub const DEFAULT_EASE: f64 = 2.5;

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProgressStatus {
  /// No rating has ever been recorded.
  Pending,
  /// Failed the last recall; interval reset.
  Learning,
  /// Scheduled for a future review.
  Review,
}

// ─── Rating ──────────────────────────────────────────────────────────────────

/// A learner's self-assessment of one recall attempt.
///
/// Serialised as its numeric grade (1–4). Parsing also accepts the grade
/// names, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
  Again = 1,
  Hard = 2,
  Good = 3,
  Easy = 4,
}

impl Rating {
  /// Only an easy recall moves the active graph node toward mastery.
  pub fn advances_mastery(self) -> bool { matches!(self, Self::Easy) }

  pub fn grade(self) -> u8 { self as u8 }
}

impl TryFrom<u8> for Rating {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self> {
    match value {
      1 => Ok(Self::Again),
      2 => Ok(Self::Hard),
      3 => Ok(Self::Good),
      4 => Ok(Self::Easy),
      other => Err(Error::InvalidRating(other.to_string())),
    }
  }
}

impl From<Rating> for u8 {
  fn from(r: Rating) -> Self { r.grade() }
}

impl FromStr for Rating {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
      return Self::try_from(n);
    }
    match trimmed.to_ascii_lowercase().as_str() {
      "again" | "fail" => Ok(Self::Again),
      "hard" => Ok(Self::Hard),
      "good" => Ok(Self::Good),
      "easy" => Ok(Self::Easy),
      _ => Err(Error::InvalidRating(trimmed.to_owned())),
    }
  }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
    };
    f.write_str(name)
  }
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// Scheduling state of one angle. At most one exists per angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
  pub status:        ProgressStatus,
  /// Whole days until the next review.
  pub interval:      u32,
  pub ease_factor:   f64,
  pub next_review:   Option<DateTime<Utc>>,
  pub last_reviewed: Option<DateTime<Utc>>,
}

impl Default for Progress {
  fn default() -> Self {
    Self {
      status:        ProgressStatus::Pending,
      interval:      0,
      ease_factor:   DEFAULT_EASE,
      next_review:   None,
      last_reviewed: None,
    }
  }
}

impl Progress {
  /// Check the invariants a stored or freshly computed row must satisfy.
  pub fn validate(&self) -> Result<()> {
    if !(MIN_EASE..=MAX_EASE).contains(&self.ease_factor) {
      return Err(Error::InvariantViolation(format!(
        "ease factor {} outside [{MIN_EASE}, {MAX_EASE}]",
        self.ease_factor
      )));
    }
    if self.status == ProgressStatus::Review && self.next_review.is_none() {
      return Err(Error::InvariantViolation(
        "review status without a next_review date".into(),
      ));
    }
    Ok(())
  }

  /// Whether this angle is a review that has come due at `now`.
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.status == ProgressStatus::Review
      && self.next_review.is_some_and(|at| at <= now)
  }
}

/// A progress upsert for the primary angle of a topic. When `angle_id` is
/// `None` the store creates the default angle first.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWrite {
  pub topic_id: TopicId,
  pub angle_id: Option<AngleId>,
  pub progress: Progress,
}

/// The result of recording one rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
  pub topic_id:     TopicId,
  pub angle_id:     AngleId,
  pub status:       ProgressStatus,
  pub new_interval: u32,
  pub ease_factor:  f64,
  pub next_review:  DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  #[test]
  fn rating_parses_grades_and_names() {
    assert_eq!("1".parse::<Rating>().unwrap(), Rating::Again);
    assert_eq!("4".parse::<Rating>().unwrap(), Rating::Easy);
    assert_eq!("EASY".parse::<Rating>().unwrap(), Rating::Easy);
    assert_eq!(" hard ".parse::<Rating>().unwrap(), Rating::Hard);
    assert!("5".parse::<Rating>().is_err());
    assert!("meh".parse::<Rating>().is_err());
  }

  #[test]
  fn rating_serializes_as_grade() {
    assert_eq!(serde_json::to_string(&Rating::Good).unwrap(), "3");
    let r: Rating = serde_json::from_str("2").unwrap();
    assert_eq!(r, Rating::Hard);
    assert!(serde_json::from_str::<Rating>("0").is_err());
  }

  #[test]
  fn only_easy_advances_mastery() {
    assert!(Rating::Easy.advances_mastery());
    assert!(!Rating::Good.advances_mastery());
    assert!(!Rating::Hard.advances_mastery());
    assert!(!Rating::Again.advances_mastery());
  }

  #[test]
  fn status_round_trips_through_strings() {
    assert_eq!(ProgressStatus::Review.to_string(), "review");
    assert_eq!("learning".parse::<ProgressStatus>().unwrap(), ProgressStatus::Learning);
  }

  #[test]
  fn validate_rejects_out_of_range_ease() {
    let p = Progress { ease_factor: 3.2, ..Progress::default() };
    assert!(matches!(p.validate(), Err(Error::InvariantViolation(_))));
    assert!(Progress::default().validate().is_ok());
  }

  #[test]
  fn due_only_for_past_reviews() {
    let now = Utc::now();
    let mut p = Progress {
      status: ProgressStatus::Review,
      next_review: Some(now - Duration::hours(1)),
      ..Progress::default()
    };
    assert!(p.is_due(now));
    p.next_review = Some(now + Duration::hours(1));
    assert!(!p.is_due(now));
    p.status = ProgressStatus::Learning;
    p.next_review = Some(now - Duration::hours(1));
    assert!(!p.is_due(now));
  }
}
