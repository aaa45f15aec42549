//! Diagnostic baseline: a placement pass over high-priority topics that
//! seeds their scheduling state from one right-or-wrong answer each.
//!
//! A correct answer starts the topic as a known review one day out at the
//! default ease. A wrong answer starts it at the minimum ease with a zero
//! interval, so it comes back at the floor of one day and grows slowly.

use std::{cmp::Reverse, collections::HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  progress::{DEFAULT_EASE, MIN_EASE, Progress, ProgressStatus, ReviewRecord},
  schedule::next_review,
  selector::ScheduleRow,
  topic::TopicId,
};

/// Topics below this priority are left to the normal new-topic flow.
pub const BASELINE_MIN_PRIORITY: i64 = 80;

/// A topic offered for the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineTopic {
  #[serde(rename = "id")]
  pub topic_id: TopicId,
  pub title:    String,
  pub priority: i64,
}

/// One answered baseline question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineAnswer {
  pub topic_id: TopicId,
  pub correct:  bool,
}

/// Outcome of seeding a batch of answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineReport {
  pub answered: u32,
  pub correct:  u32,
  /// Percentage of correct answers, `0.0` when nothing was answered.
  pub accuracy: f64,
  pub records:  Vec<ReviewRecord>,
}

impl BaselineReport {
  pub fn new(answers: &[BaselineAnswer], records: Vec<ReviewRecord>) -> Self {
    let answered = u32::try_from(answers.len()).unwrap_or(u32::MAX);
    let correct = u32::try_from(answers.iter().filter(|a| a.correct).count()).unwrap_or(u32::MAX);
    let accuracy = match answered {
      0 => 0.0,
      n => f64::from(correct) * 100.0 / f64::from(n),
    };
    Self { answered, correct, accuracy, records }
  }
}

/// Up to `limit` topics with priority at least [`BASELINE_MIN_PRIORITY`]
/// that have never been studied, highest priority first, ties by id.
///
/// A topic with any non-pending angle is considered studied.
pub fn candidates(rows: &[ScheduleRow], limit: usize) -> Vec<BaselineTopic> {
  let studied: HashSet<TopicId> = rows
    .iter()
    .filter(|row| !row.is_new())
    .map(|row| row.topic_id)
    .collect();

  let mut seen = HashSet::new();
  let mut topics: Vec<BaselineTopic> = rows
    .iter()
    .filter(|row| row.priority >= BASELINE_MIN_PRIORITY && !studied.contains(&row.topic_id))
    .filter(|row| seen.insert(row.topic_id))
    .map(|row| BaselineTopic {
      topic_id: row.topic_id,
      title:    row.title.clone(),
      priority: row.priority,
    })
    .collect();
  topics.sort_by_key(|t| (Reverse(t.priority), t.topic_id));
  topics.truncate(limit);
  topics
}

/// The progress row seeded for a baseline answer given at `now`.
pub fn baseline_progress(correct: bool, now: DateTime<Utc>) -> Progress {
  let (interval, ease_factor) = if correct { (1, DEFAULT_EASE) } else { (0, MIN_EASE) };
  Progress {
    status: ProgressStatus::Review,
    interval,
    ease_factor,
    next_review: Some(next_review(now, interval)),
    last_reviewed: Some(now),
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  fn row(topic_id: TopicId, priority: i64, status: Option<ProgressStatus>) -> ScheduleRow {
    ScheduleRow {
      topic_id,
      title: format!("topic {topic_id}"),
      priority,
      angle_id: status.map(|_| topic_id * 10),
      progress: status.map(|status| Progress { status, ..Default::default() }),
    }
  }

  #[test]
  fn candidates_skip_low_priority_and_studied_topics() {
    let rows = vec![
      row(1, 80, None),
      row(2, 79, None),
      row(3, 100, Some(ProgressStatus::Learning)),
      row(4, 95, Some(ProgressStatus::Pending)),
      row(5, 95, None),
      row(3, 100, None),
    ];
    let ids: Vec<_> = candidates(&rows, 10).into_iter().map(|t| t.topic_id).collect();
    assert_eq!(ids, vec![4, 5, 1]);
    assert_eq!(candidates(&rows, 2).len(), 2);
    assert!(candidates(&rows, 0).is_empty());
  }

  #[test]
  fn correct_answer_starts_a_known_review() {
    let now = Utc::now();
    let p = baseline_progress(true, now);
    assert_eq!(p.status, ProgressStatus::Review);
    assert_eq!(p.interval, 1);
    assert_eq!(p.ease_factor, DEFAULT_EASE);
    assert_eq!(p.next_review, Some(now + Duration::days(1)));
    assert_eq!(p.last_reviewed, Some(now));
    p.validate().unwrap();
  }

  #[test]
  fn wrong_answer_starts_at_minimum_ease() {
    let now = Utc::now();
    let p = baseline_progress(false, now);
    assert_eq!(p.interval, 0);
    assert_eq!(p.ease_factor, MIN_EASE);
    assert_eq!(p.next_review, Some(now + Duration::days(1)));
    p.validate().unwrap();
  }

  #[test]
  fn report_accuracy() {
    let answers = [
      BaselineAnswer { topic_id: 1, correct: true },
      BaselineAnswer { topic_id: 2, correct: false },
      BaselineAnswer { topic_id: 3, correct: true },
      BaselineAnswer { topic_id: 4, correct: true },
    ];
    let report = BaselineReport::new(&answers, Vec::new());
    assert_eq!((report.answered, report.correct), (4, 3));
    assert_eq!(report.accuracy, 75.0);
    assert_eq!(BaselineReport::new(&[], Vec::new()).accuracy, 0.0);
  }
}
