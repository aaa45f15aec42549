//! Next-topic policy.
//!
//! Due reviews always win over new material. Among due reviews the earliest
//! due date is picked; among new topics the highest priority is picked. Ties
//! fall back to ascending topic id in both cases.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  progress::{DEFAULT_EASE, Progress, ProgressStatus},
  topic::{AngleId, TopicId},
};

/// One (topic, angle) pairing as seen by the selector. Topics with no angles
/// appear once with `angle_id: None`; angles never rated have
/// `progress: None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
  pub topic_id: TopicId,
  pub title:    String,
  pub priority: i64,
  pub angle_id: Option<AngleId>,
  pub progress: Option<Progress>,
}

impl ScheduleRow {
  /// Whether this angle has never been rated.
  pub fn is_new(&self) -> bool {
    self
      .progress
      .as_ref()
      .is_none_or(|p| p.status == ProgressStatus::Pending)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
  Review,
  New,
}

/// What to study next, with enough scheduling state to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
  #[serde(rename = "id")]
  pub topic_id:    TopicId,
  pub title:       String,
  #[serde(rename = "type")]
  pub kind:        TargetKind,
  pub angle_id:    Option<AngleId>,
  pub status:      ProgressStatus,
  pub interval:    u32,
  pub ease_factor: f64,
}

/// Pick the next target from `rows`, or `None` when nothing is due and
/// nothing is new.
pub fn select_next(rows: &[ScheduleRow], now: DateTime<Utc>) -> Option<Target> {
  let due = rows
    .iter()
    .filter_map(|row| {
      let progress = row.progress.as_ref()?;
      let at = progress.next_review?;
      progress.is_due(now).then_some((at, row, progress))
    })
    .min_by_key(|(at, row, _)| (*at, row.topic_id));

  if let Some((_, row, progress)) = due {
    return Some(Target {
      topic_id:    row.topic_id,
      title:       row.title.clone(),
      kind:        TargetKind::Review,
      angle_id:    row.angle_id,
      status:      progress.status,
      interval:    progress.interval,
      ease_factor: progress.ease_factor,
    });
  }

  rows
    .iter()
    .filter(|row| row.is_new())
    .min_by_key(|row| (Reverse(row.priority), row.topic_id))
    .map(|row| Target {
      topic_id:    row.topic_id,
      title:       row.title.clone(),
      kind:        TargetKind::New,
      angle_id:    row.angle_id,
      status:      ProgressStatus::Pending,
      interval:    0,
      ease_factor: DEFAULT_EASE,
    })
}
