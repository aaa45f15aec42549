//! Per-topic overview of scheduling state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
  progress::{Progress, ProgressStatus},
  selector::ScheduleRow,
  topic::TopicId,
};

/// Interval, in days, from which a reviewed topic counts as mastered.
pub const MASTERED_INTERVAL: u32 = 14;
/// Interval, in days, from which a reviewed topic counts as learning.
pub const LEARNING_INTERVAL: u32 = 3;

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
pub enum RoadmapLevel {
  /// Not yet in review.
  Pending,
  /// A review is due now.
  Urgent,
  Mastered,
  Learning,
  Fresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapEntry {
  #[serde(rename = "id")]
  pub topic_id: TopicId,
  pub title:    String,
  pub level:    RoadmapLevel,
  pub interval: u32,
}

/// Build the roadmap in ascending topic id. Each topic is represented by its
/// angle with the largest interval.
pub fn roadmap(rows: &[ScheduleRow], now: DateTime<Utc>) -> Vec<RoadmapEntry> {
  let mut best: BTreeMap<TopicId, (&str, Option<&Progress>)> = BTreeMap::new();
  for row in rows {
    let slot = best.entry(row.topic_id).or_insert((row.title.as_str(), None));
    let candidate = row.progress.as_ref();
    let better = match (slot.1, candidate) {
      (_, None) => false,
      (None, Some(_)) => true,
      (Some(cur), Some(p)) => p.interval > cur.interval,
    };
    if better {
      slot.1 = candidate;
    }
  }

  best
    .into_iter()
    .map(|(topic_id, (title, progress))| {
      let interval = progress.map_or(0, |p| p.interval);
      RoadmapEntry {
        topic_id,
        title: title.to_owned(),
        level: level_of(progress, now),
        interval,
      }
    })
    .collect()
}

fn level_of(progress: Option<&Progress>, now: DateTime<Utc>) -> RoadmapLevel {
  let Some(p) = progress.filter(|p| p.status == ProgressStatus::Review) else {
    return RoadmapLevel::Pending;
  };
  if p.is_due(now) {
    RoadmapLevel::Urgent
  } else if p.interval >= MASTERED_INTERVAL {
    RoadmapLevel::Mastered
  } else if p.interval >= LEARNING_INTERVAL {
    RoadmapLevel::Learning
  } else {
    RoadmapLevel::Fresh
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  fn row(topic_id: TopicId, status: ProgressStatus, interval: u32, due_in: i64) -> ScheduleRow {
    let now = Utc::now();
    ScheduleRow {
      topic_id,
      title: format!("T{topic_id}"),
      priority: 50,
      angle_id: Some(topic_id * 10 + i64::from(interval)),
      progress: Some(Progress {
        status,
        interval,
        next_review: Some(now + Duration::days(due_in)),
        ..Progress::default()
      }),
    }
  }

  #[test]
  fn levels_follow_interval_thresholds() {
    let now = Utc::now();
    let rows = vec![
      row(4, ProgressStatus::Review, 20, 5),
      row(1, ProgressStatus::Review, 1, -1),
      row(2, ProgressStatus::Review, 3, 2),
      row(3, ProgressStatus::Review, 1, 1),
      row(5, ProgressStatus::Learning, 0, -1),
      ScheduleRow {
        topic_id: 6,
        title:    "T6".into(),
        priority: 1,
        angle_id: None,
        progress: None,
      },
    ];
    let levels: Vec<_> = roadmap(&rows, now).into_iter().map(|e| (e.topic_id, e.level)).collect();
    assert_eq!(levels, vec![
      (1, RoadmapLevel::Urgent),
      (2, RoadmapLevel::Learning),
      (3, RoadmapLevel::Fresh),
      (4, RoadmapLevel::Mastered),
      (5, RoadmapLevel::Pending),
      (6, RoadmapLevel::Pending),
    ]);
  }

  #[test]
  fn largest_interval_angle_represents_topic() {
    let now = Utc::now();
    let rows = vec![
      row(1, ProgressStatus::Review, 2, 1),
      row(1, ProgressStatus::Review, 15, 10),
    ];
    let entries = roadmap(&rows, now);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].interval, 15);
    assert_eq!(entries[0].level, RoadmapLevel::Mastered);
  }
}
