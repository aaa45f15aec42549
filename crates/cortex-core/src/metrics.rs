//! Derived, read-only progress figures. Recomputed on every call from the
//! current graph and progress rows; nothing here is stored.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  mastery::{MASTERY_TARGET, MasteryGraph},
  progress::ProgressStatus,
  selector::ScheduleRow,
};

/// Default exam date the daily goal counts down to.
pub fn default_target_date() -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(2026, 3, 13, 23, 59, 59)
    .single()
    .unwrap_or_else(Utc::now)
}

/// Whole days left until `target`, counting today. Never below one.
pub fn days_left(now: DateTime<Utc>, target: DateTime<Utc>) -> i64 {
  ((target - now).num_days() + 1).max(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
  /// Ratings recorded today.
  pub done_today:       u32,
  /// Mastery steps per day needed to finish by the target date.
  pub daily_goal:       u32,
  /// Mastery steps still outstanding.
  pub pending_total:    u32,
  pub days_left:        i64,
  pub current_mastery:  u32,
  pub total_possible:   u32,
  /// `current_mastery / total_possible`, 0 for an empty curriculum.
  pub mastery_progress: f64,
}

impl DailyMetrics {
  pub fn compute(
    graph: &MasteryGraph,
    done_today: u32,
    now: DateTime<Utc>,
    target: DateTime<Utc>,
  ) -> Self {
    let node_count = u32::try_from(graph.len()).unwrap_or(u32::MAX);
    let total_possible = node_count.saturating_mul(u32::from(MASTERY_TARGET));
    let current_mastery = graph.total_mastery();
    let pending_total = total_possible.saturating_sub(current_mastery);
    let days_left = days_left(now, target);
    let daily_goal = u32::try_from(u64::from(pending_total).div_ceil(days_left.unsigned_abs().max(1)))
      .unwrap_or(u32::MAX);
    let mastery_progress = if total_possible == 0 {
      0.0
    } else {
      f64::from(current_mastery) / f64::from(total_possible)
    };

    Self {
      done_today,
      daily_goal,
      pending_total,
      days_left,
      current_mastery,
      total_possible,
      mastery_progress,
    }
  }
}

/// Syllabus-wide counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusStats {
  pub total_topics: usize,
  /// Distinct topics with at least one due review.
  pub due_reviews:  usize,
  /// Distinct topics with at least one never-rated angle.
  pub pending_new:  usize,
  pub days_left:    i64,
}

impl SyllabusStats {
  pub fn compute(rows: &[ScheduleRow], now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
    let total: HashSet<_> = rows.iter().map(|r| r.topic_id).collect();
    let due: HashSet<_> = rows
      .iter()
      .filter(|r| r.progress.as_ref().is_some_and(|p| p.is_due(now)))
      .map(|r| r.topic_id)
      .collect();
    let pending: HashSet<_> = rows
      .iter()
      .filter(|r| {
        r.progress
          .as_ref()
          .is_none_or(|p| p.status == ProgressStatus::Pending)
      })
      .map(|r| r.topic_id)
      .collect();

    Self {
      total_topics: total.len(),
      due_reviews:  due.len(),
      pending_new:  pending.len(),
      days_left:    days_left(now, target),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;
  use crate::{
    mastery::GraphNode,
    progress::{Progress, Rating},
  };

  fn graph(n: usize) -> MasteryGraph {
    let nodes = (0..n).map(|i| GraphNode::locked(i as i64, format!("T{i}"))).collect();
    MasteryGraph::from_parts(nodes, None).unwrap()
  }

  #[test]
  fn days_left_counts_today_and_floors_at_one() {
    let now = Utc::now();
    assert_eq!(days_left(now, now + Duration::days(10) + Duration::hours(2)), 11);
    assert_eq!(days_left(now, now + Duration::hours(5)), 1);
    assert_eq!(days_left(now, now - Duration::days(30)), 1);
  }

  #[test]
  fn daily_goal_rounds_up() {
    let mut g = graph(4);
    g.ensure_active();
    g.apply_rating("T0", Rating::Easy);

    let now = Utc::now();
    let m = DailyMetrics::compute(&g, 2, now, now + Duration::days(2) + Duration::hours(1));
    assert_eq!(m.total_possible, 12);
    assert_eq!(m.current_mastery, 1);
    assert_eq!(m.pending_total, 11);
    assert_eq!(m.days_left, 3);
    assert_eq!(m.daily_goal, 4);
    assert_eq!(m.done_today, 2);
    assert!((m.mastery_progress - 1.0 / 12.0).abs() < 1e-9);
  }

  #[test]
  fn daily_goal_keeps_the_remainder() {
    let mut g = graph(3);
    g.ensure_active();
    g.apply_rating("T0", Rating::Easy);
    g.apply_rating("T0", Rating::Easy);

    let now = Utc::now();
    let m = DailyMetrics::compute(&g, 0, now, now + Duration::days(1) + Duration::hours(1));
    assert_eq!(m.pending_total, 7);
    assert_eq!(m.days_left, 2);
    assert_eq!(m.daily_goal, 4);
  }

  #[test]
  fn empty_graph_has_zero_progress() {
    let now = Utc::now();
    let m = DailyMetrics::compute(&graph(0), 0, now, now);
    assert_eq!(m.daily_goal, 0);
    assert_eq!(m.mastery_progress, 0.0);
  }

  #[test]
  fn stats_count_distinct_topics() {
    let now = Utc::now();
    let due = Progress {
      status: ProgressStatus::Review,
      next_review: Some(now - Duration::hours(1)),
      ..Progress::default()
    };
    let row = |topic_id, angle_id, progress| ScheduleRow {
      topic_id,
      title: format!("T{topic_id}"),
      priority: 50,
      angle_id,
      progress,
    };
    let rows = vec![
      row(1, Some(1), Some(due.clone())),
      row(1, Some(2), Some(due)),
      row(2, None, None),
      row(3, Some(3), Some(Progress::default())),
    ];
    let s = SyllabusStats::compute(&rows, now, now);
    assert_eq!(s.total_topics, 3);
    assert_eq!(s.due_reviews, 1);
    assert_eq!(s.pending_new, 2);
  }
}
