//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings in UTC, so the first ten
//! characters are the calendar date. Enums are stored as their lowercase
//! names. The pending challenge and journal options are stored as JSON.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cortex_core::{
  mastery::{GraphNode, NodeGroup},
  progress::{Progress, ProgressStatus},
  selector::ScheduleRow,
  topic::{Angle, AngleId, Topic, TopicId},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── Enums ───────────────────────────────────────────────────────────────────

fn decode_enum<T: FromStr>(column: &'static str, value: &str) -> Result<T> {
  T::from_str(value).map_err(|_| Error::UnknownValue { column, value: value.to_owned() })
}

pub fn encode_status(s: ProgressStatus) -> &'static str { s.into() }

pub fn encode_group(g: NodeGroup) -> &'static str { g.into() }

// ─── Progress ────────────────────────────────────────────────────────────────

/// Column values for one `progress` row.
pub struct EncodedProgress {
  pub status:        &'static str,
  pub interval:      i64,
  pub ease_factor:   f64,
  pub next_review:   Option<String>,
  pub last_reviewed: Option<String>,
}

impl EncodedProgress {
  pub fn new(p: &Progress) -> Self {
    Self {
      status:        encode_status(p.status),
      interval:      i64::from(p.interval),
      ease_factor:   p.ease_factor,
      next_review:   p.next_review.map(encode_dt),
      last_reviewed: p.last_reviewed.map(encode_dt),
    }
  }
}

/// Raw progress columns; all `None` when a LEFT JOIN found no row.
pub struct RawProgress {
  pub status:        Option<String>,
  pub interval:      Option<i64>,
  pub ease_factor:   Option<f64>,
  pub next_review:   Option<String>,
  pub last_reviewed: Option<String>,
}

impl RawProgress {
  pub fn from_row(row: &rusqlite::Row<'_>, first: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      status:        row.get(first)?,
      interval:      row.get(first + 1)?,
      ease_factor:   row.get(first + 2)?,
      next_review:   row.get(first + 3)?,
      last_reviewed: row.get(first + 4)?,
    })
  }

  pub fn into_progress(self) -> Result<Option<Progress>> {
    let Some(status) = self.status else { return Ok(None) };
    let interval = self.interval.unwrap_or_default();
    let progress = Progress {
      status:        decode_enum("status", &status)?,
      interval:      u32::try_from(interval).map_err(|_| Error::UnknownValue {
        column: "interval",
        value:  interval.to_string(),
      })?,
      ease_factor:   self.ease_factor.unwrap_or_default(),
      next_review:   decode_opt_dt(self.next_review)?,
      last_reviewed: decode_opt_dt(self.last_reviewed)?,
    };
    progress.validate()?;
    Ok(Some(progress))
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub struct RawTopic {
  pub topic_id:  TopicId,
  pub title:     String,
  pub title_key: String,
  pub priority:  i64,
}

impl RawTopic {
  pub const COLUMNS: &'static str = "topic_id, title, title_key, priority";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      topic_id:  row.get(0)?,
      title:     row.get(1)?,
      title_key: row.get(2)?,
      priority:  row.get(3)?,
    })
  }

  pub fn into_topic(self) -> Topic {
    Topic {
      topic_id:  self.topic_id,
      title:     self.title,
      title_key: self.title_key,
      priority:  self.priority,
    }
  }
}

/// A topic joined with one of its angles and that angle's progress.
pub struct RawScheduleRow {
  pub topic_id: TopicId,
  pub title:    String,
  pub priority: i64,
  pub angle_id: Option<AngleId>,
  pub progress: RawProgress,
}

impl RawScheduleRow {
  pub fn into_row(self) -> Result<ScheduleRow> {
    Ok(ScheduleRow {
      topic_id: self.topic_id,
      title:    self.title,
      priority: self.priority,
      angle_id: self.angle_id,
      progress: self.progress.into_progress()?,
    })
  }
}

pub struct RawAngle {
  pub angle_id: AngleId,
  pub topic_id: TopicId,
  pub name:     String,
  pub variant:  String,
  pub progress: RawProgress,
}

impl RawAngle {
  pub fn into_parts(self) -> Result<(Angle, Option<Progress>)> {
    let angle = Angle {
      angle_id: self.angle_id,
      topic_id: self.topic_id,
      name:     self.name,
      variant:  self.variant,
    };
    Ok((angle, self.progress.into_progress()?))
  }
}

pub struct RawNode {
  pub position:      i64,
  pub label:         String,
  pub label_key:     String,
  pub group:         String,
  pub mastery_level: i64,
}

impl RawNode {
  pub const COLUMNS: &'static str = "position, label, label_key, grp, mastery_level";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      position:      row.get(0)?,
      label:         row.get(1)?,
      label_key:     row.get(2)?,
      group:         row.get(3)?,
      mastery_level: row.get(4)?,
    })
  }

  pub fn into_node(self) -> Result<GraphNode> {
    Ok(GraphNode {
      position:      self.position,
      label:         self.label,
      label_key:     self.label_key,
      group:         decode_enum("grp", &self.group)?,
      mastery_level: u8::try_from(self.mastery_level).map_err(|_| Error::UnknownValue {
        column: "mastery_level",
        value:  self.mastery_level.to_string(),
      })?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_round_trip_and_start_with_the_day() {
    let now = Utc::now();
    let s = encode_dt(now);
    assert_eq!(&s[..10], now.date_naive().to_string());
    assert_eq!(decode_dt(&s).unwrap(), now);
  }

  #[test]
  fn unknown_group_is_reported() {
    let raw = RawNode {
      position:      1,
      label:         "A".into(),
      label_key:     "A".into(),
      group:         "frozen".into(),
      mastery_level: 0,
    };
    assert!(matches!(raw.into_node(), Err(Error::UnknownValue { column: "grp", .. })));
  }

  #[test]
  fn missing_progress_decodes_to_none() {
    let raw = RawProgress {
      status:        None,
      interval:      None,
      ease_factor:   None,
      next_review:   None,
      last_reviewed: None,
    };
    assert_eq!(raw.into_progress().unwrap(), None);
  }
}
