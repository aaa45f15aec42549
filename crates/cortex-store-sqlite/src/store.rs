//! SQLite implementation of [`StudyStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension as _, Transaction};

use cortex_core::{
  branching::DERIVATION_EDGE_LABEL,
  challenge::Challenge,
  mastery::{GraphNode, MasteryGraph, NodeGroup},
  progress::{Progress, ReviewRecord, ReviewWrite},
  selector::ScheduleRow,
  store::StudyStore,
  topic::{
    Angle, AngleId, DEFAULT_ANGLE_NAME, DEFAULT_ANGLE_VARIANT, JOURNAL_ANGLE_NAME,
    JOURNAL_ANGLE_VARIANT, JournalEntry, JournalRecord, NewTopic, SyllabusReport, Topic, TopicId,
  },
};

use crate::{
  Error, Result,
  encode::{
    EncodedProgress, RawAngle, RawNode, RawProgress, RawScheduleRow, RawTopic, encode_dt,
    encode_group,
  },
  schema::SCHEMA,
};

/// Angles that take part in scheduling. The journal angle only archives
/// questions.
const SCHEDULED_ANGLE: &str = "NOT (a.name = 'Journal' AND a.variant = 'Socratic')";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Cortex study store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Transaction helpers ─────────────────────────────────────────────────────

/// Column values for one progress upsert, prepared outside the connection
/// thread.
struct PreparedReview {
  topic_id: TopicId,
  angle_id: Option<AngleId>,
  progress: EncodedProgress,
}

impl PreparedReview {
  fn new(write: &ReviewWrite) -> Result<Self> {
    write.progress.validate()?;
    if write.progress.next_review.is_none() {
      return Err(Error::Core(cortex_core::Error::InvariantViolation(
        "a recorded review must carry a next_review date".into(),
      )));
    }
    Ok(Self {
      topic_id: write.topic_id,
      angle_id: write.angle_id,
      progress: EncodedProgress::new(&write.progress),
    })
  }
}

fn topic_exists(tx: &Transaction<'_>, topic_id: TopicId) -> rusqlite::Result<bool> {
  Ok(
    tx.query_row("SELECT 1 FROM topics WHERE topic_id = ?1", [topic_id], |_| Ok(()))
      .optional()?
      .is_some(),
  )
}

/// Find an angle by name and variant, creating it if missing.
fn ensure_angle(
  tx: &Transaction<'_>,
  topic_id: TopicId,
  name: &str,
  variant: &str,
) -> rusqlite::Result<AngleId> {
  tx.execute(
    "INSERT OR IGNORE INTO angles (topic_id, name, variant) VALUES (?1, ?2, ?3)",
    rusqlite::params![topic_id, name, variant],
  )?;
  tx.query_row(
    "SELECT angle_id FROM angles WHERE topic_id = ?1 AND name = ?2 AND variant = ?3",
    rusqlite::params![topic_id, name, variant],
    |r| r.get(0),
  )
}

/// Upsert progress for the primary angle. Returns `None` if the topic does
/// not exist.
fn upsert_review(
  tx: &Transaction<'_>,
  review: &PreparedReview,
) -> rusqlite::Result<Option<AngleId>> {
  if !topic_exists(tx, review.topic_id)? {
    return Ok(None);
  }

  let primary: Option<AngleId> = match review.angle_id {
    Some(id) => Some(id),
    None => tx
      .query_row(
        &format!(
          "SELECT a.angle_id FROM angles a
           WHERE a.topic_id = ?1 AND {SCHEDULED_ANGLE}
           ORDER BY a.angle_id ASC LIMIT 1"
        ),
        [review.topic_id],
        |r| r.get(0),
      )
      .optional()?,
  };
  let angle_id = match primary {
    Some(id) => id,
    None => ensure_angle(tx, review.topic_id, DEFAULT_ANGLE_NAME, DEFAULT_ANGLE_VARIANT)?,
  };

  let p = &review.progress;
  tx.execute(
    "INSERT INTO progress (angle_id, status, interval, ease_factor, next_review, last_reviewed)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(angle_id) DO UPDATE SET
       status        = excluded.status,
       interval      = excluded.interval,
       ease_factor   = excluded.ease_factor,
       next_review   = excluded.next_review,
       last_reviewed = excluded.last_reviewed",
    rusqlite::params![
      angle_id,
      p.status,
      p.interval,
      p.ease_factor,
      p.next_review,
      p.last_reviewed,
    ],
  )?;
  Ok(Some(angle_id))
}

/// Node groups and levels to write back, with active nodes ordered last so
/// the single-active index never sees two at once.
fn encode_graph(graph: &MasteryGraph) -> (Vec<(i64, &'static str, i64)>, Option<i64>) {
  let mut rows: Vec<_> = graph
    .nodes()
    .iter()
    .map(|n| (n.position, encode_group(n.group), i64::from(n.mastery_level)))
    .collect();
  rows.sort_by_key(|(_, grp, _)| *grp == encode_group(NodeGroup::Active));
  (rows, graph.active_position())
}

fn write_graph(
  tx: &Transaction<'_>,
  rows: &[(i64, &'static str, i64)],
  active_position: Option<i64>,
) -> rusqlite::Result<()> {
  {
    let mut stmt =
      tx.prepare("UPDATE graph_nodes SET grp = ?2, mastery_level = ?3 WHERE position = ?1")?;
    for (position, grp, level) in rows {
      stmt.execute(rusqlite::params![position, grp, level])?;
    }
  }
  tx.execute(
    "UPDATE graph_state SET active_position = ?1 WHERE id = 1",
    [active_position],
  )?;
  Ok(())
}

/// Insert a topic if its key is new. Returns whether a row was added.
fn insert_topic(tx: &Transaction<'_>, topic: &NewTopic) -> rusqlite::Result<bool> {
  let added = tx.execute(
    "INSERT OR IGNORE INTO topics (title, title_key, priority) VALUES (?1, ?2, ?3)",
    rusqlite::params![topic.title, topic.title_key(), topic.priority],
  )?;
  Ok(added == 1)
}

/// Append a locked node after the current last one. Returns its position, or
/// `None` if a node with the same key exists.
fn append_node(tx: &Transaction<'_>, label: &str, label_key: &str) -> rusqlite::Result<Option<i64>> {
  let added = tx.execute(
    "INSERT OR IGNORE INTO graph_nodes (position, label, label_key, grp, mastery_level)
     VALUES ((SELECT COALESCE(MAX(position), 0) + 1 FROM graph_nodes), ?1, ?2, 'locked', 0)",
    rusqlite::params![label, label_key],
  )?;
  if added == 0 {
    return Ok(None);
  }
  Ok(Some(tx.query_row(
    "SELECT position FROM graph_nodes WHERE label_key = ?1",
    [label_key],
    |r| r.get(0),
  )?))
}

fn review_record(topic_id: TopicId, angle_id: AngleId, write: &ReviewWrite) -> Result<ReviewRecord> {
  let next_review = write.progress.next_review.ok_or_else(|| {
    cortex_core::Error::InvariantViolation("review without next_review".into())
  })?;
  Ok(ReviewRecord {
    topic_id,
    angle_id,
    status: write.progress.status,
    new_interval: write.progress.interval,
    ease_factor: write.progress.ease_factor,
    next_review,
  })
}

// ─── StudyStore impl ─────────────────────────────────────────────────────────

impl StudyStore for SqliteStore {
  type Error = Error;

  // ── Syllabus ──────────────────────────────────────────────────────────────

  async fn load_syllabus(&self, entries: Vec<NewTopic>) -> Result<SyllabusReport> {
    let report = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut report = SyllabusReport::default();
        for entry in &entries {
          let key = entry.title_key();
          if key.is_empty() {
            continue;
          }
          if insert_topic(&tx, entry)? {
            report.topics_added += 1;
          }
          if append_node(&tx, &entry.title, &key)?.is_some() {
            report.nodes_added += 1;
          }
        }
        tx.commit()?;
        Ok(report)
      })
      .await?;
    Ok(report)
  }

  async fn list_topics(&self) -> Result<Vec<Topic>> {
    let raws: Vec<RawTopic> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM topics ORDER BY topic_id ASC",
          RawTopic::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawTopic::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(raws.into_iter().map(RawTopic::into_topic).collect())
  }

  async fn get_topic(&self, topic_id: TopicId) -> Result<Option<Topic>> {
    let raw: Option<RawTopic> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM topics WHERE topic_id = ?1", RawTopic::COLUMNS),
              [topic_id],
              RawTopic::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.map(RawTopic::into_topic))
  }

  async fn find_topic(&self, label_key: &str) -> Result<Option<Topic>> {
    let key = label_key.to_owned();
    let raw: Option<RawTopic> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM topics WHERE title_key = ?1", RawTopic::COLUMNS),
              [key],
              RawTopic::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.map(RawTopic::into_topic))
  }

  // ── Progress ──────────────────────────────────────────────────────────────

  async fn primary_progress(
    &self,
    topic_id: TopicId,
  ) -> Result<Option<(Angle, Option<Progress>)>> {
    let raw: Option<RawAngle> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT a.angle_id, a.topic_id, a.name, a.variant,
                        p.status, p.interval, p.ease_factor, p.next_review, p.last_reviewed
                 FROM angles a
                 LEFT JOIN progress p ON p.angle_id = a.angle_id
                 WHERE a.topic_id = ?1 AND {SCHEDULED_ANGLE}
                 ORDER BY a.angle_id ASC
                 LIMIT 1"
              ),
              [topic_id],
              |row| {
                Ok(RawAngle {
                  angle_id: row.get(0)?,
                  topic_id: row.get(1)?,
                  name:     row.get(2)?,
                  variant:  row.get(3)?,
                  progress: RawProgress::from_row(row, 4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawAngle::into_parts).transpose()
  }

  async fn schedule_rows(&self) -> Result<Vec<ScheduleRow>> {
    let raws: Vec<RawScheduleRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT t.topic_id, t.title, t.priority, a.angle_id,
                  p.status, p.interval, p.ease_factor, p.next_review, p.last_reviewed
           FROM topics t
           LEFT JOIN angles a   ON a.topic_id = t.topic_id AND {SCHEDULED_ANGLE}
           LEFT JOIN progress p ON p.angle_id = a.angle_id
           ORDER BY t.topic_id ASC, a.angle_id ASC"
        ))?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawScheduleRow {
              topic_id: row.get(0)?,
              title:    row.get(1)?,
              priority: row.get(2)?,
              angle_id: row.get(3)?,
              progress: RawProgress::from_row(row, 4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawScheduleRow::into_row).collect()
  }

  async fn record_review(&self, write: ReviewWrite) -> Result<ReviewRecord> {
    let prepared = PreparedReview::new(&write)?;
    let topic_id = write.topic_id;

    let angle_id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let angle_id = upsert_review(&tx, &prepared)?;
        tx.commit()?;
        Ok(angle_id)
      })
      .await?
      .ok_or(Error::TopicNotFound(topic_id))?;

    review_record(topic_id, angle_id, &write)
  }

  async fn reviews_on(&self, day: NaiveDate) -> Result<u32> {
    let day = day.format("%Y-%m-%d").to_string();
    let count: u32 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM progress WHERE substr(last_reviewed, 1, 10) = ?1",
          [day],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(count)
  }

  // ── Graph ─────────────────────────────────────────────────────────────────

  async fn load_graph(&self) -> Result<MasteryGraph> {
    let (raws, active): (Vec<RawNode>, Option<i64>) = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM graph_nodes ORDER BY position ASC",
          RawNode::COLUMNS
        ))?;
        let nodes = stmt
          .query_map([], RawNode::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let active: Option<i64> = conn
          .query_row("SELECT active_position FROM graph_state WHERE id = 1", [], |r| r.get(0))
          .optional()?
          .flatten();
        Ok((nodes, active))
      })
      .await?;

    let nodes = raws
      .into_iter()
      .map(RawNode::into_node)
      .collect::<Result<Vec<_>>>()?;
    Ok(MasteryGraph::from_parts(nodes, active)?)
  }

  async fn save_graph(&self, graph: MasteryGraph) -> Result<()> {
    let (rows, active) = encode_graph(&graph);
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        write_graph(&tx, &rows, active)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn append_subtopics(
    &self,
    parent_position: i64,
    topics: Vec<NewTopic>,
  ) -> Result<Vec<GraphNode>> {
    let added: Option<Vec<GraphNode>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let parent_exists = tx
          .query_row(
            "SELECT 1 FROM graph_nodes WHERE position = ?1",
            [parent_position],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !parent_exists {
          return Ok(None);
        }

        let mut added = Vec::new();
        for topic in &topics {
          let key = topic.title_key();
          if key.is_empty() {
            continue;
          }
          insert_topic(&tx, topic)?;
          let Some(position) = append_node(&tx, &topic.title, &key)? else {
            continue;
          };
          tx.execute(
            "INSERT OR IGNORE INTO graph_edges (from_position, to_position, label)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![parent_position, position, DERIVATION_EDGE_LABEL],
          )?;
          added.push(GraphNode::locked(position, topic.title.clone()));
        }
        tx.commit()?;
        Ok(Some(added))
      })
      .await?;

    added.ok_or(Error::NodeNotFound(parent_position))
  }

  // ── Pending challenge ─────────────────────────────────────────────────────

  async fn pending_challenge(&self) -> Result<Option<Challenge>> {
    let json: Option<String> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row("SELECT challenge_json FROM pending_challenge WHERE id = 1", [], |r| {
              r.get(0)
            })
            .optional()?,
        )
      })
      .await?;
    Ok(json.as_deref().map(serde_json::from_str).transpose()?)
  }

  async fn save_pending_challenge(&self, challenge: Challenge) -> Result<()> {
    let json = serde_json::to_string(&challenge)?;
    let topic_key = challenge.key.topic_key.clone();
    let level = i64::from(challenge.key.mastery_level);
    let created_at = encode_dt(challenge.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO pending_challenge (id, topic_key, mastery_level, challenge_json, created_at)
           VALUES (1, ?1, ?2, ?3, ?4)
           ON CONFLICT(id) DO UPDATE SET
             topic_key      = excluded.topic_key,
             mastery_level  = excluded.mastery_level,
             challenge_json = excluded.challenge_json,
             created_at     = excluded.created_at",
          rusqlite::params![topic_key, level, json, created_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear_pending_challenge(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM pending_challenge", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn commit_feedback(
    &self,
    graph: MasteryGraph,
    review: Option<ReviewWrite>,
  ) -> Result<Option<ReviewRecord>> {
    let (rows, active) = encode_graph(&graph);
    let prepared = review.as_ref().map(PreparedReview::new).transpose()?;

    let angle_id: Option<Option<AngleId>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        write_graph(&tx, &rows, active)?;
        let angle_id = prepared.as_ref().map(|p| upsert_review(&tx, p)).transpose()?;
        tx.execute("DELETE FROM pending_challenge", [])?;
        tx.commit()?;
        Ok(angle_id)
      })
      .await?;

    // A review naming a missing topic leaves nothing scheduled; the graph
    // write above still stands.
    match (review, angle_id.flatten()) {
      (Some(write), Some(angle_id)) => Ok(Some(review_record(write.topic_id, angle_id, &write)?)),
      _ => Ok(None),
    }
  }

  // ── Journal ───────────────────────────────────────────────────────────────

  async fn log_question(&self, topic_id: TopicId, entry: JournalEntry) -> Result<JournalRecord> {
    let options_json = serde_json::to_string(&entry.options)?;
    let created_at = Utc::now();
    let created_at_str = encode_dt(created_at);
    let row = entry.clone();

    let ids: Option<(i64, AngleId)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !topic_exists(&tx, topic_id)? {
          return Ok(None);
        }
        let angle_id = ensure_angle(&tx, topic_id, JOURNAL_ANGLE_NAME, JOURNAL_ANGLE_VARIANT)?;
        tx.execute(
          "INSERT INTO questions
             (angle_id, question, options_json, answer, explanation, context, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            angle_id,
            row.question,
            options_json,
            row.answer,
            row.explanation,
            row.context,
            created_at_str,
          ],
        )?;
        let question_id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Some((question_id, angle_id)))
      })
      .await?;

    let (question_id, angle_id) = ids.ok_or(Error::TopicNotFound(topic_id))?;
    Ok(JournalRecord { question_id, angle_id, entry, created_at })
  }
}
