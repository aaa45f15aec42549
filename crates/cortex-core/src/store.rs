//! The `StudyStore` trait.
//!
//! Implemented by storage backends (e.g. `cortex-store-sqlite`). The engine
//! and the outer surfaces depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  challenge::Challenge,
  mastery::{GraphNode, MasteryGraph},
  progress::{Progress, ReviewRecord, ReviewWrite},
  selector::ScheduleRow,
  topic::{Angle, JournalEntry, JournalRecord, NewTopic, SyllabusReport, Topic, TopicId},
};

/// Abstraction over persistent study state: the syllabus, per-angle
/// progress, the curriculum graph, and the single pending challenge.
///
/// Every write is atomic. Methods that touch several tables do so in one
/// transaction.
pub trait StudyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Syllabus ──────────────────────────────────────────────────────────

  /// Insert topics and matching locked graph nodes, in order. Entries whose
  /// title key already exists are skipped.
  fn load_syllabus(
    &self,
    entries: Vec<NewTopic>,
  ) -> impl Future<Output = Result<SyllabusReport, Self::Error>> + Send + '_;

  /// All topics in ascending id.
  fn list_topics(&self) -> impl Future<Output = Result<Vec<Topic>, Self::Error>> + Send + '_;

  fn get_topic(
    &self,
    topic_id: TopicId,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + '_;

  /// Look a topic up by label key.
  fn find_topic<'a>(
    &'a self,
    label_key: &'a str,
  ) -> impl Future<Output = Result<Option<Topic>, Self::Error>> + Send + 'a;

  // ── Progress ──────────────────────────────────────────────────────────

  /// The lowest-id angle of a topic and its progress, if the topic has any
  /// angle at all.
  fn primary_progress(
    &self,
    topic_id: TopicId,
  ) -> impl Future<Output = Result<Option<(Angle, Option<Progress>)>, Self::Error>> + Send + '_;

  /// One row per (topic, angle) pairing, plus one row for each topic without
  /// angles.
  fn schedule_rows(
    &self,
  ) -> impl Future<Output = Result<Vec<ScheduleRow>, Self::Error>> + Send + '_;

  /// Upsert progress for a topic's primary angle, creating the default angle
  /// when `write.angle_id` is `None`.
  fn record_review(
    &self,
    write: ReviewWrite,
  ) -> impl Future<Output = Result<ReviewRecord, Self::Error>> + Send + '_;

  /// Number of progress rows last reviewed on `day` (UTC).
  fn reviews_on(&self, day: NaiveDate) -> impl Future<Output = Result<u32, Self::Error>> + Send + '_;

  // ── Graph ─────────────────────────────────────────────────────────────

  fn load_graph(&self) -> impl Future<Output = Result<MasteryGraph, Self::Error>> + Send + '_;

  /// Persist node groups, levels, and the active slot.
  fn save_graph(
    &self,
    graph: MasteryGraph,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert `topics` (if missing) and append them as locked nodes after the
  /// current last node, each with a derivation edge from `parent_position`.
  /// Returns the nodes actually added.
  fn append_subtopics(
    &self,
    parent_position: i64,
    topics: Vec<NewTopic>,
  ) -> impl Future<Output = Result<Vec<GraphNode>, Self::Error>> + Send + '_;

  // ── Pending challenge ─────────────────────────────────────────────────

  fn pending_challenge(
    &self,
  ) -> impl Future<Output = Result<Option<Challenge>, Self::Error>> + Send + '_;

  /// Replace the pending slot.
  fn save_pending_challenge(
    &self,
    challenge: Challenge,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn clear_pending_challenge(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Apply one feedback submission atomically: save the graph, upsert the
  /// review when given, and clear the pending slot.
  fn commit_feedback(
    &self,
    graph: MasteryGraph,
    review: Option<ReviewWrite>,
  ) -> impl Future<Output = Result<Option<ReviewRecord>, Self::Error>> + Send + '_;

  // ── Journal ───────────────────────────────────────────────────────────

  /// Archive a question against the topic's journal angle, creating the
  /// angle if needed.
  fn log_question(
    &self,
    topic_id: TopicId,
    entry: JournalEntry,
  ) -> impl Future<Output = Result<JournalRecord, Self::Error>> + Send + '_;
}
