//! The progression engine's operations on [`StudyEngine`].

use chrono::{DateTime, Utc};
use cortex_core::{
  baseline::{BaselineAnswer, BaselineReport, BaselineTopic, baseline_progress, candidates},
  branching::parse_subtopics,
  challenge::{Challenge, ChallengeKey, Content, CurrentTarget},
  collab::{ChallengeRequest, ContentGenerator, ContextResolver, ResolvedContext, SubtopicSuggester},
  label::normalize_label,
  mastery::{GraphNode, GraphState, MasteryOutcome, StudyAngle},
  metrics::{DailyMetrics, SyllabusStats, default_target_date},
  progress::{Rating, ReviewRecord, ReviewWrite},
  roadmap::{RoadmapEntry, roadmap},
  schedule::schedule,
  selector::{Target, select_next},
  store::StudyStore,
  topic::{JournalEntry, JournalRecord, NewTopic, SUBTOPIC_PRIORITY, SyllabusReport, Topic, TopicId},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{Error, Result, flight::ChallengeCache};

/// A collaborator that writes challenges and suggests sub-topics. Both are
/// usually served by the same model endpoint.
pub trait Generator: ContentGenerator + SubtopicSuggester {}

impl<T: ContentGenerator + SubtopicSuggester> Generator for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
  /// Exam date the daily goal counts down to.
  pub target_date: DateTime<Utc>,
}

impl Default for EngineConfig {
  fn default() -> Self { Self { target_date: default_target_date() } }
}

/// What one feedback submission changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
  pub mastery: MasteryOutcome,
  /// The scheduling update, when the label named a known topic.
  pub review:  Option<ReviewRecord>,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The progression engine.
///
/// Every operation that writes runs under `write_lock`, so each external
/// trigger is one atomic read-modify-write sequence. Challenge generation is
/// awaited outside the lock.
pub struct StudyEngine<S, G, R> {
  store:      S,
  generator:  G,
  resolver:   R,
  config:     EngineConfig,
  write_lock: Mutex<()>,
  cache:      ChallengeCache,
}

impl<S, G, R> StudyEngine<S, G, R>
where
  S: StudyStore,
  G: Generator,
  R: ContextResolver,
{
  pub fn new(store: S, generator: G, resolver: R, config: EngineConfig) -> Self {
    Self {
      store,
      generator,
      resolver,
      config,
      write_lock: Mutex::new(()),
      cache: ChallengeCache::new(),
    }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn config(&self) -> &EngineConfig { &self.config }

  // ── Challenges ────────────────────────────────────────────────────────

  /// The challenge for the active node, generating it on a miss.
  ///
  /// Promotes the first locked node when none is active. Reports
  /// [`CurrentTarget::Completed`] once every node is mastered.
  pub async fn get_current_target(&self) -> Result<CurrentTarget> {
    let (epoch, cell, node) = {
      let _guard = self.write_lock.lock().await;

      let mut graph = self.store.load_graph().await.map_err(Error::store)?;
      let before = graph.clone();
      let active = match graph.ensure_active() {
        GraphState::Active(node) => Some(node.clone()),
        GraphState::Completed => None,
      };
      if graph != before {
        info!(active = ?active.as_ref().map(|n| &n.label_key), "graph advanced on read");
        self.store.save_graph(graph).await.map_err(Error::store)?;
      }
      let Some(node) = active else {
        info!("curriculum completed");
        return Ok(CurrentTarget::Completed);
      };

      let key = ChallengeKey::for_node(&node);
      if let Some(challenge) = self.store.pending_challenge().await.map_err(Error::store)?
        && challenge.key == key
      {
        debug!(topic = %key.topic_key, level = key.mastery_level, "serving stored challenge");
        return Ok(CurrentTarget::Ready { challenge });
      }

      let (epoch, cell) = self.cache.cell_for(&key);
      (epoch, cell, node)
    };

    let challenge = cell.get_or_try_init(|| self.generate(&node)).await?.clone();

    let key = ChallengeKey::for_node(&node);
    let _guard = self.write_lock.lock().await;
    if self.cache.is_current(epoch, &key) {
      self
        .store
        .save_pending_challenge(challenge.clone())
        .await
        .map_err(Error::store)?;
    } else {
      warn!(topic = %key.topic_key, "discarding challenge generated before feedback");
    }
    Ok(CurrentTarget::Ready { challenge })
  }

  async fn generate(&self, node: &GraphNode) -> Result<Challenge> {
    let context = self.resolve(&node.label_key).await;
    let request = ChallengeRequest {
      topic:      node.label_key.clone(),
      full_title: context.full_title,
      context:    context.context,
      angle:      node.angle(),
    };
    info!(topic = %request.topic, angle = %request.angle, "generating challenge");

    let content = self
      .generator
      .generate_challenge(&request)
      .await
      .map_err(Error::generation)?
      .validate()
      .map_err(Error::generation)?;
    Ok(Challenge::new(node, content, Utc::now()))
  }

  async fn resolve(&self, topic: &str) -> ResolvedContext {
    match self.resolver.resolve_context(topic).await {
      Ok(context) => context,
      Err(e) => {
        warn!(%topic, error = %e, "context resolution failed, using fallback");
        ResolvedContext::fallback(topic)
      }
    }
  }

  // ── Feedback ──────────────────────────────────────────────────────────

  /// Record a rating against `label`: schedule its topic, advance the
  /// mastery graph, and drop the pending challenge, all in one unit.
  ///
  /// A label that names neither a node nor a topic is rejected with
  /// [`Error::TopicNotFound`]; the pending challenge is dropped regardless.
  pub async fn submit_feedback(&self, label: &str, rating: Rating) -> Result<FeedbackOutcome> {
    let _guard = self.write_lock.lock().await;
    self.cache.invalidate();

    let key = normalize_label(label);
    let mut graph = self.store.load_graph().await.map_err(Error::store)?;
    let topic = self.store.find_topic(&key).await.map_err(Error::store)?;

    if topic.is_none() && graph.find(&key).is_none() {
      self.store.clear_pending_challenge().await.map_err(Error::store)?;
      return Err(Error::TopicNotFound(key));
    }

    let mastery = graph.apply_rating(&key, rating);
    if !mastery.matched_active {
      warn!(label = %key, "feedback for a node that is not active; mastery unchanged");
    } else if mastery.mastered {
      info!(label = %key, promoted = ?mastery.promoted, "node mastered");
    }

    let review = match &topic {
      Some(topic) => Some(self.review_write(topic.topic_id, rating).await?),
      None => {
        warn!(label = %key, "no topic for label; scheduling skipped");
        None
      }
    };

    let review = self
      .store
      .commit_feedback(graph, review)
      .await
      .map_err(Error::store)?;
    info!(label = %key, %rating, level = mastery.mastery_level, "feedback recorded");
    Ok(FeedbackOutcome { mastery, review })
  }

  async fn review_write(&self, topic_id: TopicId, rating: Rating) -> Result<ReviewWrite> {
    let (angle_id, current) = match self
      .store
      .primary_progress(topic_id)
      .await
      .map_err(Error::store)?
    {
      Some((angle, progress)) => (Some(angle.angle_id), progress.unwrap_or_default()),
      None => (None, Default::default()),
    };

    let progress =
      schedule(rating, current.interval, current.ease_factor).into_progress(Utc::now());
    progress.validate().inspect_err(|e| warn!(error = %e, "rejecting computed progress"))?;
    Ok(ReviewWrite { topic_id, angle_id, progress })
  }

  // ── Scheduling ────────────────────────────────────────────────────────

  /// The next topic by the review-first policy, or `None` when nothing is due
  /// and nothing is new.
  pub async fn next_topic(&self) -> Result<Option<Target>> {
    let rows = self.store.schedule_rows().await.map_err(Error::store)?;
    Ok(select_next(&rows, Utc::now()))
  }

  /// Rate a topic directly by id, outside the mastery flow.
  pub async fn update_progress(&self, topic_id: TopicId, rating: Rating) -> Result<ReviewRecord> {
    let _guard = self.write_lock.lock().await;
    if self.store.get_topic(topic_id).await.map_err(Error::store)?.is_none() {
      return Err(Error::TopicNotFound(topic_id.to_string()));
    }
    let write = self.review_write(topic_id, rating).await?;
    let record = self.store.record_review(write).await.map_err(Error::store)?;
    info!(topic_id, %rating, interval = record.new_interval, "progress updated");
    Ok(record)
  }

  // ── Baseline ────────────────────────────────────────────────────────

  /// Up to `limit` high-priority topics that have never been studied.
  pub async fn baseline_topics(&self, limit: usize) -> Result<Vec<BaselineTopic>> {
    let rows = self.store.schedule_rows().await.map_err(Error::store)?;
    Ok(candidates(&rows, limit))
  }

  /// A diagnosis question for a baseline topic. Nothing is cached or stored.
  pub async fn baseline_challenge(&self, topic_id: TopicId) -> Result<Content> {
    let topic = self
      .store
      .get_topic(topic_id)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::TopicNotFound(topic_id.to_string()))?;
    let context = self.resolve(&topic.title).await;
    let request = ChallengeRequest {
      topic:      topic.title,
      full_title: context.full_title,
      context:    context.context,
      angle:      StudyAngle::Diagnosis,
    };
    info!(topic = %request.topic, "generating baseline question");

    self
      .generator
      .generate_challenge(&request)
      .await
      .map_err(Error::generation)?
      .validate()
      .map_err(Error::generation)
  }

  /// Seed progress for each answered topic. Every topic is checked before
  /// anything is written, so an unknown id leaves the batch unapplied.
  pub async fn record_baseline(&self, answers: Vec<BaselineAnswer>) -> Result<BaselineReport> {
    let _guard = self.write_lock.lock().await;
    let now = Utc::now();

    let mut writes = Vec::with_capacity(answers.len());
    for answer in &answers {
      if self.store.get_topic(answer.topic_id).await.map_err(Error::store)?.is_none() {
        return Err(Error::TopicNotFound(answer.topic_id.to_string()));
      }
      let angle_id = self
        .store
        .primary_progress(answer.topic_id)
        .await
        .map_err(Error::store)?
        .map(|(angle, _)| angle.angle_id);
      let progress = baseline_progress(answer.correct, now);
      progress.validate()?;
      writes.push(ReviewWrite { topic_id: answer.topic_id, angle_id, progress });
    }

    let mut records = Vec::with_capacity(writes.len());
    for write in writes {
      records.push(self.store.record_review(write).await.map_err(Error::store)?);
    }
    let report = BaselineReport::new(&answers, records);
    info!(answered = report.answered, correct = report.correct, "baseline recorded");
    Ok(report)
  }

  // ── Read models ───────────────────────────────────────────────────────

  pub async fn get_daily_metrics(&self) -> Result<DailyMetrics> {
    let now = Utc::now();
    let graph = self.store.load_graph().await.map_err(Error::store)?;
    let done_today = self
      .store
      .reviews_on(now.date_naive())
      .await
      .map_err(Error::store)?;
    Ok(DailyMetrics::compute(&graph, done_today, now, self.config.target_date))
  }

  pub async fn roadmap(&self) -> Result<Vec<RoadmapEntry>> {
    let rows = self.store.schedule_rows().await.map_err(Error::store)?;
    Ok(roadmap(&rows, Utc::now()))
  }

  pub async fn stats(&self) -> Result<SyllabusStats> {
    let rows = self.store.schedule_rows().await.map_err(Error::store)?;
    Ok(SyllabusStats::compute(&rows, Utc::now(), self.config.target_date))
  }

  pub async fn list_topics(&self) -> Result<Vec<Topic>> {
    self.store.list_topics().await.map_err(Error::store)
  }

  // ── Syllabus ──────────────────────────────────────────────────────────

  pub async fn load_syllabus(&self, entries: Vec<NewTopic>) -> Result<SyllabusReport> {
    let _guard = self.write_lock.lock().await;
    let report = self.store.load_syllabus(entries).await.map_err(Error::store)?;
    info!(topics = report.topics_added, nodes = report.nodes_added, "syllabus loaded");
    Ok(report)
  }

  /// Ask for sub-topics of the node labelled `label` and append them to the
  /// curriculum. Returns the nodes added, possibly none.
  pub async fn expand_topic(&self, label: &str) -> Result<Vec<GraphNode>> {
    let key = normalize_label(label);
    let graph = self.store.load_graph().await.map_err(Error::store)?;
    let parent = graph
      .find(&key)
      .cloned()
      .ok_or_else(|| Error::NodeNotFound(key.clone()))?;

    let context = self.resolve(&parent.label_key).await;
    let reply = self
      .generator
      .suggest_subtopics(&parent.label_key, &context)
      .await
      .map_err(Error::generation)?;
    let names = parse_subtopics(&reply);
    if names.is_empty() {
      info!(parent = %key, "no sub-topics suggested");
      return Ok(Vec::new());
    }

    let topics = names
      .into_iter()
      .map(|name| NewTopic::new(name, SUBTOPIC_PRIORITY))
      .collect();
    let _guard = self.write_lock.lock().await;
    let added = self
      .store
      .append_subtopics(parent.position, topics)
      .await
      .map_err(Error::store)?;
    info!(parent = %key, added = added.len(), "expanded topic");
    Ok(added)
  }

  /// Archive a question against a topic's journal angle.
  pub async fn log_question(&self, topic: &str, entry: JournalEntry) -> Result<JournalRecord> {
    let key = normalize_label(topic);
    let _guard = self.write_lock.lock().await;
    let topic = self
      .store
      .find_topic(&key)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::TopicNotFound(key.clone()))?;
    let record = self
      .store
      .log_question(topic.topic_id, entry)
      .await
      .map_err(Error::store)?;
    debug!(topic = %key, question_id = record.question_id, "question archived");
    Ok(record)
  }
}
