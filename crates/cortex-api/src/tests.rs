use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use cortex_core::{
  challenge::Content,
  collab::{ChallengeRequest, ContentGenerator, ContextResolver, ResolvedContext, SubtopicSuggester},
  topic::NewTopic,
};
use cortex_engine::{EngineConfig, StudyEngine};
use cortex_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::*;

#[derive(Debug, thiserror::Error)]
#[error("model offline")]
struct Offline;

#[derive(Clone, Default)]
struct StubModel {
  offline: Arc<AtomicBool>,
}

impl ContentGenerator for StubModel {
  type Error = Offline;

  async fn generate_challenge(&self, request: &ChallengeRequest) -> Result<Content, Offline> {
    if self.offline.load(Ordering::SeqCst) {
      return Err(Offline);
    }
    Ok(Content {
      body:           format!("Case on {} ({})", request.topic, request.angle),
      options:        vec!["A) a".into(), "B) b".into(), "C) c".into(), "D) d".into()],
      correct_option: "a".into(),
      explanation:    "because".into(),
    })
  }
}

impl SubtopicSuggester for StubModel {
  type Error = Offline;

  async fn suggest_subtopics(&self, _topic: &str, _context: &ResolvedContext) -> Result<String, Offline> {
    Ok(r#"["Dengue grave", "Signos de alarma"]"#.into())
  }
}

struct NoGlossary;

impl ContextResolver for NoGlossary {
  type Error = Offline;

  async fn resolve_context(&self, _topic: &str) -> Result<ResolvedContext, Offline> { Err(Offline) }
}

type Engine = StudyEngine<SqliteStore, StubModel, NoGlossary>;

async fn make_engine(titles: &[&str]) -> (Arc<Engine>, StubModel) {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let model = StubModel::default();
  let engine = Arc::new(StudyEngine::new(store, model.clone(), NoGlossary, EngineConfig::default()));
  let entries = titles.iter().map(|t| NewTopic::new(*t, 50)).collect();
  engine.load_syllabus(entries).await.unwrap();
  (engine, model)
}

async fn send(engine: &Arc<Engine>, method: &str, uri: &str, body: Option<Value>) -> Response {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(json) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json.to_string())),
    None => builder.body(Body::empty()),
  }
  .unwrap();
  api_router(engine.clone()).oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

// ── Mastery flow ────────────────────────────────────────────────────────────

#[tokio::test]
async fn target_then_feedback_advances_level() {
  let (engine, _) = make_engine(&["Dengue", "Asma"]).await;

  let resp = send(&engine, "GET", "/target", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json_body(resp).await;
  assert_eq!(body["status"], "ready");
  assert_eq!(body["challenge"]["topic"], "Dengue");
  assert_eq!(body["challenge"]["mode"], "MASTERY 1/3");

  let resp = send(&engine, "POST", "/feedback", Some(json!({"label": "Dengue", "rating": "easy"}))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json_body(resp).await;
  assert_eq!(body["mastery"]["mastery_level"], 1);
  assert_eq!(body["review"]["new_interval"], 2);

  let body = json_body(send(&engine, "GET", "/target", None).await).await;
  assert_eq!(body["challenge"]["mode"], "MASTERY 2/3");
}

#[tokio::test]
async fn feedback_accepts_numeric_grades() {
  let (engine, _) = make_engine(&["Dengue"]).await;
  let resp = send(&engine, "POST", "/feedback", Some(json!({"label": "Dengue", "rating": 2}))).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn bad_rating_is_400() {
  let (engine, _) = make_engine(&["Dengue"]).await;
  for rating in [json!(7), json!("meh")] {
    let resp = send(&engine, "POST", "/feedback", Some(json!({"label": "Dengue", "rating": rating}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }
}

#[tokio::test]
async fn unknown_label_is_404() {
  let (engine, _) = make_engine(&["Dengue"]).await;
  let resp = send(&engine, "POST", "/feedback", Some(json!({"label": "Nope", "rating": 3}))).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert!(json_body(resp).await["error"].as_str().unwrap().contains("Nope"));
}

#[tokio::test]
async fn generation_failure_is_503_with_retry_hint() {
  let (engine, model) = make_engine(&["Dengue"]).await;
  model.offline.store(true, Ordering::SeqCst);

  let resp = send(&engine, "GET", "/target", None).await;
  assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
  assert_eq!(resp.headers()[header::RETRY_AFTER], "5");
  assert_eq!(json_body(resp).await["retryable"], true);

  model.offline.store(false, Ordering::SeqCst);
  let resp = send(&engine, "GET", "/target", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn completed_curriculum_reports_status() {
  let (engine, _) = make_engine(&[]).await;
  let body = json_body(send(&engine, "GET", "/target", None).await).await;
  assert_eq!(body, json!({"status": "completed"}));
}

#[tokio::test]
async fn metrics_count_todays_reviews() {
  let (engine, _) = make_engine(&["Dengue", "Asma"]).await;
  send(&engine, "POST", "/feedback", Some(json!({"label": "Dengue", "rating": 3}))).await;

  let body = json_body(send(&engine, "GET", "/metrics", None).await).await;
  assert_eq!(body["done_today"], 1);
  assert_eq!(body["total_possible"], 6);
  assert_eq!(body["pending_total"], 6);
}

// ── Scheduling ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn next_then_update_progress() {
  let (engine, _) = make_engine(&["Dengue"]).await;

  let body = json_body(send(&engine, "GET", "/next", None).await).await;
  assert_eq!(body["type"], "new");
  let id = body["id"].as_i64().unwrap();

  let resp = send(&engine, "POST", &format!("/progress/{id}"), Some(json!({"rating": "good"}))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["new_interval"], 1);

  let body = json_body(send(&engine, "GET", "/next", None).await).await;
  assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn update_unknown_topic_is_404() {
  let (engine, _) = make_engine(&["Dengue"]).await;
  let resp = send(&engine, "POST", "/progress/999", Some(json!({"rating": 3}))).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roadmap_and_stats() {
  let (engine, _) = make_engine(&["Dengue", "Asma"]).await;

  let roadmap = json_body(send(&engine, "GET", "/roadmap", None).await).await;
  assert_eq!(roadmap.as_array().unwrap().len(), 2);
  assert_eq!(roadmap[0]["level"], "pending");

  let stats = json_body(send(&engine, "GET", "/stats", None).await).await;
  assert_eq!(stats["total_topics"], 2);
  assert_eq!(stats["pending_new"], 2);
}

// ── Baseline ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn baseline_lists_questions_and_seeds_progress() {
  let (engine, _) = make_engine(&["Asma"]).await;
  engine.load_syllabus(vec![NewTopic::new("Dengue", 90)]).await.unwrap();

  let body = json_body(send(&engine, "GET", "/baseline?limit=5", None).await).await;
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["title"], "Dengue");
  let id = body[0]["id"].as_i64().unwrap();

  let resp = send(&engine, "GET", &format!("/baseline/{id}/question"), None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["correct_option"], "A");

  let answers = json!({"answers": [{"topic_id": id, "correct": false}]});
  let resp = send(&engine, "POST", "/baseline", Some(answers)).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json_body(resp).await;
  assert_eq!(body["correct"], 0);
  assert_eq!(body["records"][0]["ease_factor"], 1.3);

  let body = json_body(send(&engine, "GET", "/baseline", None).await).await;
  assert_eq!(body, json!([]));

  let answers = json!({"answers": [{"topic_id": 999, "correct": true}]});
  let resp = send(&engine, "POST", "/baseline", Some(answers)).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Syllabus ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_and_list_topics() {
  let (engine, _) = make_engine(&[]).await;
  let resp = send(
    &engine,
    "POST",
    "/topics",
    Some(json!([{"title": "Dengue", "priority": 60}, {"title": "Asma"}])),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(json_body(resp).await["topics_added"], 2);

  let topics = json_body(send(&engine, "GET", "/topics", None).await).await;
  assert_eq!(topics[1]["priority"], 50);
}

#[tokio::test]
async fn blank_title_is_400() {
  let (engine, _) = make_engine(&[]).await;
  let resp = send(&engine, "POST", "/topics", Some(json!([{"title": "  "}]))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expand_appends_subtopics() {
  let (engine, _) = make_engine(&["Dengue"]).await;
  let resp = send(&engine, "POST", "/topics/Dengue/expand", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let nodes = json_body(resp).await;
  assert_eq!(nodes[0]["label"], "Dengue grave");
  assert_eq!(nodes[1]["label"], "Signos de alarma");

  let resp = send(&engine, "POST", "/topics/Nada/expand", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn journal_entry_is_created() {
  let (engine, _) = make_engine(&["Dengue"]).await;
  let body = json!({
    "topic": "Dengue",
    "question": "Signo de alarma?",
    "answer": "Dolor abdominal",
    "explanation": "Fuga plasmática",
  });
  let resp = send(&engine, "POST", "/journal", Some(body)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(json_body(resp).await["entry"]["answer"], "Dolor abdominal");

  let body = json!({"topic": "Nada", "question": "?", "answer": "", "explanation": ""});
  let resp = send(&engine, "POST", "/journal", Some(body)).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
