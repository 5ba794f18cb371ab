//! Route tests against the full router with a scripted answerer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use api::{AppState, StatusSource, create_router, sweep_sessions};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chat_session::{Answerer, EXAMPLE_QUESTIONS, SessionRegistry};
use contextor::{EngineSettings, QueryResult};
use serde_json::{Value, json};
use tower::ServiceExt;

// =============================================================================
// Helpers
// =============================================================================

/// Answers "re: <question>" and counts calls.
#[derive(Default)]
struct Scripted {
    calls: AtomicUsize,
}

#[async_trait]
impl Answerer for Scripted {
    async fn answer(&self, question: &str) -> QueryResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        QueryResult {
            response: format!("re: {question}"),
            sources: Vec::new(),
        }
    }
}

struct FixedStatus;

#[async_trait]
impl StatusSource for FixedStatus {
    async fn index_ready(&self) -> bool {
        false
    }
    async fn last_index_error(&self) -> Option<String> {
        Some("not found: pipeline".into())
    }
    fn settings(&self) -> EngineSettings {
        EngineSettings {
            similarity_top_k: 30,
            response_mode: "tree_summarize".into(),
            model: "gpt-4".into(),
            temperature: Some(0.1),
            max_tokens: Some(3000),
            target_language: "Russian".into(),
            sources_visible: false,
        }
    }
}

fn make_app() -> (axum::Router, Arc<Scripted>) {
    let answerer = Arc::new(Scripted::default());
    let state = AppState::new(answerer.clone(), Arc::new(FixedStatus));
    (create_router(state), answerer)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn new_session(app: &axum::Router) -> String {
    let req = Request::post("/api/sessions").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["session_id"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn page_is_served() {
    let (app, _) = make_app();
    let resp = app.oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Arxiv+Llama+OpenAI Q/A assist"));
    // the status panel shows the index construction failure text
    assert!(html.contains("s.last_index_error"));
}

#[tokio::test]
async fn status_reports_settings_and_index_state() {
    let (app, _) = make_app();
    let (status, body) = send(&app, get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["credentials_loaded"], true);
    assert_eq!(body["data"]["index_ready"], false);
    assert_eq!(body["data"]["last_index_error"], "not found: pipeline");
    assert_eq!(body["data"]["settings"]["similarity_top_k"], 30);
    assert_eq!(body["data"]["settings"]["response_mode"], "tree_summarize");
    assert_eq!(body["data"]["settings"]["sources_visible"], false);
}

#[tokio::test]
async fn examples_are_listed_in_order() {
    let (app, _) = make_app();
    let (_, body) = send(&app, get("/api/examples")).await;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 6);
    assert_eq!(list[2]["index"], 2);
    assert_eq!(list[2]["question"], EXAMPLE_QUESTIONS[2]);
}

#[tokio::test]
async fn ask_appends_both_turns() {
    let (app, answerer) = make_app();
    let id = new_session(&app).await;

    let (status, body) = send(
        &app,
        post_json(&format!("/api/sessions/{id}/ask"), r#"{"question":"What is VaR?"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["answer"], json!({"role": "assistant", "content": "re: What is VaR?"}));
    assert_eq!(body["data"]["count"], 2);

    let (_, body) = send(&app, get(&format!("/api/sessions/{id}/transcript"))).await;
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["turns"][0], json!({"role": "user", "content": "What is VaR?"}));
    assert_eq!(answerer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_question_is_rejected_without_answering() {
    let (app, answerer) = make_app();
    let id = new_session(&app).await;

    let (status, body) = send(
        &app,
        post_json(&format!("/api/sessions/{id}/ask"), r#"{"question":"   "}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "EMPTY_QUESTION");
    assert_eq!(answerer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_body_is_mapped_to_envelope() {
    let (app, _) = make_app();
    let id = new_session(&app).await;

    let (status, body) = send(
        &app,
        post_json(&format!("/api/sessions/{id}/ask"), r#"{"text":"hi"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    assert_eq!(body["error"]["details"][0]["path"], "question");
}

#[tokio::test]
async fn example_trigger_matches_manual_question() {
    let (app, _) = make_app();
    let by_example = new_session(&app).await;
    let by_hand = new_session(&app).await;

    let (status, _) = send(
        &app,
        Request::post(format!("/api/sessions/{by_example}/examples/1"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    send(
        &app,
        post_json(
            &format!("/api/sessions/{by_hand}/ask"),
            &json!({ "question": EXAMPLE_QUESTIONS[1] }).to_string(),
        ),
    )
    .await;

    let (_, a) = send(&app, get(&format!("/api/sessions/{by_example}/transcript"))).await;
    let (_, b) = send(&app, get(&format!("/api/sessions/{by_hand}/transcript"))).await;
    assert_eq!(a["data"]["turns"], b["data"]["turns"]);
}

#[tokio::test]
async fn unknown_example_is_404() {
    let (app, answerer) = make_app();
    let id = new_session(&app).await;
    let (status, body) = send(
        &app,
        Request::post(format!("/api/sessions/{id}/examples/6"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "EXAMPLE_NOT_FOUND");
    assert_eq!(answerer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn clear_transcript_is_idempotent() {
    let (app, _) = make_app();
    let id = new_session(&app).await;
    let uri = format!("/api/sessions/{id}/transcript");

    let (status, _) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);

    send(&app, post_json(&format!("/api/sessions/{id}/ask"), r#"{"question":"q"}"#)).await;
    send(&app, delete(&uri)).await;
    let (_, body) = send(&app, delete(&uri)).await;
    assert_eq!(body["data"]["count"], 0);

    let (_, body) = send(&app, get(&uri)).await;
    assert_eq!(body["data"]["turns"], json!([]));
}

#[tokio::test]
async fn unknown_or_closed_session_is_404() {
    let (app, _) = make_app();

    let (status, body) = send(&app, get("/api/sessions/not-a-uuid/transcript")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "SESSION_NOT_FOUND");

    let id = new_session(&app).await;
    let (status, body) = send(&app, delete(&format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["closed"], true);

    let (status, body) = send(
        &app,
        post_json(&format!("/api/sessions/{id}/ask"), r#"{"question":"q"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn background_sweep_expires_abandoned_sessions() {
    let sessions = Arc::new(SessionRegistry::with_idle_ttl(Duration::from_millis(50)));
    let abandoned = sessions.create().await;

    let sweeper = tokio::spawn(sweep_sessions(sessions.clone(), Duration::from_millis(20)));
    tokio::time::sleep(Duration::from_millis(400)).await;
    sweeper.abort();

    assert!(sessions.get(abandoned).await.is_none());
    assert!(sessions.is_empty().await);
}
