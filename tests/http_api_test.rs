//! Integration tests for the HTTP API.
//!
//! Each test binds the router to an ephemeral port against an isolated
//! state root and exercises it with a real client.

mod common;

use std::time::Duration;

use common::TestRoot;
use futures::StreamExt;
use wheelhouse::server::{router, AppState};
use wheelhouse::state::LivenessPolicy;

/// Serve an isolated state root on an ephemeral port, returning the base
/// URL. The server task is dropped with the tokio runtime at test end.
async fn spawn_server(root: &TestRoot) -> String {
    let state = AppState::new(
        root.layout(),
        LivenessPolicy::default(),
        Duration::from_millis(100),
    );
    let app = router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn get_json(url: &str) -> (reqwest::StatusCode, serde_json::Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status();
    assert_eq!(
        resp.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_dashboard_html() {
    let root = TestRoot::new();
    let base = spawn_server(&root).await;

    let resp = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let content_type = resp.headers()[reqwest::header::CONTENT_TYPE].clone();
    let body = resp.text().await.unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    assert!(body.contains("Wheelhouse Control Panel"));
    assert!(body.contains("EventSource"));
    assert!(body.contains("/api/events"));
}

#[tokio::test]
async fn test_api_status() {
    let root = TestRoot::new();
    root.write_rig("test-rig", "https://github.com/test/repo");
    root.write_log("[2026-01-01] test log\n");
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/status", base)).await;
    assert_eq!(status, 200);
    assert!(data["timestamp"].is_string());
    assert_eq!(data["rigs"].as_array().unwrap().len(), 1);
    assert_eq!(data["rigs"][0]["name"], "test-rig");
    assert_eq!(data["rigs"][0]["owner_repo"], "test/repo");
    assert!(data["agents"]["daemon"]["running"].is_boolean());
}

#[tokio::test]
async fn test_api_rigs() {
    let root = TestRoot::new();
    root.write_rig("test-rig", "https://github.com/test/repo");
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/rigs", base)).await;
    assert_eq!(status, 200);
    assert_eq!(data["rigs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_api_polecats_empty_list() {
    let root = TestRoot::new();
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/polecats", base)).await;
    assert_eq!(status, 200);
    assert!(data["polecats"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_entity_endpoints_shapes() {
    let root = TestRoot::new();
    root.write_dog("dog-1", "RIG=myapp\nSTATUS=patrolling\n");
    root.write_crew("alice", "ROLE=reviewer\n");
    root.write_merge_entry("entry1", "PR=42\n");
    let base = spawn_server(&root).await;

    let (_, dogs) = get_json(&format!("{}/api/dogs", base)).await;
    assert_eq!(dogs["dogs"][0]["STATUS"], "patrolling");

    let (_, crew) = get_json(&format!("{}/api/crew", base)).await;
    assert_eq!(crew["crew"][0]["ROLE"], "reviewer");

    let (_, queue) = get_json(&format!("{}/api/merge-queue", base)).await;
    assert_eq!(queue["merge_queue"][0]["PR"], "42");
}

#[tokio::test]
async fn test_api_log_with_lines() {
    let root = TestRoot::new();
    root.write_log("[2026-01-01] test log\n");
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/log?lines=10", base)).await;
    assert_eq!(status, 200);
    let log = data["log"].as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], "[2026-01-01] test log");
}

#[tokio::test]
async fn test_api_log_query_fallbacks() {
    let root = TestRoot::new();
    root.write_log("a\nb\nc\n");
    let base = spawn_server(&root).await;

    // non-numeric falls back to the default
    let (_, data) = get_json(&format!("{}/api/log?lines=abc", base)).await;
    assert_eq!(data["log"].as_array().unwrap().len(), 3);

    // zero means zero lines, not an error
    let (status, data) = get_json(&format!("{}/api/log?lines=0", base)).await;
    assert_eq!(status, 200);
    assert!(data["log"].as_array().unwrap().is_empty());

    // absent falls back to the default
    let (_, data) = get_json(&format!("{}/api/log", base)).await;
    assert_eq!(data["log"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_api_agents() {
    let root = TestRoot::new();
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/agents", base)).await;
    assert_eq!(status, 200);
    assert_eq!(data["agents"]["daemon"]["running"], false);
    assert_eq!(data["agents"]["deacon"]["running"], false);
}

#[tokio::test]
async fn test_api_agents_malformed_heartbeat_is_500() {
    let root = TestRoot::new();
    root.write_heartbeat("{definitely not json");
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/agents", base)).await;
    assert_eq!(status, 500);
    assert!(data["error"].is_string());

    // entity endpoints are unaffected by the bad document
    let (status, _) = get_json(&format!("{}/api/rigs", base)).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_api_molecules() {
    let root = TestRoot::new();
    root.write_molecule("feature.yml", "name: feature\n");
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/molecules", base)).await;
    assert_eq!(status, 200);
    assert_eq!(data["molecules"][0]["name"], "feature");
}

#[tokio::test]
async fn test_api_escalation_present_and_absent() {
    let root = TestRoot::new();
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/escalation", base)).await;
    assert_eq!(status, 200);
    assert!(data["escalation"].is_null());

    root.write_escalation(r#"{"levels": {"critical": {"timeout_minutes": 15}}}"#);
    let (_, data) = get_json(&format!("{}/api/escalation", base)).await;
    assert_eq!(data["escalation"]["levels"]["critical"]["timeout_minutes"], 15);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let root = TestRoot::new();
    let base = spawn_server(&root).await;

    let (status, data) = get_json(&format!("{}/api/nope", base)).await;
    assert_eq!(status, 404);
    assert_eq!(data["error"], "not found");
}

#[tokio::test]
async fn test_event_stream_pushes_snapshot() {
    let root = TestRoot::new();
    root.write_rig("test-rig", "https://github.com/test/repo");
    let base = spawn_server(&root).await;

    let resp = reqwest::get(format!("{}/api/events", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()[reqwest::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    // the first status event arrives immediately on connect
    let mut stream = resp.bytes_stream();
    let mut buf = String::new();
    let deadline = tokio::time::Duration::from_secs(5);
    tokio::time::timeout(deadline, async {
        while let Some(chunk) = stream.next().await {
            buf.push_str(&String::from_utf8_lossy(&chunk.unwrap()));
            if buf.contains("event: status") && buf.contains("\n\n") {
                break;
            }
        }
    })
    .await
    .expect("no status event within deadline");

    let data_line = buf
        .lines()
        .find(|line| line.starts_with("data: "))
        .expect("status event carries a data line");
    let snapshot: serde_json::Value =
        serde_json::from_str(data_line.trim_start_matches("data: ")).unwrap();
    assert_eq!(snapshot["rigs"][0]["name"], "test-rig");
}
