//! Request handlers for the status API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::state::{self, DEFAULT_LOG_LINES};
use crate::status;

type ErrorResponse = (StatusCode, Json<serde_json::Value>);

/// Convert a reader failure into a JSON error response.
///
/// Only malformed structured documents (heartbeat, escalation) reach
/// this: absence and partial records degrade inside the readers.
fn internal_error(e: crate::Error) -> ErrorResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

/// Serve the dashboard page.
pub(super) async fn serve_index() -> impl IntoResponse {
    Html(include_str!("index.html"))
}

/// Full status snapshot.
pub(super) async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ErrorResponse> {
    let snapshot = status::gather(&state.layout, &state.policy).map_err(internal_error)?;
    Ok(Json(serde_json::to_value(snapshot).map_err(|e| internal_error(e.into()))?))
}

pub(super) async fn get_rigs(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "rigs": state::get_rigs(&state.layout) }))
}

pub(super) async fn get_polecats(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "polecats": state::get_polecats(&state.layout) }))
}

pub(super) async fn get_dogs(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "dogs": state::get_dogs(&state.layout) }))
}

pub(super) async fn get_crew(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "crew": state::get_crew(&state.layout) }))
}

pub(super) async fn get_merge_queue(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "merge_queue": state::get_merge_queue(&state.layout) }))
}

/// Query string for `/api/log`.
#[derive(Deserialize)]
pub(super) struct LogQuery {
    lines: Option<String>,
}

/// Log tail. `lines` must be a positive integer; absent or unparseable
/// values fall back to the default, zero or negative yields an empty
/// list.
pub(super) async fn get_log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Json<serde_json::Value> {
    let lines = match query.lines.as_deref() {
        None => DEFAULT_LOG_LINES,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n <= 0 => 0,
            Ok(n) => n as usize,
            Err(_) => DEFAULT_LOG_LINES,
        },
    };
    Json(json!({ "log": state::tail_log(&state.layout.log_file(), lines) }))
}

pub(super) async fn get_agents(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ErrorResponse> {
    let agents = state::get_agents(&state.layout, &state.policy).map_err(internal_error)?;
    Ok(Json(json!({ "agents": agents })))
}

pub(super) async fn get_molecules(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "molecules": state::get_molecules(&state.layout) }))
}

/// Escalation policy, with JSON `null` as the explicit "no policy"
/// indicator.
pub(super) async fn get_escalation(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ErrorResponse> {
    let policy = state::get_escalation(&state.layout).map_err(internal_error)?;
    Ok(Json(json!({ "escalation": policy })))
}

/// JSON 404 for unknown routes.
pub(super) async fn not_found() -> ErrorResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
