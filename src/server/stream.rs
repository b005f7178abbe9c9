//! Live-update stream for the dashboard.
//!
//! Each connection gets its own cooperative loop: re-aggregate, emit a
//! `status` event, sleep one interval, repeat. The stream is owned by the
//! response body, so dropping the connection drops the loop with it: no
//! retained work per disconnected client.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;

use super::AppState;
use crate::status;

/// SSE endpoint: an immediate snapshot on connect, then one per interval
/// until the peer disconnects.
pub(super) async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut ticker = tokio::time::interval(state.stream_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let stream = futures::stream::unfold((ticker, state), |(mut ticker, state)| async move {
        ticker.tick().await;
        let event = snapshot_event(&state);
        Some((Ok(event), (ticker, state)))
    });

    // keep-alive comments so idle proxies don't reap the connection
    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Build one stream event. Aggregation failures (a malformed heartbeat
/// mid-rewrite) become `error` events; the connection stays up and the
/// next tick retries.
fn snapshot_event(state: &AppState) -> Event {
    match status::gather(&state.layout, &state.policy) {
        Ok(snapshot) => match Event::default().event("status").json_data(&snapshot) {
            Ok(event) => event,
            Err(e) => error_event(&e.to_string()),
        },
        Err(e) => error_event(&e.to_string()),
    }
}

fn error_event(message: &str) -> Event {
    Event::default()
        .event("error")
        .data(serde_json::json!({ "error": message }).to_string())
}
