//! HTTP front door for the match server
//!
//! `POST /` with a JSON position, or `GET /?json=...`, answers `[x,y]` or
//! `PASS` as plain text. `GET /?board=...` takes the bare board object the
//! match server puts in its query string. Without a position the service returns a small HTML
//! form for pasting one by hand.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::engine::AIEngine;
use crate::error::PositionError;
use crate::protocol::{decode_board, decode_position, reply_text};
use crate::state::GameState;

const DEBUG_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><title>Othello engine</title></head>
<body>
<p>Paste a position to see the engine's reply.</p>
<form action="/" method="get">
<textarea name="json" rows="12" cols="80">{"board":{"Pieces":[[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0],[0,0,0,2,1,0,0,0],[0,0,0,1,2,0,0,0],[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0]],"Next":1}}</textarea>
<br>
<input type="submit" value="Move">
</form>
</body>
</html>
"#;

#[derive(Clone)]
struct AppState {
    engine: Arc<AIEngine>,
}

#[derive(Debug, Deserialize)]
struct DebugQuery {
    json: Option<String>,
    board: Option<String>,
}

/// Routes of the move service.
pub fn router(engine: AIEngine) -> Router {
    let state = AppState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/", get(query_move).post(post_move))
        .with_state(state)
}

async fn query_move(State(state): State<AppState>, Query(query): Query<DebugQuery>) -> Response {
    let non_empty = |text: Option<String>| text.filter(|t| !t.trim().is_empty());
    let position = match (non_empty(query.json), non_empty(query.board)) {
        (Some(body), _) => decode_position(&body),
        (None, Some(board)) => decode_board(&board),
        (None, None) => return Html(DEBUG_FORM).into_response(),
    };
    decide(state, position).await.into_response()
}

async fn post_move(State(state): State<AppState>, body: String) -> Response {
    if body.trim().is_empty() {
        return Html(DEBUG_FORM).into_response();
    }
    decide(state, decode_position(&body)).await.into_response()
}

async fn decide(
    state: AppState,
    position: Result<GameState, PositionError>,
) -> Result<String, (StatusCode, String)> {
    let received = Instant::now();

    let position = position.map_err(|e| {
        warn!(error = %e, "rejected position");
        (StatusCode::BAD_REQUEST, format!("invalid position: {e}\n"))
    })?;

    let engine = Arc::clone(&state.engine);
    let deadline = received + Duration::from_millis(engine.config().time_limit_ms);

    // The search is CPU bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || {
        engine.decide(&position, position.next(), deadline)
    })
    .await
    .map_err(|e| {
        warn!(error = %e, "search task failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "search failed\n".to_string())
    })?
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}\n")))?;

    let reply = reply_text(result.decision);
    info!(
        reply = %reply,
        search = ?result.search_type,
        depth = result.depth,
        elapsed_ms = received.elapsed().as_millis() as u64,
        "request served"
    );
    Ok(reply)
}
