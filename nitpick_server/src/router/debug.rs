// Introspection endpoints for tests and operations.
// None of these ever trigger a regeneration.

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn debug_router() -> Router<AppState> {
    Router::new()
        .route("/.feed", get(peek_feed))
        .route("/.feed/clear", get(clear_feed).post(clear_feed))
        .route("/.following/clear", get(clear_following).post(clear_following))
}

async fn peek_feed(State(app_state): State<AppState>) -> Json<Value> {
    let snapshot = app_state.feed_cache.peek().await;
    if snapshot.is_empty() {
        return Json(json!({}));
    }
    Json(json!(snapshot))
}

async fn clear_feed(State(app_state): State<AppState>) -> Json<Value> {
    app_state.feed_cache.clear().await;
    Json(json!({}))
}

async fn clear_following(State(app_state): State<AppState>) -> Json<Value> {
    app_state.registry.clear().await;
    Json(json!({ "following": [] }))
}
