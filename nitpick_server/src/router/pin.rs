use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Json, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde_json::{json, Value};

use nitpick_core::TweetId;

use crate::{payload::RefererForm, state::AppState, util::redirect_back};

pub fn pin_router() -> Router<AppState> {
    Router::new()
        .route("/pinned", get(get_pinned))
        .route("/pin/:id", post(pin))
        .route("/unpin/:id", post(unpin))
}

async fn get_pinned(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({ "pinned": app_state.pins.list().await }))
}

// The store is updated before the redirect is built, so the next page load sees it.
async fn pin(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    form: Option<Form<RefererForm>>,
) -> Redirect {
    app_state.pins.pin(&TweetId::new(id)).await;
    redirect_back(&headers, form)
}

async fn unpin(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    form: Option<Form<RefererForm>>,
) -> Redirect {
    app_state.pins.unpin(&TweetId::new(id)).await;
    redirect_back(&headers, form)
}

#[cfg(test)]
mod test {
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::router::{app, test_util::*};

    #[tokio::test]
    async fn test_pin_unpin_flow() {
        let app = app(state());
        let (status, location, _) = send(&app, Method::POST, "/pin/20", Some("referer=%2Fjack%2Fstatus%2F20")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/jack/status/20"));

        let pinned = get_json(&app, "/pinned").await;
        assert_eq!(pinned["pinned"][0]["tweetId"], "20");
        assert!(pinned["pinned"][0]["pinnedAt"].is_string());

        send(&app, Method::POST, "/pin/20", None).await;
        assert_eq!(get_json(&app, "/pinned").await["pinned"].as_array().unwrap().len(), 1);

        send(&app, Method::POST, "/unpin/20", Some("referer=%2Fpinned")).await;
        assert!(get_json(&app, "/pinned").await["pinned"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unpin_unknown_redirects() {
        let app = app(state());
        let (status, location, _) = send(&app, Method::POST, "/unpin/404", None).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_referer_header_fallback() {
        let app = app(state());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/pin/20")
            .header(header::REFERER, "http://localhost:8080/jack?page=2")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/jack?page=2");
    }

    #[tokio::test]
    async fn test_offsite_referer_is_dropped() {
        let app = app(state());
        let (_, location, _) = send(&app, Method::POST, "/pin/20", Some("referer=%2F%2Fevil.example")).await;
        assert_eq!(location.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_absolute_referer_with_offsite_path_is_dropped() {
        let app = app(state());
        let (_, location, _) = send(
            &app,
            Method::POST,
            "/pin/20",
            Some("referer=http%3A%2F%2Flocalhost%3A8080%2F%2Fevil.example%2Fx"),
        )
        .await;
        assert_eq!(location.as_deref(), Some("/"));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/unpin/20")
            .header(header::REFERER, "http://localhost:8080//evil.example/x")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/");
    }
}
