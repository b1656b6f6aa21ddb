use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Json, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde_json::{json, Value};

use nitpick_util::normalize_username;

use crate::{payload::RefererForm, state::AppState, util::redirect_back};

pub fn following_router() -> Router<AppState> {
    Router::new()
        .route("/following", get(get_following))
        .route("/follow/:username", post(follow))
        .route("/unfollow/:username", post(unfollow))
}

async fn get_following(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({ "following": app_state.registry.list().await }))
}

async fn follow(
    State(app_state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    form: Option<Form<RefererForm>>,
) -> Redirect {
    match normalize_username(&username) {
        Some(username) => {
            app_state.registry.follow(&username).await;
        }
        None => tracing::debug!("Ignored follow of invalid username {:?}", username),
    }
    redirect_back(&headers, form)
}

async fn unfollow(
    State(app_state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    form: Option<Form<RefererForm>>,
) -> Redirect {
    if let Some(username) = normalize_username(&username) {
        app_state.registry.unfollow(&username).await;
    }
    redirect_back(&headers, form)
}

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::router::{app, test_util::*};

    #[tokio::test]
    async fn test_follow_unfollow() {
        let app = app(state());
        send(&app, Method::POST, "/follow/@Jack", None).await;
        send(&app, Method::POST, "/follow/jack", None).await;
        send(&app, Method::POST, "/follow/nim_lang", None).await;
        assert_eq!(get_json(&app, "/following").await, json!({ "following": ["jack", "nim_lang"] }));

        send(&app, Method::POST, "/unfollow/nobody", None).await;
        send(&app, Method::POST, "/unfollow/jack", None).await;
        assert_eq!(get_json(&app, "/following").await, json!({ "following": ["nim_lang"] }));
    }

    #[tokio::test]
    async fn test_follow_redirects_to_referer() {
        let app = app(state());
        let (status, location, _) = send(&app, Method::POST, "/follow/jack", Some("referer=%2Fjack")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location.as_deref(), Some("/jack"));
    }
}
