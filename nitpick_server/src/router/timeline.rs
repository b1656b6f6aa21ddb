use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use nitpick_feed::FeedView;

use crate::{error::Result, payload::TimelineParams, state::AppState};

pub fn timeline_router() -> Router<AppState> {
    Router::new().route("/", get(home_timeline))
}

/// Home page: regenerate the shared feed if stale, then serve its ranked view.
async fn home_timeline(
    State(app_state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Result<Json<FeedView>> {
    if params.force {
        app_state.feed_cache.regenerate().await?;
    } else {
        app_state.feed_cache.ensure_fresh().await?;
    }
    Ok(Json(app_state.feed_cache.timeline().await))
}

#[cfg(test)]
mod test {
    use crate::router::{app, test_util::*};

    #[tokio::test]
    async fn test_home_regenerates_once() {
        let state = state();
        state.registry.follow("jack").await;
        let app = app(state.clone());

        let first = get_json(&app, "/").await;
        assert_eq!(first["tweets"][0]["username"], "jack");
        assert_eq!(first["sampledUsers"][0], "jack");

        // A newly followed user waits for the next cycle.
        state.registry.follow("biz").await;
        let second = get_json(&app, "/").await;
        assert_eq!(first, second);

        let forced = get_json(&app, "/?force=true").await;
        assert_eq!(forced["tweets"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_home_with_no_follows() {
        let app = app(state());
        let body = get_json(&app, "/").await;
        assert_eq!(body["tweets"].as_array().unwrap().len(), 0);
    }
}
