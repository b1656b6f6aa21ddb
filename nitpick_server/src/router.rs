pub mod debug;
pub mod following;
pub mod pin;
pub mod settings;
pub mod timeline;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .merge(timeline::timeline_router())
        .merge(debug::debug_router())
        .merge(following::following_router())
        .merge(pin::pin_router())
        .merge(settings::settings_router())
        .layer(TraceLayer::new_for_http().on_request(()))
        .with_state(app_state)
}
