use axum::{extract::State, response::Json, routing::get, Form, Router};
use serde_json::{json, Value};

use nitpick_feed::{setting_metadata, SettingsUpdate, StrategyConfig};

use crate::{error::Result, state::AppState};

pub fn settings_router() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).post(update_settings))
}

async fn get_settings(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({
        "config": app_state.settings.get().await,
        "options": setting_metadata(),
    }))
}

/// Applies from the next regeneration on; already cached tweets are left alone.
async fn update_settings(
    State(app_state): State<AppState>,
    Form(update): Form<SettingsUpdate>,
) -> Result<Json<StrategyConfig>> {
    let config = app_state.settings.update(&update).await?;
    Ok(Json(config))
}
