//! Settings endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::AppError;
use crate::types::{Settings, SettingsUpdate};
use crate::AppState;

/// Create the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route("/reset", post(reset_settings))
}

/// Get the current settings snapshot.
async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json((*state.monitor.settings().await).clone())
}

/// Apply a partial settings update; effective next cycle.
async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<Settings>, AppError> {
    let settings = state.monitor.update_settings(update).await?;
    Ok(Json((*settings).clone()))
}

/// Restore the startup settings.
async fn reset_settings(State(state): State<AppState>) -> Json<Settings> {
    Json((*state.monitor.reset_settings().await).clone())
}
