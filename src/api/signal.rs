//! Signal endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::AppError;
use crate::services::RefreshOutcome;
use crate::types::SignalSnapshot;
use crate::AppState;

/// Response for a forced refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// True when an in-flight cycle absorbed this request.
    pub coalesced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SignalSnapshot>,
}

/// Create the signal router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(latest_signal))
        .route("/history", get(signal_history))
        .route("/refresh", post(refresh_signal))
}

/// Get the most recent signal snapshot.
async fn latest_signal(State(state): State<AppState>) -> Result<Json<SignalSnapshot>, AppError> {
    state
        .monitor
        .latest()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no signal computed yet".to_string()))
}

/// Get retained snapshots, oldest first.
async fn signal_history(State(state): State<AppState>) -> Json<Vec<SignalSnapshot>> {
    Json(state.monitor.history().await)
}

/// Force a refresh cycle now.
async fn refresh_signal(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let response = match state.monitor.refresh().await? {
        RefreshOutcome::Completed(snapshot) => RefreshResponse {
            coalesced: false,
            snapshot: Some(snapshot),
        },
        RefreshOutcome::Coalesced => RefreshResponse {
            coalesced: true,
            snapshot: None,
        },
    };
    Ok(Json(response))
}
