pub mod health;
pub mod settings;
pub mod signal;

use axum::Router;

use crate::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/signal", signal::router())
        .nest("/api/settings", settings::router())
}
