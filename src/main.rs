use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sterling::config::Config;
use sterling::services::{RefreshOutcome, SignalMonitor};
use sterling::sources::YahooFinanceClient;
use sterling::{api, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sterling=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!(
        "Starting sterling server for {} on {}:{}",
        config.symbol, config.host, config.port
    );

    // Create the quote provider and the refresh monitor
    let provider = Arc::new(YahooFinanceClient::new(config.symbol.clone()));
    let monitor = Arc::new(SignalMonitor::new(provider, config.settings.clone()));

    // Initial refresh so the API serves a signal straight away
    if let Err(e) = monitor.refresh().await {
        warn!("Initial refresh failed: {}", e);
    }

    // Periodic refresh loop. The interval is re-read every tick so a
    // settings change takes effect on the next cycle.
    {
        let monitor = monitor.clone();
        tokio::spawn(async move {
            loop {
                let minutes = monitor.settings().await.refresh_interval_minutes;
                tokio::time::sleep(Duration::from_secs(minutes * 60)).await;

                match monitor.refresh().await {
                    Ok(RefreshOutcome::Completed(snapshot)) => debug!(
                        "Refreshed: {} at {}% strength",
                        snapshot.signal.action.label(),
                        snapshot.signal.strength
                    ),
                    Ok(RefreshOutcome::Coalesced) => debug!("Scheduled refresh coalesced"),
                    Err(e) => warn!("Scheduled refresh failed: {}", e),
                }
            }
        });
    }

    // Create application state
    let state = AppState {
        config: config.clone(),
        monitor,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Sterling server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
