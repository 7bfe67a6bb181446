//! Sterling - GBP/USD trading signal server
//!
//! Four technical indicator strategies over a daily price series,
//! fused into one recommendation with a confidence strength. The
//! engine itself is a pure library; the server around it refreshes
//! quotes on a timer and serves the result over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use config::Config;
use services::SignalMonitor;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub monitor: Arc<SignalMonitor>,
}

// Re-export commonly used items
pub use services::{compute_signal, RefreshOutcome};
pub use types::*;
