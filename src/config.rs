use std::env;

use crate::types::{FusionMode, Settings, StrategyParams};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Yahoo Finance symbol for the traded pair.
    pub symbol: String,
    /// Initial runtime settings; adjustable afterwards through the
    /// settings API.
    pub settings: Settings,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        let symbol = env::var("SYMBOL").unwrap_or_else(|_| "GBPUSD=X".to_string());

        let defaults = Settings::default();
        let settings = Settings {
            refresh_interval_minutes: env::var("REFRESH_INTERVAL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v >= 1)
                .unwrap_or(defaults.refresh_interval_minutes),
            notifications_enabled: env::var("NOTIFICATIONS_ENABLED")
                .ok()
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.notifications_enabled),
            signal_strength_threshold: env::var("SIGNAL_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v <= 100)
                .unwrap_or(defaults.signal_strength_threshold),
            fusion_mode: env::var("FUSION_MODE")
                .ok()
                .as_deref()
                .and_then(FusionMode::from_str)
                .unwrap_or(defaults.fusion_mode),
            lookback_days: env::var("LOOKBACK_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v >= 1)
                .unwrap_or(defaults.lookback_days),
            indicators: StrategyParams::default(),
        };

        Self {
            host,
            port,
            symbol,
            settings,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
