//! External market-data sources.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::PriceSeries;

/// Errors from a rate provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Format(String),

    #[error("no usable data in response")]
    Empty,
}

/// Quote provider for the traded pair.
///
/// Implementations own symbol mapping and wire formats; callers get a
/// validated series or a typed failure. When the latest price is
/// unavailable, callers fall back to the most recent close of the
/// series they already hold.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the daily OHLCV series covering the trailing lookback
    /// window.
    async fn fetch_daily_series(&self, lookback_days: u32) -> Result<PriceSeries, ProviderError>;

    /// Fetch the most recent traded rate.
    async fn fetch_latest_price(&self) -> Result<f64, ProviderError>;
}
