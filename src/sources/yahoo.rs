//! Yahoo Finance client for forex quotes.
//!
//! Daily OHLC history and the latest traded rate for a currency pair
//! via the unofficial chart API (no key, no rate limits).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ProviderError, RateProvider};
use crate::types::{DailyBar, PriceSeries};

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct ChartMeta {
    symbol: String,
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Yahoo Finance API client bound to one symbol.
pub struct YahooFinanceClient {
    client: Client,
    symbol: String,
}

impl YahooFinanceClient {
    /// Create a client for a symbol (e.g. "GBPUSD=X").
    pub fn new(symbol: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            symbol: symbol.into(),
        }
    }

    async fn fetch_chart(&self, query: &str) -> Result<ChartResult, ProviderError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?{}",
            self.symbol, query
        );

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Format(format!(
                "API error: {}",
                response.status()
            )));
        }

        let data: ChartResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Format(format!("decode error: {}", e)))?;

        if let Some(error) = data.chart.error {
            return Err(ProviderError::Format(format!(
                "Yahoo API error: {} - {}",
                error.code, error.description
            )));
        }

        data.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::Format("empty results array".to_string()))
    }

    /// Assemble daily bars from a chart result.
    ///
    /// Null entries and non-positive closes are skipped; when the API
    /// repeats a calendar day (the live bar), the later entry wins so
    /// the series invariant holds.
    fn bars_from_result(result: ChartResult) -> Result<Vec<DailyBar>, ProviderError> {
        let timestamps = result
            .timestamp
            .ok_or_else(|| ProviderError::Format("no timestamps in response".to_string()))?;

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Format("no quote data in response".to_string()))?;

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        let mut bars: Vec<DailyBar> = Vec::with_capacity(timestamps.len());
        for (i, &timestamp) in timestamps.iter().enumerate() {
            let Some(close) = closes.get(i).and_then(|v| *v) else {
                continue;
            };
            if close <= 0.0 {
                continue;
            }
            let Some(date) = DateTime::<Utc>::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
            else {
                continue;
            };

            let bar = DailyBar {
                date,
                open: opens.get(i).and_then(|v| *v).unwrap_or(close),
                high: highs.get(i).and_then(|v| *v).unwrap_or(close),
                low: lows.get(i).and_then(|v| *v).unwrap_or(close),
                close,
                volume: volumes.get(i).and_then(|v| *v).unwrap_or(0) as f64,
            };

            match bars.last_mut() {
                Some(last) if last.date == date => *last = bar,
                _ => bars.push(bar),
            }
        }

        if bars.is_empty() {
            return Err(ProviderError::Empty);
        }

        Ok(bars)
    }
}

#[async_trait]
impl RateProvider for YahooFinanceClient {
    async fn fetch_daily_series(&self, lookback_days: u32) -> Result<PriceSeries, ProviderError> {
        let end = Utc::now().timestamp();
        let start = end - i64::from(lookback_days) * 86_400;
        let query = format!("period1={}&period2={}&interval=1d", start, end);

        let result = self.fetch_chart(&query).await?;
        let bars = Self::bars_from_result(result)?;

        debug!("Loaded {} days of history for {}", bars.len(), self.symbol);

        PriceSeries::new(bars).map_err(|e| ProviderError::Format(e.to_string()))
    }

    async fn fetch_latest_price(&self) -> Result<f64, ProviderError> {
        let result = self.fetch_chart("interval=1d&range=1d").await?;
        result
            .meta
            .regular_market_price
            .ok_or(ProviderError::Empty)
    }
}
