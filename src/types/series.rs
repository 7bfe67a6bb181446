//! Daily OHLCV price series for the traded pair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Errors from series construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("bars out of order: {previous} followed by {current}")]
    OutOfOrder {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("duplicate bar for {0}")]
    DuplicateDate(NaiveDate),
}

/// Immutable, strictly date-ordered daily series.
///
/// Built once per refresh cycle and replaced wholesale. The close
/// vector is extracted up front since it is the primary analytical
/// input for every indicator. A series shorter than an indicator's
/// lookback is valid; that indicator degrades to neutral.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<DailyBar>,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Validate and wrap a bar sequence.
    ///
    /// Bars must be strictly increasing by date, one per trading day.
    pub fn new(bars: Vec<DailyBar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(SeriesError::DuplicateDate(pair[1].date));
            }
            if pair[1].date < pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }

        let closes = bars.iter().map(|b| b.close).collect();
        Ok(Self { bars, closes })
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// Close prices in date order.
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close of the most recent bar, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}
