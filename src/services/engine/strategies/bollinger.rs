//! Bollinger Bands strategy.

use crate::services::engine::moving_averages::sma;
use crate::services::engine::Strategy;
use crate::types::{
    BollingerParams, Direction, Indicator, IndicatorSignal, IndicatorValue, PriceSeries,
};

/// Bollinger Bands mean-reversion strategy.
///
/// - Middle band: SMA(period)
/// - Upper/lower bands: middle +/- multiplier * population std-dev
///
/// A touch of the lower/upper band is a strong signal; a move back
/// toward the middle after touching a band is a weak one. Zero
/// variance collapses the bands, which reads as neutral.
pub struct BollingerStrategy {
    params: BollingerParams,
}

impl BollingerStrategy {
    pub fn new(params: BollingerParams) -> Self {
        Self { params }
    }

    /// Population standard deviation of each trailing window around
    /// that window's mean.
    fn rolling_std_dev(closes: &[f64], middles: &[f64], period: usize) -> Vec<f64> {
        closes
            .windows(period)
            .zip(middles)
            .map(|(window, mean)| {
                let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                    / period as f64;
                variance.sqrt()
            })
            .collect()
    }
}

impl Strategy for BollingerStrategy {
    fn indicator(&self) -> Indicator {
        Indicator::Bollinger
    }

    fn min_bars(&self) -> usize {
        self.params.period
    }

    fn calculate(&self, series: &PriceSeries) -> Option<IndicatorSignal> {
        let p = &self.params;
        if p.period == 0 {
            return None;
        }

        let closes = series.closes();
        let middles = sma(closes, p.period);
        if middles.is_empty() {
            return None;
        }

        let std_devs = Self::rolling_std_dev(closes, &middles, p.period);

        let last = middles.len() - 1;
        let middle = middles[last];
        let upper = middle + p.std_dev_multiplier * std_devs[last];
        let lower = middle - p.std_dev_multiplier * std_devs[last];
        let price = closes[closes.len() - 1];

        let value = IndicatorValue::Text(format!("Upper: {:.5} / Lower: {:.5}", upper, lower));

        // Collapsed bands: every rule below would read the price as
        // touching both bands at once.
        if std_devs[last] == 0.0 {
            return Some(IndicatorSignal {
                indicator: Indicator::Bollinger,
                direction: Direction::Neutral,
                value: Some(value),
            });
        }

        // The weak rules compare the previous close against the
        // previous window's bands; skipped with exactly period bars.
        let previous = (middles.len() >= 2).then(|| {
            let prev = last - 1;
            (
                closes[closes.len() - 2],
                middles[prev] + p.std_dev_multiplier * std_devs[prev],
                middles[prev] - p.std_dev_multiplier * std_devs[prev],
            )
        });

        let direction = if price <= lower {
            Direction::StrongBuy
        } else if price >= upper {
            Direction::StrongSell
        } else {
            match previous {
                Some((prev_price, _, prev_lower))
                    if price < middle && prev_price <= prev_lower =>
                {
                    Direction::WeakBuy
                }
                Some((prev_price, prev_upper, _))
                    if price > middle && prev_price >= prev_upper =>
                {
                    Direction::WeakSell
                }
                _ => Direction::Neutral,
            }
        };

        Some(IndicatorSignal {
            indicator: Indicator::Bollinger,
            direction,
            value: Some(value),
        })
    }
}
