//! RSI (Relative Strength Index) strategy.

use crate::services::engine::Strategy;
use crate::types::{
    Direction, Indicator, IndicatorSignal, IndicatorValue, PriceSeries, RsiParams,
};

/// Average-loss substitute when the window has no losses at all.
const ZERO_LOSS_EPSILON: f64 = 0.001;

/// RSI oversold/overbought strategy.
///
/// Wilder-smoothed momentum oscillator in [0, 100]:
/// - below the oversold threshold: buy
/// - above the overbought threshold: sell
pub struct RsiStrategy {
    params: RsiParams,
}

impl RsiStrategy {
    pub fn new(params: RsiParams) -> Self {
        Self { params }
    }

    /// Latest RSI value, or None when the series is too short.
    fn relative_strength_index(closes: &[f64], period: usize) -> Option<f64> {
        if period == 0 || closes.len() < period + 1 {
            return None;
        }

        let mut gains = Vec::with_capacity(closes.len() - 1);
        let mut losses = Vec::with_capacity(closes.len() - 1);
        for pair in closes.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        // Seed with arithmetic means, then apply Wilder's smoothing
        // to the remaining changes.
        let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
        let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

        for i in period..gains.len() {
            avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        }

        let denominator = if avg_loss == 0.0 {
            ZERO_LOSS_EPSILON
        } else {
            avg_loss
        };
        let rs = avg_gain / denominator;

        Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
    }
}

impl Strategy for RsiStrategy {
    fn indicator(&self) -> Indicator {
        Indicator::Rsi
    }

    fn min_bars(&self) -> usize {
        self.params.period + 1
    }

    fn calculate(&self, series: &PriceSeries) -> Option<IndicatorSignal> {
        let rsi = Self::relative_strength_index(series.closes(), self.params.period)?;

        let direction = if rsi < self.params.oversold {
            Direction::StrongBuy
        } else if rsi > self.params.overbought {
            Direction::StrongSell
        } else {
            Direction::Neutral
        };

        Some(IndicatorSignal {
            indicator: Indicator::Rsi,
            direction,
            value: Some(IndicatorValue::Number(rsi)),
        })
    }
}
