//! MACD (Moving Average Convergence Divergence) strategy.

use crate::services::engine::moving_averages::ema;
use crate::services::engine::Strategy;
use crate::types::{
    Direction, Indicator, IndicatorSignal, IndicatorValue, MacdParams, PriceSeries,
};

/// MACD crossover strategy.
///
/// - MACD line = EMA(fast) - EMA(slow), index-aligned
/// - Signal line = EMA(MACD line, signal period)
/// - Histogram = MACD line - signal line
///
/// A cross of the MACD line through the signal line is a strong
/// signal; a histogram sign flip without a cross is a weak one.
pub struct MacdStrategy {
    params: MacdParams,
}

impl MacdStrategy {
    pub fn new(params: MacdParams) -> Self {
        Self { params }
    }
}

impl Strategy for MacdStrategy {
    fn indicator(&self) -> Indicator {
        Indicator::Macd
    }

    fn min_bars(&self) -> usize {
        // Enough for a signal line with a previous point.
        self.params.slow_period + self.params.signal_period
    }

    fn calculate(&self, series: &PriceSeries) -> Option<IndicatorSignal> {
        let p = &self.params;
        if p.fast_period == 0 || p.signal_period == 0 || p.slow_period <= p.fast_period {
            return None;
        }

        let closes = series.closes();
        if closes.len() < self.min_bars() {
            return None;
        }

        let fast_ema = ema(closes, p.fast_period);
        let slow_ema = ema(closes, p.slow_period);

        // The fast EMA starts slow_period - fast_period elements
        // earlier; skip them so both operands share calendar indices.
        let offset = p.slow_period - p.fast_period;
        let macd_line: Vec<f64> = fast_ema
            .iter()
            .skip(offset)
            .zip(slow_ema.iter())
            .map(|(fast, slow)| fast - slow)
            .collect();

        if macd_line.len() < p.signal_period {
            return None;
        }

        let signal_line = ema(&macd_line, p.signal_period);
        if signal_line.len() < 2 {
            return None;
        }

        // Histogram indexed against the signal line's shorter tail.
        let shift = macd_line.len() - signal_line.len();
        let histogram: Vec<f64> = signal_line
            .iter()
            .enumerate()
            .map(|(i, signal)| macd_line[i + shift] - signal)
            .collect();

        let macd = macd_line[macd_line.len() - 1];
        let signal = signal_line[signal_line.len() - 1];
        let prev_macd = macd_line[macd_line.len() - 2];
        let prev_signal = signal_line[signal_line.len() - 2];
        let hist = histogram[histogram.len() - 1];
        let prev_hist = histogram[histogram.len() - 2];

        // First matching rule wins.
        let direction = if macd > signal && prev_macd <= prev_signal {
            Direction::StrongBuy
        } else if macd < signal && prev_macd >= prev_signal {
            Direction::StrongSell
        } else if hist > 0.0 && prev_hist < 0.0 {
            Direction::WeakBuy
        } else if hist < 0.0 && prev_hist > 0.0 {
            Direction::WeakSell
        } else {
            Direction::Neutral
        };

        Some(IndicatorSignal {
            indicator: Indicator::Macd,
            direction,
            value: Some(IndicatorValue::Text(format!("{:.5} / {:.5}", macd, signal))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::engine::testutil::series_from_closes;

    /// Flat series with a single upward jump at `jump_index`, long
    /// enough that every prefix in the assertions is defined.
    fn flat_then_jump(len: usize, jump_index: usize) -> Vec<f64> {
        (0..len)
            .map(|i| if i < jump_index { 100.0 } else { 105.0 })
            .collect()
    }

    #[test]
    fn test_macd_requires_enough_bars() {
        let strategy = MacdStrategy::new(MacdParams::default());
        assert_eq!(strategy.min_bars(), 35);

        let series = series_from_closes(&vec![1.25; 34]);
        assert!(strategy.calculate(&series).is_none());
    }

    #[test]
    fn test_macd_neutral_on_flat_series() {
        let strategy = MacdStrategy::new(MacdParams::default());
        let series = series_from_closes(&vec![100.0; 50]);
        let signal = strategy.calculate(&series).unwrap();
        assert_eq!(signal.direction, Direction::Neutral);
    }

    #[test]
    fn test_macd_cross_fires_exactly_at_jump_index() {
        let strategy = MacdStrategy::new(MacdParams::default());
        let closes = flat_then_jump(60, 50);

        // One bar before the jump: flat history, no cross.
        let before = strategy
            .calculate(&series_from_closes(&closes[..50]))
            .unwrap();
        assert_eq!(before.direction, Direction::Neutral);

        // The bar of the jump: MACD line leaves zero while the
        // signal line lags, crossing from prev equality.
        let at = strategy
            .calculate(&series_from_closes(&closes[..51]))
            .unwrap();
        assert_eq!(at.direction, Direction::StrongBuy);

        // One bar after: both lines positive, no fresh cross and no
        // histogram sign change.
        let after = strategy
            .calculate(&series_from_closes(&closes[..52]))
            .unwrap();
        assert_eq!(after.direction, Direction::Neutral);
    }

    #[test]
    fn test_macd_cross_below_on_drop() {
        let strategy = MacdStrategy::new(MacdParams::default());
        let closes: Vec<f64> = (0..51)
            .map(|i| if i < 50 { 100.0 } else { 95.0 })
            .collect();
        let signal = strategy.calculate(&series_from_closes(&closes)).unwrap();
        assert_eq!(signal.direction, Direction::StrongSell);
    }

    #[test]
    fn test_macd_value_reports_both_lines() {
        let strategy = MacdStrategy::new(MacdParams::default());
        let series = series_from_closes(&vec![100.0; 50]);
        let signal = strategy.calculate(&series).unwrap();

        let Some(IndicatorValue::Text(value)) = signal.value else {
            panic!("expected formatted MACD value");
        };
        assert_eq!(value, "0.00000 / 0.00000");
    }

    #[test]
    fn test_macd_rejects_degenerate_periods() {
        let strategy = MacdStrategy::new(MacdParams {
            fast_period: 26,
            slow_period: 12,
            signal_period: 9,
        });
        let series = series_from_closes(&vec![100.0; 60]);
        assert!(strategy.calculate(&series).is_none());
    }
}
