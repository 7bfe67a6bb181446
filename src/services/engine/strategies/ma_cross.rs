//! Moving-average crossover strategy.

use crate::services::engine::moving_averages::sma;
use crate::services::engine::Strategy;
use crate::types::{
    Direction, Indicator, IndicatorSignal, IndicatorValue, MaCrossParams, PriceSeries,
};

/// Golden/death cross strategy over two simple moving averages.
///
/// A fresh cross of the short average through the long one is a
/// strong signal; an established trend (short already above or below
/// long) is a weak one.
pub struct MaCrossStrategy {
    params: MaCrossParams,
}

impl MaCrossStrategy {
    pub fn new(params: MaCrossParams) -> Self {
        Self { params }
    }
}

impl Strategy for MaCrossStrategy {
    fn indicator(&self) -> Indicator {
        Indicator::MaCross
    }

    fn min_bars(&self) -> usize {
        self.params.long_period
    }

    fn calculate(&self, series: &PriceSeries) -> Option<IndicatorSignal> {
        let p = &self.params;
        if p.short_period == 0 || p.short_period >= p.long_period {
            return None;
        }

        let closes = series.closes();
        let short = sma(closes, p.short_period);
        let long = sma(closes, p.long_period);
        if long.is_empty() {
            return None;
        }

        let current_short = short[short.len() - 1];
        let current_long = long[long.len() - 1];

        // Cross detection needs a previous pair; with exactly
        // long_period bars only the trend rules apply.
        let previous = (long.len() >= 2).then(|| (short[short.len() - 2], long[long.len() - 2]));

        let direction = match previous {
            Some((prev_short, prev_long))
                if current_short > current_long && prev_short <= prev_long =>
            {
                Direction::StrongBuy
            }
            Some((prev_short, prev_long))
                if current_short < current_long && prev_short >= prev_long =>
            {
                Direction::StrongSell
            }
            _ if current_short > current_long => Direction::WeakBuy,
            _ if current_short < current_long => Direction::WeakSell,
            _ => Direction::Neutral,
        };

        Some(IndicatorSignal {
            indicator: Indicator::MaCross,
            direction,
            value: Some(IndicatorValue::Text(format!(
                "{}SMA: {:.5} / {}SMA: {:.5}",
                p.short_period, current_short, p.long_period, current_long
            ))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::engine::testutil::series_from_closes;

    #[test]
    fn test_ma_cross_requires_long_period_bars() {
        let strategy = MaCrossStrategy::new(MaCrossParams::default());
        assert_eq!(strategy.min_bars(), 50);

        let series = series_from_closes(&vec![1.25; 49]);
        assert!(strategy.calculate(&series).is_none());
    }

    #[test]
    fn test_golden_cross_on_upward_jump() {
        let strategy = MaCrossStrategy::new(MaCrossParams::default());
        // Flat history, then a jump: the short average leaves the
        // long one from below-or-equal.
        let closes: Vec<f64> = (0..60)
            .map(|i| if i < 59 { 100.0 } else { 105.0 })
            .collect();
        let signal = strategy.calculate(&series_from_closes(&closes)).unwrap();
        assert_eq!(signal.direction, Direction::StrongBuy);
    }

    #[test]
    fn test_death_cross_on_downward_jump() {
        let strategy = MaCrossStrategy::new(MaCrossParams::default());
        let closes: Vec<f64> = (0..60)
            .map(|i| if i < 59 { 100.0 } else { 95.0 })
            .collect();
        let signal = strategy.calculate(&series_from_closes(&closes)).unwrap();
        assert_eq!(signal.direction, Direction::StrongSell);
    }

    #[test]
    fn test_established_uptrend_is_weak_buy() {
        let strategy = MaCrossStrategy::new(MaCrossParams::default());
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let signal = strategy.calculate(&series_from_closes(&closes)).unwrap();
        assert_eq!(signal.direction, Direction::WeakBuy);
    }

    #[test]
    fn test_established_downtrend_is_weak_sell() {
        let strategy = MaCrossStrategy::new(MaCrossParams::default());
        let closes: Vec<f64> = (0..80).map(|i| 200.0 - i as f64).collect();
        let signal = strategy.calculate(&series_from_closes(&closes)).unwrap();
        assert_eq!(signal.direction, Direction::WeakSell);
    }

    #[test]
    fn test_flat_series_is_neutral() {
        let strategy = MaCrossStrategy::new(MaCrossParams::default());
        let signal = strategy
            .calculate(&series_from_closes(&vec![100.0; 60]))
            .unwrap();
        assert_eq!(signal.direction, Direction::Neutral);
    }

    #[test]
    fn test_value_reports_both_averages() {
        let strategy = MaCrossStrategy::new(MaCrossParams::default());
        let signal = strategy
            .calculate(&series_from_closes(&vec![100.0; 60]))
            .unwrap();

        let Some(IndicatorValue::Text(value)) = signal.value else {
            panic!("expected formatted MA Cross value");
        };
        assert_eq!(value, "10SMA: 100.00000 / 50SMA: 100.00000");
    }

    #[test]
    fn test_rejects_degenerate_periods() {
        let strategy = MaCrossStrategy::new(MaCrossParams {
            short_period: 50,
            long_period: 10,
        });
        let series = series_from_closes(&vec![100.0; 60]);
        assert!(strategy.calculate(&series).is_none());
    }
}
