//! Signal fusion across the indicator strategies.

use crate::types::{Action, AggregateSignal, FusionMode, Indicator, IndicatorSignal};

/// Scores this close to zero read as hold, suppressing noise from a
/// single weak signal disagreeing with three neutrals.
const DEADBAND: f64 = 0.1;

/// Fixed reweighting used by the ml mode.
fn ml_weight(indicator: Indicator) -> f64 {
    match indicator {
        Indicator::Rsi | Indicator::Macd => 0.3,
        Indicator::MaCross | Indicator::Bollinger => 0.2,
    }
}

/// Fuse per-indicator signals into one recommendation.
///
/// Degenerate input (no signals, non-finite score) collapses to the
/// fully neutral result rather than an error, so a refresh cycle
/// always completes with something.
pub fn aggregate(signals: &[IndicatorSignal], mode: FusionMode) -> AggregateSignal {
    if signals.is_empty() {
        return AggregateSignal::neutral(mode);
    }

    match mode {
        FusionMode::Technical => {
            let mean = signals.iter().map(|s| s.direction.value()).sum::<f64>()
                / signals.len() as f64;
            scored(signals, mode, mean)
        }
        FusionMode::Ml => {
            let score = signals
                .iter()
                .map(|s| s.direction.value() * ml_weight(s.indicator))
                .sum::<f64>();
            scored(signals, mode, score)
        }
        FusionMode::Ensemble => majority(signals, mode),
    }
}

/// Threshold a mean/weighted score against the deadband.
fn scored(signals: &[IndicatorSignal], mode: FusionMode, score: f64) -> AggregateSignal {
    if !score.is_finite() {
        return AggregateSignal::neutral(mode);
    }

    let action = if score > DEADBAND {
        Action::Buy
    } else if score < -DEADBAND {
        Action::Sell
    } else {
        Action::Hold
    };

    AggregateSignal {
        mode,
        action,
        strength: (score.abs() * 100.0).round().min(100.0) as u8,
        signals: signals.to_vec(),
    }
}

/// Majority vote: ties and exact-zero signals count toward neither
/// side, and a tie reads as hold with zero strength.
fn majority(signals: &[IndicatorSignal], mode: FusionMode) -> AggregateSignal {
    let positive = signals.iter().filter(|s| s.direction.value() > 0.0).count();
    let negative = signals.iter().filter(|s| s.direction.value() < 0.0).count();
    let total = signals.len() as f64;

    let (action, strength) = if positive > negative {
        (Action::Buy, (positive as f64 / total * 100.0).round() as u8)
    } else if negative > positive {
        (Action::Sell, (negative as f64 / total * 100.0).round() as u8)
    } else {
        (Action::Hold, 0)
    };

    AggregateSignal {
        mode,
        action,
        strength,
        signals: signals.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn sig(indicator: Indicator, direction: Direction) -> IndicatorSignal {
        IndicatorSignal {
            indicator,
            direction,
            value: None,
        }
    }

    /// One signal per indicator in the engine's canonical order.
    fn four(
        rsi: Direction,
        macd: Direction,
        ma_cross: Direction,
        bollinger: Direction,
    ) -> Vec<IndicatorSignal> {
        vec![
            sig(Indicator::Rsi, rsi),
            sig(Indicator::Macd, macd),
            sig(Indicator::MaCross, ma_cross),
            sig(Indicator::Bollinger, bollinger),
        ]
    }

    #[test]
    fn test_ensemble_majority_buy() {
        let signals = four(
            Direction::StrongBuy,
            Direction::StrongBuy,
            Direction::StrongSell,
            Direction::Neutral,
        );
        let result = aggregate(&signals, FusionMode::Ensemble);
        assert_eq!(result.action, Action::Buy);
        assert_eq!(result.strength, 50);
    }

    #[test]
    fn test_ensemble_tie_is_hold() {
        let signals = four(
            Direction::StrongBuy,
            Direction::StrongSell,
            Direction::StrongBuy,
            Direction::StrongSell,
        );
        let result = aggregate(&signals, FusionMode::Ensemble);
        assert_eq!(result.action, Action::Hold);
        assert_eq!(result.strength, 0);
    }

    #[test]
    fn test_ensemble_counts_weak_signals_as_votes() {
        let signals = four(
            Direction::WeakBuy,
            Direction::WeakBuy,
            Direction::WeakBuy,
            Direction::Neutral,
        );
        let result = aggregate(&signals, FusionMode::Ensemble);
        assert_eq!(result.action, Action::Buy);
        assert_eq!(result.strength, 75);
    }

    #[test]
    fn test_technical_unanimous_buy() {
        let signals = four(
            Direction::StrongBuy,
            Direction::StrongBuy,
            Direction::StrongBuy,
            Direction::StrongBuy,
        );
        let result = aggregate(&signals, FusionMode::Technical);
        assert_eq!(result.action, Action::Buy);
        assert_eq!(result.strength, 100);
    }

    #[test]
    fn test_technical_mean_above_deadband() {
        let signals = four(
            Direction::WeakBuy,
            Direction::WeakBuy,
            Direction::Neutral,
            Direction::Neutral,
        );
        let result = aggregate(&signals, FusionMode::Technical);
        assert_eq!(result.action, Action::Buy);
        assert_eq!(result.strength, 25);
    }

    #[test]
    fn test_technical_zero_mean_is_hold() {
        let signals = four(
            Direction::StrongBuy,
            Direction::StrongSell,
            Direction::WeakBuy,
            Direction::WeakSell,
        );
        let result = aggregate(&signals, FusionMode::Technical);
        assert_eq!(result.action, Action::Hold);
        assert_eq!(result.strength, 0);
    }

    #[test]
    fn test_ml_weighting() {
        // 0.3 + 0.3 + 0.2 + 0.2 with unanimous strong buys.
        let signals = four(
            Direction::StrongBuy,
            Direction::StrongBuy,
            Direction::StrongBuy,
            Direction::StrongBuy,
        );
        let result = aggregate(&signals, FusionMode::Ml);
        assert_eq!(result.action, Action::Buy);
        assert_eq!(result.strength, 100);
    }

    #[test]
    fn test_ml_opposing_majors_cancel() {
        let signals = four(
            Direction::StrongBuy,
            Direction::StrongSell,
            Direction::Neutral,
            Direction::Neutral,
        );
        let result = aggregate(&signals, FusionMode::Ml);
        assert_eq!(result.action, Action::Hold);
        assert_eq!(result.strength, 0);
    }

    #[test]
    fn test_deadband_boundary_is_hold() {
        // Weak buy on a 0.2-weight indicator scores exactly 0.1,
        // which must not clear the deadband.
        let signals = four(
            Direction::Neutral,
            Direction::Neutral,
            Direction::WeakBuy,
            Direction::Neutral,
        );
        let result = aggregate(&signals, FusionMode::Ml);
        assert_eq!(result.action, Action::Hold);
        assert_eq!(result.strength, 10);

        let mirrored = four(
            Direction::Neutral,
            Direction::Neutral,
            Direction::WeakSell,
            Direction::Neutral,
        );
        let result = aggregate(&mirrored, FusionMode::Ml);
        assert_eq!(result.action, Action::Hold);
        assert_eq!(result.strength, 10);
    }

    #[test]
    fn test_empty_input_is_fully_neutral() {
        let result = aggregate(&[], FusionMode::Ensemble);
        assert_eq!(result, AggregateSignal::neutral(FusionMode::Ensemble));
    }

    #[test]
    fn test_details_are_preserved() {
        let signals = four(
            Direction::StrongBuy,
            Direction::Neutral,
            Direction::WeakSell,
            Direction::Neutral,
        );
        let result = aggregate(&signals, FusionMode::Ensemble);
        assert_eq!(result.signals, signals);
    }
}
