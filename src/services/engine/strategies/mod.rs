//! The four indicator strategies.

pub mod bollinger;
pub mod ma_cross;
pub mod macd;
pub mod rsi;

pub use bollinger::BollingerStrategy;
pub use ma_cross::MaCrossStrategy;
pub use macd::MacdStrategy;
pub use rsi::RsiStrategy;

use super::Strategy;
use crate::types::StrategyParams;

/// Build the full strategy set from per-indicator parameters.
///
/// Order matches the aggregate signal's details listing.
pub fn all_strategies(params: &StrategyParams) -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(RsiStrategy::new(params.rsi)),
        Box::new(MacdStrategy::new(params.macd)),
        Box::new(MaCrossStrategy::new(params.ma_cross)),
        Box::new(BollingerStrategy::new(params.bollinger)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Indicator;

    #[test]
    fn test_all_strategies_covers_each_indicator_once() {
        let strategies = all_strategies(&StrategyParams::default());
        let indicators: Vec<Indicator> = strategies.iter().map(|s| s.indicator()).collect();
        assert_eq!(
            indicators,
            vec![
                Indicator::Rsi,
                Indicator::Macd,
                Indicator::MaCross,
                Indicator::Bollinger
            ]
        );
    }
}
