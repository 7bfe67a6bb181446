//! Signal computation engine.
//!
//! Pure, synchronous transforms over an immutable series snapshot:
//! four indicator strategies behind a common trait, fused into one
//! recommendation by the aggregator. No component here holds mutable
//! state; everything flows through the arguments.

pub mod aggregator;
pub mod moving_averages;
pub mod strategies;

pub use aggregator::aggregate;

use crate::types::{
    AggregateSignal, FusionMode, Indicator, IndicatorSignal, PriceSeries, StrategyParams,
};

/// Trait for indicator strategies.
pub trait Strategy: Send + Sync {
    /// Which indicator this strategy reports as.
    fn indicator(&self) -> Indicator;

    /// Minimum number of daily bars for a defined signal.
    fn min_bars(&self) -> usize;

    /// Derive the signal from the series.
    ///
    /// Returns None when the series is too short or the parameters
    /// are degenerate; callers substitute a neutral signal.
    fn calculate(&self, series: &PriceSeries) -> Option<IndicatorSignal>;
}

/// Compute the fused trading signal for a series.
///
/// The engine's sole entry point. Deterministic: the same series,
/// mode, and parameters always yield the same output. A strategy
/// that cannot produce a defined signal is downgraded to neutral
/// instead of aborting the other three.
pub fn compute_signal(
    series: &PriceSeries,
    mode: FusionMode,
    params: &StrategyParams,
) -> AggregateSignal {
    let signals: Vec<IndicatorSignal> = strategies::all_strategies(params)
        .iter()
        .map(|strategy| {
            strategy
                .calculate(series)
                .unwrap_or_else(|| IndicatorSignal::neutral(strategy.indicator()))
        })
        .collect();

    aggregate(&signals, mode)
}
