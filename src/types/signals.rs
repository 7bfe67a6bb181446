//! Signal types produced by the engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a single indicator signal, five levels from strong
/// sell to strong buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    StrongSell,
    WeakSell,
    Neutral,
    WeakBuy,
    StrongBuy,
}

impl Direction {
    /// Numeric weight used by the aggregator.
    pub fn value(&self) -> f64 {
        match self {
            Direction::StrongSell => -1.0,
            Direction::WeakSell => -0.5,
            Direction::Neutral => 0.0,
            Direction::WeakBuy => 0.5,
            Direction::StrongBuy => 1.0,
        }
    }

    /// Get display label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::StrongSell => "Strong Sell",
            Direction::WeakSell => "Weak Sell",
            Direction::Neutral => "Neutral",
            Direction::WeakBuy => "Weak Buy",
            Direction::StrongBuy => "Strong Buy",
        }
    }
}

/// The four indicator strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Rsi,
    Macd,
    MaCross,
    Bollinger,
}

impl Indicator {
    /// Get display name for this indicator.
    pub fn name(&self) -> &'static str {
        match self {
            Indicator::Rsi => "RSI",
            Indicator::Macd => "MACD",
            Indicator::MaCross => "MA Cross",
            Indicator::Bollinger => "Bollinger Bands",
        }
    }
}

/// Raw indicator reading attached to a signal.
///
/// RSI reports the numeric oscillator; the other strategies report a
/// formatted summary of their current lines/bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Number(f64),
    Text(String),
}

/// Output of one indicator strategy for one series snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSignal {
    /// Indicator that produced this signal.
    pub indicator: Indicator,
    /// Signal direction.
    pub direction: Direction,
    /// Raw reading; None when the series was too short for a
    /// defined value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<IndicatorValue>,
}

impl IndicatorSignal {
    /// Neutral signal with an undefined value, substituted when a
    /// strategy cannot produce a defined result.
    pub fn neutral(indicator: Indicator) -> Self {
        Self {
            indicator,
            direction: Direction::Neutral,
            value: None,
        }
    }
}

/// Overall recommendation after fusing the four indicator signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Buy,
    Hold,
    Sell,
}

impl Action {
    /// Numeric direction: buy = 1, hold = 0, sell = -1.
    pub fn value(&self) -> i8 {
        match self {
            Action::Buy => 1,
            Action::Hold => 0,
            Action::Sell => -1,
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::Sell => "SELL",
        }
    }
}

/// How the four indicator signals are fused into one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FusionMode {
    /// Arithmetic mean of the four directions.
    Technical,
    /// Fixed linear reweighting of the same signals. Not a trained
    /// model; the weighting is the full specification of this mode.
    Ml,
    /// Majority vote over buy-side and sell-side signals.
    #[default]
    Ensemble,
}

impl FusionMode {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "technical" => Some(Self::Technical),
            "ml" => Some(Self::Ml),
            "ensemble" => Some(Self::Ensemble),
            _ => None,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Ml => "ML",
            Self::Ensemble => "Ensemble",
        }
    }
}

/// Fused signal for one series snapshot.
///
/// Deterministic: carries no timestamp or id, so identical input
/// always produces an identical value. Per-cycle metadata lives on
/// [`SignalSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSignal {
    /// Fusion mode that produced this signal.
    pub mode: FusionMode,
    /// Overall recommendation.
    pub action: Action,
    /// Confidence strength as an integer percentage (0-100).
    pub strength: u8,
    /// The per-indicator signals that were fused.
    pub signals: Vec<IndicatorSignal>,
}

impl AggregateSignal {
    /// Fully neutral result: hold, zero strength, no details.
    pub fn neutral(mode: FusionMode) -> Self {
        Self {
            mode,
            action: Action::Hold,
            strength: 0,
            signals: Vec::new(),
        }
    }
}

/// One refresh cycle's dated result, retained for the API and the
/// alert de-duplication rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSnapshot {
    /// Unique snapshot ID.
    pub id: Uuid,
    /// Rate the pair traded at when the cycle ran.
    pub rate: f64,
    /// Whether this snapshot satisfied the alert rule.
    pub alert: bool,
    /// Unix timestamp (milliseconds) when computed.
    pub timestamp: i64,
    /// The fused signal.
    pub signal: AggregateSignal,
}
