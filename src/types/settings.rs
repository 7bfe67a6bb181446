//! Runtime settings and per-indicator strategy parameters.

use serde::{Deserialize, Serialize};

use crate::types::FusionMode;

/// RSI strategy parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RsiParams {
    pub period: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

/// MACD strategy parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MacdParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// Moving-average crossover strategy parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaCrossParams {
    pub short_period: usize,
    pub long_period: usize,
}

impl Default for MaCrossParams {
    fn default() -> Self {
        Self {
            short_period: 10,
            long_period: 50,
        }
    }
}

/// Bollinger Bands strategy parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev_multiplier: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// Parameters for all four strategies, owned by the caller of the
/// engine and carried inside [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyParams {
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub ma_cross: MaCrossParams,
    pub bollinger: BollingerParams,
}

/// Runtime settings snapshot.
///
/// Swapped atomically as a whole; a refresh cycle reads one snapshot
/// at its start so updates never apply mid-cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Minutes between scheduled refresh cycles.
    pub refresh_interval_minutes: u64,
    /// Whether qualifying signals raise an alert.
    pub notifications_enabled: bool,
    /// Minimum strength (0-100) for a signal to alert.
    pub signal_strength_threshold: u8,
    /// How indicator signals are fused.
    pub fusion_mode: FusionMode,
    /// Days of daily history fetched per cycle.
    pub lookback_days: u32,
    /// Per-indicator strategy parameters.
    pub indicators: StrategyParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: 5,
            notifications_enabled: true,
            signal_strength_threshold: 70,
            fusion_mode: FusionMode::Ensemble,
            lookback_days: 100,
            indicators: StrategyParams::default(),
        }
    }
}

/// Partial update for [`StrategyParams`]; each indicator's parameter
/// block is replaced as a unit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyParamsUpdate {
    pub rsi: Option<RsiParams>,
    pub macd: Option<MacdParams>,
    pub ma_cross: Option<MaCrossParams>,
    pub bollinger: Option<BollingerParams>,
}

/// Partial settings update; only present fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub refresh_interval_minutes: Option<u64>,
    pub notifications_enabled: Option<bool>,
    pub signal_strength_threshold: Option<u8>,
    pub fusion_mode: Option<FusionMode>,
    pub lookback_days: Option<u32>,
    pub indicators: Option<StrategyParamsUpdate>,
}

impl SettingsUpdate {
    /// Check value ranges before applying.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(threshold) = self.signal_strength_threshold {
            if threshold > 100 {
                return Err(format!(
                    "signalStrengthThreshold must be 0-100, got {}",
                    threshold
                ));
            }
        }
        if self.refresh_interval_minutes == Some(0) {
            return Err("refreshIntervalMinutes must be at least 1".into());
        }
        if self.lookback_days == Some(0) {
            return Err("lookbackDays must be at least 1".into());
        }
        Ok(())
    }

    /// Apply this patch to a settings value.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(minutes) = self.refresh_interval_minutes {
            settings.refresh_interval_minutes = minutes;
        }
        if let Some(enabled) = self.notifications_enabled {
            settings.notifications_enabled = enabled;
        }
        if let Some(threshold) = self.signal_strength_threshold {
            settings.signal_strength_threshold = threshold;
        }
        if let Some(mode) = self.fusion_mode {
            settings.fusion_mode = mode;
        }
        if let Some(days) = self.lookback_days {
            settings.lookback_days = days;
        }
        if let Some(ref indicators) = self.indicators {
            if let Some(rsi) = indicators.rsi {
                settings.indicators.rsi = rsi;
            }
            if let Some(macd) = indicators.macd {
                settings.indicators.macd = macd;
            }
            if let Some(ma_cross) = indicators.ma_cross {
                settings.indicators.ma_cross = ma_cross;
            }
            if let Some(bollinger) = indicators.bollinger {
                settings.indicators.bollinger = bollinger;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.refresh_interval_minutes, 5);
        assert!(settings.notifications_enabled);
        assert_eq!(settings.signal_strength_threshold, 70);
        assert_eq!(settings.fusion_mode, FusionMode::Ensemble);
        assert_eq!(settings.lookback_days, 100);
    }

    #[test]
    fn test_default_strategy_params() {
        let params = StrategyParams::default();
        assert_eq!(params.rsi.period, 14);
        assert_eq!(params.rsi.overbought, 70.0);
        assert_eq!(params.rsi.oversold, 30.0);
        assert_eq!(params.macd.fast_period, 12);
        assert_eq!(params.macd.slow_period, 26);
        assert_eq!(params.macd.signal_period, 9);
        assert_eq!(params.ma_cross.short_period, 10);
        assert_eq!(params.ma_cross.long_period, 50);
        assert_eq!(params.bollinger.period, 20);
        assert_eq!(params.bollinger.std_dev_multiplier, 2.0);
    }

    #[test]
    fn test_partial_update_applies_only_present_fields() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            fusion_mode: Some(FusionMode::Technical),
            signal_strength_threshold: Some(40),
            ..Default::default()
        };

        update.apply_to(&mut settings);

        assert_eq!(settings.fusion_mode, FusionMode::Technical);
        assert_eq!(settings.signal_strength_threshold, 40);
        assert_eq!(settings.refresh_interval_minutes, 5);
        assert!(settings.notifications_enabled);
    }

    #[test]
    fn test_indicator_override_replaces_one_block() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            indicators: Some(StrategyParamsUpdate {
                rsi: Some(RsiParams {
                    period: 7,
                    overbought: 80.0,
                    oversold: 20.0,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        update.apply_to(&mut settings);

        assert_eq!(settings.indicators.rsi.period, 7);
        assert_eq!(settings.indicators.macd, MacdParams::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let update = SettingsUpdate {
            signal_strength_threshold: Some(101),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let update = SettingsUpdate {
            refresh_interval_minutes: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_settings_update_from_json() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"fusionMode":"ml","notificationsEnabled":false}"#).unwrap();
        assert_eq!(update.fusion_mode, Some(FusionMode::Ml));
        assert_eq!(update.notifications_enabled, Some(false));
        assert!(update.refresh_interval_minutes.is_none());
    }
}
