//! Signal refresh cycle.
//!
//! Drives refresh cycles against the quote provider and retains the
//! previous cycle's signal for the alert de-duplication rule.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::services::engine;
use crate::sources::RateProvider;
use crate::types::{Action, AggregateSignal, Settings, SettingsUpdate, SignalSnapshot};

/// Maximum snapshots retained for the history endpoint: one day's
/// worth at the default 5-minute interval.
const HISTORY_LIMIT: usize = 288;

/// Result of a refresh request.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A new snapshot was computed.
    Completed(SignalSnapshot),
    /// Another refresh was already in flight; this tick was absorbed.
    Coalesced,
}

struct MonitorState {
    latest: Option<SignalSnapshot>,
    history: VecDeque<SignalSnapshot>,
}

/// Runs refresh cycles and retains their snapshots. Settings are
/// held as an atomically swapped snapshot read once per cycle.
pub struct SignalMonitor {
    provider: Arc<dyn RateProvider>,
    defaults: Settings,
    settings: RwLock<Arc<Settings>>,
    state: Mutex<MonitorState>,
    refresh_gate: Mutex<()>,
}

impl SignalMonitor {
    pub fn new(provider: Arc<dyn RateProvider>, settings: Settings) -> Self {
        Self {
            provider,
            defaults: settings.clone(),
            settings: RwLock::new(Arc::new(settings)),
            state: Mutex::new(MonitorState {
                latest: None,
                history: VecDeque::new(),
            }),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Current settings snapshot.
    pub async fn settings(&self) -> Arc<Settings> {
        self.settings.read().await.clone()
    }

    /// Apply a partial settings update.
    ///
    /// The snapshot is swapped as a whole; a cycle already in flight
    /// keeps the snapshot it started with.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<Arc<Settings>> {
        update.validate().map_err(AppError::BadRequest)?;

        let mut guard = self.settings.write().await;
        let mut next = (**guard).clone();
        update.apply_to(&mut next);
        *guard = Arc::new(next);
        debug!("Settings updated, effective next cycle");
        Ok(guard.clone())
    }

    /// Restore the startup settings.
    pub async fn reset_settings(&self) -> Arc<Settings> {
        let mut guard = self.settings.write().await;
        *guard = Arc::new(self.defaults.clone());
        info!("Settings reset to defaults");
        guard.clone()
    }

    /// Most recent snapshot, if any cycle has completed.
    pub async fn latest(&self) -> Option<SignalSnapshot> {
        self.state.lock().await.latest.clone()
    }

    /// Retained snapshots, oldest first.
    pub async fn history(&self) -> Vec<SignalSnapshot> {
        self.state.lock().await.history.iter().cloned().collect()
    }

    /// Run one refresh cycle.
    ///
    /// Only one cycle runs at a time; a request arriving while one is
    /// in flight is coalesced rather than queued. Fetch failures are
    /// returned to the caller (the data is stale) and leave the
    /// previous snapshot untouched.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let Ok(_gate) = self.refresh_gate.try_lock() else {
            debug!("Refresh already in flight, coalescing");
            return Ok(RefreshOutcome::Coalesced);
        };

        let settings = self.settings().await;

        let series = self.provider.fetch_daily_series(settings.lookback_days).await?;

        let rate = match self.provider.fetch_latest_price().await {
            Ok(rate) => rate,
            Err(err) => match series.last_close() {
                Some(close) => {
                    warn!("Latest price unavailable ({}), using last close", err);
                    close
                }
                None => return Err(err.into()),
            },
        };

        let signal = engine::compute_signal(&series, settings.fusion_mode, &settings.indicators);

        let mut state = self.state.lock().await;
        let previous = state.latest.as_ref().map(|s| s.signal.action);
        let alert = should_alert(&settings, &signal, previous);
        if alert {
            info!(
                "{} signal at {:.5} with {}% strength",
                signal.action.label(),
                rate,
                signal.strength
            );
        }

        let snapshot = SignalSnapshot {
            id: Uuid::new_v4(),
            rate,
            alert,
            timestamp: Utc::now().timestamp_millis(),
            signal,
        };

        state.history.push_back(snapshot.clone());
        while state.history.len() > HISTORY_LIMIT {
            state.history.pop_front();
        }
        state.latest = Some(snapshot.clone());

        Ok(RefreshOutcome::Completed(snapshot))
    }
}

/// Alert rule: strong enough, directional, and pointing somewhere the
/// previous cycle did not.
pub fn should_alert(
    settings: &Settings,
    signal: &AggregateSignal,
    previous: Option<Action>,
) -> bool {
    settings.notifications_enabled
        && signal.strength >= settings.signal_strength_threshold
        && signal.action != Action::Hold
        && previous != Some(signal.action)
}
