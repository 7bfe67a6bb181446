pub mod engine;
pub mod monitor;

pub use engine::{compute_signal, Strategy};
pub use monitor::{should_alert, RefreshOutcome, SignalMonitor};
