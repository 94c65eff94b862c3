//! Background scheduler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default seconds between scheduler ticks.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between ticks. Default: 300.
    pub refresh_interval_secs: Option<u64>,
    /// Master switch. Default: true.
    pub enabled: Option<bool>,
    /// Marks the canonical worker in a multi-worker deployment.
    /// Unset means single-process: start.
    pub primary_worker: Option<bool>,
}

impl SchedulerConfig {
    pub fn effective_refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh_interval_secs
                .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS),
        )
    }

    /// Whether this process should run the scheduler at all.
    pub fn should_start(&self) -> bool {
        self.enabled.unwrap_or(true) && self.primary_worker != Some(false)
    }
}
