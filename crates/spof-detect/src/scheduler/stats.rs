//! Scheduler counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::reconciler::ReconcileSummary;

/// Thread-safe counters updated by the scheduler loop.
#[derive(Debug, Default)]
pub struct SchedulerStats {
    loops_started: AtomicU64,
    ticks_succeeded: AtomicU64,
    ticks_failed: AtomicU64,
    last_total_spof: AtomicU64,
    last_total_changed: AtomicU64,
}

/// Point-in-time copy of [`SchedulerStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub loops_started: u64,
    pub ticks_succeeded: u64,
    pub ticks_failed: u64,
    pub last_total_spof: u64,
    pub last_total_changed: u64,
}

impl SchedulerStats {
    pub(crate) fn record_loop_started(&self) {
        self.loops_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_success(&self, summary: &ReconcileSummary) {
        self.last_total_spof
            .store(summary.total_spof as u64, Ordering::Relaxed);
        self.last_total_changed
            .store(summary.total_changed as u64, Ordering::Relaxed);
        // Counter last: a reader that sees the tick also sees its totals.
        self.ticks_succeeded.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn record_failure(&self) {
        self.ticks_failed.fetch_add(1, Ordering::Release);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let ticks_succeeded = self.ticks_succeeded.load(Ordering::Acquire);
        StatsSnapshot {
            loops_started: self.loops_started.load(Ordering::Relaxed),
            ticks_succeeded,
            ticks_failed: self.ticks_failed.load(Ordering::Acquire),
            last_total_spof: self.last_total_spof.load(Ordering::Relaxed),
            last_total_changed: self.last_total_changed.load(Ordering::Relaxed),
        }
    }
}
