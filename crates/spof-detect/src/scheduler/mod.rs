//! Periodic background reconciliation.
//!
//! [`SpofScheduler`] runs a [`TickJob`] on a dedicated named thread, sleeping
//! `interval` between ticks. Starting is idempotent: a second `start` on the
//! same scheduler never spawns a second loop. A tick that fails, or
//! panics, is logged and the loop carries on.
//!
//! [`start_global`] keeps one scheduler per process, gated by
//! [`SchedulerConfig::should_start`] so only the canonical worker runs it.

pub mod stats;

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Once, OnceLock};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use spof_core::config::SchedulerConfig;
use spof_core::errors::error_code::TICK_PANICKED;
use spof_core::errors::{DetectionError, SchedulerError};
use spof_core::traits::GraphStore;
use spof_core::SpofErrorCode;

use crate::reconciler::{ReconcileSummary, Reconciler};

pub use stats::{SchedulerStats, StatsSnapshot};

/// Thread name of the scheduler loop.
pub const THREAD_NAME: &str = "spof-scheduler";

/// One unit of periodic work.
pub trait TickJob: Send + Sync {
    fn run_tick(&self) -> Result<ReconcileSummary, DetectionError>;
}

/// Scheduled ticks reconcile the whole graph, unscoped.
impl<S: GraphStore> TickJob for Reconciler<S> {
    fn run_tick(&self) -> Result<ReconcileSummary, DetectionError> {
        self.apply(None)
    }
}

#[derive(Default)]
struct LoopState {
    started: bool,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

pub struct SpofScheduler {
    job: Arc<dyn TickJob>,
    interval: Duration,
    state: Mutex<LoopState>,
    stats: Arc<SchedulerStats>,
}

impl SpofScheduler {
    pub fn new(job: Arc<dyn TickJob>, interval: Duration) -> Self {
        Self {
            job,
            interval,
            state: Mutex::new(LoopState::default()),
            stats: Arc::new(SchedulerStats::default()),
        }
    }

    pub fn from_config(job: Arc<dyn TickJob>, config: &SchedulerConfig) -> Self {
        Self::new(job, config.effective_refresh_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().map(|s| s.started).unwrap_or(false)
    }

    /// Spawn the loop unless it is already running.
    /// Returns `true` when this call started it.
    pub fn start(&self) -> Result<bool, SchedulerError> {
        let mut state = self.state.lock().map_err(|_| SchedulerError::LockPoisoned)?;
        if state.started {
            tracing::debug!("scheduler already running");
            return Ok(false);
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let job = Arc::clone(&self.job);
        let stats = Arc::clone(&self.stats);
        let interval = self.interval;

        let handle = std::thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                stats.record_loop_started();
                tracing::info!(interval_secs = interval.as_secs(), "SPOF scheduler started");
                loop {
                    run_tick(job.as_ref(), &stats);
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::info!("SPOF scheduler stopped");
            })
            .map_err(|e| SchedulerError::Spawn {
                message: e.to_string(),
            })?;

        state.started = true;
        state.stop_tx = Some(stop_tx);
        state.handle = Some(handle);
        Ok(true)
    }

    /// Stop the loop after its current tick and wait for the thread to exit.
    pub fn stop(&self) -> Result<(), SchedulerError> {
        let (stop_tx, handle) = {
            let mut state = self.state.lock().map_err(|_| SchedulerError::LockPoisoned)?;
            state.started = false;
            (state.stop_tx.take(), state.handle.take())
        };
        if let Some(tx) = stop_tx {
            // A full channel already carries a stop request.
            let _ = tx.try_send(());
        }
        if let Some(handle) = handle {
            handle.join().map_err(|_| SchedulerError::Spawn {
                message: "scheduler thread panicked".to_string(),
            })?;
        }
        Ok(())
    }
}

impl Drop for SpofScheduler {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Run one tick, containing any error or panic so the loop survives it.
pub fn run_tick(job: &dyn TickJob, stats: &SchedulerStats) {
    match catch_tick(job) {
        Ok(Ok(summary)) => {
            stats.record_success(&summary);
            tracing::info!(
                total_spof = summary.total_spof,
                total_changed = summary.total_changed,
                "SPOF refresh complete"
            );
        }
        Ok(Err(e)) => {
            stats.record_failure();
            tracing::error!(
                code = e.error_code(),
                error = %e,
                chain = %error_chain(&e),
                "SPOF refresh failed"
            );
        }
        Err(panic) => {
            stats.record_failure();
            tracing::error!(
                code = TICK_PANICKED,
                panic = %panic.message,
                backtrace = %panic.backtrace_text(),
                "SPOF refresh panicked"
            );
        }
    }
}

/// A tick that unwound instead of returning.
pub(crate) struct TickPanic {
    message: String,
    backtrace: Option<Backtrace>,
}

impl TickPanic {
    fn backtrace_text(&self) -> String {
        self.backtrace
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "no backtrace captured".to_string())
    }
}

thread_local! {
    static IN_TICK: Cell<bool> = const { Cell::new(false) };
    static TICK_BACKTRACE: RefCell<Option<Backtrace>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chain a hook that records the backtrace of panics raised inside a tick.
/// Panics elsewhere go to the previous hook untouched.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if IN_TICK.with(Cell::get) {
                TICK_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(Backtrace::force_capture()));
            } else {
                previous(info);
            }
        }));
    });
}

pub(crate) fn catch_tick(
    job: &dyn TickJob,
) -> Result<Result<ReconcileSummary, DetectionError>, TickPanic> {
    install_panic_hook();
    IN_TICK.with(|flag| flag.set(true));
    let outcome = catch_unwind(AssertUnwindSafe(|| job.run_tick()));
    IN_TICK.with(|flag| flag.set(false));

    outcome.map_err(|payload| TickPanic {
        message: panic_message(payload.as_ref()).to_string(),
        backtrace: TICK_BACKTRACE.with(|slot| slot.borrow_mut().take()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Render an error and each of its sources, outermost first.
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(" <- ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

static GLOBAL: OnceLock<SpofScheduler> = OnceLock::new();

/// Start the process-wide scheduler if this process is the canonical worker.
///
/// The first call fixes the job and interval; later calls reuse that
/// scheduler, so the loop is started at most once per process. Returns
/// `None` when gating keeps the scheduler off.
pub fn start_global<F>(
    config: &SchedulerConfig,
    make_job: F,
) -> Result<Option<&'static SpofScheduler>, SchedulerError>
where
    F: FnOnce() -> Arc<dyn TickJob>,
{
    if !config.should_start() {
        tracing::info!(
            enabled = ?config.enabled,
            primary_worker = ?config.primary_worker,
            "SPOF scheduler not started on this process"
        );
        return Ok(None);
    }
    let scheduler = GLOBAL.get_or_init(|| SpofScheduler::from_config(make_job(), config));
    scheduler.start()?;
    Ok(Some(scheduler))
}

/// The process-wide scheduler, if [`start_global`] created one.
pub fn global() -> Option<&'static SpofScheduler> {
    GLOBAL.get()
}
