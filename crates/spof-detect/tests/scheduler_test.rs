//! Scheduler loop: single start, crash isolation, stop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use spof_core::errors::{DetectionError, StorageError};
use spof_detect::scheduler::{run_tick, StatsSnapshot};
use spof_detect::{ReconcileSummary, SchedulerStats, SpofScheduler, TickJob};

/// Tick 1 fails, tick 2 panics, every later tick succeeds.
#[derive(Default)]
struct FlakyJob {
    calls: AtomicUsize,
}

impl TickJob for FlakyJob {
    fn run_tick(&self) -> Result<ReconcileSummary, DetectionError> {
        match self.calls.fetch_add(1, Ordering::SeqCst) {
            0 => Err(DetectionError::Storage(StorageError::SqliteError {
                message: "database is locked".to_string(),
            })),
            1 => panic!("tick blew up"),
            _ => Ok(ReconcileSummary {
                families: Vec::new(),
                total_edges: 3,
                total_spof: 2,
                total_changed: 1,
            }),
        }
    }
}

fn wait_for(scheduler: &SpofScheduler, done: impl Fn(&StatsSnapshot) -> bool) -> StatsSnapshot {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let stats = scheduler.stats();
        if done(&stats) || Instant::now() > deadline {
            return stats;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn starting_twice_runs_one_loop() {
    let job = Arc::new(FlakyJob::default());
    let scheduler = SpofScheduler::new(job.clone(), Duration::from_millis(10));

    assert!(scheduler.start().unwrap());
    assert!(!scheduler.start().unwrap());
    assert!(scheduler.is_running());

    let stats = wait_for(&scheduler, |s| s.ticks_succeeded >= 2);
    assert_eq!(stats.loops_started, 1);

    scheduler.stop().unwrap();
    assert!(!scheduler.is_running());
}

#[test]
fn failing_and_panicking_ticks_do_not_stop_the_loop() {
    let job = Arc::new(FlakyJob::default());
    let scheduler = SpofScheduler::new(job.clone(), Duration::from_millis(10));
    scheduler.start().unwrap();

    let stats = wait_for(&scheduler, |s| s.ticks_succeeded >= 1);
    scheduler.stop().unwrap();

    assert_eq!(stats.ticks_failed, 2);
    assert!(stats.ticks_succeeded >= 1);
    assert_eq!(stats.last_total_spof, 2);
    assert_eq!(stats.last_total_changed, 1);
    assert!(job.calls.load(Ordering::SeqCst) >= 3);
}

#[test]
fn stop_interrupts_the_sleep() {
    let job = Arc::new(FlakyJob::default());
    let scheduler = SpofScheduler::new(job, Duration::from_secs(3600));
    scheduler.start().unwrap();
    wait_for(&scheduler, |s| s.ticks_failed >= 1);

    let started = Instant::now();
    scheduler.stop().unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));

    // Stopped schedulers can be started again.
    assert!(scheduler.start().unwrap());
    let stats = wait_for(&scheduler, |s| s.loops_started >= 2);
    assert_eq!(stats.loops_started, 2);
}

#[test]
fn run_tick_contains_a_panic() {
    let job = FlakyJob::default();
    job.calls.store(1, Ordering::SeqCst);
    let stats = SchedulerStats::default();

    run_tick(&job, &stats);
    run_tick(&job, &stats);

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.ticks_failed, 1);
    assert_eq!(snapshot.ticks_succeeded, 1);
}

#[test]
fn loop_runs_on_a_named_thread() {
    struct ThreadNameRecorder(std::sync::Mutex<Option<String>>);
    impl TickJob for ThreadNameRecorder {
        fn run_tick(&self) -> Result<ReconcileSummary, DetectionError> {
            *self.0.lock().unwrap() = std::thread::current().name().map(str::to_string);
            Ok(ReconcileSummary {
                families: Vec::new(),
                total_edges: 0,
                total_spof: 0,
                total_changed: 0,
            })
        }
    }

    let recorder = Arc::new(ThreadNameRecorder(std::sync::Mutex::new(None)));
    let scheduler = SpofScheduler::new(recorder.clone(), Duration::from_millis(10));
    scheduler.start().unwrap();
    wait_for(&scheduler, |s| s.ticks_succeeded >= 1);
    scheduler.stop().unwrap();

    assert_eq!(recorder.0.lock().unwrap().as_deref(), Some("spof-scheduler"));
}
