//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for the process.
///
/// Reads `SPOF_LOG` for per-target levels, e.g.
/// `SPOF_LOG=spof_detect=debug,spof_storage=warn`.
/// Falls back to `spof=info` when unset or invalid. Output goes to stderr so
/// stdout stays free for command summaries.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("SPOF_LOG").unwrap_or_else(|_| EnvFilter::new("spof=info"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true),
            )
            .with(filter)
            .try_init();

        if installed.is_err() {
            // Another subscriber (e.g. a test harness) is already global.
            tracing::debug!("tracing subscriber already installed");
        }
    });
}
