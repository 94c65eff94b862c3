//! # spof-cli
//!
//! `detect_spof`: reconcile SPOF flags once (dry-run by default, `--apply`
//! to write) or keep them fresh in the background with `--watch`.

pub mod args;
pub mod error;
pub mod output;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use spof_core::config::{CliOverrides, SpofConfig};
use spof_core::SpofErrorCode;
use spof_detect::scheduler::start_global;
use spof_detect::{Reconciler, TickJob};
use spof_storage::SpofStorageEngine;

pub use args::Cli;
pub use error::CliError;

/// Run one invocation, writing the summary to `out` and errors to `err`.
/// Returns the process exit code.
pub fn run<O: Write, E: Write>(cli: &Cli, out: &mut O, err: &mut E) -> u8 {
    match execute(cli, out) {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!("{}", e.tagged_message());
            let _ = writeln!(err, "error: {e}");
            e.exit_code()
        }
    }
}

fn execute<O: Write>(cli: &Cli, out: &mut O) -> Result<(), CliError> {
    let config = SpofConfig::load(&cli.root, Some(&overrides(cli)))?;

    let db_path = resolve_db_path(cli, &config);
    let mut storage_config = config.storage.clone();
    storage_config.db_path = Some(db_path.display().to_string());
    let engine = Arc::new(SpofStorageEngine::open_existing(&storage_config)?);

    if cli.watch {
        return watch(&config, engine, out);
    }

    let reconciler = Reconciler::new(engine);
    let scope = reconciler.resolve_scope(cli.scope.as_deref())?;
    let scope_id = scope.as_ref().map(|s| s.id);
    let scope_name = scope.as_ref().map(|s| s.name.as_str());

    if cli.apply {
        let summary = reconciler.apply(scope_id)?;
        if cli.json {
            output::write_json(out, &summary)?;
        } else {
            output::write_apply(out, &summary, scope_name)?;
        }
    } else {
        let report = reconciler.dry_run(scope_id)?;
        if cli.json {
            output::write_json(out, &report)?;
        } else {
            output::write_dry_run(out, &report, scope_name)?;
        }
    }
    Ok(())
}

fn overrides(cli: &Cli) -> CliOverrides {
    CliOverrides {
        db_path: cli.db.as_ref().map(|p| p.display().to_string()),
        refresh_interval_secs: cli.interval,
    }
}

/// A relative database path is taken relative to the project root.
fn resolve_db_path(cli: &Cli, config: &SpofConfig) -> PathBuf {
    let path = config.storage.effective_db_path();
    if path.is_absolute() {
        path
    } else {
        cli.root.join(path)
    }
}

/// Start the process-wide scheduler and block for the life of the process.
fn watch<O: Write>(
    config: &SpofConfig,
    engine: Arc<SpofStorageEngine>,
    out: &mut O,
) -> Result<(), CliError> {
    let started = start_global(&config.scheduler, move || -> Arc<dyn TickJob> {
        Arc::new(Reconciler::new(engine))
    })?;
    let Some(scheduler) = started else {
        writeln!(out, "Scheduler disabled on this worker; nothing to watch")?;
        return Ok(());
    };

    writeln!(
        out,
        "Watching: SPOF refresh every {}s (Ctrl-C to stop)",
        scheduler.interval().as_secs()
    )?;
    out.flush()?;
    loop {
        std::thread::park();
    }
}
