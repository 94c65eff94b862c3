use std::path::PathBuf;

use clap::Parser;

/// Detect single points of failure in the asset dependency graph.
///
/// Without `--apply` nothing is written: every SPOF edge is listed with
/// the rules it matched.
#[derive(Debug, Clone, Parser)]
#[command(name = "detect_spof", version, about, long_about = None)]
pub struct Cli {
    /// Write the verdicts to the stored is_spof flags.
    #[arg(long, conflicts_with = "watch")]
    pub apply: bool,

    /// Restrict detection to the named scope and its sub-scopes.
    #[arg(long, value_name = "NAME", conflicts_with = "watch")]
    pub scope: Option<String>,

    /// SQLite database file (overrides storage.db_path and SPOF_DB_PATH).
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print the report as JSON instead of text.
    #[arg(long, conflicts_with = "watch")]
    pub json: bool,

    /// Run the periodic refresh loop in the foreground.
    #[arg(long)]
    pub watch: bool,

    /// Seconds between refreshes in watch mode (overrides
    /// scheduler.refresh_interval_secs and SPOF_REFRESH_INTERVAL).
    #[arg(long, value_name = "SECS", requires = "watch")]
    pub interval: Option<u64>,

    /// Project root holding spof.toml.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}
