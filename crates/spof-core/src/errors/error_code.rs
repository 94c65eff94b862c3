//! SpofErrorCode trait for stable, machine-readable error tags.

/// Every error enum implements this to expose a stable error code string
/// for log fields and CLI output.
pub trait SpofErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged message: `[ERROR_CODE] message`.
    fn tagged_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCOPE_NOT_FOUND: &str = "SCOPE_NOT_FOUND";
pub const SCHEDULER_ERROR: &str = "SCHEDULER_ERROR";
pub const TICK_PANICKED: &str = "TICK_PANICKED";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
