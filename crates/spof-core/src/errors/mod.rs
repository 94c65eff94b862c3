//! Error handling for SPOF detection.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod invariant_error;
pub mod scheduler_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::SpofErrorCode;
pub use invariant_error::InvariantError;
pub use scheduler_error::SchedulerError;
pub use storage_error::StorageError;
