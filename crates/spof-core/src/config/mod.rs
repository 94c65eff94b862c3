//! Configuration system.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod scheduler_config;
pub mod spof_config;
pub mod storage_config;

pub use scheduler_config::SchedulerConfig;
pub use spof_config::{CliOverrides, SpofConfig};
pub use storage_config::StorageConfig;
