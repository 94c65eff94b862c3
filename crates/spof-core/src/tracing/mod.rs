//! Observability: `tracing` with an `EnvFilter` read from `SPOF_LOG`.

pub mod setup;

pub use setup::init_tracing;
