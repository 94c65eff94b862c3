//! # spof-core
//!
//! Foundation crate for SPOF detection.
//! Defines the dependency-graph types, errors, config, tracing setup and the
//! storage collaborator traits, the SPOF rule table, plus the two
//! derived-attribute maintainers: the risk-matrix evaluator and the
//! inherited-DIC propagator.

pub mod config;
pub mod errors;
pub mod matrix;
pub mod propagation;
pub mod rules;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::SpofConfig;
pub use errors::{DetectionError, InvariantError, SpofErrorCode, StorageError};
pub use types::{Criticality, Dic, EdgeFamily, LifecycleState, Redundancy};
