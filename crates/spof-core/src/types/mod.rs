//! Dependency-graph types shared by storage, detection and the CLI.

pub mod asset;
pub mod collections;
pub mod dic;
pub mod edge;
pub mod snapshot;

pub use asset::{EssentialAsset, LifecycleState, Scope, SupportAsset};
pub use dic::Dic;
pub use edge::{Criticality, EdgeFamily, EdgeRecord, Redundancy};
pub use snapshot::GraphSnapshot;

/// A stored text value did not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
