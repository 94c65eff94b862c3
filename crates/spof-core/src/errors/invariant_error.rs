//! Invalid-state errors raised by write paths that would break a graph invariant.

use super::error_code::{self, SpofErrorCode};
use crate::types::{EdgeFamily, LifecycleState};

/// A write was rejected because it would violate a stored-graph invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("support asset {support_id} is {state} and cannot receive new dependencies")]
    SupportRetired {
        support_id: i64,
        state: LifecycleState,
    },

    #[error("child support asset scope {child_scope:?} differs from parent scope {parent_scope:?}")]
    ScopeMismatch {
        child_scope: Option<i64>,
        parent_scope: Option<i64>,
    },

    #[error("{family} edge ({source_id}, {target_id}) already exists")]
    DuplicateEdge {
        family: EdgeFamily,
        source_id: i64,
        target_id: i64,
    },

    #[error("{axis} level {value} is outside 0..=4")]
    LevelOutOfRange { axis: &'static str, value: i64 },

    #[error("invalid scale: {reason}")]
    InvalidScale { reason: String },
}

impl SpofErrorCode for InvariantError {
    fn error_code(&self) -> &'static str {
        error_code::INVARIANT_VIOLATION
    }
}
