use std::sync::Arc;

use crate::errors::StorageError;
use crate::matrix::RiskCriteria;
use crate::types::{EdgeFamily, GraphSnapshot, Scope};

/// Typed reads and bulk writes the detector and CLI need from storage.
pub trait GraphStore: Send + Sync {
    /// Read all four edge families with eager-loaded endpoints in one
    /// consistent view. With `scope`, support-anchored families keep only
    /// edges whose support asset lies in that scope or a descendant scope;
    /// site↔supplier edges are never filtered.
    fn load_snapshot(&self, scope: Option<i64>) -> Result<GraphSnapshot, StorageError>;

    /// Set `is_spof = value` on every listed edge of one family, atomically.
    /// Returns the number of rows written.
    fn set_spof_flags(
        &self,
        family: EdgeFamily,
        edge_ids: &[i64],
        value: bool,
    ) -> Result<usize, StorageError>;

    /// Exact-name scope lookup.
    fn find_scope_by_name(&self, name: &str) -> Result<Option<Scope>, StorageError>;

    fn load_risk_criteria(&self, id: i64) -> Result<Option<RiskCriteria>, StorageError>;

    fn default_risk_criteria(&self) -> Result<Option<RiskCriteria>, StorageError>;
}

impl<T: GraphStore + ?Sized> GraphStore for Arc<T> {
    fn load_snapshot(&self, scope: Option<i64>) -> Result<GraphSnapshot, StorageError> {
        (**self).load_snapshot(scope)
    }

    fn set_spof_flags(
        &self,
        family: EdgeFamily,
        edge_ids: &[i64],
        value: bool,
    ) -> Result<usize, StorageError> {
        (**self).set_spof_flags(family, edge_ids, value)
    }

    fn find_scope_by_name(&self, name: &str) -> Result<Option<Scope>, StorageError> {
        (**self).find_scope_by_name(name)
    }

    fn load_risk_criteria(&self, id: i64) -> Result<Option<RiskCriteria>, StorageError> {
        (**self).load_risk_criteria(id)
    }

    fn default_risk_criteria(&self) -> Result<Option<RiskCriteria>, StorageError> {
        (**self).default_risk_criteria()
    }
}
