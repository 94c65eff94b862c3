//! Reconcile and dry-run reports.

use serde::Serialize;
use spof_core::types::EdgeFamily;

use crate::rules::EdgeVerdict;

/// Counts for one edge family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilySummary {
    pub family: EdgeFamily,
    pub total: usize,
    pub spof_count: usize,
    /// Edges flipped to `is_spof = true`.
    pub added: usize,
    /// Edges flipped to `is_spof = false`.
    pub cleared: usize,
    pub changed: usize,
}

impl FamilySummary {
    pub(crate) fn new(
        family: EdgeFamily,
        total: usize,
        spof_count: usize,
        added: usize,
        cleared: usize,
    ) -> Self {
        Self {
            family,
            total,
            spof_count,
            added,
            cleared,
            changed: added + cleared,
        }
    }

    /// Counts a dry run would produce: what an apply would flip.
    pub(crate) fn from_verdicts(family: EdgeFamily, verdicts: &[EdgeVerdict]) -> Self {
        let added = verdicts.iter().filter(|v| v.is_spof && !v.was_spof).count();
        let cleared = verdicts.iter().filter(|v| !v.is_spof && v.was_spof).count();
        let spof_count = verdicts.iter().filter(|v| v.is_spof).count();
        Self::new(family, verdicts.len(), spof_count, added, cleared)
    }
}

/// Result of an applying reconcile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub families: Vec<FamilySummary>,
    pub total_edges: usize,
    pub total_spof: usize,
    pub total_changed: usize,
}

impl ReconcileSummary {
    pub(crate) fn from_families(families: Vec<FamilySummary>) -> Self {
        Self {
            total_edges: families.iter().map(|f| f.total).sum(),
            total_spof: families.iter().map(|f| f.spof_count).sum(),
            total_changed: families.iter().map(|f| f.changed).sum(),
            families,
        }
    }

    pub fn family(&self, family: EdgeFamily) -> Option<&FamilySummary> {
        self.families.iter().find(|f| f.family == family)
    }
}

/// One family of a dry run: counts plus every evaluated edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyReport {
    #[serde(flatten)]
    pub summary: FamilySummary,
    pub edges: Vec<EdgeVerdict>,
}

impl FamilyReport {
    pub fn spof_edges(&self) -> impl Iterator<Item = &EdgeVerdict> {
        self.edges.iter().filter(|v| v.is_spof)
    }
}

/// Result of a dry run. Nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunReport {
    pub families: Vec<FamilyReport>,
    pub total_edges: usize,
    pub total_spof: usize,
    /// Flags an apply would change.
    pub total_changed: usize,
}

impl DryRunReport {
    pub(crate) fn from_families(families: Vec<FamilyReport>) -> Self {
        Self {
            total_edges: families.iter().map(|f| f.summary.total).sum(),
            total_spof: families.iter().map(|f| f.summary.spof_count).sum(),
            total_changed: families.iter().map(|f| f.summary.changed).sum(),
            families,
        }
    }

    pub fn family(&self, family: EdgeFamily) -> Option<&FamilyReport> {
        self.families.iter().find(|f| f.summary.family == family)
    }
}
