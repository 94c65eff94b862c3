//! Reconciler: turns rule-engine verdicts into the minimal set of
//! `is_spof` writes.
//!
//! One snapshot is read per run and every verdict is computed before the
//! first write. Each family is then written with at most two bulk updates
//! (newly SPOF, no longer SPOF). Families commit independently; a failure
//! part-way leaves the completed families consistent and the next run
//! finishes the rest.

pub mod report;

use spof_core::errors::DetectionError;
use spof_core::traits::GraphStore;
use spof_core::types::{EdgeFamily, Scope};

use crate::rules::{evaluate, EdgeVerdict};

pub use report::{DryRunReport, FamilyReport, FamilySummary, ReconcileSummary};

pub struct Reconciler<S> {
    store: S,
}

impl<S: GraphStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a scope by exact name. `None` means no filter.
    pub fn resolve_scope(&self, name: Option<&str>) -> Result<Option<Scope>, DetectionError> {
        let Some(name) = name else {
            return Ok(None);
        };
        match self.store.find_scope_by_name(name)? {
            Some(scope) => Ok(Some(scope)),
            None => Err(DetectionError::ScopeNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Evaluate the graph and write the flag differences.
    pub fn apply(&self, scope: Option<i64>) -> Result<ReconcileSummary, DetectionError> {
        let snapshot = self.store.load_snapshot(scope)?;
        let verdicts = evaluate(&snapshot);

        let mut families = Vec::with_capacity(verdicts.len());
        for (family, family_verdicts) in &verdicts {
            families.push(self.apply_family(*family, family_verdicts)?);
        }

        let summary = ReconcileSummary::from_families(families);
        tracing::debug!(
            scope = ?scope,
            total_edges = summary.total_edges,
            total_spof = summary.total_spof,
            total_changed = summary.total_changed,
            "SPOF flags reconciled"
        );
        Ok(summary)
    }

    fn apply_family(
        &self,
        family: EdgeFamily,
        verdicts: &[EdgeVerdict],
    ) -> Result<FamilySummary, DetectionError> {
        let (to_set, to_clear): (Vec<&EdgeVerdict>, Vec<&EdgeVerdict>) = verdicts
            .iter()
            .filter(|v| v.changed())
            .partition(|v| v.is_spof);
        let to_set: Vec<i64> = to_set.into_iter().map(|v| v.id).collect();
        let to_clear: Vec<i64> = to_clear.into_iter().map(|v| v.id).collect();

        let added = self.write_flags(family, &to_set, true)?;
        let cleared = self.write_flags(family, &to_clear, false)?;

        let spof_count = verdicts.iter().filter(|v| v.is_spof).count();
        tracing::debug!(
            %family,
            total = verdicts.len(),
            spof_count,
            added,
            cleared,
            "family reconciled"
        );
        Ok(FamilySummary::new(
            family,
            verdicts.len(),
            spof_count,
            added,
            cleared,
        ))
    }

    fn write_flags(
        &self,
        family: EdgeFamily,
        ids: &[i64],
        value: bool,
    ) -> Result<usize, DetectionError> {
        if ids.is_empty() {
            return Ok(0);
        }
        Ok(self.store.set_spof_flags(family, ids, value)?)
    }

    /// Evaluate the graph without writing anything.
    pub fn dry_run(&self, scope: Option<i64>) -> Result<DryRunReport, DetectionError> {
        let snapshot = self.store.load_snapshot(scope)?;
        let families = evaluate(&snapshot)
            .into_iter()
            .map(|(family, edges)| FamilyReport {
                summary: FamilySummary::from_verdicts(family, &edges),
                edges,
            })
            .collect();
        Ok(DryRunReport::from_families(families))
    }
}
