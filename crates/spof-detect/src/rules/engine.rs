//! Shared evaluator over the rule table.

use std::collections::BTreeMap;

use serde::Serialize;
use spof_core::types::collections::SmallVec2;
use spof_core::types::{EdgeFamily, EdgeRecord, GraphSnapshot};

use super::{matching_rules, GraphIndex, RuleName};

/// Outcome of the rule engine for one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeVerdict {
    pub id: i64,
    pub family: EdgeFamily,
    pub label: String,
    /// Matching rules in table order.
    pub rules: SmallVec2<RuleName>,
    /// The verdict: true iff `rules` is non-empty.
    pub is_spof: bool,
    /// The flag stored when the snapshot was read.
    #[serde(skip)]
    pub was_spof: bool,
}

impl EdgeVerdict {
    pub fn changed(&self) -> bool {
        self.is_spof != self.was_spof
    }
}

fn verdict(edge: &EdgeRecord, index: &GraphIndex<'_>) -> EdgeVerdict {
    let rules = matching_rules(edge, index);
    EdgeVerdict {
        id: edge.id,
        family: edge.family,
        label: edge.label(),
        is_spof: !rules.is_empty(),
        rules,
        was_spof: edge.is_spof,
    }
}

/// Verdicts for one family, ordered by edge id.
pub fn evaluate_family(
    snapshot: &GraphSnapshot,
    index: &GraphIndex<'_>,
    family: EdgeFamily,
) -> Vec<EdgeVerdict> {
    let mut verdicts: Vec<EdgeVerdict> = snapshot
        .edges(family)
        .iter()
        .map(|edge| verdict(edge, index))
        .collect();
    verdicts.sort_unstable_by_key(|v| v.id);
    verdicts
}

/// Verdicts for all four families. Identical for any ordering of the
/// snapshot's edge lists.
pub fn evaluate(snapshot: &GraphSnapshot) -> BTreeMap<EdgeFamily, Vec<EdgeVerdict>> {
    let index = GraphIndex::build(snapshot);
    EdgeFamily::ALL
        .into_iter()
        .map(|family| (family, evaluate_family(snapshot, &index, family)))
        .collect()
}
