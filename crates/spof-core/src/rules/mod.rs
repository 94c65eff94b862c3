//! SPOF rule table.
//!
//! Rules are rows of [`RULES`]: an edge family, a pure predicate over the
//! edge and a precomputed [`GraphIndex`], and the rule name reported when
//! it matches. The detector walks whole snapshots with it; storage runs it
//! once on each newly created edge.

pub mod index;
pub mod name;
pub mod table;

pub use index::GraphIndex;
pub use name::RuleName;
pub use table::{rules_for, Rule, RULES};

use crate::types::collections::SmallVec2;
use crate::types::EdgeRecord;

/// Names of the rules `edge` matches, in table order. Empty means not a SPOF.
pub fn matching_rules(edge: &EdgeRecord, index: &GraphIndex<'_>) -> SmallVec2<RuleName> {
    rules_for(edge.family)
        .filter(|rule| (rule.matches)(edge, index))
        .map(|rule| rule.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Criticality, EdgeFamily, GraphSnapshot, Redundancy};

    fn site_supplier(id: i64, site: i64, criticality: Criticality) -> EdgeRecord {
        EdgeRecord {
            id,
            family: EdgeFamily::SiteSupplier,
            source_id: site,
            source_name: format!("site-{site}"),
            target_id: 100 + id,
            target_name: format!("supplier-{id}"),
            dependency_type: None,
            criticality,
            redundancy: Some(Redundancy::None),
            is_spof: false,
        }
    }

    #[test]
    fn only_rules_of_the_edge_family_are_tried() {
        let mut snapshot = GraphSnapshot::default();
        snapshot.site_supplier.push(site_supplier(1, 7, Criticality::High));
        let index = GraphIndex::build(&snapshot);

        let rules = matching_rules(&snapshot.site_supplier[0], &index);
        assert_eq!(rules.as_slice(), &[RuleName::SoleSiteSupplierHighCriticality]);
    }

    #[test]
    fn second_supplier_on_the_site_clears_the_match() {
        let mut snapshot = GraphSnapshot::default();
        snapshot.site_supplier.push(site_supplier(1, 7, Criticality::Critical));
        snapshot.site_supplier.push(site_supplier(2, 7, Criticality::Low));
        let index = GraphIndex::build(&snapshot);

        assert!(matching_rules(&snapshot.site_supplier[0], &index).is_empty());
    }
}
