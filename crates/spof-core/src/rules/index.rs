//! Per-node incidence counts precomputed from a snapshot.

use crate::types::collections::FxHashMap;
use crate::types::{Dic, EdgeFamily, GraphSnapshot, SupportAsset};

/// Counts every rule predicate needs, built in one pass over the snapshot.
/// Independent of edge order.
#[derive(Debug, Default)]
pub struct GraphIndex<'a> {
    /// support id → incident essential↔support edges
    essential_fan_in: FxHashMap<i64, u32>,
    /// support id → incident support↔supplier edges with partial/full redundancy
    redundant_suppliers: FxHashMap<i64, u32>,
    /// support id → incident support↔site edges
    sites: FxHashMap<i64, u32>,
    /// site id → incident site↔supplier edges
    site_suppliers: FxHashMap<i64, u32>,
    supports: Option<&'a FxHashMap<i64, SupportAsset>>,
}

impl<'a> GraphIndex<'a> {
    pub fn build(snapshot: &'a GraphSnapshot) -> Self {
        let mut index = GraphIndex {
            supports: Some(&snapshot.supports),
            ..Default::default()
        };

        for edge in snapshot.edges(EdgeFamily::EssentialSupport) {
            *index.essential_fan_in.entry(edge.target_id).or_default() += 1;
        }
        for edge in snapshot.edges(EdgeFamily::SupportSupplier) {
            if !edge.lacks_redundancy() {
                *index.redundant_suppliers.entry(edge.source_id).or_default() += 1;
            }
        }
        for edge in snapshot.edges(EdgeFamily::SupportSite) {
            *index.sites.entry(edge.source_id).or_default() += 1;
        }
        for edge in snapshot.edges(EdgeFamily::SiteSupplier) {
            *index.site_suppliers.entry(edge.source_id).or_default() += 1;
        }
        index
    }

    pub fn essential_fan_in(&self, support_id: i64) -> u32 {
        count(&self.essential_fan_in, support_id)
    }

    pub fn redundant_suppliers(&self, support_id: i64) -> u32 {
        count(&self.redundant_suppliers, support_id)
    }

    pub fn site_count(&self, support_id: i64) -> u32 {
        count(&self.sites, support_id)
    }

    pub fn site_supplier_count(&self, site_id: i64) -> u32 {
        count(&self.site_suppliers, site_id)
    }

    /// Inherited DIC of a support asset; zero when the asset is not in the snapshot.
    pub fn inherited(&self, support_id: i64) -> Dic {
        self.supports
            .and_then(|supports| supports.get(&support_id))
            .map_or(Dic::ZERO, |s| s.inherited)
    }
}

fn count(map: &FxHashMap<i64, u32>, id: i64) -> u32 {
    map.get(&id).copied().unwrap_or(0)
}
