//! Immutable read of the dependency graph consumed by one detection pass.

use serde::Serialize;

use super::collections::FxHashMap;
use super::{EdgeFamily, EdgeRecord, SupportAsset};

/// All four edge families plus the support assets they touch,
/// read from storage in one consistent view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphSnapshot {
    pub essential_support: Vec<EdgeRecord>,
    pub support_supplier: Vec<EdgeRecord>,
    pub support_site: Vec<EdgeRecord>,
    pub site_supplier: Vec<EdgeRecord>,
    pub supports: FxHashMap<i64, SupportAsset>,
}

impl GraphSnapshot {
    pub fn edges(&self, family: EdgeFamily) -> &[EdgeRecord] {
        match family {
            EdgeFamily::EssentialSupport => &self.essential_support,
            EdgeFamily::SupportSupplier => &self.support_supplier,
            EdgeFamily::SupportSite => &self.support_site,
            EdgeFamily::SiteSupplier => &self.site_supplier,
        }
    }

    pub fn edges_mut(&mut self, family: EdgeFamily) -> &mut Vec<EdgeRecord> {
        match family {
            EdgeFamily::EssentialSupport => &mut self.essential_support,
            EdgeFamily::SupportSupplier => &mut self.support_supplier,
            EdgeFamily::SupportSite => &mut self.support_site,
            EdgeFamily::SiteSupplier => &mut self.site_supplier,
        }
    }

    pub fn edge_count(&self) -> usize {
        EdgeFamily::ALL.iter().map(|f| self.edges(*f).len()).sum()
    }

    pub fn support(&self, id: i64) -> Option<&SupportAsset> {
        self.supports.get(&id)
    }
}
