#![allow(dead_code)]

use std::sync::Arc;

use spof_core::types::{Criticality, Dic, EdgeFamily, Redundancy};
use spof_detect::Reconciler;
use spof_storage::{EdgeAttributes, NewEdge, NewEssentialAsset, NewSupportAsset, SpofStorageEngine};

/// In-memory graph with terse constructors.
pub struct Graph {
    pub engine: Arc<SpofStorageEngine>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            engine: Arc::new(SpofStorageEngine::open_in_memory().unwrap()),
        }
    }

    pub fn scope(&self, name: &str, parent: Option<i64>) -> i64 {
        self.engine.create_scope(name, parent).unwrap()
    }

    pub fn essential(&self, name: &str, dic: Dic) -> i64 {
        self.engine
            .create_essential_asset(&NewEssentialAsset::new(name, dic))
            .unwrap()
    }

    pub fn support(&self, name: &str) -> i64 {
        self.engine
            .create_support_asset(&NewSupportAsset::new(name))
            .unwrap()
    }

    pub fn support_in(&self, name: &str, scope: i64) -> i64 {
        self.engine
            .create_support_asset(&NewSupportAsset::new(name).in_scope(scope))
            .unwrap()
    }

    pub fn supplier(&self, name: &str) -> i64 {
        self.engine.create_supplier(name).unwrap()
    }

    pub fn site(&self, name: &str) -> i64 {
        self.engine.create_site(name).unwrap()
    }

    pub fn edge(
        &self,
        family: EdgeFamily,
        source: i64,
        target: i64,
        criticality: Criticality,
        redundancy: Option<Redundancy>,
    ) -> i64 {
        let mut attributes = EdgeAttributes::new(criticality);
        attributes.redundancy = redundancy;
        self.engine
            .create_edge(&NewEdge::new(family, source, target, attributes))
            .unwrap()
    }

    pub fn set_redundancy(&self, family: EdgeFamily, id: i64, redundancy: Redundancy) {
        let edge = self.engine.get_edge(family, id).unwrap().unwrap();
        let attributes = EdgeAttributes::new(edge.criticality).with_redundancy(redundancy);
        self.engine.update_edge(family, id, &attributes).unwrap();
    }

    /// Attribute edits leave the stored flag as it was.
    pub fn set_criticality(&self, family: EdgeFamily, id: i64, criticality: Criticality) {
        let edge = self.engine.get_edge(family, id).unwrap().unwrap();
        let mut attributes = EdgeAttributes::new(criticality);
        attributes.redundancy = edge.redundancy;
        self.engine.update_edge(family, id, &attributes).unwrap();
    }

    /// An edge stored unflagged that the rules now call a SPOF: created at
    /// low criticality, then raised.
    pub fn unflagged_critical_edge(
        &self,
        family: EdgeFamily,
        source: i64,
        target: i64,
        redundancy: Option<Redundancy>,
    ) -> i64 {
        let id = self.edge(family, source, target, Criticality::Low, redundancy);
        self.set_criticality(family, id, Criticality::Critical);
        id
    }

    pub fn reconciler(&self) -> Reconciler<Arc<SpofStorageEngine>> {
        Reconciler::new(Arc::clone(&self.engine))
    }

    pub fn is_spof(&self, family: EdgeFamily, id: i64) -> bool {
        self.engine.get_edge(family, id).unwrap().unwrap().is_spof
    }
}
