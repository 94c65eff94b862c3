//! Property: verdicts do not depend on the order edges are listed in.

use proptest::prelude::*;
use spof_core::types::{
    Criticality, Dic, EdgeFamily, EdgeRecord, GraphSnapshot, LifecycleState, Redundancy,
    SupportAsset,
};
use spof_detect::evaluate;

fn criticality() -> impl Strategy<Value = Criticality> {
    prop::sample::select(Criticality::ALL.to_vec())
}

fn redundancy() -> impl Strategy<Value = Option<Redundancy>> {
    prop::option::of(prop::sample::select(Redundancy::ALL.to_vec()))
}

/// Small node id ranges so edges share endpoints and counting rules fire.
fn edges(family: EdgeFamily, offset: i64) -> impl Strategy<Value = Vec<EdgeRecord>> {
    prop::collection::vec((0..4i64, 0..4i64, criticality(), redundancy(), any::<bool>()), 0..12)
        .prop_map(move |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(n, (source, target, criticality, redundancy, is_spof))| EdgeRecord {
                    id: offset + n as i64,
                    family,
                    source_id: source,
                    source_name: format!("s{source}"),
                    target_id: target,
                    target_name: format!("t{target}"),
                    dependency_type: None,
                    criticality,
                    redundancy,
                    is_spof,
                })
                .collect()
        })
}

fn snapshot() -> impl Strategy<Value = GraphSnapshot> {
    (
        edges(EdgeFamily::EssentialSupport, 0),
        edges(EdgeFamily::SupportSupplier, 100),
        edges(EdgeFamily::SupportSite, 200),
        edges(EdgeFamily::SiteSupplier, 300),
        prop::collection::vec(0..=4u8, 4),
    )
        .prop_map(|(es, ss, site, site_sup, availability)| {
            let mut snapshot = GraphSnapshot {
                essential_support: es,
                support_supplier: ss,
                support_site: site,
                site_supplier: site_sup,
                ..Default::default()
            };
            for (id, a) in availability.into_iter().enumerate() {
                let id = id as i64;
                snapshot.supports.insert(
                    id,
                    SupportAsset {
                        id,
                        name: format!("s{id}"),
                        scope_id: None,
                        parent_id: None,
                        state: LifecycleState::Active,
                        inherited: Dic::new(0, 0, a),
                    },
                );
            }
            snapshot
        })
}

proptest! {
    #[test]
    fn verdicts_ignore_edge_order(snapshot in snapshot(), seed in any::<u64>()) {
        let mut shuffled = snapshot.clone();
        for family in EdgeFamily::ALL {
            let edges = shuffled.edges_mut(family);
            edges.reverse();
            if !edges.is_empty() {
                let len = edges.len();
                edges.rotate_left((seed as usize) % len);
            }
        }
        prop_assert_eq!(evaluate(&snapshot), evaluate(&shuffled));
    }

    #[test]
    fn spof_iff_some_rule_fires(snapshot in snapshot()) {
        for verdicts in evaluate(&snapshot).values() {
            for v in verdicts {
                prop_assert_eq!(v.is_spof, !v.rules.is_empty());
            }
        }
    }
}
