//! Inherited-DIC propagation through the storage write paths.

use spof_core::types::{Criticality, Dic, EdgeFamily};
use spof_storage::{EdgeAttributes, NewEdge, NewEssentialAsset, NewSupportAsset, SpofStorageEngine};

fn engine() -> SpofStorageEngine {
    SpofStorageEngine::open_in_memory().unwrap()
}

fn link(engine: &SpofStorageEngine, essential: i64, support: i64) -> i64 {
    engine
        .create_edge(&NewEdge::new(
            EdgeFamily::EssentialSupport,
            essential,
            support,
            EdgeAttributes::new(Criticality::Medium),
        ))
        .unwrap()
}

fn inherited(engine: &SpofStorageEngine, support: i64) -> Dic {
    engine.get_support_asset(support).unwrap().unwrap().inherited
}

#[test]
fn new_support_starts_at_zero() {
    let engine = engine();
    let server = engine
        .create_support_asset(&NewSupportAsset::new("srv-01"))
        .unwrap();
    assert_eq!(inherited(&engine, server), Dic::ZERO);
}

#[test]
fn create_then_delete_edge_round_trips_to_zero() {
    let engine = engine();
    let erp = engine
        .create_essential_asset(&NewEssentialAsset::new("ERP", Dic::new(3, 1, 4)))
        .unwrap();
    let server = engine
        .create_support_asset(&NewSupportAsset::new("srv-01"))
        .unwrap();

    let edge = link(&engine, erp, server);
    assert_eq!(inherited(&engine, server), Dic::new(3, 1, 4));

    engine
        .delete_edge(EdgeFamily::EssentialSupport, edge)
        .unwrap();
    assert_eq!(inherited(&engine, server), Dic::ZERO);
}

#[test]
fn deleting_the_dominant_edge_falls_back_to_the_remaining_one() {
    let engine = engine();
    let high = engine
        .create_essential_asset(&NewEssentialAsset::new("Payroll", Dic::new(4, 4, 4)))
        .unwrap();
    let low = engine
        .create_essential_asset(&NewEssentialAsset::new("Wiki", Dic::new(0, 1, 0)))
        .unwrap();
    let server = engine
        .create_support_asset(&NewSupportAsset::new("srv-01"))
        .unwrap();

    let first = link(&engine, high, server);
    link(&engine, low, server);
    assert_eq!(inherited(&engine, server), Dic::new(4, 4, 4));

    engine
        .delete_edge(EdgeFamily::EssentialSupport, first)
        .unwrap();
    assert_eq!(inherited(&engine, server), Dic::new(0, 1, 0));
}

#[test]
fn raising_essential_confidentiality_reaches_every_linked_support() {
    let engine = engine();
    let erp = engine
        .create_essential_asset(&NewEssentialAsset::new("ERP", Dic::new(1, 2, 2)))
        .unwrap();
    let a = engine
        .create_support_asset(&NewSupportAsset::new("srv-a"))
        .unwrap();
    let b = engine
        .create_support_asset(&NewSupportAsset::new("srv-b"))
        .unwrap();
    let unrelated = engine
        .create_support_asset(&NewSupportAsset::new("srv-c"))
        .unwrap();
    link(&engine, erp, a);
    link(&engine, erp, b);

    let touched = engine.update_essential_dic(erp, Dic::new(4, 2, 2)).unwrap();

    assert_eq!(touched.len(), 2);
    assert_eq!(inherited(&engine, a).confidentiality, 4);
    assert_eq!(inherited(&engine, b).confidentiality, 4);
    assert_eq!(inherited(&engine, unrelated), Dic::ZERO);
}

#[test]
fn deleting_an_essential_asset_recomputes_its_supports() {
    let engine = engine();
    let erp = engine
        .create_essential_asset(&NewEssentialAsset::new("ERP", Dic::new(2, 3, 4)))
        .unwrap();
    let crm = engine
        .create_essential_asset(&NewEssentialAsset::new("CRM", Dic::new(1, 1, 1)))
        .unwrap();
    let server = engine
        .create_support_asset(&NewSupportAsset::new("srv-01"))
        .unwrap();
    link(&engine, erp, server);
    link(&engine, crm, server);

    engine.delete_essential_asset(erp).unwrap();

    assert_eq!(inherited(&engine, server), Dic::new(1, 1, 1));
    assert!(engine
        .list_edges(EdgeFamily::EssentialSupport)
        .unwrap()
        .iter()
        .all(|e| e.source_id == crm));
}

#[test]
fn out_of_range_dic_is_rejected_before_writing() {
    let engine = engine();
    let err = engine
        .create_essential_asset(&NewEssentialAsset::new("ERP", Dic::new(5, 0, 0)))
        .unwrap_err();
    assert!(err.to_string().contains("outside 0..=4"));

    let erp = engine
        .create_essential_asset(&NewEssentialAsset::new("ERP", Dic::new(1, 1, 1)))
        .unwrap();
    assert!(engine.update_essential_dic(erp, Dic::new(0, 9, 0)).is_err());
    assert_eq!(
        engine.get_essential_asset(erp).unwrap().unwrap().dic,
        Dic::new(1, 1, 1)
    );
}

#[test]
fn updating_an_edge_keeps_inherited_levels_consistent() {
    let engine = engine();
    let erp = engine
        .create_essential_asset(&NewEssentialAsset::new("ERP", Dic::new(2, 2, 3)))
        .unwrap();
    let server = engine
        .create_support_asset(&NewSupportAsset::new("srv-01"))
        .unwrap();
    let edge = link(&engine, erp, server);

    engine
        .update_edge(
            EdgeFamily::EssentialSupport,
            edge,
            &EdgeAttributes::new(Criticality::Critical).with_dependency_type("hosting"),
        )
        .unwrap();

    let stored = engine
        .get_edge(EdgeFamily::EssentialSupport, edge)
        .unwrap()
        .unwrap();
    assert_eq!(stored.criticality, Criticality::Critical);
    assert_eq!(stored.dependency_type.as_deref(), Some("hosting"));
    assert_eq!(inherited(&engine, server), Dic::new(2, 2, 3));
}
