//! Risk criteria persistence: derived matrix and the single default.

use spof_core::matrix::ScaleLevel;
use spof_core::traits::GraphStore;
use spof_storage::{NewRiskCriteria, SpofStorageEngine};

fn scale(names: &[&str]) -> Vec<ScaleLevel> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| ScaleLevel::new(i as u32 + 1, *name))
        .collect()
}

fn criteria(name: &str, is_default: bool) -> NewRiskCriteria {
    NewRiskCriteria {
        name: name.to_string(),
        likelihood: scale(&["rare", "unlikely", "possible", "likely"]),
        impact: scale(&["minor", "moderate", "major", "severe"]),
        risk_levels: vec![
            ScaleLevel::new(1, "low").with_color("#4caf50"),
            ScaleLevel::new(2, "medium").with_color("#ffc107"),
            ScaleLevel::new(3, "high").with_color("#ff9800"),
            ScaleLevel::new(4, "critical").with_color("#f44336"),
        ],
        is_default,
    }
}

#[test]
fn created_criteria_has_a_complete_symmetric_matrix() {
    let engine = SpofStorageEngine::open_in_memory().unwrap();
    let id = engine.create_risk_criteria(&criteria("ISO 27005", true)).unwrap();

    let loaded = engine.load_risk_criteria(id).unwrap().unwrap();
    assert_eq!(loaded.matrix.len(), 16);
    assert!(loaded.is_consistent());
    for l in 1..=4 {
        for i in 1..=4 {
            assert_eq!(loaded.matrix.lookup(l, i), loaded.matrix.lookup(i, l));
        }
    }
    assert_eq!(loaded.risk_level(1, 1).name(), "low");
    assert_eq!(loaded.risk_level(4, 4).name(), "critical");
    assert_eq!(loaded.risk_levels[3].color.as_deref(), Some("#f44336"));
}

#[test]
fn replacing_scales_rebuilds_the_matrix() {
    let engine = SpofStorageEngine::open_in_memory().unwrap();
    let id = engine.create_risk_criteria(&criteria("ISO 27005", true)).unwrap();

    let three = scale(&["low", "mid", "high"]);
    let risks = scale(&["acceptable", "tolerable", "unacceptable"]);
    engine
        .replace_risk_scales(id, &three, &three, &risks)
        .unwrap();

    let loaded = engine.load_risk_criteria(id).unwrap().unwrap();
    assert_eq!(loaded.matrix.len(), 9);
    assert!(loaded.is_consistent());
    assert_eq!(loaded.matrix.lookup(4, 4), None);
    assert_eq!(loaded.risk_level(3, 3).name(), "unacceptable");
}

#[test]
fn invalid_scale_is_rejected_and_keeps_previous_matrix() {
    let engine = SpofStorageEngine::open_in_memory().unwrap();
    let id = engine.create_risk_criteria(&criteria("ISO 27005", true)).unwrap();

    let unordered = vec![ScaleLevel::new(2, "b"), ScaleLevel::new(1, "a")];
    let risks = scale(&["low"]);
    assert!(engine
        .replace_risk_scales(id, &unordered, &unordered, &risks)
        .is_err());

    assert_eq!(engine.load_risk_criteria(id).unwrap().unwrap().matrix.len(), 16);
}

#[test]
fn only_one_criteria_is_default() {
    let engine = SpofStorageEngine::open_in_memory().unwrap();
    let first = engine.create_risk_criteria(&criteria("first", true)).unwrap();
    let second = engine.create_risk_criteria(&criteria("second", true)).unwrap();

    assert_eq!(engine.default_risk_criteria().unwrap().unwrap().id, second);
    assert!(!engine.load_risk_criteria(first).unwrap().unwrap().is_default);

    engine.set_default_risk_criteria(first).unwrap();
    assert_eq!(engine.default_risk_criteria().unwrap().unwrap().id, first);
    assert!(!engine.load_risk_criteria(second).unwrap().unwrap().is_default);
}

#[test]
fn lookup_without_criteria_is_surfaced_as_missing() {
    let engine = SpofStorageEngine::open_in_memory().unwrap();
    assert!(engine.default_risk_criteria().unwrap().is_none());
    assert_eq!(engine.risk_level_name(None, 1, 1).unwrap(), None);

    let id = engine.create_risk_criteria(&criteria("ISO 27005", false)).unwrap();
    assert_eq!(engine.risk_level_name(None, 1, 1).unwrap(), None);
    assert_eq!(
        engine.risk_level_name(Some(id), 9, 1).unwrap().as_deref(),
        Some("unknown")
    );
    assert_eq!(
        engine.risk_level_name(Some(id), 1, 1).unwrap().as_deref(),
        Some("low")
    );
}
