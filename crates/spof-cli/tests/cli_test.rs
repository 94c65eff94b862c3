//! End-to-end runs of `detect_spof` against file-backed databases.

use std::path::{Path, PathBuf};

use clap::Parser;
use spof_cli::Cli;
use spof_core::types::{Criticality, Dic, EdgeFamily, Redundancy};
use spof_storage::{
    EdgeAttributes, NewEdge, NewEssentialAsset, NewSupportAsset, SpofStorageEngine,
};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    db: PathBuf,
    edge_id: i64,
}

/// One essential asset depending on one support asset through a critical,
/// non-redundant edge, inside scope "Finance". Scope "HR" is empty.
///
/// The edge is stored low and raised afterwards, so its stored flag is
/// still unset and only a reconcile sets it.
fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("graph.db");
    let engine = SpofStorageEngine::open(&db).unwrap();
    let finance = engine.create_scope("Finance", None).unwrap();
    engine.create_scope("HR", None).unwrap();
    let payroll = engine
        .create_essential_asset(&NewEssentialAsset::new("Payroll", Dic::new(2, 1, 1)))
        .unwrap();
    let database = engine
        .create_support_asset(&NewSupportAsset::new("Payroll DB").in_scope(finance))
        .unwrap();
    let edge_id = engine
        .create_edge(&NewEdge::new(
            EdgeFamily::EssentialSupport,
            payroll,
            database,
            EdgeAttributes::new(Criticality::Low),
        ))
        .unwrap();
    engine
        .update_edge(
            EdgeFamily::EssentialSupport,
            edge_id,
            &EdgeAttributes::new(Criticality::Critical).with_redundancy(Redundancy::None),
        )
        .unwrap();
    Fixture { dir, db, edge_id }
}

fn run(root: &Path, args: &[&str]) -> (u8, String, String) {
    let root = root.display().to_string();
    let mut argv = vec!["detect_spof", "--root", root.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = spof_cli::run(&cli, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn stored_flag(db: &Path, edge_id: i64) -> bool {
    let engine = SpofStorageEngine::open(db).unwrap();
    engine
        .get_edge(EdgeFamily::EssentialSupport, edge_id)
        .unwrap()
        .unwrap()
        .is_spof
}

#[test]
fn dry_run_lists_spof_edge_without_writing() {
    let f = fixture();
    let db = f.db.display().to_string();

    let (code, out, err) = run(f.dir.path(), &["--db", &db]);

    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.contains("Dry-run"));
    assert!(out.contains("Total SPOF detected: 1"));
    assert!(out.contains("Payroll → Payroll DB [no_redundancy_high_criticality]"));
    assert!(out.contains("essential_support: 1 SPOF / 1 edges"));
    assert!(!stored_flag(&f.db, f.edge_id));
}

#[test]
fn apply_writes_flag_and_reports_counts() {
    let f = fixture();
    let db = f.db.display().to_string();

    let (code, out, _) = run(f.dir.path(), &["--db", &db, "--apply"]);

    assert_eq!(code, 0);
    assert!(out.contains("applied"));
    assert!(out.contains("Total SPOF detected: 1"));
    assert!(out.contains("Total changed: 1"));
    assert!(stored_flag(&f.db, f.edge_id));

    let (_, second, _) = run(f.dir.path(), &["--db", &db, "--apply"]);
    assert!(second.contains("Total changed: 0"));
}

#[test]
fn scope_filter_narrows_the_run() {
    let f = fixture();
    let db = f.db.display().to_string();

    let (code, out, _) = run(f.dir.path(), &["--db", &db, "--scope", "HR"]);

    assert_eq!(code, 0);
    assert!(out.contains("(scope: HR)"));
    assert!(out.contains("Total SPOF detected: 0"));

    let (_, finance, _) = run(f.dir.path(), &["--db", &db, "--scope", "Finance"]);
    assert!(finance.contains("Total SPOF detected: 1"));
}

#[test]
fn unknown_scope_exits_two_and_writes_nothing() {
    let f = fixture();
    let db = f.db.display().to_string();

    let (code, out, err) = run(
        f.dir.path(),
        &["--db", &db, "--apply", "--scope", "Nowhere"],
    );

    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("not found"), "stderr: {err}");
    assert!(!stored_flag(&f.db, f.edge_id));
}

#[test]
fn json_dry_run_parses() {
    let f = fixture();
    let db = f.db.display().to_string();

    let (code, out, _) = run(f.dir.path(), &["--db", &db, "--json"]);

    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["total_spof"], 1);
    let families = report["families"].as_array().unwrap();
    let essential = families
        .iter()
        .find(|f| f["family"] == "essential_support")
        .unwrap();
    assert_eq!(essential["edges"][0]["label"], "Payroll → Payroll DB");
    assert_eq!(essential["edges"][0]["is_spof"], true);
}

#[test]
fn db_path_from_config_is_relative_to_root() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("spof.toml"),
        "[storage]\ndb_path = \"data/graph.db\"\n",
    )
    .unwrap();
    SpofStorageEngine::open(&dir.path().join("data/graph.db"))
        .unwrap()
        .create_supplier("Acme")
        .unwrap();

    let (code, out, err) = run(dir.path(), &[]);

    assert_eq!(code, 0, "stderr: {err}");
    assert!(out.contains("Total SPOF detected: 0"));
}

#[test]
fn missing_database_exits_one_and_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("typo").join("missing.db");
    let db = missing.display().to_string();

    let (code, out, err) = run(dir.path(), &["--db", &db, "--scope", "Nowhere"]);

    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.starts_with("error: "), "stderr: {err}");
    assert!(err.contains("does not exist"), "stderr: {err}");
    assert!(!missing.exists());
    assert!(!dir.path().join("typo").exists());
}

#[test]
fn invalid_config_exits_one() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("spof.toml"), "[storage\n").unwrap();

    let (code, out, err) = run(dir.path(), &[]);

    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.starts_with("error: "));
}

#[test]
fn watch_conflicts_with_one_shot_flags() {
    for flag in ["--apply", "--json"] {
        assert!(Cli::try_parse_from(["detect_spof", "--watch", flag]).is_err());
    }
    assert!(Cli::try_parse_from(["detect_spof", "--watch", "--scope", "HR"]).is_err());
    assert!(Cli::try_parse_from(["detect_spof", "--watch", "--db", "x.db"]).is_ok());
}

#[test]
fn interval_only_applies_to_watch() {
    assert!(Cli::try_parse_from(["detect_spof", "--interval", "60"]).is_err());
    let cli = Cli::try_parse_from(["detect_spof", "--watch", "--interval", "60"]).unwrap();
    assert_eq!(cli.interval, Some(60));
}

#[test]
fn zero_interval_is_rejected_before_watching() {
    let f = fixture();
    let db = f.db.display().to_string();

    let (code, out, err) = run(f.dir.path(), &["--db", &db, "--watch", "--interval", "0"]);

    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.contains("refresh_interval_secs"), "stderr: {err}");
}
