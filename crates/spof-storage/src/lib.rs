//! # spof-storage
//!
//! SQLite implementation of the storage collaborator used by SPOF detection.
//! Owns the schema, keeps derived columns (inherited DIC, risk matrix) in
//! step with the writes that change their inputs, and serves consistent
//! graph snapshots to the detector.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use connection::{DatabaseManager, OpenMode};
pub use engine::SpofStorageEngine;
pub use queries::assets::{NewEssentialAsset, NewSupportAsset};
pub use queries::edges::{EdgeAttributes, NewEdge};
pub use queries::risk_criteria::NewRiskCriteria;
