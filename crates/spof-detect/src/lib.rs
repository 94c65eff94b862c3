//! # spof-detect
//!
//! Classifies every dependency edge as a single point of failure or not,
//! reconciles the stored `is_spof` flags with the verdicts, and drives
//! that reconciliation periodically from a process-wide background loop.

pub mod reconciler;
pub mod rules;
pub mod scheduler;

pub use reconciler::{DryRunReport, FamilyReport, FamilySummary, ReconcileSummary, Reconciler};
pub use rules::{evaluate, EdgeVerdict, GraphIndex, RuleName};
pub use scheduler::{SchedulerStats, SpofScheduler, TickJob};
