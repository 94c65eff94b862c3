//! SPOF rule engine.
//!
//! The predicates live in [`spof_core::rules`]; this module applies them to
//! a whole snapshot. One [`GraphIndex`] is built per pass and each family
//! is walked once, so a detection pass is linear in the number of edges.

pub mod engine;

pub use engine::{evaluate, evaluate_family, EdgeVerdict};
pub use spof_core::rules::{matching_rules, GraphIndex, Rule, RuleName, RULES};
