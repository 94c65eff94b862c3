//! Risk-matrix evaluation: symmetric rebuild from ordered scales and
//! (likelihood, impact) → risk-level lookup.

pub mod criteria;
pub mod evaluator;
pub mod fallback;
pub mod scale;

pub use criteria::{RiskCriteria, RiskLevel};
pub use evaluator::{MatrixCell, RiskMatrix};
pub use fallback::{fallback_cell, fallback_matrix, FallbackCell};
pub use scale::{validate_scale, ScaleLevel};
