//! Risk criteria: three scales plus the matrix derived from them.

use serde::Serialize;

use super::{RiskMatrix, ScaleLevel};

/// A named tuple of likelihood scale, impact scale, risk-level scale and matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskCriteria {
    pub id: i64,
    pub name: String,
    pub likelihood: Vec<ScaleLevel>,
    pub impact: Vec<ScaleLevel>,
    pub risk_levels: Vec<ScaleLevel>,
    pub matrix: RiskMatrix,
    pub is_default: bool,
}

/// Outcome of a risk-level lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RiskLevel<'a> {
    Known(&'a ScaleLevel),
    Unknown,
}

impl RiskLevel<'_> {
    pub fn name(&self) -> &str {
        match self {
            RiskLevel::Known(level) => &level.name,
            RiskLevel::Unknown => "unknown",
        }
    }

    pub fn level(&self) -> Option<u32> {
        match self {
            RiskLevel::Known(level) => Some(level.level),
            RiskLevel::Unknown => None,
        }
    }
}

impl RiskCriteria {
    /// Regenerate the matrix from the current scales.
    pub fn rebuild_matrix(&mut self) {
        self.matrix
            .rebuild(&self.likelihood, &self.impact, &self.risk_levels);
    }

    /// Risk level for `(likelihood, impact)`, or `Unknown` when either
    /// coordinate is off-scale or the stored value names no declared level.
    pub fn risk_level(&self, likelihood: u32, impact: u32) -> RiskLevel<'_> {
        self.matrix
            .lookup(likelihood, impact)
            .and_then(|value| self.risk_levels.iter().find(|r| r.level == value))
            .map_or(RiskLevel::Unknown, RiskLevel::Known)
    }

    pub fn is_consistent(&self) -> bool {
        self.matrix
            .is_complete_for(&self.likelihood, &self.impact, &self.risk_levels)
    }
}
