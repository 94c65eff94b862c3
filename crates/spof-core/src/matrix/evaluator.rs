//! The risk matrix and its symmetric rebuild.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ScaleLevel;

/// One (likelihood, impact) → risk cell, for persistence and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub likelihood: u32,
    pub impact: u32,
    pub risk: u32,
}

/// Mapping from (likelihood level, impact level) to a risk level value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskMatrix {
    cells: BTreeMap<(u32, u32), u32>,
}

impl RiskMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matrix with [`RiskMatrix::rebuild`].
    pub fn symmetric(
        likelihood: &[ScaleLevel],
        impact: &[ScaleLevel],
        risk_levels: &[ScaleLevel],
    ) -> Self {
        let mut matrix = Self::new();
        matrix.rebuild(likelihood, impact, risk_levels);
        matrix
    }

    /// Replace every cell using the symmetric score
    /// `score = l + i − 1` over `max_score = max(L) + max(I) − 1`:
    ///
    /// `index = ceil(score × |R| / max_score) − 1`, clamped to `[0, |R| − 1]`.
    ///
    /// Any empty input leaves the matrix empty.
    pub fn rebuild(
        &mut self,
        likelihood: &[ScaleLevel],
        impact: &[ScaleLevel],
        risk_levels: &[ScaleLevel],
    ) {
        self.cells.clear();

        let (Some(max_l), Some(max_i)) = (
            likelihood.iter().map(|s| s.level).max(),
            impact.iter().map(|s| s.level).max(),
        ) else {
            return;
        };
        if risk_levels.is_empty() {
            return;
        }

        let max_score = (u64::from(max_l) + u64::from(max_i)).saturating_sub(1).max(1);
        let count = risk_levels.len() as u64;

        for l in likelihood {
            for i in impact {
                let score = (u64::from(l.level) + u64::from(i.level)).saturating_sub(1);
                let index = (score * count)
                    .div_ceil(max_score)
                    .saturating_sub(1)
                    .min(count - 1) as usize;
                self.cells.insert((l.level, i.level), risk_levels[index].level);
            }
        }
    }

    /// Stored risk level for `(likelihood, impact)`; `None` when either
    /// coordinate is absent.
    pub fn lookup(&self, likelihood: u32, impact: u32) -> Option<u32> {
        self.cells.get(&(likelihood, impact)).copied()
    }

    pub fn insert(&mut self, cell: MatrixCell) {
        self.cells.insert((cell.likelihood, cell.impact), cell.risk);
    }

    pub fn cells(&self) -> impl Iterator<Item = MatrixCell> + '_ {
        self.cells.iter().map(|(&(likelihood, impact), &risk)| MatrixCell {
            likelihood,
            impact,
            risk,
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Exactly one cell per (l, i) pair of the given scales, each holding a
    /// declared risk level, and nothing else.
    pub fn is_complete_for(
        &self,
        likelihood: &[ScaleLevel],
        impact: &[ScaleLevel],
        risk_levels: &[ScaleLevel],
    ) -> bool {
        if self.cells.len() != likelihood.len() * impact.len() {
            return false;
        }
        likelihood.iter().all(|l| {
            impact.iter().all(|i| {
                self.lookup(l.level, i.level)
                    .is_some_and(|r| risk_levels.iter().any(|rl| rl.level == r))
            })
        })
    }
}

impl FromIterator<MatrixCell> for RiskMatrix {
    fn from_iter<T: IntoIterator<Item = MatrixCell>>(iter: T) -> Self {
        let mut matrix = Self::new();
        for cell in iter {
            matrix.insert(cell);
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(n: u32) -> Vec<ScaleLevel> {
        (1..=n).map(|l| ScaleLevel::new(l, format!("S{l}"))).collect()
    }

    #[test]
    fn four_by_four_with_four_risk_levels() {
        let matrix = RiskMatrix::symmetric(&scale(4), &scale(4), &scale(4));
        // max_score = 7; score(l,i) = l+i-1; index = ceil(score*4/7)-1
        let expected = [
            [1, 2, 2, 3],
            [2, 2, 3, 3],
            [2, 3, 3, 4],
            [3, 3, 4, 4],
        ];
        for l in 1..=4u32 {
            for i in 1..=4u32 {
                assert_eq!(
                    matrix.lookup(l, i),
                    Some(expected[(l - 1) as usize][(i - 1) as usize]),
                    "cell ({l}, {i})"
                );
            }
        }
    }

    #[test]
    fn empty_scale_yields_empty_matrix() {
        assert!(RiskMatrix::symmetric(&[], &scale(3), &scale(3)).is_empty());
        assert!(RiskMatrix::symmetric(&scale(3), &scale(3), &[]).is_empty());
    }

    #[test]
    fn rebuild_replaces_previous_cells() {
        let mut matrix = RiskMatrix::symmetric(&scale(5), &scale(5), &scale(3));
        assert_eq!(matrix.len(), 25);
        matrix.rebuild(&scale(2), &scale(3), &scale(3));
        assert_eq!(matrix.len(), 6);
        assert_eq!(matrix.lookup(5, 5), None);
        assert!(matrix.is_complete_for(&scale(2), &scale(3), &scale(3)));
    }

    #[test]
    fn lookup_outside_scales_is_none() {
        let matrix = RiskMatrix::symmetric(&scale(3), &scale(3), &scale(3));
        assert_eq!(matrix.lookup(0, 1), None);
        assert_eq!(matrix.lookup(1, 9), None);
    }

    #[test]
    fn uses_declared_risk_values_not_positions() {
        let risk = vec![
            ScaleLevel::new(10, "low"),
            ScaleLevel::new(20, "high"),
        ];
        let matrix = RiskMatrix::symmetric(&scale(2), &scale(2), &risk);
        assert_eq!(matrix.lookup(1, 1), Some(10));
        assert_eq!(matrix.lookup(2, 2), Some(20));
    }

    #[test]
    fn incomplete_matrix_is_detected() {
        let mut matrix = RiskMatrix::symmetric(&scale(2), &scale(2), &scale(2));
        assert!(matrix.is_complete_for(&scale(2), &scale(2), &scale(2)));
        matrix.insert(MatrixCell {
            likelihood: 9,
            impact: 9,
            risk: 1,
        });
        assert!(!matrix.is_complete_for(&scale(2), &scale(2), &scale(2)));
    }
}
