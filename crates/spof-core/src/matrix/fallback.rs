//! Static 5×5 display matrix for when no risk criteria is configured.
//! Display only: never stored, never used to derive a persisted risk level.

use serde::Serialize;

/// One cell of the fallback matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallbackCell {
    pub level: u8,
    pub name: &'static str,
    pub color: &'static str,
}

const LEVELS: [FallbackCell; 4] = [
    FallbackCell { level: 1, name: "Low", color: "#4caf50" },
    FallbackCell { level: 2, name: "Medium", color: "#ffc107" },
    FallbackCell { level: 3, name: "High", color: "#ff9800" },
    FallbackCell { level: 4, name: "Critical", color: "#f44336" },
];

// Rows: likelihood 1..=5, columns: impact 1..=5.
const FALLBACK: [[u8; 5]; 5] = [
    [1, 1, 1, 2, 2],
    [1, 1, 2, 2, 3],
    [1, 2, 2, 3, 3],
    [2, 2, 3, 3, 4],
    [2, 3, 3, 4, 4],
];

/// Display cell for `(likelihood, impact)` in `1..=5`.
pub fn fallback_cell(likelihood: u32, impact: u32) -> Option<FallbackCell> {
    let row = FALLBACK.get(usize::try_from(likelihood.checked_sub(1)?).ok()?)?;
    let level = *row.get(usize::try_from(impact.checked_sub(1)?).ok()?)?;
    LEVELS.iter().copied().find(|c| c.level == level)
}

/// The whole display grid, row-major by likelihood.
pub fn fallback_matrix() -> Vec<Vec<FallbackCell>> {
    (1..=5)
        .map(|l| (1..=5).filter_map(|i| fallback_cell(l, i)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_symmetric_with_low_and_critical_corners() {
        for l in 1..=5 {
            for i in 1..=5 {
                assert_eq!(fallback_cell(l, i), fallback_cell(i, l));
            }
        }
        assert_eq!(fallback_cell(1, 1).map(|c| c.name), Some("Low"));
        assert_eq!(fallback_cell(5, 5).map(|c| c.name), Some("Critical"));
    }

    #[test]
    fn full_grid_is_five_by_five() {
        let grid = fallback_matrix();
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|row| row.len() == 5));
        assert_eq!(grid[4][0].name, "Medium");
    }

    #[test]
    fn off_grid_is_none() {
        assert_eq!(fallback_cell(0, 3), None);
        assert_eq!(fallback_cell(6, 1), None);
    }
}
