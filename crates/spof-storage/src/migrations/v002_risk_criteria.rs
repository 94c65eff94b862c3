//! V002: risk criteria, their ordered scales and the derived matrix.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS risk_criteria (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    is_default INTEGER NOT NULL DEFAULT 0 CHECK (is_default IN (0, 1))
) STRICT;

-- At most one default criteria.
CREATE UNIQUE INDEX IF NOT EXISTS idx_risk_criteria_single_default
    ON risk_criteria(is_default) WHERE is_default = 1;

CREATE TABLE IF NOT EXISTS risk_scale_levels (
    criteria_id INTEGER NOT NULL REFERENCES risk_criteria(id) ON DELETE CASCADE,
    axis TEXT NOT NULL CHECK (axis IN ('likelihood', 'impact', 'risk')),
    level INTEGER NOT NULL CHECK (level > 0),
    name TEXT NOT NULL,
    color TEXT,
    PRIMARY KEY (criteria_id, axis, level)
) STRICT;

-- Rebuilt in full whenever a scale of the criteria changes.
CREATE TABLE IF NOT EXISTS risk_matrix_cells (
    criteria_id INTEGER NOT NULL REFERENCES risk_criteria(id) ON DELETE CASCADE,
    likelihood INTEGER NOT NULL,
    impact INTEGER NOT NULL,
    risk INTEGER NOT NULL,
    PRIMARY KEY (criteria_id, likelihood, impact)
) STRICT;
"#;
