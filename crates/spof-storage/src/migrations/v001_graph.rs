//! V001: dependency graph.
//! scopes, essential/support assets, suppliers, sites, four edge tables.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS scopes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    parent_id INTEGER REFERENCES scopes(id) ON DELETE SET NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_scopes_parent ON scopes(parent_id);

-- Essential assets own user-edited DIC levels.
CREATE TABLE IF NOT EXISTS essential_assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    scope_id INTEGER REFERENCES scopes(id) ON DELETE SET NULL,
    confidentiality INTEGER NOT NULL DEFAULT 0 CHECK (confidentiality BETWEEN 0 AND 4),
    integrity INTEGER NOT NULL DEFAULT 0 CHECK (integrity BETWEEN 0 AND 4),
    availability INTEGER NOT NULL DEFAULT 0 CHECK (availability BETWEEN 0 AND 4)
) STRICT;

-- Support assets carry derived inherited levels, maintained by propagation only.
CREATE TABLE IF NOT EXISTS support_assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    scope_id INTEGER REFERENCES scopes(id) ON DELETE SET NULL,
    parent_id INTEGER REFERENCES support_assets(id) ON DELETE SET NULL,
    lifecycle_state TEXT NOT NULL DEFAULT 'active' CHECK (lifecycle_state IN (
        'in_stock', 'deployed', 'active', 'under_maintenance', 'decommissioned', 'disposed'
    )),
    inherited_confidentiality INTEGER NOT NULL DEFAULT 0
        CHECK (inherited_confidentiality BETWEEN 0 AND 4),
    inherited_integrity INTEGER NOT NULL DEFAULT 0
        CHECK (inherited_integrity BETWEEN 0 AND 4),
    inherited_availability INTEGER NOT NULL DEFAULT 0
        CHECK (inherited_availability BETWEEN 0 AND 4)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_support_assets_scope ON support_assets(scope_id);
CREATE INDEX IF NOT EXISTS idx_support_assets_parent ON support_assets(parent_id);

CREATE TABLE IF NOT EXISTS suppliers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS sites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
) STRICT;

-- Edges: one row per endpoint pair, cascade-deleted with either endpoint.
CREATE TABLE IF NOT EXISTS essential_support_edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    essential_id INTEGER NOT NULL REFERENCES essential_assets(id) ON DELETE CASCADE,
    support_id INTEGER NOT NULL REFERENCES support_assets(id) ON DELETE CASCADE,
    dependency_type TEXT,
    criticality TEXT NOT NULL DEFAULT 'medium'
        CHECK (criticality IN ('low', 'medium', 'high', 'critical')),
    redundancy_level TEXT
        CHECK (redundancy_level IS NULL OR redundancy_level IN ('none', 'partial', 'full')),
    is_spof INTEGER NOT NULL DEFAULT 0 CHECK (is_spof IN (0, 1)),
    UNIQUE (essential_id, support_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_es_edges_support ON essential_support_edges(support_id);

CREATE TABLE IF NOT EXISTS support_supplier_edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    support_id INTEGER NOT NULL REFERENCES support_assets(id) ON DELETE CASCADE,
    supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    criticality TEXT NOT NULL DEFAULT 'medium'
        CHECK (criticality IN ('low', 'medium', 'high', 'critical')),
    redundancy_level TEXT
        CHECK (redundancy_level IS NULL OR redundancy_level IN ('none', 'partial', 'full')),
    is_spof INTEGER NOT NULL DEFAULT 0 CHECK (is_spof IN (0, 1)),
    UNIQUE (support_id, supplier_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_ssup_edges_supplier ON support_supplier_edges(supplier_id);

CREATE TABLE IF NOT EXISTS support_site_edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    support_id INTEGER NOT NULL REFERENCES support_assets(id) ON DELETE CASCADE,
    site_id INTEGER NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
    criticality TEXT NOT NULL DEFAULT 'medium'
        CHECK (criticality IN ('low', 'medium', 'high', 'critical')),
    redundancy_level TEXT
        CHECK (redundancy_level IS NULL OR redundancy_level IN ('none', 'partial', 'full')),
    is_spof INTEGER NOT NULL DEFAULT 0 CHECK (is_spof IN (0, 1)),
    UNIQUE (support_id, site_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_ssite_edges_site ON support_site_edges(site_id);

CREATE TABLE IF NOT EXISTS site_supplier_edges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    site_id INTEGER NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
    supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    criticality TEXT NOT NULL DEFAULT 'medium'
        CHECK (criticality IN ('low', 'medium', 'high', 'critical')),
    redundancy_level TEXT
        CHECK (redundancy_level IS NULL OR redundancy_level IN ('none', 'partial', 'full')),
    is_spof INTEGER NOT NULL DEFAULT 0 CHECK (is_spof IN (0, 1)),
    UNIQUE (site_id, supplier_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_sitesup_edges_supplier ON site_supplier_edges(supplier_id);
"#;
