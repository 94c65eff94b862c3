//! SpofStorageEngine: the storage collaborator.
//!
//! Reads go through the pooled readers; every write runs in one IMMEDIATE
//! transaction together with the derived-attribute maintenance it
//! triggers (inherited DIC, risk matrix), so a failure leaves no partial
//! update behind.

use std::path::Path;

use rusqlite::Connection;
use spof_core::config::StorageConfig;
use spof_core::errors::{InvariantError, StorageError};
use spof_core::matrix::{validate_scale, RiskCriteria, RiskMatrix, ScaleLevel};
use spof_core::propagation;
use spof_core::rules::{matching_rules, GraphIndex};
use spof_core::traits::{GraphStore, InheritedDicStore};
use spof_core::types::{
    Dic, EdgeFamily, EdgeRecord, EssentialAsset, GraphSnapshot, LifecycleState, Scope,
    SupportAsset,
};

use crate::connection::{DatabaseManager, OpenMode};
use crate::queries::assets::{self, NewEssentialAsset, NewSupportAsset, NodeKind};
use crate::queries::edges::{self, family_table, EdgeAttributes, NewEdge};
use crate::queries::inherited_dic::TxDicStore;
use crate::queries::risk_criteria::{self, NewRiskCriteria, ScaleAxis};
use crate::queries::{scopes, snapshot};

pub struct SpofStorageEngine {
    db: DatabaseManager,
}

impl SpofStorageEngine {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
        })
    }

    /// Open the configured database, creating it when missing.
    pub fn open_with_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::open_configured(config, OpenMode::Create)
    }

    /// Open the configured database only if it already exists. Nothing is
    /// created on disk when it does not.
    pub fn open_existing(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::open_configured(config, OpenMode::Existing)
    }

    fn open_configured(config: &StorageConfig, mode: OpenMode) -> Result<Self, StorageError> {
        let path = config.effective_db_path();
        let db = DatabaseManager::open_with(&path, mode, config.effective_read_pool_size())?;
        tracing::info!(path = %path.display(), "storage opened");
        Ok(Self { db })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    fn write<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        self.db.write(f)
    }

    fn read<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        self.db.read(f)
    }

    // ---- scopes ----

    pub fn create_scope(&self, name: &str, parent_id: Option<i64>) -> Result<i64, StorageError> {
        self.write(|conn| {
            if let Some(parent) = parent_id {
                require(scopes::get_scope(conn, parent)?.is_some(), "scope", parent)?;
            }
            scopes::insert_scope(conn, name, parent_id)
        })
    }

    pub fn get_scope(&self, id: i64) -> Result<Option<Scope>, StorageError> {
        self.read(|conn| scopes::get_scope(conn, id))
    }

    pub fn list_scopes(&self) -> Result<Vec<Scope>, StorageError> {
        self.read(scopes::list_scopes)
    }

    /// Assets in the scope keep existing with no scope.
    pub fn delete_scope(&self, id: i64) -> Result<(), StorageError> {
        self.write(|conn| require(scopes::delete_scope(conn, id)? > 0, "scope", id))
    }

    // ---- essential assets ----

    pub fn create_essential_asset(&self, asset: &NewEssentialAsset) -> Result<i64, StorageError> {
        asset.dic.validate()?;
        self.write(|conn| assets::insert_essential(conn, asset))
    }

    pub fn get_essential_asset(&self, id: i64) -> Result<Option<EssentialAsset>, StorageError> {
        self.read(|conn| assets::get_essential(conn, id))
    }

    /// Change an essential asset's DIC and recompute every support asset
    /// it depends on. Returns the recomputed `(support_id, inherited)` pairs.
    pub fn update_essential_dic(&self, id: i64, dic: Dic) -> Result<Vec<(i64, Dic)>, StorageError> {
        dic.validate()?;
        self.write(|conn| {
            require(
                assets::update_essential_dic(conn, id, dic)? > 0,
                NodeKind::Essential.entity(),
                id,
            )?;
            propagation::recompute_for_essential(&TxDicStore::new(conn), id)
        })
    }

    /// Delete an essential asset; its edges cascade and the supports they
    /// reached are recomputed without it.
    pub fn delete_essential_asset(&self, id: i64) -> Result<Vec<(i64, Dic)>, StorageError> {
        self.write(|conn| {
            let store = TxDicStore::new(conn);
            let affected = store.supports_of_essential(id)?;
            require(
                assets::delete_node(conn, NodeKind::Essential, id)? > 0,
                NodeKind::Essential.entity(),
                id,
            )?;
            propagation::recompute_many(&store, affected)
        })
    }

    // ---- support assets ----

    /// Create a support asset. A child takes its parent's scope when none is
    /// given and is rejected when the given scope differs from the parent's.
    pub fn create_support_asset(&self, asset: &NewSupportAsset) -> Result<i64, StorageError> {
        self.write(|conn| {
            let mut resolved = asset.clone();
            if let Some(parent_id) = asset.parent_id {
                let parent = assets::get_support(conn, parent_id)?.ok_or(StorageError::NotFound {
                    entity: NodeKind::Support.entity(),
                    id: parent_id,
                })?;
                match asset.scope_id {
                    None => resolved.scope_id = parent.scope_id,
                    Some(scope) if Some(scope) == parent.scope_id => {}
                    Some(scope) => {
                        return Err(InvariantError::ScopeMismatch {
                            child_scope: Some(scope),
                            parent_scope: parent.scope_id,
                        }
                        .into())
                    }
                }
            }
            assets::insert_support(conn, &resolved)
        })
    }

    pub fn get_support_asset(&self, id: i64) -> Result<Option<SupportAsset>, StorageError> {
        self.read(|conn| assets::get_support(conn, id))
    }

    /// Retiring an asset keeps its existing edges; it only blocks new
    /// essential dependencies.
    pub fn set_support_state(&self, id: i64, state: LifecycleState) -> Result<(), StorageError> {
        self.write(|conn| {
            require(
                assets::set_support_state(conn, id, state)? > 0,
                NodeKind::Support.entity(),
                id,
            )
        })
    }

    pub fn delete_support_asset(&self, id: i64) -> Result<(), StorageError> {
        self.delete_node(NodeKind::Support, id)
    }

    // ---- suppliers and sites ----

    pub fn create_supplier(&self, name: &str) -> Result<i64, StorageError> {
        self.write(|conn| assets::insert_supplier(conn, name))
    }

    pub fn delete_supplier(&self, id: i64) -> Result<(), StorageError> {
        self.delete_node(NodeKind::Supplier, id)
    }

    pub fn create_site(&self, name: &str) -> Result<i64, StorageError> {
        self.write(|conn| assets::insert_site(conn, name))
    }

    pub fn delete_site(&self, id: i64) -> Result<(), StorageError> {
        self.delete_node(NodeKind::Site, id)
    }

    fn delete_node(&self, kind: NodeKind, id: i64) -> Result<(), StorageError> {
        self.write(|conn| require(assets::delete_node(conn, kind, id)? > 0, kind.entity(), id))
    }

    // ---- edges ----

    /// Create an edge and set its `is_spof` flag from the rules as they
    /// stand after the insert. Flags of neighbouring edges are left to the
    /// next reconcile.
    pub fn create_edge(&self, edge: &NewEdge) -> Result<i64, StorageError> {
        let ft = family_table(edge.family);
        self.write(|conn| {
            require(
                assets::node_exists(conn, ft.source, edge.source_id)?,
                ft.source.entity(),
                edge.source_id,
            )?;
            require(
                assets::node_exists(conn, ft.target, edge.target_id)?,
                ft.target.entity(),
                edge.target_id,
            )?;
            if edges::find_edge_between(conn, edge.family, edge.source_id, edge.target_id)?
                .is_some()
            {
                return Err(InvariantError::DuplicateEdge {
                    family: edge.family,
                    source_id: edge.source_id,
                    target_id: edge.target_id,
                }
                .into());
            }

            if edge.family == EdgeFamily::EssentialSupport {
                if let Some(support) = assets::get_support(conn, edge.target_id)? {
                    if support.state.is_retired() {
                        return Err(InvariantError::SupportRetired {
                            support_id: support.id,
                            state: support.state,
                        }
                        .into());
                    }
                }
            }

            let id = edges::insert_edge(conn, edge)?;
            if edge.family == EdgeFamily::EssentialSupport {
                propagation::recompute(&TxDicStore::new(conn), edge.target_id)?;
            }
            initial_rule_check(conn, edge, id)?;
            Ok(id)
        })
    }

    pub fn get_edge(
        &self,
        family: EdgeFamily,
        id: i64,
    ) -> Result<Option<EdgeRecord>, StorageError> {
        self.read(|conn| edges::get_edge(conn, family, id))
    }

    pub fn list_edges(&self, family: EdgeFamily) -> Result<Vec<EdgeRecord>, StorageError> {
        self.read(|conn| edges::list_edges(conn, family))
    }

    /// Replace the user-editable attributes of an edge. Endpoints never change.
    pub fn update_edge(
        &self,
        family: EdgeFamily,
        id: i64,
        attributes: &EdgeAttributes,
    ) -> Result<(), StorageError> {
        self.write(|conn| {
            let edge = edges::get_edge(conn, family, id)?
                .ok_or(StorageError::NotFound { entity: "edge", id })?;
            edges::update_edge_attributes(conn, family, id, attributes)?;
            if let (EdgeFamily::EssentialSupport, Some(support_id)) = (family, edge.support_id()) {
                propagation::recompute(&TxDicStore::new(conn), support_id)?;
            }
            Ok(())
        })
    }

    pub fn delete_edge(&self, family: EdgeFamily, id: i64) -> Result<(), StorageError> {
        self.write(|conn| {
            let edge = edges::get_edge(conn, family, id)?
                .ok_or(StorageError::NotFound { entity: "edge", id })?;
            edges::delete_edge(conn, family, id)?;
            if let (EdgeFamily::EssentialSupport, Some(support_id)) = (family, edge.support_id()) {
                propagation::recompute(&TxDicStore::new(conn), support_id)?;
            }
            Ok(())
        })
    }

    // ---- risk criteria ----

    /// Create a criteria, store its scales and derive its matrix.
    pub fn create_risk_criteria(&self, criteria: &NewRiskCriteria) -> Result<i64, StorageError> {
        validate_scales(&criteria.likelihood, &criteria.impact, &criteria.risk_levels)?;
        self.write(|conn| {
            let id = risk_criteria::insert_criteria(conn, &criteria.name)?;
            store_scales(
                conn,
                id,
                &criteria.likelihood,
                &criteria.impact,
                &criteria.risk_levels,
            )?;
            if criteria.is_default {
                risk_criteria::set_default(conn, id)?;
            }
            Ok(id)
        })
    }

    /// Replace all three scales and rebuild the matrix in the same transaction.
    pub fn replace_risk_scales(
        &self,
        id: i64,
        likelihood: &[ScaleLevel],
        impact: &[ScaleLevel],
        risk_levels: &[ScaleLevel],
    ) -> Result<(), StorageError> {
        validate_scales(likelihood, impact, risk_levels)?;
        self.write(|conn| {
            require(
                risk_criteria::criteria_exists(conn, id)?,
                "risk criteria",
                id,
            )?;
            store_scales(conn, id, likelihood, impact, risk_levels)
        })
    }

    /// Make `id` the single default criteria.
    pub fn set_default_risk_criteria(&self, id: i64) -> Result<(), StorageError> {
        self.write(|conn| require(risk_criteria::set_default(conn, id)? > 0, "risk criteria", id))
    }

    pub fn delete_risk_criteria(&self, id: i64) -> Result<(), StorageError> {
        self.write(|conn| {
            require(
                risk_criteria::delete_criteria(conn, id)? > 0,
                "risk criteria",
                id,
            )
        })
    }

    /// Risk-level name for `(likelihood, impact)` under the given criteria,
    /// or under the default one when `criteria_id` is `None`.
    ///
    /// `Ok(None)` when no such criteria exists; `"unknown"` when a
    /// coordinate is off-scale.
    pub fn risk_level_name(
        &self,
        criteria_id: Option<i64>,
        likelihood: u32,
        impact: u32,
    ) -> Result<Option<String>, StorageError> {
        let criteria = match criteria_id {
            Some(id) => self.load_risk_criteria(id)?,
            None => self.default_risk_criteria()?,
        };
        Ok(criteria.map(|c| c.risk_level(likelihood, impact).name().to_string()))
    }
}

fn require(found: bool, entity: &'static str, id: i64) -> Result<(), StorageError> {
    if found {
        Ok(())
    } else {
        Err(StorageError::NotFound { entity, id })
    }
}

/// Judge a just-inserted edge against its neighbourhood and store the verdict.
fn initial_rule_check(conn: &Connection, edge: &NewEdge, id: i64) -> Result<(), StorageError> {
    let local = snapshot::load_neighbourhood(conn, edge.family, edge.source_id, edge.target_id)?;
    let index = GraphIndex::build(&local);
    let Some(record) = local.edges(edge.family).iter().find(|e| e.id == id) else {
        return Err(StorageError::NotFound { entity: "edge", id });
    };

    let rules = matching_rules(record, &index);
    if !rules.is_empty() {
        edges::set_spof_flags(conn, edge.family, &[id], true)?;
    }
    tracing::debug!(
        family = %edge.family,
        edge_id = id,
        rules = ?rules,
        "initial rule check"
    );
    Ok(())
}

fn validate_scales(
    likelihood: &[ScaleLevel],
    impact: &[ScaleLevel],
    risk_levels: &[ScaleLevel],
) -> Result<(), InvariantError> {
    validate_scale(ScaleAxis::Likelihood.as_str(), likelihood)?;
    validate_scale(ScaleAxis::Impact.as_str(), impact)?;
    validate_scale(ScaleAxis::Risk.as_str(), risk_levels)
}

fn store_scales(
    conn: &Connection,
    id: i64,
    likelihood: &[ScaleLevel],
    impact: &[ScaleLevel],
    risk_levels: &[ScaleLevel],
) -> Result<(), StorageError> {
    risk_criteria::replace_scale(conn, id, ScaleAxis::Likelihood, likelihood)?;
    risk_criteria::replace_scale(conn, id, ScaleAxis::Impact, impact)?;
    risk_criteria::replace_scale(conn, id, ScaleAxis::Risk, risk_levels)?;
    let matrix = RiskMatrix::symmetric(likelihood, impact, risk_levels);
    risk_criteria::replace_matrix(conn, id, &matrix)?;
    tracing::debug!(criteria_id = id, cells = matrix.len(), "risk matrix rebuilt");
    Ok(())
}

impl GraphStore for SpofStorageEngine {
    fn load_snapshot(&self, scope: Option<i64>) -> Result<GraphSnapshot, StorageError> {
        self.read(|conn| snapshot::load_snapshot(conn, scope))
    }

    fn set_spof_flags(
        &self,
        family: EdgeFamily,
        edge_ids: &[i64],
        value: bool,
    ) -> Result<usize, StorageError> {
        if edge_ids.is_empty() {
            return Ok(0);
        }
        self.write(|conn| edges::set_spof_flags(conn, family, edge_ids, value))
    }

    fn find_scope_by_name(&self, name: &str) -> Result<Option<Scope>, StorageError> {
        self.read(|conn| scopes::find_scope_by_name(conn, name))
    }

    fn load_risk_criteria(&self, id: i64) -> Result<Option<RiskCriteria>, StorageError> {
        self.read(|conn| risk_criteria::load_criteria(conn, id))
    }

    fn default_risk_criteria(&self) -> Result<Option<RiskCriteria>, StorageError> {
        self.read(|conn| match risk_criteria::default_criteria_id(conn)? {
            Some(id) => risk_criteria::load_criteria(conn, id),
            None => Ok(None),
        })
    }
}
