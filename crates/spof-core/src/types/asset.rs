//! Scopes, essential assets and support assets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Dic, ParseEnumError};

/// A named organisational scope. Scopes nest through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Lifecycle state of a support asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    InStock,
    Deployed,
    Active,
    UnderMaintenance,
    Decommissioned,
    Disposed,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 6] = [
        Self::InStock,
        Self::Deployed,
        Self::Active,
        Self::UnderMaintenance,
        Self::Decommissioned,
        Self::Disposed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::Deployed => "deployed",
            Self::Active => "active",
            Self::UnderMaintenance => "under_maintenance",
            Self::Decommissioned => "decommissioned",
            Self::Disposed => "disposed",
        }
    }

    /// Retired assets may not gain new essential dependencies.
    pub fn is_retired(&self) -> bool {
        matches!(self, Self::Decommissioned | Self::Disposed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("lifecycle state", s))
    }
}

/// A business-level asset carrying user-edited DIC levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssentialAsset {
    pub id: i64,
    pub name: String,
    pub scope_id: Option<i64>,
    pub dic: Dic,
}

/// A technical asset. `inherited` is derived from the essential assets
/// depending on it and is never set from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportAsset {
    pub id: i64,
    pub name: String,
    pub scope_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub state: LifecycleState,
    pub inherited: Dic,
}
