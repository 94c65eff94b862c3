//! Dependency edges and their categorical attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Categorical severity of a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub const ALL: [Criticality; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// `high` or `critical`.
    pub fn is_high(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criticality {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("criticality", s))
    }
}

/// Redundancy of a dependency. An absent value counts as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redundancy {
    None,
    Partial,
    Full,
}

impl Redundancy {
    pub const ALL: [Redundancy; 3] = [Self::None, Self::Partial, Self::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Partial => "partial",
            Self::Full => "full",
        }
    }

    /// True for `none` and for an unset redundancy level.
    pub fn is_absent(level: Option<Redundancy>) -> bool {
        matches!(level, None | Some(Redundancy::None))
    }
}

impl fmt::Display for Redundancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Redundancy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("redundancy level", s))
    }
}

/// The four dependency edge sets.
///
/// Endpoint orientation per family (`source` → `target`):
/// essential → support, support → supplier, support → site, site → supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeFamily {
    EssentialSupport,
    SupportSupplier,
    SupportSite,
    SiteSupplier,
}

impl EdgeFamily {
    pub const ALL: [EdgeFamily; 4] = [
        Self::EssentialSupport,
        Self::SupportSupplier,
        Self::SupportSite,
        Self::SiteSupplier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EssentialSupport => "essential_support",
            Self::SupportSupplier => "support_supplier",
            Self::SupportSite => "support_site",
            Self::SiteSupplier => "site_supplier",
        }
    }
}

impl fmt::Display for EdgeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeFamily {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("edge family", s))
    }
}

/// One stored dependency edge with its endpoint names eager-loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: i64,
    pub family: EdgeFamily,
    pub source_id: i64,
    pub source_name: String,
    pub target_id: i64,
    pub target_name: String,
    pub dependency_type: Option<String>,
    pub criticality: Criticality,
    pub redundancy: Option<Redundancy>,
    pub is_spof: bool,
}

impl EdgeRecord {
    /// The support asset endpoint, if this family has one.
    pub fn support_id(&self) -> Option<i64> {
        match self.family {
            EdgeFamily::EssentialSupport => Some(self.target_id),
            EdgeFamily::SupportSupplier | EdgeFamily::SupportSite => Some(self.source_id),
            EdgeFamily::SiteSupplier => None,
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> String {
        match self.family {
            EdgeFamily::SupportSite => format!("{} @ {}", self.source_name, self.target_name),
            _ => format!("{} → {}", self.source_name, self.target_name),
        }
    }

    pub fn has_high_criticality(&self) -> bool {
        self.criticality.is_high()
    }

    pub fn lacks_redundancy(&self) -> bool {
        Redundancy::is_absent(self.redundancy)
    }
}
