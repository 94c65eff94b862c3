use std::fmt;

use serde::Serialize;

/// Stable identifiers of the SPOF rules, as reported downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    NoRedundancyHighCriticality,
    HighFanIn,
    SoleSupplierHighCriticality,
    SingleSiteHighAvailability,
    SingleSiteNoRedundancyHighCriticality,
    SoleSiteSupplierHighCriticality,
}

impl RuleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoRedundancyHighCriticality => "no_redundancy_high_criticality",
            Self::HighFanIn => "high_fan_in",
            Self::SoleSupplierHighCriticality => "sole_supplier_high_criticality",
            Self::SingleSiteHighAvailability => "single_site_high_availability",
            Self::SingleSiteNoRedundancyHighCriticality => {
                "single_site_no_redundancy_high_criticality"
            }
            Self::SoleSiteSupplierHighCriticality => "sole_site_supplier_high_criticality",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
