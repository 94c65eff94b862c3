//! The rule table.

use crate::types::{EdgeFamily, EdgeRecord};

use super::{GraphIndex, RuleName};

/// One declarative rule. `matches` must be a pure function of its inputs.
pub struct Rule {
    pub family: EdgeFamily,
    pub name: RuleName,
    pub matches: fn(&EdgeRecord, &GraphIndex<'_>) -> bool,
}

/// Evaluated in order; an edge's rule set lists matches in table order.
pub static RULES: &[Rule] = &[
    Rule {
        family: EdgeFamily::EssentialSupport,
        name: RuleName::NoRedundancyHighCriticality,
        matches: |edge, _| edge.lacks_redundancy() && edge.has_high_criticality(),
    },
    Rule {
        family: EdgeFamily::EssentialSupport,
        name: RuleName::HighFanIn,
        matches: |edge, index| {
            edge.lacks_redundancy() && index.essential_fan_in(edge.target_id) > 1
        },
    },
    Rule {
        family: EdgeFamily::SupportSupplier,
        name: RuleName::SoleSupplierHighCriticality,
        matches: |edge, index| {
            // Redundant supplier edges other than this one.
            let others = index
                .redundant_suppliers(edge.source_id)
                .saturating_sub(u32::from(!edge.lacks_redundancy()));
            edge.has_high_criticality() && others == 0
        },
    },
    Rule {
        family: EdgeFamily::SupportSite,
        name: RuleName::SingleSiteHighAvailability,
        matches: |edge, index| {
            index.site_count(edge.source_id) == 1
                && index.inherited(edge.source_id).has_high_availability()
        },
    },
    Rule {
        family: EdgeFamily::SupportSite,
        name: RuleName::SingleSiteNoRedundancyHighCriticality,
        matches: |edge, index| {
            index.site_count(edge.source_id) == 1
                && edge.lacks_redundancy()
                && edge.has_high_criticality()
        },
    },
    Rule {
        family: EdgeFamily::SiteSupplier,
        name: RuleName::SoleSiteSupplierHighCriticality,
        matches: |edge, index| {
            index.site_supplier_count(edge.source_id) == 1 && edge.has_high_criticality()
        },
    },
];

/// Rules that apply to one family, in table order.
pub fn rules_for(family: EdgeFamily) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |rule| rule.family == family)
}
