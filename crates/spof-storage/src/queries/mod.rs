//! Per-table query modules. Every function takes a borrowed connection
//! (or transaction) so callers decide the transaction boundary.

pub mod assets;
pub mod edges;
pub mod inherited_dic;
pub mod risk_criteria;
pub mod scopes;
pub mod snapshot;
pub(crate) mod util;
