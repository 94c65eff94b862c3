use crate::errors::StorageError;
use crate::types::Dic;

/// What the inherited-DIC propagator reads and writes.
///
/// Implementations are usually bound to an open write transaction so that
/// propagation commits or rolls back together with the triggering write.
pub trait InheritedDicStore {
    /// Axis-wise maximum of the DIC levels of every essential asset linked
    /// to `support_id`; `Dic::ZERO` when none is linked.
    fn aggregate_essential_dic(&self, support_id: i64) -> Result<Dic, StorageError>;

    /// Targeted update of the three inherited columns of one support asset.
    fn update_inherited_dic(&self, support_id: i64, dic: Dic) -> Result<(), StorageError>;

    /// Support assets reachable along the essential asset's outgoing edges.
    fn supports_of_essential(&self, essential_id: i64) -> Result<Vec<i64>, StorageError>;
}
