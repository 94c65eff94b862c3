//! Inherited-DIC propagation.
//!
//! A support asset's inherited triple is the axis-wise maximum of the DIC
//! triples of every essential asset that depends on it. Callers invoke
//! these functions from inside the write that changed an essential↔support
//! edge or an essential asset's DIC; errors are never swallowed here so a
//! failed propagation fails the containing write.

use std::collections::BTreeSet;

use crate::errors::StorageError;
use crate::traits::InheritedDicStore;
use crate::types::Dic;

/// Recompute and store the inherited triple of one support asset.
pub fn recompute<S>(store: &S, support_id: i64) -> Result<Dic, StorageError>
where
    S: InheritedDicStore + ?Sized,
{
    let dic = store.aggregate_essential_dic(support_id)?;
    store.update_inherited_dic(support_id, dic)?;
    tracing::debug!(support_id, %dic, "inherited DIC recomputed");
    Ok(dic)
}

/// Recompute a set of support assets, each exactly once, in ascending id order.
pub fn recompute_many<S, I>(store: &S, support_ids: I) -> Result<Vec<(i64, Dic)>, StorageError>
where
    S: InheritedDicStore + ?Sized,
    I: IntoIterator<Item = i64>,
{
    let unique: BTreeSet<i64> = support_ids.into_iter().collect();
    unique
        .into_iter()
        .map(|id| recompute(store, id).map(|dic| (id, dic)))
        .collect()
}

/// Recompute every support asset reachable from an essential asset
/// whose DIC triple just changed.
pub fn recompute_for_essential<S>(
    store: &S,
    essential_id: i64,
) -> Result<Vec<(i64, Dic)>, StorageError>
where
    S: InheritedDicStore + ?Sized,
{
    let supports = store.supports_of_essential(essential_id)?;
    recompute_many(store, supports)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory graph: essential DICs, (essential, support) links, inherited triples.
    #[derive(Default)]
    struct MemoryStore {
        essentials: HashMap<i64, Dic>,
        links: Vec<(i64, i64)>,
        inherited: RefCell<HashMap<i64, Dic>>,
        writes: RefCell<Vec<i64>>,
        fail_writes: bool,
    }

    impl InheritedDicStore for MemoryStore {
        fn aggregate_essential_dic(&self, support_id: i64) -> Result<Dic, StorageError> {
            Ok(Dic::axis_max(
                self.links
                    .iter()
                    .filter(|(_, s)| *s == support_id)
                    .map(|(e, _)| self.essentials[e]),
            ))
        }

        fn update_inherited_dic(&self, support_id: i64, dic: Dic) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::SqliteError {
                    message: "disk I/O error".to_string(),
                });
            }
            self.writes.borrow_mut().push(support_id);
            self.inherited.borrow_mut().insert(support_id, dic);
            Ok(())
        }

        fn supports_of_essential(&self, essential_id: i64) -> Result<Vec<i64>, StorageError> {
            Ok(self
                .links
                .iter()
                .filter(|(e, _)| *e == essential_id)
                .map(|(_, s)| *s)
                .collect())
        }
    }

    #[test]
    fn single_edge_copies_essential_triple() {
        let store = MemoryStore {
            essentials: HashMap::from([(1, Dic::new(3, 1, 4))]),
            links: vec![(1, 100)],
            ..Default::default()
        };
        assert_eq!(recompute(&store, 100).unwrap(), Dic::new(3, 1, 4));
        assert_eq!(store.inherited.borrow()[&100], Dic::new(3, 1, 4));
    }

    #[test]
    fn unlinked_support_resets_to_zero() {
        let store = MemoryStore::default();
        store.inherited.borrow_mut().insert(7, Dic::new(2, 2, 2));
        assert_eq!(recompute(&store, 7).unwrap(), Dic::ZERO);
        assert_eq!(store.inherited.borrow()[&7], Dic::ZERO);
    }

    #[test]
    fn essential_change_reaches_each_support_once() {
        let store = MemoryStore {
            essentials: HashMap::from([(1, Dic::new(4, 0, 0)), (2, Dic::new(0, 2, 1))]),
            links: vec![(1, 30), (1, 10), (2, 10), (1, 30)],
            ..Default::default()
        };
        let results = recompute_for_essential(&store, 1).unwrap();
        assert_eq!(results, vec![(10, Dic::new(4, 2, 1)), (30, Dic::new(4, 0, 0))]);
        assert_eq!(*store.writes.borrow(), vec![10, 30]);
    }

    #[test]
    fn write_failure_propagates() {
        let store = MemoryStore {
            essentials: HashMap::from([(1, Dic::new(1, 1, 1))]),
            links: vec![(1, 5)],
            fail_writes: true,
            ..Default::default()
        };
        assert!(matches!(
            recompute(&store, 5),
            Err(StorageError::SqliteError { .. })
        ));
    }
}
