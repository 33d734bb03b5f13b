use std::collections::HashMap;
use std::sync::RwLock;

use vaxreg_core::{Entity, KeyedStore, StoreError, StoreResult};

#[derive(Debug)]
struct Records<V: Entity> {
    /// Keys in first-insertion order; replacing a record keeps its slot.
    order: Vec<V::Id>,
    by_id: HashMap<V::Id, V>,
}

/// In-memory keyed store for tests/dev.
///
/// `find_all` returns records in first-insertion order.
#[derive(Debug)]
pub struct InMemoryStore<V: Entity> {
    inner: RwLock<Records<V>>,
}

impl<V: Entity> InMemoryStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Records {
                order: Vec::new(),
                by_id: HashMap::new(),
            }),
        }
    }
}

impl<V: Entity> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::unavailable("in-memory store lock poisoned")
}

impl<V> KeyedStore<V> for InMemoryStore<V>
where
    V: Entity + Clone + Send + Sync + 'static,
    V::Id: Send + Sync,
{
    fn find_by_id(&self, key: &V::Id) -> StoreResult<Option<V>> {
        let records = self.inner.read().map_err(|_| poisoned())?;
        Ok(records.by_id.get(key).cloned())
    }

    fn save(&self, value: V) -> StoreResult<()> {
        let mut records = self.inner.write().map_err(|_| poisoned())?;
        let key = value.id().clone();
        if records.by_id.insert(key.clone(), value).is_none() {
            records.order.push(key);
        }
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<V>> {
        let records = self.inner.read().map_err(|_| poisoned())?;
        Ok(records
            .order
            .iter()
            .filter_map(|k| records.by_id.get(k).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        key: u32,
        value: &'static str,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.key
        }
    }

    #[test]
    fn missing_key_is_none() {
        let store: InMemoryStore<Row> = InMemoryStore::new();
        assert_eq!(store.find_by_id(&7).unwrap(), None);
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn find_all_keeps_first_insertion_order_across_updates() {
        let store = InMemoryStore::new();
        store.save(Row { key: 3, value: "c" }).unwrap();
        store.save(Row { key: 1, value: "a" }).unwrap();
        store.save(Row { key: 3, value: "c2" }).unwrap();

        let all = store.find_all().unwrap();
        assert_eq!(
            all,
            vec![Row { key: 3, value: "c2" }, Row { key: 1, value: "a" }]
        );
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn poisoned_lock_surfaces_as_unavailable() {
        let store: InMemoryStore<Row> = InMemoryStore::new();
        store.save(Row { key: 1, value: "a" }).unwrap();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.write().unwrap();
            panic!("writer died mid-update");
        }));

        assert!(matches!(store.find_all(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.find_by_id(&1), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.save(Row { key: 2, value: "b" }),
            Err(StoreError::Unavailable(_))
        ));
    }
}
