//! Keyed persistence boundary.
//!
//! The inventory engine needs nothing from storage beyond lookup by key,
//! upsert, and a full scan. Adapters (in-memory, database-backed) implement
//! [`KeyedStore`]; the domain never sees a query language or transaction API.

use std::sync::Arc;

use crate::entity::Entity;
use crate::error::StoreResult;

/// Key/value store for one entity type, keyed by the entity's identifier.
pub trait KeyedStore<V>: Send + Sync
where
    V: Entity,
{
    /// Look up a record. A miss is `Ok(None)`, never an error.
    fn find_by_id(&self, key: &V::Id) -> StoreResult<Option<V>>;

    /// Insert or replace the record stored under `value.id()`.
    fn save(&self, value: V) -> StoreResult<()>;

    /// Every stored record. Ordering is adapter-defined.
    fn find_all(&self) -> StoreResult<Vec<V>>;
}

impl<V, S> KeyedStore<V> for Arc<S>
where
    V: Entity,
    S: KeyedStore<V> + ?Sized,
{
    fn find_by_id(&self, key: &V::Id) -> StoreResult<Option<V>> {
        (**self).find_by_id(key)
    }

    fn save(&self, value: V) -> StoreResult<()> {
        (**self).save(value)
    }

    fn find_all(&self) -> StoreResult<Vec<V>> {
        (**self).find_all()
    }
}
