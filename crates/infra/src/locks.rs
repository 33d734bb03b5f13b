use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Registry of per-key mutexes.
///
/// Mutating inventory operations run under the lock of their manufacturer key
/// so that read-check-write sequences on one vaccine type never interleave.
/// Different keys proceed in parallel. The guarded data is `()`, so a poisoned
/// lock carries no broken state and is simply reclaimed.
///
/// Entries live only while some caller holds or waits on them; the last
/// caller out removes its key, so the registry never outgrows the set of keys
/// in flight.
#[derive(Debug, Default)]
pub struct KeyLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lease<'a>(&'a self, key: &'a str) -> Lease<'a> {
        let lock = self.registry().entry(key.to_string()).or_default().clone();
        Lease { locks: self, key, lock }
    }

    /// Run `f` while holding the lock for `key`.
    pub fn with_key<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let lease = self.lease(key);
        let _guard = lease.lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of keys currently registered.
    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A caller's claim on one key's mutex. Dropped after the guard, so eviction
/// never races the lock it is releasing.
struct Lease<'a> {
    locks: &'a KeyLocks,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        // Handles are only cloned under the registry lock, so a count of two
        // (the map's and ours) means nobody else holds or awaits this key.
        let mut map = self.locks.registry();
        let ours = map
            .get(self.key)
            .is_some_and(|held| Arc::ptr_eq(held, &self.lock));
        if ours && Arc::strong_count(&self.lock) == 2 {
            map.remove(self.key);
        }
    }
}
