//! Per-key async locks
//!
//! Serializes read-modify-write sequences on one store key while letting
//! different keys proceed in parallel. Entries are dropped from the map once
//! nobody holds or waits on them.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A map of lazily created mutexes, one per key
pub struct KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    slots: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
        }
    }

    /// Wait for exclusive access to `key`
    pub async fn lock(&self, key: K) -> KeyGuard<K> {
        let slot = self
            .slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();

        KeyGuard {
            key,
            slots: self.slots.clone(),
            guard: Some(slot.lock_owned().await),
        }
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

/// Exclusive access to one key; released on drop
pub struct KeyGuard<K>
where
    K: Eq + Hash + Clone,
{
    key: K,
    slots: Arc<DashMap<K, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K> Drop for KeyGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        // Release first so the map holds the last reference when idle
        self.guard.take();
        self.slots
            .remove_if(&self.key, |_, slot| Arc::strong_count(slot) == 1);
    }
}
