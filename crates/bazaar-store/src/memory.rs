//! In-memory storage tier.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{StorageTier, StoreError};

/// A [`StorageTier`] backed by a shared in-memory map.
///
/// Cloning a `MemoryTier` yields another handle to the SAME map. Hand one
/// clone to a [`SessionStore`](crate::SessionStore) and keep another to
/// inspect or tamper with the tier directly.
#[derive(Debug, Clone)]
pub struct MemoryTier {
    name: &'static str,
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryTier {
    /// Creates an empty tier with the given log name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns `true` if the tier holds an entry for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the tier is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock can't leave the map half-updated
    // (every operation is a single insert/remove), so a poisoned lock is
    // still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageTier for MemoryTier {
    fn name(&self) -> &str {
        self.name
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}
