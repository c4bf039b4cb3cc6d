//! Typed object pool for high-churn entities.
//!
//! Bullets are spawned once and recycled: a handle is either checked out
//! (live in the world) or free (inactive, waiting for reuse). The pool
//! only does bookkeeping — creating and destroying the underlying hecs
//! entities is the caller's job, so the pool stays usable for any entity
//! family keyed by a type tag.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use hecs::Entity;

/// Per-key free list plus the set of handles currently issued. The
/// checked-out set is ordered so bulk operations visit handles
/// deterministically.
#[derive(Debug, Default)]
struct PoolEntry {
    free: Vec<Entity>,
    checked_out: BTreeSet<Entity>,
}

/// A pool of reusable entity handles keyed by a type tag.
///
/// Invariant: a handle returned by [`acquire`](Self::acquire) is never
/// issued again before an intervening [`release`](Self::release).
#[derive(Debug, Default)]
pub struct ObjectPool<K> {
    pools: HashMap<K, PoolEntry>,
}

impl<K: Copy + Eq + Hash> ObjectPool<K> {
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Check out any free handle tagged `key`, or `None` when the pool has
    /// no free handle of that type. Which free handle comes back is
    /// unspecified.
    pub fn acquire(&mut self, key: K) -> Option<Entity> {
        let entry = self.pools.get_mut(&key)?;
        let handle = entry.free.pop()?;
        entry.checked_out.insert(handle);
        Some(handle)
    }

    /// Return a handle to the free set. Releasing a handle that is not
    /// checked out (double release, or a foreign handle) is a no-op.
    pub fn release(&mut self, key: K, handle: Entity) {
        if let Some(entry) = self.pools.get_mut(&key) {
            if entry.checked_out.remove(&handle) {
                entry.free.push(handle);
            }
        }
    }

    /// Instantiate a new entity via `factory` and register the handle under
    /// `key`, already checked out. Used when `acquire` comes back empty.
    pub fn create_and_register(&mut self, key: K, factory: impl FnOnce() -> Entity) -> Entity {
        let handle = factory();
        self.pools
            .entry(key)
            .or_default()
            .checked_out
            .insert(handle);
        handle
    }

    /// Forget every handle of the given type and hand them back for the
    /// caller to despawn. Used when an encounter ends and its bullet types
    /// are retired.
    pub fn clear_type(&mut self, key: K) -> Vec<Entity> {
        match self.pools.remove(&key) {
            Some(entry) => {
                let mut handles = entry.free;
                handles.extend(entry.checked_out);
                handles
            }
            None => Vec::new(),
        }
    }

    /// Whether the handle is currently issued under `key`.
    pub fn is_checked_out(&self, key: K, handle: Entity) -> bool {
        self.pools
            .get(&key)
            .is_some_and(|entry| entry.checked_out.contains(&handle))
    }

    /// Every type tag the pool currently knows.
    pub fn type_keys(&self) -> Vec<K> {
        self.pools.keys().copied().collect()
    }

    /// Free handles of a type (available for reuse).
    pub fn free_count(&self, key: K) -> usize {
        self.pools.get(&key).map_or(0, |entry| entry.free.len())
    }

    /// Handles of a type currently checked out.
    pub fn checked_out_count(&self, key: K) -> usize {
        self.pools
            .get(&key)
            .map_or(0, |entry| entry.checked_out.len())
    }
}
