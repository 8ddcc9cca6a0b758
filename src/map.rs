//! `CowMap<V>`: the copy-on-write map.
//!
//! Reads go straight through the [`SnapshotCell`] and are wait-free.
//! Writes serialize on a mutex and run the copy-on-write protocol: load
//! the current snapshot, fully build a duplicate with the change applied,
//! publish the duplicate atomically. The cost model is deliberate:
//! O(1) lock-free lookups bought with O(n) writes, so the map only pays
//! off when reads outnumber writes by a large factor (think 1000:1 and
//! up) and the key set stays modest.

use crate::cell::{SnapshotCell, SnapshotGuard};
use crate::error::MapError;
use crate::snapshot::Snapshot;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A thread-safe map with wait-free reads and copy-on-write writes.
///
/// Every write publishes a fresh, fully built [`Snapshot`]; readers never
/// lock, never block on a writer, and never observe a partially applied
/// change. Writers exclude each other, so concurrent `put`s apply in some
/// total order.
///
/// Each `CowMap` owns its published snapshot; independent instances share
/// nothing.
///
/// # Examples
///
/// ```rust
/// use snapmap::CowMap;
///
/// let map = CowMap::new();
/// map.put("region", "eu-west-1").unwrap();
///
/// assert_eq!(map.get("region"), Some("eu-west-1"));
/// assert_eq!(map.get("zone"), None);
/// ```
pub struct CowMap<V> {
    /// The single live snapshot reference; readers only ever load it.
    cell: SnapshotCell<V>,
    /// Serializes the load-duplicate-publish sequence. Only the holder
    /// may publish. Mutual exclusion only; no fairness guarantee.
    writer: Mutex<()>,
}

impl<V> CowMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            cell: SnapshotCell::new(Snapshot::empty()),
            writer: Mutex::new(()),
        }
    }

    /// Borrows the current snapshot for one or more lookups.
    ///
    /// All lookups through the returned guard are answered from the same
    /// version, even if writers publish newer ones in the meantime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snapmap::CowMap;
    ///
    /// let map = CowMap::new();
    /// map.put("a", 1).unwrap();
    /// map.put("b", 2).unwrap();
    ///
    /// let snap = map.read();
    /// assert_eq!(snap.get("a"), Some(&1));
    /// assert_eq!(snap.len(), 2);
    /// ```
    #[inline]
    pub fn read(&self) -> SnapshotGuard<V> {
        self.cell.load()
    }

    /// Pins the current snapshot as an owned `Arc`.
    ///
    /// The pinned version can outlive any number of subsequent writes and
    /// its contents never change.
    #[inline]
    pub fn snapshot(&self) -> Arc<Snapshot<V>> {
        self.cell.load_full()
    }

    /// Number of entries in the current snapshot.
    #[inline]
    pub fn len(&self) -> usize {
        self.cell.load().len()
    }

    /// Returns true if the current snapshot has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell.load().is_empty()
    }

    /// Returns true if the current snapshot contains the key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.cell.load().contains_key(key)
    }
}

impl<V: Clone> CowMap<V> {
    /// Looks up a key, cloning the value out of the current snapshot.
    ///
    /// Wait-free: never blocks on a concurrent [`put`](CowMap::put). The
    /// result is always consistent with some snapshot that was published
    /// at or before this call, never a mix of two versions. Absence is
    /// `None`, not an error.
    ///
    /// For several lookups against one consistent version, or to avoid
    /// the clone, use [`read()`](CowMap::read).
    #[inline]
    pub fn get(&self, key: &str) -> Option<V> {
        self.cell.load().get(key).cloned()
    }

    /// Inserts or overwrites a key under exclusive writer access.
    ///
    /// The current snapshot is duplicated in full with the entry applied,
    /// then published atomically; the duplication makes this O(n) in the
    /// current entry count whether or not the key already exists.
    ///
    /// Once `put` returns, every subsequent [`get`](CowMap::get) from any
    /// thread observes this write or a later one. A `get` already in
    /// flight observes either the pre- or post-write snapshot, always a
    /// fully valid one.
    ///
    /// # Errors
    ///
    /// - [`MapError::EmptyKey`] if `key` is empty; nothing is mutated.
    /// - [`MapError::CapacityExhausted`] if the duplicate could not
    ///   reserve memory; the previously published snapshot remains the
    ///   visible state.
    pub fn put(&self, key: impl Into<String>, value: V) -> Result<(), MapError> {
        let key = key.into();
        if key.is_empty() {
            return Err(MapError::EmptyKey);
        }

        let _write = self.writer.lock();
        let current = self.cell.load_full();
        let next = current.duplicate_with(key, value)?;
        self.cell.store(Arc::new(next));
        Ok(())
    }

    /// Removes a key under exclusive writer access, returning its value.
    ///
    /// Same copy-on-write protocol as [`put`](CowMap::put), omitting the
    /// target key from the duplicate. Removing an absent key builds and
    /// publishes nothing and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// As for [`put`](CowMap::put).
    pub fn remove(&self, key: &str) -> Result<Option<V>, MapError> {
        if key.is_empty() {
            return Err(MapError::EmptyKey);
        }

        let _write = self.writer.lock();
        let current = self.cell.load_full();
        match current.duplicate_without(key)? {
            Some((next, removed)) => {
                self.cell.store(Arc::new(next));
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }
}

impl<V> Default for CowMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for CowMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowMap")
            .field("snapshot", &*self.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_roundtrip() {
        let map = CowMap::new();
        map.put("a", 1u32).unwrap();
        assert_eq!(map.get("a"), Some(1));
        assert_eq!(map.get("b"), None);
    }

    #[test]
    fn empty_key_is_rejected_before_any_mutation() {
        let map: CowMap<u32> = CowMap::new();
        assert_eq!(map.put("", 1), Err(MapError::EmptyKey));
        assert_eq!(map.remove(""), Err(MapError::EmptyKey));
        assert!(map.is_empty());
    }

    #[test]
    fn remove_missing_key_publishes_nothing() {
        let map: CowMap<u32> = CowMap::new();
        map.put("a", 1).unwrap();

        let before = map.snapshot();
        assert_eq!(map.remove("b"), Ok(None));
        // Same version is still published: no copy was made
        assert!(Arc::ptr_eq(&before, &map.snapshot()));
    }
}
