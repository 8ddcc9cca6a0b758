//! `Snapshot<V>`: one immutable version of the map's contents.
//!
//! A snapshot is created fully built and is never mutated afterwards; the
//! map replaces the published snapshot wholesale on every write. Readers
//! that captured a snapshot keep observing that exact version no matter
//! what writers publish later.
//!
//! Hashing uses `foldhash::fast`: fast, quality hashing with a per-map
//! random seed.

use crate::error::MapError;
use foldhash::fast::RandomState;
use std::collections::HashMap;
use std::fmt;

/// An immutable mapping from string keys to values at one point in
/// logical time.
///
/// Only read accessors are exposed; there is no way to mutate a snapshot
/// after construction. The successor-building operations used by the
/// writer fully construct the next version before it can be published.
pub struct Snapshot<V> {
    entries: HashMap<String, V, RandomState>,
}

impl<V> Snapshot<V> {
    /// Creates a snapshot with no entries.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::with_hasher(RandomState::default()),
        }
    }

    /// Looks up a key in this version.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use snapmap::Snapshot;
    ///
    /// let snap: Snapshot<u32> = Snapshot::empty();
    /// assert_eq!(snap.get("missing"), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns true if this version contains the key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries in this version.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this version has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries of this version, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the keys of this version, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Allocates a map sized for `additional` entries, surfacing
    /// reservation failure instead of aborting mid-build.
    fn reserved(additional: usize) -> Result<HashMap<String, V, RandomState>, MapError> {
        let mut entries = HashMap::with_hasher(RandomState::default());
        entries
            .try_reserve(additional)
            .map_err(|_| MapError::CapacityExhausted { entries: additional })?;
        Ok(entries)
    }
}

impl<V: Clone> Snapshot<V> {
    /// Builds the successor version: every entry of `self` plus `key`
    /// inserted (or overwritten) with `value`.
    ///
    /// The new map is fully reserved and populated before being returned;
    /// on reservation failure `self` is untouched and no partial version
    /// exists anywhere.
    pub(crate) fn duplicate_with(&self, key: String, value: V) -> Result<Self, MapError> {
        let mut entries = Self::reserved(self.entries.len() + 1)?;
        for (k, v) in &self.entries {
            entries.insert(k.clone(), v.clone());
        }
        entries.insert(key, value);
        Ok(Self { entries })
    }

    /// Builds the successor version with `key` omitted, returning it
    /// together with the removed value.
    ///
    /// Returns `Ok(None)` if the key is absent; no successor is built in
    /// that case.
    pub(crate) fn duplicate_without(&self, key: &str) -> Result<Option<(Self, V)>, MapError> {
        let removed = match self.entries.get(key) {
            Some(value) => value.clone(),
            None => return Ok(None),
        };
        let mut entries = Self::reserved(self.entries.len() - 1)?;
        for (k, v) in &self.entries {
            if k != key {
                entries.insert(k.clone(), v.clone());
            }
        }
        Ok(Some((Self { entries }, removed)))
    }
}

impl<V> Default for Snapshot<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> FromIterator<(String, V)> for Snapshot<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<V: PartialEq> PartialEq for Snapshot<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: fmt::Debug> fmt::Debug for Snapshot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
