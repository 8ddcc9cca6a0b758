//! `SnapshotCell<V>`: the atomic snapshot holder.
//!
//! A single-value container publishing the map's current [`Snapshot`].
//! Loads are wait-free (a single atomic pointer read on the fast path)
//! and stores are all-or-nothing: every reader observes either the old or
//! the new snapshot, never a torn reference and never a partially built
//! map.
//!
//! # Key Properties
//!
//! - **Wait-free `load`**: never blocks, never fails, safe from any number
//!   of concurrent callers, including while a `store` is in flight
//! - **Atomic `store`**: sequentially consistent publication; once a store
//!   completes, all subsequent loads on all threads see it
//! - **Automatic reclamation**: a retired snapshot is freed when the last
//!   reader holding it drops its reference
//!
//! The cell itself does not serialize writers; that is the map's job.
//! A variant that publishes through a plain, unsynchronized pointer
//! assignment is rejected outright: in Rust that is a data race and
//! therefore undefined behavior, not a micro-optimization.

use crate::snapshot::Snapshot;
use arc_swap::{ArcSwap, Guard};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// SnapshotGuard — borrow of the currently published snapshot
// ---------------------------------------------------------------------------

/// Guard returned by [`SnapshotCell::load()`].
///
/// Dereferences to [`Snapshot<V>`]. The referenced snapshot stays valid
/// for the lifetime of the guard even if a writer publishes a newer one
/// in the meantime.
///
/// This is the cheapest way to read: perform several lookups through one
/// guard and they are all answered from the same consistent version.
pub struct SnapshotGuard<V> {
    inner: Guard<Arc<Snapshot<V>>>,
}

impl<V> Deref for SnapshotGuard<V> {
    type Target = Snapshot<V>;

    #[inline]
    fn deref(&self) -> &Snapshot<V> {
        &self.inner
    }
}

impl<V: fmt::Debug> fmt::Debug for SnapshotGuard<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

// ---------------------------------------------------------------------------
// SnapshotCell
// ---------------------------------------------------------------------------

/// Atomic holder for the currently published [`Snapshot`].
///
/// # Examples
///
/// ```rust
/// use snapmap::{Snapshot, SnapshotCell};
/// use std::sync::Arc;
///
/// let cell = SnapshotCell::new(Snapshot::empty());
/// assert!(cell.load().is_empty());
///
/// let next: Snapshot<u32> = [("a".to_string(), 1)].into_iter().collect();
/// cell.store(Arc::new(next));
/// assert_eq!(cell.load().get("a"), Some(&1));
/// ```
pub struct SnapshotCell<V> {
    inner: ArcSwap<Snapshot<V>>,
}

impl<V> SnapshotCell<V> {
    /// Creates a cell publishing `snapshot` as the initial version.
    pub fn new(snapshot: Snapshot<V>) -> Self {
        Self {
            inner: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Loads the currently published snapshot.
    ///
    /// Wait-free; never blocks on concurrent stores. Call once and reuse
    /// the guard for multiple lookups to stay on one consistent version.
    #[inline]
    pub fn load(&self) -> SnapshotGuard<V> {
        SnapshotGuard {
            inner: self.inner.load(),
        }
    }

    /// Loads the currently published snapshot as an owned `Arc`.
    ///
    /// Slightly more expensive than [`load()`](SnapshotCell::load), but
    /// the result can be held for arbitrarily long, across writes and
    /// across threads, and keeps observing that exact version.
    #[inline]
    pub fn load_full(&self) -> Arc<Snapshot<V>> {
        self.inner.load_full()
    }

    /// Atomically publishes `snapshot`, replacing the previous version.
    ///
    /// All-or-nothing from every reader's perspective. The retired
    /// version is freed once the last reader drops its reference.
    #[inline]
    pub fn store(&self, snapshot: Arc<Snapshot<V>>) {
        self.inner.store(snapshot);
    }
}

impl<V> Default for SnapshotCell<V> {
    /// Creates a cell publishing an empty snapshot.
    fn default() -> Self {
        Self::new(Snapshot::empty())
    }
}

impl<V: fmt::Debug> fmt::Debug for SnapshotCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotCell")
            .field("snapshot", &*self.load())
            .finish()
    }
}
