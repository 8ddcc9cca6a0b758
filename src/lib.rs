//! Snapmap: a copy-on-write map for read-mostly, write-rare workloads.
//! Wait-free reads, serialized O(n) writes, snapshot isolation per read.
//!
//! The map keeps its entire contents in one immutable [`Snapshot`] behind
//! an atomically swappable [`SnapshotCell`]. Readers dereference the cell
//! without locking; a writer takes the write lock, duplicates the current
//! snapshot with its change applied, and publishes the duplicate in a
//! single atomic store.
//!
//! # Key Properties
//!
//! - **Wait-Free Reads**: a lookup is one atomic load plus a hash probe;
//!   it never blocks, not even while a write is in flight
//! - **Snapshot Isolation**: a captured snapshot never changes; hold it
//!   across any number of writes and it keeps answering from that version
//! - **Linearizable Writes**: writers exclude each other, so concurrent
//!   `put`s apply in some total order
//! - **Atomic Publication**: the next version is fully built before the
//!   swap; no reader can ever observe a half-copied map
//!
//! # Example
//!
//! ```rust
//! use snapmap::CowMap;
//!
//! let map = CowMap::new();
//!
//! map.put("region", "eu-west-1").unwrap();
//! map.put("replicas", "3").unwrap();
//!
//! // Wait-free lookups
//! assert_eq!(map.get("region"), Some("eu-west-1"));
//! assert_eq!(map.get("missing"), None);
//!
//! // Several lookups against one consistent version
//! let snap = map.read();
//! assert_eq!(snap.len(), 2);
//! assert!(snap.contains_key("replicas"));
//! ```
//!
//! # Cost Model
//!
//! Every write copies the whole map. That is the point of the design:
//! reads are as cheap as they can be, and the copy cost is acceptable
//! precisely when writes are rare: configuration-style data with a
//! read:write ratio well above 1000:1 and a bounded key set. For
//! write-heavy or very large maps, use a sharded concurrent map instead.
//!
//! # Design Notes
//!
//! An alternative publication scheme stores the map behind a plain,
//! unsynchronized pointer and relies on pointer-sized assignments being
//! observed atomically. Some runtimes happen to behave that way today;
//! Rust does not, and in Rust the scheme is not a micro-optimization but
//! a data race, which is undefined behavior. Publication here always
//! goes through [`SnapshotCell`]'s explicit atomic swap.

#![warn(missing_docs)]

mod cell;
mod error;
mod map;
mod snapshot;

pub use cell::{SnapshotCell, SnapshotGuard};
pub use error::MapError;
pub use map::CowMap;
pub use snapshot::Snapshot;
