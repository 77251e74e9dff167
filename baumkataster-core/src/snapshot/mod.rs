//! Same-device cache of the last known working set.
//!
//! Each collection is stored as one JSON file in the data directory:
//! - `bk_trees.json`: array of Tree records
//! - `bk_meadows.json`: array of Meadow records

mod collection;
mod storage;

pub use collection::Collection;
pub use storage::{SnapshotError, SnapshotStore};
