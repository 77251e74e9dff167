//! Session data flow.
//!
//! At session start the coordinator fetches both collections once and picks
//! the data source:
//! - both fetches succeed: remote data, status `connected`
//! - a collection is missing on the server: `tables-missing`, local data
//! - any other failure: `error`, local data
//! - no usable remote: `unconfigured`, local data
//!
//! "Local data" is the last snapshot if both collections were saved, else the
//! built-in defaults. Saves and deletes are applied locally first; the remote
//! write is best effort and never retried.

mod coordinator;
mod status;
mod working_set;

pub use coordinator::{DataSource, RemoteWrite, SyncCoordinator};
pub use status::{SyncStatus, CONNECTED_INDICATOR_TTL};
pub use working_set::WorkingSet;
