//! Baumkataster Core Library
//!
//! Tree and meadow inventory with an optional cloud mirror and local
//! offline fallback.

pub mod editor;
pub mod models;
pub mod remote;
pub mod snapshot;
pub mod sync;

pub use editor::{MeadowDraft, TreeDraft, ValidationError};
pub use models::{
    default_meadows, default_trees, CollectionRecord, GeoPoint, Meadow, Tree, TreeCondition,
    TreeLocation,
};
pub use remote::{
    shared_client, AuthError, AuthSession, AuthUser, FailureKind, RemoteEndpoint, RemoteFailure,
    RemoteStore, RestClient, SETUP_SQL,
};
pub use snapshot::{Collection, SnapshotError, SnapshotStore};
pub use sync::{DataSource, RemoteWrite, SyncCoordinator, SyncStatus, WorkingSet};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
