//! Per-session data source selection and the optimistic write path.

use std::sync::Arc;
use std::time::Instant;

use crate::models::{CollectionRecord, Meadow, Tree};
use crate::remote::{Fetched, RemoteFailure, RemoteStore};
use crate::snapshot::{Collection, SnapshotStore};

use super::status::SyncStatus;
use super::working_set::WorkingSet;

/// Where the working set came from at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Snapshot,
    Defaults,
}

/// Remote side of a save or delete. The local side always succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteWrite {
    /// The remote accepted the change.
    Mirrored,
    /// No remote configured; the change is local only.
    LocalOnly,
    /// The remote refused or could not be reached. Should be shown to the user.
    Failed,
    /// The remote failed while its tables are missing; not worth reporting.
    Suppressed,
}

impl RemoteWrite {
    pub fn is_failure(&self) -> bool {
        *self == RemoteWrite::Failed
    }
}

/// Owns the working set for one session and decides where it comes from.
///
/// Local state is authoritative for the session. The remote only ever sees
/// best-effort mirrors of individual saves and deletes.
pub struct SyncCoordinator {
    remote: Option<Arc<dyn RemoteStore>>,
    snapshots: SnapshotStore,
    working: WorkingSet,
    status: SyncStatus,
    status_since: Instant,
    setup_needed: bool,
    last_failure: Option<RemoteFailure>,
    snapshot_damaged: bool,
    active: bool,
}

impl SyncCoordinator {
    pub fn new(remote: Option<Arc<dyn RemoteStore>>, snapshots: SnapshotStore) -> Self {
        Self {
            remote,
            snapshots,
            working: WorkingSet::default(),
            status: SyncStatus::default(),
            status_since: Instant::now(),
            setup_needed: false,
            last_failure: None,
            snapshot_damaged: false,
            active: false,
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Whether the status indicator should currently be shown.
    pub fn indicator_visible(&self) -> bool {
        self.status.indicator_visible(self.status_since.elapsed())
    }

    /// True once the remote reported that its collections don't exist.
    pub fn needs_setup(&self) -> bool {
        self.setup_needed
    }

    /// The failure behind an `Error` or `TablesMissing` status.
    pub fn last_failure(&self) -> Option<&RemoteFailure> {
        self.last_failure.as_ref()
    }

    /// True when the fallback found a snapshot file it could not read.
    ///
    /// The files are left as they are for the rest of the session.
    pub fn snapshot_damaged(&self) -> bool {
        self.snapshot_damaged
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working
    }

    pub fn trees(&self) -> &[Tree] {
        &self.working.trees
    }

    pub fn meadows(&self) -> &[Meadow] {
        &self.working.meadows
    }

    /// Runs the fetch-and-classify pass for a new session.
    pub async fn start_session(&mut self) -> DataSource {
        self.active = true;
        self.setup_needed = false;
        self.last_failure = None;
        self.snapshot_damaged = false;
        self.set_status(SyncStatus::Syncing);

        let Some(remote) = self.configured_remote().cloned() else {
            self.set_status(SyncStatus::Unconfigured);
            let source = self.load_fallback();
            self.settle();
            return source;
        };

        let (trees, meadows) = futures::join!(
            remote.fetch_collection(Collection::Trees),
            remote.fetch_collection(Collection::Meadows)
        );

        let source = match classify(trees, meadows) {
            Ok((trees, meadows)) => {
                tracing::debug!(
                    trees = trees.len(),
                    meadows = meadows.len(),
                    "adopting remote data"
                );
                self.working = WorkingSet::new(trees, meadows);
                self.set_status(SyncStatus::Connected);
                DataSource::Remote
            }
            Err(failure) => {
                if failure.is_schema_missing() {
                    self.setup_needed = true;
                    self.set_status(SyncStatus::TablesMissing);
                } else {
                    self.set_status(SyncStatus::Error);
                }
                tracing::warn!(kind = ?failure.kind, "remote unavailable: {}", failure);
                self.last_failure = Some(failure);
                self.load_fallback()
            }
        };

        self.settle();
        source
    }

    /// Ends the session: the working set is dropped and nothing more is persisted.
    pub fn end_session(&mut self) {
        self.active = false;
        self.working.clear();
    }

    /// Creates or replaces a tree.
    pub async fn save_tree(&mut self, tree: Tree) -> RemoteWrite {
        let outcome = self.mirror_upsert(&tree).await;
        self.working.upsert_tree(tree);
        self.settle();
        outcome
    }

    /// Creates or replaces a meadow.
    pub async fn save_meadow(&mut self, meadow: Meadow) -> RemoteWrite {
        let outcome = self.mirror_upsert(&meadow).await;
        self.working.upsert_meadow(meadow);
        self.settle();
        outcome
    }

    pub async fn delete_tree(&mut self, id: &str) -> RemoteWrite {
        let outcome = self.mirror_delete(Collection::Trees, id).await;
        self.working.remove_tree(id);
        self.settle();
        outcome
    }

    /// Deletes a meadow together with its trees.
    pub async fn delete_meadow(&mut self, id: &str) -> RemoteWrite {
        let outcome = self.mirror_delete(Collection::Meadows, id).await;
        let removed = self.working.remove_meadow(id);
        if removed > 0 {
            tracing::debug!(meadow = id, trees = removed, "removed trees with meadow");
        }
        self.settle();
        outcome
    }

    /// Uploads a tree photo. `None` when unconfigured or on any failure.
    pub async fn upload_image(&self, image: Vec<u8>) -> Option<String> {
        self.configured_remote()?.upload_image(image).await
    }

    fn configured_remote(&self) -> Option<&Arc<dyn RemoteStore>> {
        self.remote.as_ref().filter(|r| r.is_configured())
    }

    fn set_status(&mut self, status: SyncStatus) {
        if self.status != status {
            tracing::info!(from = %self.status, to = %status, "sync status changed");
        }
        self.status = status;
        self.status_since = Instant::now();
    }

    async fn mirror_upsert<T: CollectionRecord>(&self, record: &T) -> RemoteWrite {
        let Some(remote) = self.configured_remote() else {
            return RemoteWrite::LocalOnly;
        };

        let accepted = match serde_json::to_value(record) {
            Ok(value) => remote.upsert_record(T::COLLECTION, value).await,
            Err(e) => {
                tracing::warn!(id = record.id(), "record could not be encoded: {}", e);
                false
            }
        };
        self.write_outcome(accepted)
    }

    async fn mirror_delete(&self, collection: Collection, id: &str) -> RemoteWrite {
        let Some(remote) = self.configured_remote() else {
            return RemoteWrite::LocalOnly;
        };
        let accepted = remote.delete_record(collection, id).await;
        self.write_outcome(accepted)
    }

    fn write_outcome(&self, accepted: bool) -> RemoteWrite {
        match (accepted, self.status) {
            (true, _) => RemoteWrite::Mirrored,
            (false, SyncStatus::TablesMissing) => RemoteWrite::Suppressed,
            (false, _) => RemoteWrite::Failed,
        }
    }

    /// Adopts the snapshot if both collections were saved before, else the defaults.
    ///
    /// An unreadable file also means defaults, but marks the snapshot as
    /// damaged so the session never writes over what is left of it.
    fn load_fallback(&mut self) -> DataSource {
        let trees = self.snapshots.load::<Tree>(Collection::Trees);
        let meadows = self.snapshots.load::<Meadow>(Collection::Meadows);

        match (trees, meadows) {
            (Ok(Some(trees)), Ok(Some(meadows))) => {
                self.working = WorkingSet::new(trees, meadows);
                DataSource::Snapshot
            }
            (trees, meadows) => {
                for e in [trees.err(), meadows.err()].into_iter().flatten() {
                    tracing::warn!("ignoring unreadable snapshot: {}", e);
                    self.snapshot_damaged = true;
                }
                tracing::debug!("no complete snapshot, using built-in data");
                self.working = WorkingSet::defaults();
                DataSource::Defaults
            }
        }
    }

    /// Writes both collections to the snapshot store.
    ///
    /// Skipped outside a session, while the remote tables are missing and
    /// while the snapshot on disk is damaged.
    fn settle(&self) {
        if !self.active || !self.status.persists_snapshots() || self.snapshot_damaged {
            return;
        }

        let saved = self
            .snapshots
            .save(Collection::Trees, &self.working.trees)
            .and_then(|_| {
                self.snapshots
                    .save(Collection::Meadows, &self.working.meadows)
            });

        if let Err(e) = saved {
            tracing::warn!("failed to persist snapshot: {}", e);
        }
    }
}

/// Schema-missing on either side wins over any other outcome.
fn classify(trees: Fetched, meadows: Fetched) -> Result<(Vec<Tree>, Vec<Meadow>), RemoteFailure> {
    for fetched in [&trees, &meadows] {
        if let Some(failure) = fetched.failure.as_ref().filter(|f| f.is_schema_missing()) {
            return Err(failure.clone());
        }
    }

    let trees = trees.decode::<Tree>()?;
    let meadows = meadows.decode::<Meadow>()?;
    Ok((trees, meadows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, TreeLocation};
    use crate::remote::FailureKind;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory backend with switchable failure modes.
    #[derive(Default)]
    struct MockRemote {
        unconfigured: bool,
        tables: Mutex<HashMap<Collection, Vec<Value>>>,
        fetch_failures: HashMap<Collection, RemoteFailure>,
        reject_writes: bool,
        upserts: Mutex<usize>,
    }

    impl MockRemote {
        fn with_rows(trees: &[Tree], meadows: &[Meadow]) -> Self {
            let remote = Self::default();
            {
                let mut tables = remote.tables.lock().unwrap();
                tables.insert(
                    Collection::Trees,
                    trees.iter().map(|t| serde_json::to_value(t).unwrap()).collect(),
                );
                tables.insert(
                    Collection::Meadows,
                    meadows.iter().map(|m| serde_json::to_value(m).unwrap()).collect(),
                );
            }
            remote
        }

        fn failing(mut self, collection: Collection, kind: FailureKind) -> Self {
            self.fetch_failures
                .insert(collection, RemoteFailure::new(kind, "boom"));
            self
        }

        fn rows(&self, collection: Collection) -> Vec<Value> {
            self.tables
                .lock()
                .unwrap()
                .get(&collection)
                .cloned()
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl RemoteStore for MockRemote {
        fn is_configured(&self) -> bool {
            !self.unconfigured
        }

        async fn fetch_collection(&self, collection: Collection) -> Fetched {
            match self.fetch_failures.get(&collection) {
                Some(failure) => Fetched::failed(failure.clone()),
                None => Fetched::ok(self.rows(collection)),
            }
        }

        async fn upsert_record(&self, collection: Collection, record: Value) -> bool {
            if self.reject_writes {
                return false;
            }
            *self.upserts.lock().unwrap() += 1;
            let mut tables = self.tables.lock().unwrap();
            let rows = tables.entry(collection).or_default();
            rows.retain(|r| r["id"] != record["id"]);
            rows.push(record);
            true
        }

        async fn delete_record(&self, collection: Collection, id: &str) -> bool {
            if self.reject_writes {
                return false;
            }
            let mut tables = self.tables.lock().unwrap();
            tables.entry(collection).or_default().retain(|r| r["id"] != id);
            true
        }

        async fn upload_image(&self, _image: Vec<u8>) -> Option<String> {
            None
        }
    }

    fn remote_trees() -> Vec<Tree> {
        vec![Tree::with_id(
            "t-100",
            "Kaiser Wilhelm",
            "m-100",
            NaiveDate::from_ymd_opt(2015, 10, 3).unwrap(),
            TreeLocation::new(48.88, 9.53),
        )]
    }

    fn remote_meadows() -> Vec<Meadow> {
        vec![Meadow::with_id("m-100", "Streuobstwiese", 2.0, GeoPoint::new(48.88, 9.53))]
    }

    fn setup(remote: Option<MockRemote>) -> (TempDir, SnapshotStore, Option<Arc<MockRemote>>, SyncCoordinator) {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path().to_path_buf());
        let remote = remote.map(Arc::new);
        let handle = remote.clone().map(|r| r as Arc<dyn RemoteStore>);
        let coordinator = SyncCoordinator::new(handle, store.clone());
        (temp, store, remote, coordinator)
    }

    fn seed_snapshot(store: &SnapshotStore) -> (Vec<Tree>, Vec<Meadow>) {
        let meadows = vec![Meadow::with_id("m-local", "Hauswiese", 0.3, GeoPoint::default())];
        let trees = vec![Tree::with_id(
            "t-local",
            "Mirabelle",
            "m-local",
            NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            GeoPoint::default().into(),
        )];
        store.save(Collection::Trees, &trees).unwrap();
        store.save(Collection::Meadows, &meadows).unwrap();
        (trees, meadows)
    }

    #[tokio::test]
    async fn test_connected_adopts_remote_and_persists() {
        let remote = MockRemote::with_rows(&remote_trees(), &remote_meadows());
        let (_temp, store, _remote, mut sync) = setup(Some(remote));
        seed_snapshot(&store);

        let source = sync.start_session().await;

        assert_eq!(source, DataSource::Remote);
        assert_eq!(sync.status(), SyncStatus::Connected);
        assert_eq!(sync.trees(), remote_trees().as_slice());
        assert_eq!(sync.meadows(), remote_meadows().as_slice());
        assert_eq!(store.load::<Tree>(Collection::Trees).unwrap().unwrap(), remote_trees());
        assert_eq!(
            store.load::<Meadow>(Collection::Meadows).unwrap().unwrap(),
            remote_meadows()
        );
    }

    #[tokio::test]
    async fn test_schema_missing_leaves_snapshot_untouched() {
        let remote = MockRemote::with_rows(&[], &remote_meadows())
            .failing(Collection::Trees, FailureKind::SchemaMissing);
        let (_temp, store, _remote, mut sync) = setup(Some(remote));
        seed_snapshot(&store);
        let before = std::fs::read(store.path(Collection::Trees)).unwrap();

        let source = sync.start_session().await;

        assert_eq!(sync.status(), SyncStatus::TablesMissing);
        assert!(sync.needs_setup());
        assert_eq!(source, DataSource::Snapshot);
        assert_eq!(sync.trees()[0].id, "t-local");

        sync.save_tree(remote_trees().remove(0)).await;
        assert_eq!(std::fs::read(store.path(Collection::Trees)).unwrap(), before);
    }

    #[tokio::test]
    async fn test_schema_missing_on_both_without_snapshot_writes_nothing() {
        let remote = MockRemote::default()
            .failing(Collection::Trees, FailureKind::SchemaMissing)
            .failing(Collection::Meadows, FailureKind::SchemaMissing);
        let (_temp, store, _remote, mut sync) = setup(Some(remote));

        assert_eq!(sync.start_session().await, DataSource::Defaults);
        assert!(!store.exists(Collection::Trees));
        assert!(!store.exists(Collection::Meadows));
    }

    #[tokio::test]
    async fn test_unconfigured_uses_snapshot() {
        let (_temp, store, _remote, mut sync) = setup(None);
        let (trees, meadows) = seed_snapshot(&store);

        assert_eq!(sync.start_session().await, DataSource::Snapshot);
        assert_eq!(sync.status(), SyncStatus::Unconfigured);
        assert_eq!(sync.trees(), trees.as_slice());
        assert_eq!(sync.meadows(), meadows.as_slice());
    }

    #[tokio::test]
    async fn test_unconfigured_first_run_uses_defaults() {
        let remote = MockRemote {
            unconfigured: true,
            ..MockRemote::with_rows(&remote_trees(), &remote_meadows())
        };
        let (_temp, store, _remote, mut sync) = setup(Some(remote));

        assert_eq!(sync.start_session().await, DataSource::Defaults);
        assert_eq!(sync.status(), SyncStatus::Unconfigured);
        assert_eq!(sync.working_set(), &WorkingSet::defaults());
        assert!(store.exists(Collection::Meadows));
    }

    #[tokio::test]
    async fn test_partial_snapshot_falls_back_to_defaults() {
        let (_temp, store, _remote, mut sync) = setup(None);
        store.save(Collection::Trees, &remote_trees()).unwrap();

        assert_eq!(sync.start_session().await, DataSource::Defaults);
    }

    #[tokio::test]
    async fn test_trees_fail_meadows_succeed_is_error() {
        let remote = MockRemote::with_rows(&[], &remote_meadows())
            .failing(Collection::Trees, FailureKind::Network);
        let (_temp, store, _remote, mut sync) = setup(Some(remote));

        let source = sync.start_session().await;

        assert_eq!(sync.status(), SyncStatus::Error);
        assert!(!sync.needs_setup());
        assert_eq!(source, DataSource::Defaults);
        assert!(sync.meadow("m-100").is_none());
        let cached: Vec<Meadow> = store.load(Collection::Meadows).unwrap().unwrap();
        assert!(cached.iter().all(|m| m.id != "m-100"));
    }

    #[tokio::test]
    async fn test_undecodable_rows_are_error() {
        let remote = MockRemote::with_rows(&remote_trees(), &remote_meadows());
        remote
            .tables
            .lock()
            .unwrap()
            .insert(Collection::Meadows, vec![serde_json::json!({ "id": 5 })]);
        let (_temp, _store, _remote, mut sync) = setup(Some(remote));

        sync.start_session().await;
        assert_eq!(sync.status(), SyncStatus::Error);
        assert_eq!(sync.last_failure().unwrap().kind, FailureKind::Malformed);
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let remote = MockRemote::with_rows(&remote_trees(), &remote_meadows());
        let (_temp, store, remote, mut sync) = setup(Some(remote));
        sync.start_session().await;

        let tree = remote_trees().remove(0).with_description("Neu gepflanzt");
        assert_eq!(sync.save_tree(tree.clone()).await, RemoteWrite::Mirrored);
        let once = sync.working_set().clone();
        assert_eq!(sync.save_tree(tree).await, RemoteWrite::Mirrored);

        assert_eq!(sync.working_set(), &once);
        let remote = remote.unwrap();
        assert_eq!(remote.rows(Collection::Trees).len(), 1);
        assert_eq!(*remote.upserts.lock().unwrap(), 2);
        assert_eq!(store.load::<Tree>(Collection::Trees).unwrap().unwrap(), once.trees);
    }

    #[tokio::test]
    async fn test_save_without_remote_is_local_only() {
        let (_temp, store, _remote, mut sync) = setup(None);
        sync.start_session().await;

        let meadow = Meadow::new("Neue Wiese", 0.5, GeoPoint::default());
        assert_eq!(sync.save_meadow(meadow.clone()).await, RemoteWrite::LocalOnly);

        let cached: Vec<Meadow> = store.load(Collection::Meadows).unwrap().unwrap();
        assert!(cached.contains(&meadow));
    }

    #[tokio::test]
    async fn test_rejected_save_still_applies_locally() {
        let remote = MockRemote {
            reject_writes: true,
            ..MockRemote::with_rows(&remote_trees(), &remote_meadows())
        };
        let (_temp, _store, _remote, mut sync) = setup(Some(remote));
        sync.start_session().await;

        let meadow = Meadow::new("Offline", 1.0, GeoPoint::default());
        let outcome = sync.save_meadow(meadow.clone()).await;

        assert!(outcome.is_failure());
        assert!(sync.meadows().contains(&meadow));
    }

    #[tokio::test]
    async fn test_write_failure_suppressed_while_tables_missing() {
        let remote = MockRemote {
            reject_writes: true,
            ..MockRemote::default().failing(Collection::Meadows, FailureKind::SchemaMissing)
        };
        let (_temp, _store, _remote, mut sync) = setup(Some(remote));
        sync.start_session().await;

        let outcome = sync.delete_tree("t1").await;
        assert_eq!(outcome, RemoteWrite::Suppressed);
        assert!(sync.working_set().tree("t1").is_none());
    }

    #[tokio::test]
    async fn test_delete_applies_locally_when_remote_fails() {
        let (_temp, store, _remote, mut sync) = setup(None);
        seed_snapshot(&store);
        sync.start_session().await;

        let remote = MockRemote {
            reject_writes: true,
            ..MockRemote::default()
        };
        sync.remote = Some(Arc::new(remote));

        assert_eq!(sync.delete_tree("t-local").await, RemoteWrite::Failed);
        assert!(sync.trees().is_empty());
        let cached: Vec<Tree> = store.load(Collection::Trees).unwrap().unwrap();
        assert!(cached.is_empty());
    }

    #[tokio::test]
    async fn test_delete_meadow_cascades_to_trees() {
        let remote = MockRemote::with_rows(&remote_trees(), &remote_meadows());
        let (_temp, _store, _remote, mut sync) = setup(Some(remote));
        sync.start_session().await;

        assert_eq!(sync.delete_meadow("m-100").await, RemoteWrite::Mirrored);
        assert!(sync.meadows().is_empty());
        assert!(sync.trees().is_empty());
    }

    #[tokio::test]
    async fn test_end_session_stops_persistence() {
        let (_temp, store, _remote, mut sync) = setup(None);
        sync.start_session().await;
        sync.end_session();

        assert!(!sync.is_active());
        assert!(sync.working_set().is_empty());

        sync.save_meadow(Meadow::new("Nach Logout", 0.0, GeoPoint::default()))
            .await;
        let cached: Vec<Meadow> = store.load(Collection::Meadows).unwrap().unwrap();
        assert!(cached.iter().all(|m| m.name != "Nach Logout"));
    }

    #[tokio::test]
    async fn test_new_session_restarts_in_syncing() {
        let (_temp, _store, _remote, mut sync) = setup(None);
        assert_eq!(sync.status(), SyncStatus::Syncing);
        sync.start_session().await;
        assert!(sync.indicator_visible());
        assert_eq!(sync.status(), SyncStatus::Unconfigured);
    }

    #[tokio::test]
    async fn test_damaged_snapshot_is_never_overwritten() {
        let (_temp, store, _remote, mut sync) = setup(None);
        let (_, meadows) = seed_snapshot(&store);
        std::fs::write(store.path(Collection::Trees), b"[{\"id\":\"t-local\",").unwrap();

        assert_eq!(sync.start_session().await, DataSource::Defaults);
        assert!(sync.snapshot_damaged());
        assert_eq!(sync.working_set(), &WorkingSet::defaults());

        sync.save_meadow(Meadow::new("Neue Wiese", 1.0, GeoPoint::default()))
            .await;

        let kept: Vec<Meadow> = store.load(Collection::Meadows).unwrap().unwrap();
        assert_eq!(kept, meadows);
        assert_eq!(
            std::fs::read(store.path(Collection::Trees)).unwrap(),
            b"[{\"id\":\"t-local\",".to_vec()
        );
    }

    #[tokio::test]
    async fn test_remote_data_replaces_damaged_snapshot() {
        let remote = MockRemote::with_rows(&remote_trees(), &remote_meadows());
        let (_temp, store, _remote, mut sync) = setup(Some(remote));
        std::fs::write(store.path(Collection::Trees), b"{not json").unwrap();

        assert_eq!(sync.start_session().await, DataSource::Remote);
        assert!(!sync.snapshot_damaged());
        let cached: Vec<Tree> = store.load(Collection::Trees).unwrap().unwrap();
        assert_eq!(cached, remote_trees());
    }

    #[tokio::test]
    async fn test_rejected_draft_leaves_session_untouched() {
        let (_temp, store, _remote, mut sync) = setup(None);
        seed_snapshot(&store);
        sync.start_session().await;

        let before = sync.working_set().clone();
        let file_before = std::fs::read(store.path(Collection::Meadows)).unwrap();

        let draft = crate::editor::MeadowDraft {
            name: "Hangwiese".to_string(),
            area: "-3".to_string(),
            ..crate::editor::MeadowDraft::new()
        };
        assert!(draft.build().is_err());

        assert_eq!(sync.working_set(), &before);
        assert_eq!(
            std::fs::read(store.path(Collection::Meadows)).unwrap(),
            file_before
        );
    }

    #[tokio::test]
    async fn test_cleared_fields_are_sent_as_null() {
        let trees = vec![remote_trees()[0]
            .clone()
            .with_description("Mistelbefall")
            .with_image_url("https://example.com/t-100.jpg")];
        let remote = MockRemote::with_rows(&trees, &remote_meadows());
        let (_temp, _store, remote, mut sync) = setup(Some(remote));
        sync.start_session().await;

        let mut tree = sync.trees()[0].clone();
        tree.description = None;
        tree.image_url = None;
        assert_eq!(sync.save_tree(tree).await, RemoteWrite::Mirrored);

        let rows = remote.unwrap().rows(Collection::Trees);
        let row = rows[0].as_object().unwrap();
        assert_eq!(row.get("description"), Some(&Value::Null));
        assert_eq!(row.get("imageUrl"), Some(&Value::Null));
    }

    impl SyncCoordinator {
        fn meadow(&self, id: &str) -> Option<&Meadow> {
            self.working.meadow(id)
        }
    }
}
