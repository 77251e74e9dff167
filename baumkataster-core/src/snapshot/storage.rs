//! JSON snapshot storage for persisting collections to disk.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

use super::Collection;

/// Storage for collection snapshots.
///
/// Synchronous by design: reads and writes happen inline with the caller.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a new store rooted at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a collection snapshot.
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.filename())
    }

    /// Checks if a snapshot exists on disk.
    pub fn exists(&self, collection: Collection) -> bool {
        self.path(collection).exists()
    }

    /// Loads a snapshot from disk.
    ///
    /// Returns `Ok(None)` if the collection has never been saved.
    pub fn load<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Option<Vec<T>>, SnapshotError> {
        let path = self.path(collection);

        match fs::read(&path) {
            Ok(bytes) => {
                let records = serde_json::from_slice(&bytes)
                    .map_err(|e| SnapshotError::Parse(path, e))?;
                Ok(Some(records))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Io(path, e)),
        }
    }

    /// Saves a snapshot, replacing whatever was stored before.
    ///
    /// Creates the data directory if it doesn't exist. The file is written
    /// next to the target and renamed into place, so a reader never sees a
    /// partially written snapshot.
    pub fn save<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| SnapshotError::Io(self.data_dir.clone(), e))?;

        let path = self.path(collection);
        let bytes = serde_json::to_vec(records).map_err(|e| SnapshotError::Parse(path.clone(), e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| SnapshotError::Io(tmp.clone(), e))?;
        fs::rename(&tmp, &path).map_err(|e| SnapshotError::Io(path, e))?;

        Ok(())
    }
}

/// Errors that can occur during snapshot operations.
#[derive(Debug)]
pub enum SnapshotError {
    /// I/O error reading or writing a file.
    Io(PathBuf, io::Error),
    /// Snapshot contents could not be (de)serialized.
    Parse(PathBuf, serde_json::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            SnapshotError::Parse(path, e) => {
                write!(f, "Invalid snapshot {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(_, e) => Some(e),
            SnapshotError::Parse(_, e) => Some(e),
        }
    }
}
