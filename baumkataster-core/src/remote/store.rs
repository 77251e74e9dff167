//! The request/response contract the sync coordinator talks to.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{FailureKind, RemoteFailure};
use crate::snapshot::Collection;

/// Outcome of fetching one collection. Never an `Err`: failures are data.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    pub records: Vec<Value>,
    pub failure: Option<RemoteFailure>,
}

impl Fetched {
    pub fn ok(records: Vec<Value>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    pub fn failed(failure: RemoteFailure) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(failure),
        }
    }

    pub fn is_schema_missing(&self) -> bool {
        self.failure
            .as_ref()
            .is_some_and(RemoteFailure::is_schema_missing)
    }

    /// Decodes the rows, turning the first undecodable one into a failure.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Vec<T>, RemoteFailure> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        self.records
            .into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| RemoteFailure::new(FailureKind::Malformed, e.to_string()))
            })
            .collect()
    }
}

/// Backend operations used by the sync coordinator.
///
/// Implementations never panic or return errors for remote problems; they
/// report them through `Fetched::failure` or a `false` / `None` result.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// True only if usable credentials are present. Gates every other call.
    fn is_configured(&self) -> bool;

    /// Fetches every row of a collection.
    async fn fetch_collection(&self, collection: Collection) -> Fetched;

    /// Writes a full record (insert or overwrite by id).
    async fn upsert_record(&self, collection: Collection, record: Value) -> bool;

    /// Deletes a record by id.
    async fn delete_record(&self, collection: Collection, id: &str) -> bool;

    /// Re-encodes and uploads a photo, returning its public URL.
    async fn upload_image(&self, image: Vec<u8>) -> Option<String>;
}
