//! Connection settings for the hosted backend.

use serde::{Deserialize, Serialize};

use crate::snapshot::Collection;

/// Public keys issued by the backend are long JWTs; anything shorter is a placeholder.
const MIN_KEY_LEN: usize = 50;

/// Bucket that holds uploaded tree photos.
pub const DEFAULT_IMAGE_BUCKET: &str = "tree-images";

/// Endpoint URL plus public (anon) key for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEndpoint {
    pub url: String,
    pub anon_key: String,
    pub image_bucket: String,
    /// Accept plain `http://` URLs (local development backends).
    pub allow_insecure: bool,
}

impl RemoteEndpoint {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            image_bucket: DEFAULT_IMAGE_BUCKET.to_string(),
            allow_insecure: false,
        }
    }

    pub fn with_image_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.image_bucket = bucket.into();
        self
    }

    pub fn allow_insecure(mut self, allow: bool) -> Self {
        self.allow_insecure = allow;
        self
    }

    /// True only if the URL is well-formed and the key has a plausible length.
    pub fn is_configured(&self) -> bool {
        let url_ok = self.url.starts_with("https://")
            || (self.allow_insecure && self.url.starts_with("http://"));
        url_ok && self.url.len() > "https://".len() && self.anon_key.len() > MIN_KEY_LEN
    }

    /// Database REST URL for a collection.
    pub fn rest_url(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base(), collection.name())
    }

    /// Auth URL for a given path, e.g. `token?grant_type=password`.
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base(), path)
    }

    /// Upload URL for an object in the image bucket.
    pub fn object_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base(),
            self.image_bucket,
            object_path
        )
    }

    /// Publicly readable URL for an object in the image bucket.
    pub fn public_object_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base(),
            self.image_bucket,
            object_path
        )
    }

    fn base(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
