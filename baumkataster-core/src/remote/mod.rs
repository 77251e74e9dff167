//! Hosted backend access.
//!
//! The backend exposes two collections (`trees`, `meadows`), a password
//! auth service and a public image bucket. Every operation degrades to a
//! "failed" result instead of an error so that callers can fall back to the
//! local snapshot.

mod client;
mod endpoint;
mod error;
mod image;
mod session;
mod store;

pub use client::RestClient;
pub use endpoint::{RemoteEndpoint, DEFAULT_IMAGE_BUCKET};
pub use error::{classify_api_error, ApiError, AuthError, FailureKind, RemoteFailure};
pub use self::image::{fit_within, object_path, prepare_image, JPEG_QUALITY, MAX_DIMENSION};
pub use session::{AuthSession, AuthUser};
pub use store::{Fetched, RemoteStore};

use std::sync::Arc;

use once_cell::sync::OnceCell;

/// SQL that creates the collections, access policies and image bucket.
pub const SETUP_SQL: &str = include_str!("setup.sql");

static SHARED_CLIENT: OnceCell<Arc<RestClient>> = OnceCell::new();

/// Process-wide client, created on first use.
///
/// Returns `None` while the endpoint is unconfigured. Once created, later
/// calls return the same instance regardless of the endpoint passed.
pub fn shared_client(endpoint: &RemoteEndpoint) -> Option<Arc<RestClient>> {
    if let Some(client) = SHARED_CLIENT.get() {
        return Some(client.clone());
    }
    if !endpoint.is_configured() {
        return None;
    }
    Some(
        SHARED_CLIENT
            .get_or_init(|| Arc::new(RestClient::new(endpoint.clone())))
            .clone(),
    )
}
