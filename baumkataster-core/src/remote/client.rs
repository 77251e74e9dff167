//! REST client for the hosted backend.
//!
//! Talks to three services behind one base URL:
//! - `/rest/v1/<table>`: row access for `trees` and `meadows`
//! - `/auth/v1/...`: password sign-in, token refresh, sign-out
//! - `/storage/v1/object/...`: photo uploads

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Method, RequestBuilder, Response};
use serde_json::Value;
use tokio::sync::RwLock;

use super::endpoint::RemoteEndpoint;
use super::error::{ApiError, AuthError, FailureKind, RemoteFailure};
use super::image::{object_path, prepare_image, CONTENT_TYPE};
use super::session::{AuthSession, TokenResponse};
use super::store::{Fetched, RemoteStore};
use crate::snapshot::Collection;

/// Client for one backend project.
///
/// Holds the signed-in session, if any; rows and uploads are sent with the
/// session's access token so that row-level security sees the user.
#[derive(Debug)]
pub struct RestClient {
    endpoint: RemoteEndpoint,
    http: reqwest::Client,
    session: RwLock<Option<AuthSession>>,
}

impl RestClient {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self {
            endpoint,
            http: reqwest::Client::new(),
            session: RwLock::new(None),
        }
    }

    pub fn endpoint(&self) -> &RemoteEndpoint {
        &self.endpoint
    }

    /// Returns a copy of the current session.
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    /// Installs a previously saved session without talking to the server.
    pub async fn restore_session(&self, session: AuthSession) {
        *self.session.write().await = Some(session);
    }

    /// Signs in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if !self.endpoint.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        let body = serde_json::json!({ "email": email, "password": password });
        let session = self.token_grant("password", body).await?;
        tracing::info!(user = %session.user_id(), "signed in");
        Ok(session)
    }

    /// Exchanges the refresh token for a new access token.
    pub async fn refresh(&self) -> Result<AuthSession, AuthError> {
        if !self.endpoint.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        let refresh_token = self
            .session()
            .await
            .map(|s| s.refresh_token)
            .ok_or(AuthError::NoSession)?;

        let body = serde_json::json!({ "refresh_token": refresh_token });
        let session = self.token_grant("refresh_token", body).await?;
        tracing::debug!(user = %session.user_id(), "refreshed session");
        Ok(session)
    }

    /// Ends the session. The local session is dropped even if the server call fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };

        let response = self
            .http
            .post(self.endpoint.auth_url("logout"))
            .header("apikey", &self.endpoint.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await.into());
        }
        Ok(())
    }

    async fn token_grant(&self, grant_type: &str, body: Value) -> Result<AuthSession, AuthError> {
        let url = self
            .endpoint
            .auth_url(&format!("token?grant_type={}", urlencoding::encode(grant_type)));

        let response = self
            .http
            .post(url)
            .header("apikey", &self.endpoint.anon_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await.into());
        }

        let token: TokenResponse = response.json().await?;
        let session = token.into_session(Utc::now());
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }

    /// Builds a request carrying the public key and the best available bearer token.
    async fn request(&self, method: Method, url: String) -> RequestBuilder {
        let token = match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.endpoint.anon_key.clone(),
        };

        self.http
            .request(method, url)
            .header("apikey", &self.endpoint.anon_key)
            .bearer_auth(token)
    }
}

#[async_trait]
impl RemoteStore for RestClient {
    fn is_configured(&self) -> bool {
        self.endpoint.is_configured()
    }

    async fn fetch_collection(&self, collection: Collection) -> Fetched {
        if !self.is_configured() {
            return Fetched::default();
        }

        let url = format!("{}?select=*", self.endpoint.rest_url(collection));
        tracing::debug!(%collection, "fetching collection");

        let response = match self.request(Method::GET, url).await.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%collection, "fetch failed: {}", e);
                return Fetched::failed(RemoteFailure::network(e));
            }
        };

        if !response.status().is_success() {
            let failure = RemoteFailure::from(api_error(response).await);
            tracing::warn!(%collection, kind = ?failure.kind, "fetch rejected: {}", failure);
            return Fetched::failed(failure);
        }

        match response.json::<Vec<Value>>().await {
            Ok(records) => Fetched::ok(records),
            Err(e) => Fetched::failed(RemoteFailure::new(FailureKind::Malformed, e.to_string())),
        }
    }

    async fn upsert_record(&self, collection: Collection, mut record: Value) -> bool {
        if !self.is_configured() {
            return false;
        }

        let Some(session) = self.session().await else {
            tracing::warn!(%collection, "upsert refused: no active session");
            return false;
        };

        if let Some(fields) = record.as_object_mut() {
            fields.insert(
                "user_id".to_string(),
                Value::String(session.user_id().to_string()),
            );
        }

        let result = self
            .request(Method::POST, self.endpoint.rest_url(collection))
            .await
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&record)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                let err = api_error(response).await;
                tracing::warn!(%collection, status = err.status, "upsert rejected: {}", err.message);
                false
            }
            Err(e) => {
                tracing::warn!(%collection, "upsert failed: {}", e);
                false
            }
        }
    }

    async fn delete_record(&self, collection: Collection, id: &str) -> bool {
        if !self.is_configured() {
            return false;
        }

        let url = format!(
            "{}?id=eq.{}",
            self.endpoint.rest_url(collection),
            urlencoding::encode(id)
        );

        match self.request(Method::DELETE, url).await.send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                let err = api_error(response).await;
                tracing::warn!(%collection, id, "delete rejected: {}", err.message);
                false
            }
            Err(e) => {
                tracing::warn!(%collection, id, "delete failed: {}", e);
                false
            }
        }
    }

    async fn upload_image(&self, image: Vec<u8>) -> Option<String> {
        if !self.is_configured() {
            return None;
        }

        if self.session().await.is_none() {
            tracing::warn!("upload refused: no active session");
            return None;
        }

        let prepared = match tokio::task::spawn_blocking(move || prepare_image(&image)).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                tracing::warn!("image could not be prepared: {}", e);
                return None;
            }
            Err(e) => {
                tracing::warn!("image preparation panicked: {}", e);
                return None;
            }
        };

        let path = object_path();
        tracing::debug!(bucket = %self.endpoint.image_bucket, %path, "uploading image");

        let result = self
            .request(Method::POST, self.endpoint.object_url(&path))
            .await
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .header("x-upsert", "false")
            .body(prepared)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                Some(self.endpoint.public_object_url(&path))
            }
            Ok(response) => {
                let err = api_error(response).await;
                tracing::warn!(status = err.status, "upload rejected: {}", err.message);
                None
            }
            Err(e) => {
                tracing::warn!("upload failed: {}", e);
                None
            }
        }
    }
}

async fn api_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_body(status, &body)
}
