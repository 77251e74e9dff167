//! Wiring shared by every command: config, saved session, remote client.

use baumkataster_core::{
    shared_client, AuthError, RemoteStore, RestClient, SnapshotStore, SyncCoordinator,
};
use chrono::Utc;
use std::sync::Arc;

use crate::config::Config;
use crate::session_store::SessionStore;

pub struct App {
    config: Config,
    sessions: SessionStore,
    client: Option<Arc<RestClient>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let client = shared_client(&config.remote.endpoint());
        Self::with_client(config, client)
    }

    pub fn with_client(config: Config, client: Option<Arc<RestClient>>) -> Self {
        let sessions = SessionStore::new(&config.data_dir.value);
        Self {
            config,
            sessions,
            client,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// The remote client, or `None` in local-only mode.
    pub fn client(&self) -> Option<&Arc<RestClient>> {
        self.client.as_ref()
    }

    /// Installs the saved session into the client, refreshing it if expired.
    ///
    /// A refresh that fails because the backend is unreachable or erroring is
    /// not fatal: the session pass then falls back to the local snapshot.
    pub async fn restore_session(&self) -> Result<(), Box<dyn std::error::Error>> {
        let Some(client) = &self.client else {
            return Ok(());
        };

        let session = self.sessions.load()?.ok_or(AuthError::NoSession)?;
        let expired = session.is_expired(Utc::now());
        client.restore_session(session).await;

        if expired {
            tracing::debug!("access token expired, refreshing");
            match client.refresh().await {
                Ok(refreshed) => self.sessions.save(&refreshed)?,
                Err(e @ (AuthError::Http(_) | AuthError::Server { .. })) => {
                    tracing::warn!("could not refresh login, continuing offline: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Starts a session and returns the coordinator holding its working set.
    ///
    /// With a remote configured, a saved login is required.
    pub async fn open(&self) -> Result<SyncCoordinator, Box<dyn std::error::Error>> {
        self.restore_session().await?;

        let remote = self
            .client
            .clone()
            .map(|client| client as Arc<dyn RemoteStore>);
        let snapshots = SnapshotStore::new(self.config.data_dir.value.clone());

        let mut sync = SyncCoordinator::new(remote, snapshots);
        let source = sync.start_session().await;
        tracing::debug!(?source, status = %sync.status(), "session started");
        Ok(sync)
    }
}
