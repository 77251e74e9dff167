//! Signed-in session kept between CLI invocations.

use baumkataster_core::AuthSession;
use std::fs;
use std::io;
use std::path::PathBuf;

const SESSION_FILE: &str = "session.json";

/// `session.json` in the data directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &std::path::Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns `Ok(None)` when nobody is signed in.
    pub fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| SessionError::Parse(self.path.clone(), e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Io(self.path.clone(), e)),
        }
    }

    pub fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::Io(parent.to_path_buf(), e))?;
        }
        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| SessionError::Parse(self.path.clone(), e))?;
        fs::write(&self.path, json).map_err(|e| SessionError::Io(self.path.clone(), e))
    }

    /// Forgets the session. Missing files are fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(self.path.clone(), e)),
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    Io(PathBuf, io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Io(path, e) => {
                write!(f, "Failed to access session file '{}': {}", path.display(), e)
            }
            SessionError::Parse(path, e) => {
                write!(f, "Invalid session file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(_, e) => Some(e),
            SessionError::Parse(_, e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baumkataster_core::remote::AuthUser;
    use chrono::Utc;
    use tempfile::tempdir;

    fn session() -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now(),
            user: AuthUser {
                id: "6f1c6a2e-8d0b-4b43-9d59-3f1f0e0c1a11".parse().unwrap(),
                email: Some("gaertner@example.com".to_string()),
            },
        }
    }

    #[test]
    fn test_load_without_file() {
        let temp_dir = tempdir().unwrap();
        let store = SessionStore::new(temp_dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = tempdir().unwrap();
        let store = SessionStore::new(&temp_dir.path().join("nested"));

        let saved = session();
        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), Some(saved));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }
}
