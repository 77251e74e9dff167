//! Remote error types and the single place where backend error shapes are
//! inspected.

use serde_json::Value;
use thiserror::Error;

/// Error codes and message fragments meaning "the table does not exist".
const SCHEMA_MISSING_CODES: [&str; 3] = ["42P01", "PGRST116", "PGRST205"];
const SCHEMA_MISSING_MESSAGE: &str = "Could not find the table";

/// Coarse cause of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The expected server-side collections are absent.
    SchemaMissing,
    /// The backend could not be reached.
    Network,
    /// The backend answered with an error (permission, constraint, ...).
    Rejected,
    /// The backend answered, but rows could not be decoded.
    Malformed,
}

/// A classified remote failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RemoteFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::new(FailureKind::Network, err.to_string())
    }

    pub fn is_schema_missing(&self) -> bool {
        self.kind == FailureKind::SchemaMissing
    }
}

impl From<ApiError> for RemoteFailure {
    fn from(err: ApiError) -> Self {
        Self::new(classify_api_error(&err), err.message)
    }
}

/// Error body returned by one of the backend services.
///
/// The database, auth and storage services all shape their errors slightly
/// differently; this normalizes them to a status, an optional code and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn from_body(status: u16, body: &str) -> Self {
        let json: Value = serde_json::from_str(body).unwrap_or(Value::Null);

        let code = ["code", "error_code"]
            .iter()
            .find_map(|key| match json.get(key) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            });

        let message = ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|key| json.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        Self {
            status,
            code,
            message,
        }
    }
}

/// Maps a backend error to its coarse kind.
///
/// Nothing outside this function looks at raw error codes or messages.
pub fn classify_api_error(err: &ApiError) -> FailureKind {
    let code_matches = err
        .code
        .as_deref()
        .is_some_and(|code| SCHEMA_MISSING_CODES.contains(&code));

    if code_matches || err.message.contains(SCHEMA_MISSING_MESSAGE) {
        FailureKind::SchemaMissing
    } else {
        FailureKind::Rejected
    }
}

/// Errors from sign-in, refresh and sign-out.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Remote sync not configured. Set remote.url and remote.anon_key in config.")]
    NotConfigured,
    #[error("Credentials invalid or account does not exist.")]
    InvalidCredentials,
    #[error("Not signed in.")]
    NoSession,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Auth server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        if err.message == "Invalid login credentials" {
            AuthError::InvalidCredentials
        } else {
            AuthError::Server {
                status: err.status,
                message: err.message,
            }
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Http(err.to_string())
    }
}
