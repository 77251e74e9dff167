use std::fmt;
use std::time::Duration;

/// How long the indicator stays visible after reaching `Connected`.
pub const CONNECTED_INDICATOR_TTL: Duration = Duration::from_secs(5);

/// Connectivity state of the current session.
///
/// Starts as `Syncing` and moves to exactly one of the other states once the
/// session pass has classified the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Syncing,
    Connected,
    TablesMissing,
    Error,
    Unconfigured,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Syncing => "syncing",
            SyncStatus::Connected => "connected",
            SyncStatus::TablesMissing => "tables-missing",
            SyncStatus::Error => "error",
            SyncStatus::Unconfigured => "unconfigured",
        }
    }

    /// Human-readable indicator text.
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Syncing => "Syncing...",
            SyncStatus::Connected => "Cloud connected",
            SyncStatus::TablesMissing => "Database setup required",
            SyncStatus::Error => "Sync error (offline data)",
            SyncStatus::Unconfigured => "Local mode (no cloud)",
        }
    }

    /// Whether the indicator is shown `elapsed` after entering this status.
    ///
    /// Only `Connected` hides itself; every other state stays on screen.
    pub fn indicator_visible(&self, elapsed: Duration) -> bool {
        match self {
            SyncStatus::Connected => elapsed < CONNECTED_INDICATOR_TTL,
            _ => true,
        }
    }

    /// Whether local snapshots may be written in this status.
    pub fn persists_snapshots(&self) -> bool {
        *self != SyncStatus::TablesMissing
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
