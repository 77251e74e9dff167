mod auth;
mod config_cmd;
mod list;
mod meadow;
mod setup;
mod status;
mod tree;

pub use auth::AuthCommand;
pub use config_cmd::ConfigCommand;
pub use list::ListCommand;
pub use meadow::MeadowCommand;
pub use setup::SetupCommand;
pub use status::StatusCommand;
pub use tree::TreeCommand;

use baumkataster_core::{RemoteWrite, SyncCoordinator};
use clap::ValueEnum;
use std::io::{self, Write};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Prints a warning when the cloud copy could not be updated.
fn report_write(outcome: RemoteWrite, sync: &SyncCoordinator) {
    if outcome.is_failure() {
        eprintln!("Warning: saved locally, but the cloud copy could not be updated.");
        if let Some(failure) = sync.last_failure() {
            eprintln!("  last sync error: {}", failure);
        }
    }
    if sync.snapshot_damaged() {
        eprintln!("Warning: the local snapshot is unreadable; this change is not stored on disk.");
    }
}

/// Asks for confirmation on stdin. Anything but y/yes declines.
fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
