use baumkataster_core::SyncStatus;
use clap::Args;

use crate::app::App;

/// Show where the data comes from and whether the cloud is reachable
#[derive(Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        let sync = app.open().await?;
        let status = sync.status();

        println!("Sync status: {} ({})", status.label(), status);
        if let Some(failure) = sync.last_failure() {
            println!("  {}", failure);
        }
        println!();
        println!("Meadows: {}", sync.meadows().len());
        println!("Trees:   {}", sync.trees().len());
        println!("Data:    {}", app.config().data_dir.value.display());

        if sync.snapshot_damaged() {
            println!();
            println!("Warning: the local snapshot could not be read and was left as is.");
            println!("Built-in data is shown; changes in this session are not stored.");
        }

        if sync.needs_setup() {
            println!();
            println!("The cloud database has no tables yet.");
            println!("Run 'bk setup' for the SQL that creates them.");
        } else if status == SyncStatus::Unconfigured {
            println!();
            println!("Changes are stored on this device only.");
            println!("Set remote.url and remote.anon_key to enable cloud sync.");
        }

        Ok(())
    }
}
