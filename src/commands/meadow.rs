use baumkataster_core::{GeoPoint, Meadow, MeadowDraft, SyncCoordinator};
use clap::{Args, Subcommand};

use super::{confirm, report_write};
use crate::app::App;

#[derive(Args)]
pub struct MeadowCommand {
    #[command(subcommand)]
    pub command: MeadowSubcommand,
}

#[derive(Subcommand)]
pub enum MeadowSubcommand {
    /// Add a meadow
    Create {
        /// Name of the meadow
        name: String,

        /// Area in hectares (default: 0)
        #[arg(long, allow_hyphen_values = true)]
        area: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Icon name, e.g. sunny, water_drop, home
        #[arg(long)]
        icon: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Change an existing meadow
    Edit {
        /// Meadow ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// Area in hectares
        #[arg(long, allow_hyphen_values = true)]
        area: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        /// Free-text label for the last inspection, e.g. "today"
        #[arg(long)]
        last_checked: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Delete a meadow and all of its trees
    Delete {
        /// Meadow ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl MeadowCommand {
    pub async fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        let mut sync = app.open().await?;

        match &self.command {
            MeadowSubcommand::Create {
                name,
                area,
                description,
                icon,
                lat,
                lng,
            } => {
                let mut draft = MeadowDraft {
                    name: name.clone(),
                    ..MeadowDraft::new()
                };
                if let Some(area) = area {
                    draft.area = area.clone();
                }
                if let Some(description) = description {
                    draft.description = description.clone();
                }
                if let Some(icon) = icon {
                    draft.icon = icon.clone();
                }
                move_to(&mut draft, *lat, *lng);

                let meadow = draft.build()?;
                let id = meadow.id.clone();
                let outcome = sync.save_meadow(meadow).await;
                report_write(outcome, &sync);
                println!("Created meadow {}", id);
            }

            MeadowSubcommand::Edit {
                id,
                name,
                area,
                description,
                icon,
                last_checked,
                lat,
                lng,
            } => {
                let mut draft = MeadowDraft::from_meadow(find_meadow(&sync, id)?);
                if let Some(name) = name {
                    draft.name = name.clone();
                }
                if let Some(area) = area {
                    draft.area = area.clone();
                }
                if let Some(description) = description {
                    draft.description = description.clone();
                }
                if let Some(icon) = icon {
                    draft.icon = icon.clone();
                }
                if let Some(label) = last_checked {
                    draft.last_checked = Some(label.clone());
                }
                move_to(&mut draft, *lat, *lng);

                let meadow = draft.build()?;
                let outcome = sync.save_meadow(meadow).await;
                report_write(outcome, &sync);
                println!("Updated meadow {}", id);
            }

            MeadowSubcommand::Delete { id, force } => {
                let meadow = find_meadow(&sync, id)?;
                let trees = sync.working_set().trees_on(id).len();
                let prompt = format!(
                    "Delete meadow '{}' and its {} tree{}?",
                    meadow.name,
                    trees,
                    if trees == 1 { "" } else { "s" }
                );
                if !force && !confirm(&prompt)? {
                    println!("Cancelled.");
                    return Ok(());
                }

                let outcome = sync.delete_meadow(id).await;
                report_write(outcome, &sync);
                println!("Deleted meadow {}", id);
            }
        }

        Ok(())
    }
}

fn find_meadow<'a>(sync: &'a SyncCoordinator, id: &str) -> Result<&'a Meadow, String> {
    sync.working_set()
        .meadow(id)
        .ok_or_else(|| format!("Meadow not found: {}", id))
}

fn move_to(draft: &mut MeadowDraft, lat: Option<f64>, lng: Option<f64>) {
    draft.location = GeoPoint::new(
        lat.unwrap_or(draft.location.lat),
        lng.unwrap_or(draft.location.lng),
    );
}
