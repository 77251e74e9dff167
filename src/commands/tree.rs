use baumkataster_core::{GeoPoint, SyncCoordinator, Tree, TreeCondition, TreeDraft};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use super::{confirm, report_write, OutputFormat};
use crate::app::App;

#[derive(Args)]
pub struct TreeCommand {
    #[command(subcommand)]
    pub command: TreeSubcommand,
}

#[derive(Subcommand)]
pub enum TreeSubcommand {
    /// Show a tree's details
    Show {
        /// Tree ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a tree
    Create {
        /// Variety, e.g. "Boskoop Apfelbaum"
        variety: String,

        /// Meadow ID (default: first meadow)
        #[arg(long)]
        meadow: Option<String>,

        /// Planting date, YYYY-MM-DD (default: today)
        #[arg(long)]
        planted: Option<NaiveDate>,

        /// healthy, needs-care or critical
        #[arg(long)]
        condition: Option<TreeCondition>,

        /// Latitude (default: the meadow's position)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude (default: the meadow's position)
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Street address
        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Photo to upload (needs cloud sync)
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Change an existing tree
    Edit {
        /// Tree ID
        id: String,

        #[arg(long)]
        variety: Option<String>,

        /// Move to another meadow
        #[arg(long)]
        meadow: Option<String>,

        #[arg(long)]
        planted: Option<NaiveDate>,

        #[arg(long)]
        condition: Option<TreeCondition>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replace the photo (needs cloud sync)
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a tree
    Delete {
        /// Tree ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl TreeCommand {
    pub async fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        let mut sync = app.open().await?;

        match &self.command {
            TreeSubcommand::Show { id, format } => {
                let tree = find_tree(&sync, id)?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tree)?),
                    OutputFormat::Text => print_tree(&sync, tree),
                }
            }

            TreeSubcommand::Create {
                variety,
                meadow,
                planted,
                condition,
                lat,
                lng,
                address,
                description,
                image,
            } => {
                let today = Local::now().date_naive();
                let mut draft = TreeDraft::new(sync.meadows(), today);
                draft.variety = variety.clone();

                if let Some(meadow_id) = meadow {
                    place(&sync, &mut draft, meadow_id);
                }
                apply(
                    &mut draft,
                    *planted,
                    *condition,
                    *lat,
                    *lng,
                    address,
                    description,
                );
                if let Some(path) = image {
                    draft.image_url = upload(&sync, path).await?;
                }

                let tree = draft.build()?;
                let id = tree.id.clone();
                let outcome = sync.save_tree(tree).await;
                report_write(outcome, &sync);
                println!("Created tree {}", id);
            }

            TreeSubcommand::Edit {
                id,
                variety,
                meadow,
                planted,
                condition,
                lat,
                lng,
                address,
                description,
                image,
            } => {
                let mut draft = TreeDraft::from_tree(find_tree(&sync, id)?);

                if let Some(variety) = variety {
                    draft.variety = variety.clone();
                }
                if let Some(meadow_id) = meadow {
                    place(&sync, &mut draft, meadow_id);
                }
                apply(
                    &mut draft,
                    *planted,
                    *condition,
                    *lat,
                    *lng,
                    address,
                    description,
                );
                if let Some(path) = image {
                    if let Some(url) = upload(&sync, path).await? {
                        draft.image_url = Some(url);
                    }
                }

                let tree = draft.build()?;
                let outcome = sync.save_tree(tree).await;
                report_write(outcome, &sync);
                println!("Updated tree {}", id);
            }

            TreeSubcommand::Delete { id, force } => {
                let tree = find_tree(&sync, id)?;
                if !force && !confirm(&format!("Delete tree '{}' ({})?", tree.variety, tree.id))? {
                    println!("Cancelled.");
                    return Ok(());
                }

                let outcome = sync.delete_tree(id).await;
                report_write(outcome, &sync);
                println!("Deleted tree {}", id);
            }
        }

        Ok(())
    }
}

fn find_tree<'a>(sync: &'a SyncCoordinator, id: &str) -> Result<&'a Tree, String> {
    sync.working_set()
        .tree(id)
        .ok_or_else(|| format!("Tree not found: {}", id))
}

/// Puts the draft on a meadow. Unknown ids are kept as-is, without coordinates.
fn place(sync: &SyncCoordinator, draft: &mut TreeDraft, meadow_id: &str) {
    match sync.working_set().meadow(meadow_id) {
        Some(meadow) => draft.place_on(meadow),
        None => {
            tracing::warn!(meadow = meadow_id, "meadow not in working set");
            draft.meadow_id = meadow_id.to_string();
        }
    }
}

fn apply(
    draft: &mut TreeDraft,
    planted: Option<NaiveDate>,
    condition: Option<TreeCondition>,
    lat: Option<f64>,
    lng: Option<f64>,
    address: &Option<String>,
    description: &Option<String>,
) {
    if let Some(date) = planted {
        draft.planting_date = date;
    }
    if let Some(condition) = condition {
        draft.condition = condition;
    }
    draft.location = GeoPoint::new(
        lat.unwrap_or(draft.location.lat),
        lng.unwrap_or(draft.location.lng),
    );
    if let Some(address) = address {
        draft.address = address.clone();
    }
    if let Some(description) = description {
        draft.description = description.clone();
    }
}

async fn upload(
    sync: &SyncCoordinator,
    path: &Path,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(path).await?;
    let url = sync.upload_image(bytes).await;
    if url.is_none() {
        eprintln!("Warning: photo upload failed; the tree is saved without it.");
    }
    Ok(url)
}

fn print_tree(sync: &SyncCoordinator, tree: &Tree) {
    print!("{}", tree);

    let meadow = sync
        .working_set()
        .meadow(&tree.meadow_id)
        .map(|m| m.name.as_str())
        .unwrap_or("(unknown meadow)");
    println!("Meadow name: {}", meadow);

    if let Some(years) = tree.age_in_years(Local::now().date_naive()) {
        println!("Age:         {} years", years);
    }
}
