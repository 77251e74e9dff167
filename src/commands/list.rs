use baumkataster_core::{Tree, WorkingSet};
use chrono::{Local, NaiveDate};
use clap::Args;

use super::OutputFormat;
use crate::app::App;

/// List meadows and their trees
#[derive(Args)]
pub struct ListCommand {
    /// Only show trees whose variety contains this text
    #[arg(long, short)]
    search: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ListCommand {
    pub async fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        let sync = app.open().await?;
        let working = sync.working_set();

        match &self.search {
            Some(query) => {
                let hits = working.search(query);
                match self.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
                    OutputFormat::Text => print_search(working, query, &hits),
                }
            }
            None => match self.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&working_json(working))?)
                }
                OutputFormat::Text => print_grouped(working),
            },
        }
        Ok(())
    }
}

fn working_json(working: &WorkingSet) -> serde_json::Value {
    serde_json::json!({
        "meadows": working.meadows,
        "trees": working.trees,
    })
}

fn print_grouped(working: &WorkingSet) {
    let today = Local::now().date_naive();

    if working.is_empty() {
        println!("No meadows or trees yet.");
        return;
    }

    for (meadow, trees) in working.by_meadow() {
        println!(
            "{} [{}] {:.2} ha, {} tree{}, checked {}",
            meadow.name,
            meadow.id,
            meadow.area,
            trees.len(),
            if trees.len() == 1 { "" } else { "s" },
            meadow.last_checked
        );
        for tree in trees {
            println!("  {}", tree_line(tree, today));
        }
        println!();
    }

    let orphans = working.orphans();
    if !orphans.is_empty() {
        println!("Without meadow");
        for tree in orphans {
            println!("  {}", tree_line(tree, today));
        }
    }
}

fn print_search(working: &WorkingSet, query: &str, hits: &[&Tree]) {
    let today = Local::now().date_naive();

    if hits.is_empty() {
        println!("No trees matching '{}'.", query);
        return;
    }

    for tree in hits {
        let meadow = working
            .meadow(&tree.meadow_id)
            .map(|m| m.name.as_str())
            .unwrap_or("?");
        println!("{} ({})", tree_line(tree, today), meadow);
    }
}

fn tree_line(tree: &Tree, today: NaiveDate) -> String {
    let age = match tree.age_in_years(today) {
        Some(years) => format!("{} y", years),
        None => "planned".to_string(),
    };
    format!(
        "{:<12} {:<32} {:<10} {}",
        tree.id,
        tree.variety,
        tree.condition.as_str(),
        age
    )
}
