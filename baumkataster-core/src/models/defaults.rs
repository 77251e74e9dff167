//! Built-in data set shown on the very first run, before anything has been
//! fetched or saved locally.

use chrono::NaiveDate;

use super::condition::TreeCondition;
use super::location::{GeoPoint, TreeLocation};
use super::meadow::Meadow;
use super::tree::Tree;

pub fn default_meadows() -> Vec<Meadow> {
    vec![
        Meadow::with_id("m1", "Wieslauf-Wiese", 1.5, GeoPoint::new(48.8870, 9.5330))
            .with_description("Schöne Wiese im Wieslauftal bei Rudersberg.")
            .with_icon("sunny")
            .with_last_checked("2 Tage"),
        Meadow::with_id(
            "m2",
            "Schlechtbacher Obstgarten",
            4.2,
            GeoPoint::new(48.8840, 9.5280),
        )
        .with_description("Großer Obstgarten am Rande von Schlechtbach.")
        .with_icon("water_drop")
        .with_last_checked("1 Woche"),
        Meadow::with_id("m3", "Garten Schulstraße", 0.1, GeoPoint::new(48.8850, 9.5310))
            .with_description("Zentrale Lage im Ortskern von Rudersberg.")
            .with_icon("home")
            .with_last_checked("Heute"),
    ]
}

pub fn default_trees() -> Vec<Tree> {
    vec![
        Tree::with_id(
            "t1",
            "Tilia cordata (Winterlinde)",
            "m3",
            ymd(2018, 3, 14),
            TreeLocation::new(48.8854, 9.5311).with_address("Marktplatz, Rudersberg"),
        )
        .with_condition(TreeCondition::Healthy),
        Tree::with_id(
            "t2",
            "Boskoop Apfelbaum",
            "m2",
            ymd(2020, 4, 10),
            TreeLocation::new(48.8845, 9.5285),
        )
        .with_condition(TreeCondition::Healthy),
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
