use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use super::location::GeoPoint;
use super::record_id::mint_id;
use super::CollectionRecord;
use crate::snapshot::Collection;

/// Label given to a meadow that has just been created.
pub const FRESH_CHECK_LABEL: &str = "today";

/// Icon used when none is chosen.
pub const DEFAULT_ICON: &str = "sunny";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meadow {
    pub id: String,
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub name: String,
    /// Area in hectares, never negative.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub area: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_checked: String,
    pub location: GeoPoint,
}

// Nullable text columns come back as `null` from the backend.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Rows written by other tools may leave the area empty.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Meadow {
    /// Creates a meadow with a freshly minted identifier.
    pub fn new(name: impl Into<String>, area: f64, location: GeoPoint) -> Self {
        Self::with_id(mint_id("m"), name, area, location)
    }

    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        area: f64,
        location: GeoPoint,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            name: name.into(),
            area,
            description: String::new(),
            icon: DEFAULT_ICON.to_string(),
            last_checked: FRESH_CHECK_LABEL.to_string(),
            location,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_last_checked(mut self, label: impl Into<String>) -> Self {
        self.last_checked = label.into();
        self
    }
}

impl CollectionRecord for Meadow {
    const COLLECTION: Collection = Collection::Meadows;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> Option<Uuid> {
        self.user_id
    }
}

impl fmt::Display for Meadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.name, self.icon)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "ID:       {}", self.id)?;
        writeln!(f, "Area:     {} ha", self.area)?;
        writeln!(f, "Checked:  {}", self.last_checked)?;
        writeln!(
            f,
            "Location: {:.5}, {:.5}",
            self.location.lat, self.location.lng
        )?;
        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }
        Ok(())
    }
}
