use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::condition::TreeCondition;
use super::location::TreeLocation;
use super::record_id::mint_id;
use super::CollectionRecord;
use crate::snapshot::Collection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    pub id: String,
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub variety: String,
    pub meadow_id: String,
    pub planting_date: NaiveDate,
    pub condition: TreeCondition,
    pub location: TreeLocation,
    /// Always sent, as `null` when cleared, so an upsert overwrites the column.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Tree {
    /// Creates a tree with a freshly minted identifier.
    pub fn new(
        variety: impl Into<String>,
        meadow_id: impl Into<String>,
        planting_date: NaiveDate,
        location: TreeLocation,
    ) -> Self {
        Self::with_id(mint_id("t"), variety, meadow_id, planting_date, location)
    }

    pub fn with_id(
        id: impl Into<String>,
        variety: impl Into<String>,
        meadow_id: impl Into<String>,
        planting_date: NaiveDate,
        location: TreeLocation,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            variety: variety.into(),
            meadow_id: meadow_id.into(),
            planting_date,
            condition: TreeCondition::default(),
            location,
            image_url: None,
            description: None,
        }
    }

    pub fn with_condition(mut self, condition: TreeCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whole years between planting and `today`, or `None` if planted in the future.
    pub fn age_in_years(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.planting_date)
    }
}

impl CollectionRecord for Tree {
    const COLLECTION: Collection = Collection::Trees;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> Option<Uuid> {
        self.user_id
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.variety)?;
        writeln!(f, "{}", "=".repeat(self.variety.chars().count()))?;
        writeln!(f, "ID:        {}", self.id)?;
        writeln!(f, "Meadow:    {}", self.meadow_id)?;
        writeln!(f, "Planted:   {}", self.planting_date)?;
        writeln!(f, "Condition: {}", self.condition)?;
        write!(f, "Location:  {:.5}, {:.5}", self.location.lat, self.location.lng)?;
        if let Some(address) = &self.location.address {
            write!(f, " ({})", address)?;
        }
        writeln!(f)?;

        if let Some(url) = &self.image_url {
            writeln!(f, "Image:     {}", url)?;
        }

        if let Some(description) = &self.description {
            if !description.is_empty() {
                writeln!(f, "\n{}", description)?;
            }
        }

        Ok(())
    }
}
