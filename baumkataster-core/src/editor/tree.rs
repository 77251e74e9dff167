use chrono::NaiveDate;

use crate::models::{GeoPoint, Meadow, Tree, TreeCondition, TreeLocation};

use super::error::ValidationError;

/// Editable form of a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDraft {
    pub id: Option<String>,
    pub variety: String,
    pub meadow_id: String,
    pub planting_date: NaiveDate,
    pub condition: TreeCondition,
    pub location: GeoPoint,
    pub address: String,
    pub image_url: Option<String>,
    pub description: String,
}

impl TreeDraft {
    /// Blank draft placed on the first meadow, planted `today`.
    ///
    /// Coordinates start at the first meadow, or the fallback position when
    /// there are no meadows.
    pub fn new(meadows: &[Meadow], today: NaiveDate) -> Self {
        let first = meadows.first();
        Self {
            id: None,
            variety: String::new(),
            meadow_id: first.map(|m| m.id.clone()).unwrap_or_default(),
            planting_date: today,
            condition: TreeCondition::Healthy,
            location: first.map(|m| m.location).unwrap_or_default(),
            address: String::new(),
            image_url: None,
            description: String::new(),
        }
    }

    /// Draft prefilled from an existing tree; building it keeps the id.
    pub fn from_tree(tree: &Tree) -> Self {
        Self {
            id: Some(tree.id.clone()),
            variety: tree.variety.clone(),
            meadow_id: tree.meadow_id.clone(),
            planting_date: tree.planting_date,
            condition: tree.condition,
            location: tree.location.point(),
            address: tree.location.address.clone().unwrap_or_default(),
            image_url: tree.image_url.clone(),
            description: tree.description.clone().unwrap_or_default(),
        }
    }

    /// Moves the draft to another meadow, taking over its coordinates.
    pub fn place_on(&mut self, meadow: &Meadow) {
        self.meadow_id = meadow.id.clone();
        self.location = meadow.location;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.variety.trim().is_empty() {
            return Err(ValidationError::EmptyVariety);
        }
        if self.meadow_id.trim().is_empty() {
            return Err(ValidationError::MissingMeadow);
        }
        if !self.location.is_valid() {
            return Err(ValidationError::InvalidCoordinates {
                lat: self.location.lat,
                lng: self.location.lng,
            });
        }
        Ok(())
    }

    /// Validates and produces the record, minting an id for new trees.
    ///
    /// The meadow reference is only checked for presence, not existence.
    pub fn build(self) -> Result<Tree, ValidationError> {
        self.validate()?;

        let mut location = TreeLocation::from(self.location);
        if !self.address.trim().is_empty() {
            location = location.with_address(self.address.trim());
        }

        let variety = self.variety.trim().to_string();
        let mut tree = match self.id {
            Some(id) => Tree::with_id(id, variety, self.meadow_id, self.planting_date, location),
            None => Tree::new(variety, self.meadow_id, self.planting_date, location),
        }
        .with_condition(self.condition);

        tree.image_url = self.image_url.filter(|url| !url.is_empty());
        if !self.description.trim().is_empty() {
            tree = tree.with_description(self.description);
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_meadows;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_new_draft_defaults_to_first_meadow() {
        let meadows = default_meadows();
        let draft = TreeDraft::new(&meadows, today());

        assert_eq!(draft.meadow_id, "m1");
        assert_eq!(draft.location, meadows[0].location);
        assert_eq!(draft.planting_date, today());
        assert_eq!(draft.condition, TreeCondition::Healthy);
    }

    #[test]
    fn test_new_draft_without_meadows() {
        let draft = TreeDraft::new(&[], today());
        assert!(draft.meadow_id.is_empty());
        assert_eq!(draft.location, GeoPoint::default());
        assert_eq!(draft.validate(), Err(ValidationError::EmptyVariety));
    }

    #[test]
    fn test_missing_meadow_rejected() {
        let mut draft = TreeDraft::new(&[], today());
        draft.variety = "Elstar".to_string();
        assert_eq!(draft.build().unwrap_err(), ValidationError::MissingMeadow);
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let mut draft = TreeDraft::new(&default_meadows(), today());
        draft.variety = "Elstar".to_string();
        draft.location = GeoPoint::new(48.0, 200.0);
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_build_new_tree() {
        let mut draft = TreeDraft::new(&default_meadows(), today());
        draft.variety = "  Elstar ".to_string();
        draft.address = "Hauptstraße 1".to_string();

        let tree = draft.build().unwrap();
        assert!(tree.id.starts_with("t-"));
        assert_eq!(tree.variety, "Elstar");
        assert_eq!(tree.location.address.as_deref(), Some("Hauptstraße 1"));
        assert!(tree.description.is_none());
    }

    #[test]
    fn test_edit_keeps_id() {
        let existing = crate::models::default_trees().remove(0);
        let mut draft = TreeDraft::from_tree(&existing);
        draft.condition = TreeCondition::NeedsCare;
        draft.place_on(&default_meadows()[0]);

        let tree = draft.build().unwrap();
        assert_eq!(tree.id, "t1");
        assert_eq!(tree.meadow_id, "m1");
        assert_eq!(tree.condition, TreeCondition::NeedsCare);
    }
}
