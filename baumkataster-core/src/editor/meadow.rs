use crate::models::{GeoPoint, Meadow, DEFAULT_ICON, FRESH_CHECK_LABEL};

use super::error::ValidationError;

/// Editable form of a meadow. Area stays text until the draft is built.
#[derive(Debug, Clone, PartialEq)]
pub struct MeadowDraft {
    pub id: Option<String>,
    pub name: String,
    pub area: String,
    pub description: String,
    pub icon: String,
    pub last_checked: Option<String>,
    pub location: GeoPoint,
}

impl Default for MeadowDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            area: "0".to_string(),
            description: String::new(),
            icon: DEFAULT_ICON.to_string(),
            last_checked: None,
            location: GeoPoint::default(),
        }
    }
}

impl MeadowDraft {
    /// Blank draft for a new meadow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft prefilled from an existing meadow; building it keeps the id.
    pub fn from_meadow(meadow: &Meadow) -> Self {
        Self {
            id: Some(meadow.id.clone()),
            name: meadow.name.clone(),
            area: meadow.area.to_string(),
            description: meadow.description.clone(),
            icon: meadow.icon.clone(),
            last_checked: Some(meadow.last_checked.clone()),
            location: meadow.location,
        }
    }

    pub fn validate(&self) -> Result<f64, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.location.is_valid() {
            return Err(ValidationError::InvalidCoordinates {
                lat: self.location.lat,
                lng: self.location.lng,
            });
        }
        parse_area(&self.area)
    }

    /// Validates and produces the record, minting an id for new meadows.
    pub fn build(self) -> Result<Meadow, ValidationError> {
        let area = self.validate()?;
        let name = self.name.trim().to_string();

        let meadow = match self.id {
            Some(id) => Meadow::with_id(id, name, area, self.location),
            None => Meadow::new(name, area, self.location),
        };

        let icon = if self.icon.trim().is_empty() {
            DEFAULT_ICON.to_string()
        } else {
            self.icon
        };

        Ok(meadow
            .with_description(self.description)
            .with_icon(icon)
            .with_last_checked(
                self.last_checked
                    .unwrap_or_else(|| FRESH_CHECK_LABEL.to_string()),
            ))
    }
}

/// Parses an area in hectares. Empty input counts as zero.
pub fn parse_area(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(area) if area.is_finite() && area >= 0.0 => Ok(area),
        _ => Err(ValidationError::InvalidArea(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, area: &str) -> MeadowDraft {
        MeadowDraft {
            name: name.to_string(),
            area: area.to_string(),
            ..MeadowDraft::new()
        }
    }

    #[test]
    fn test_new_meadow_defaults() {
        let meadow = draft("Neue Wiese", "").build().unwrap();
        assert!(meadow.id.starts_with("m-"));
        assert_eq!(meadow.area, 0.0);
        assert_eq!(meadow.icon, "sunny");
        assert_eq!(meadow.last_checked, "today");
        assert_eq!(meadow.location, GeoPoint::default());
    }

    #[test]
    fn test_negative_area_rejected() {
        let err = draft("Wiese", "-3").build().unwrap_err();
        assert_eq!(err, ValidationError::InvalidArea("-3".to_string()));
    }

    #[test]
    fn test_non_numeric_area_rejected() {
        assert!(parse_area("abc").is_err());
        assert!(parse_area("inf").is_err());
        assert!(parse_area("NaN").is_err());
    }

    #[test]
    fn test_decimal_comma_accepted() {
        assert_eq!(parse_area("1,5").unwrap(), 1.5);
        assert_eq!(parse_area(" 4.2 ").unwrap(), 4.2);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(draft("   ", "1").validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_edit_keeps_id_and_label() {
        let existing = Meadow::with_id("m1", "Alt", 1.0, GeoPoint::new(48.0, 9.0))
            .with_last_checked("2 Tage");
        let mut edit = MeadowDraft::from_meadow(&existing);
        edit.name = "Neu".to_string();
        edit.area = "2.5".to_string();

        let meadow = edit.build().unwrap();
        assert_eq!(meadow.id, "m1");
        assert_eq!(meadow.area, 2.5);
        assert_eq!(meadow.last_checked, "2 Tage");
    }
}
