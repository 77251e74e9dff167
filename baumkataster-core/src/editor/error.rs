use thiserror::Error;

/// Input rejected by a draft before anything is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Meadow name must not be empty")]
    EmptyName,
    #[error("Variety must not be empty")]
    EmptyVariety,
    #[error("Tree must belong to a meadow")]
    MissingMeadow,
    #[error("Area must be a non-negative number of hectares, got '{0}'")]
    InvalidArea(String),
    #[error("Coordinates out of range: {lat}, {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
}
