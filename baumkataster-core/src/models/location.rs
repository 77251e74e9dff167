use serde::{Deserialize, Serialize};

/// Fallback position used when a form has nothing better (Rudersberg market square).
pub const DEFAULT_LATITUDE: f64 = 48.8854;
pub const DEFAULT_LONGITUDE: f64 = 9.5311;

/// Plain coordinate pair, used for meadows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True if both coordinates are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

/// Position of a single tree, with an optional street address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeLocation {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl TreeLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

impl From<GeoPoint> for TreeLocation {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.lat, point.lng)
    }
}
