//! Location models for geographic coordinates and geocoding results

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Coordinates offset by the given deltas in degrees
    #[must_use]
    pub fn offset(&self, dlat: f64, dlon: f64) -> Self {
        Self {
            latitude: self.latitude + dlat,
            longitude: self.longitude + dlon,
        }
    }

    /// Format as a `lat,lon` pair for upstream query strings
    #[must_use]
    pub fn to_query_pair(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A geocoded place: provider label, resolved display name, and coordinates
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LocationRecord {
    /// Which provider resolved this location
    pub source: String,
    /// Full display name returned by the provider
    pub name: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
}
