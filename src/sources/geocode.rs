//! Nominatim / OpenStreetMap geocoding client
//!
//! Resolves a free-text place name to coordinates. The first match from
//! the provider is authoritative; no retries, no disambiguation.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::BurnPlanError;
use crate::config::UpstreamConfig;
use crate::models::{Coordinates, LocationRecord};

const SOURCE: &str = "Nominatim (OpenStreetMap)";

/// Geocoding client backed by the Nominatim search endpoint
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

/// One place from a Nominatim search response; lat/lon arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl GeocodingClient {
    /// Create a new geocoding client
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.lookup_timeout_seconds))
            .user_agent(super::USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.nominatim_url.clone(),
        })
    }

    /// Resolve a place name to a [`LocationRecord`]
    ///
    /// Returns [`BurnPlanError::LocationNotFound`] when the provider has
    /// no match; this is a request-fatal error, not a report section.
    pub async fn geocode(&self, place_name: &str) -> Result<LocationRecord> {
        debug!("Geocoding place name: {}", place_name);

        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(place_name)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Geocoding request failed")?
            .error_for_status()
            .with_context(|| "Geocoding request rejected")?;

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .with_context(|| "Failed to parse Nominatim response")?;

        let Some(place) = places.into_iter().next() else {
            return Err(BurnPlanError::LocationNotFound {
                query: place_name.to_string(),
            }
            .into());
        };

        let latitude: f64 = place
            .lat
            .parse()
            .with_context(|| format!("Invalid latitude in Nominatim response: {}", place.lat))?;
        let longitude: f64 = place
            .lon
            .parse()
            .with_context(|| format!("Invalid longitude in Nominatim response: {}", place.lon))?;

        debug!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            place_name, place.display_name, latitude, longitude
        );

        Ok(LocationRecord {
            source: SOURCE.to_string(),
            name: place.display_name,
            coordinates: Coordinates::new(latitude, longitude),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_place_parses_string_coordinates() {
        let json = r#"[{"lat": "44.0581728", "lon": "-121.3153096",
                        "display_name": "Bend, Deschutes County, Oregon, United States"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].lat.parse::<f64>().unwrap(), 44.0581728);
        assert!(places[0].display_name.starts_with("Bend"));
    }

    #[test]
    fn test_empty_response_parses_to_no_places() {
        let places: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        assert!(places.is_empty());
    }
}
