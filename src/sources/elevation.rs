//! Open-Elevation client and terrain classifier
//!
//! Samples the target point plus four neighbors offset by ±0.01° (about
//! 1 km; degenerate near the poles, which is an accepted limitation) and
//! classifies the terrain from the elevation spread.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::models::{Coordinates, TerrainReport};

const SOURCE: &str = "Open-Elevation API (SRTM 2000)";

/// Neighbor sampling offset in decimal degrees, roughly 1 km
const NEIGHBOR_OFFSET: f64 = 0.01;

const METERS_TO_FEET: f64 = 3.28084;

/// Open-Elevation lookup client
pub struct ElevationClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: f64,
}

impl ElevationClient {
    /// Create a new elevation client
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.lookup_timeout_seconds))
            .user_agent(super::USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.elevation_url.clone(),
        })
    }

    /// Sample elevations around a point and classify the terrain
    pub async fn fetch_terrain(&self, point: Coordinates) -> Result<TerrainReport> {
        let elevation = *self
            .lookup(&[point])
            .await?
            .first()
            .context("Empty elevation response")?;

        let neighbors = [
            point.offset(NEIGHBOR_OFFSET, 0.0),
            point.offset(-NEIGHBOR_OFFSET, 0.0),
            point.offset(0.0, NEIGHBOR_OFFSET),
            point.offset(0.0, -NEIGHBOR_OFFSET),
        ];
        let nearby = self.lookup(&neighbors).await?;
        if nearby.is_empty() {
            anyhow::bail!("Empty elevation response for neighbor points");
        }

        let max = nearby.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = nearby.iter().copied().fold(f64::INFINITY, f64::min);
        let range = max - min;

        Ok(TerrainReport {
            source: SOURCE.to_string(),
            elevation_meters: elevation,
            elevation_feet: round_to_tenth(elevation * METERS_TO_FEET),
            elevation_range_nearby: round_to_tenth(range),
            terrain_class: classify_terrain(range).to_string(),
        })
    }

    /// One batched lookup call for the given points
    async fn lookup(&self, points: &[Coordinates]) -> Result<Vec<f64>> {
        let locations = points
            .iter()
            .map(Coordinates::to_query_pair)
            .collect::<Vec<_>>()
            .join("|");
        let url = format!("{}/api/v1/lookup?locations={}", self.base_url, locations);
        debug!("Elevation lookup: {}", url);

        let response: LookupResponse = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Elevation request failed")?
            .error_for_status()
            .with_context(|| "Elevation request rejected")?
            .json()
            .await
            .with_context(|| "Failed to parse elevation response")?;

        Ok(response.results.into_iter().map(|r| r.elevation).collect())
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Step function over the nearby elevation spread in meters
pub(crate) fn classify_terrain(elevation_range: f64) -> &'static str {
    if elevation_range < 10.0 {
        "Flat"
    } else if elevation_range < 50.0 {
        "Gently rolling"
    } else if elevation_range < 100.0 {
        "Moderately hilly"
    } else {
        "Steep/mountainous"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "Flat")]
    #[case(9.9, "Flat")]
    #[case(10.0, "Gently rolling")]
    #[case(49.9, "Gently rolling")]
    #[case(50.0, "Moderately hilly")]
    #[case(99.9, "Moderately hilly")]
    #[case(100.0, "Steep/mountainous")]
    #[case(850.0, "Steep/mountainous")]
    fn test_terrain_classification_boundaries(#[case] range: f64, #[case] expected: &str) {
        assert_eq!(classify_terrain(range), expected);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1200.0, 3937.0)]
    #[case(100.0, 328.1)]
    #[case(-5.0, -16.4)]
    fn test_feet_conversion(#[case] meters: f64, #[case] expected_feet: f64) {
        assert_eq!(round_to_tenth(meters * METERS_TO_FEET), expected_feet);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(12.34), 12.3);
        assert_eq!(round_to_tenth(12.35), 12.4);
        assert_eq!(round_to_tenth(12.0), 12.0);
    }

    #[test]
    fn test_lookup_response_parsing() {
        let json = r#"{"results": [{"latitude": 44.05, "longitude": -121.31, "elevation": 1108.0}]}"#;
        let response: LookupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results[0].elevation, 1108.0);
    }
}
