//! Overpass tagged-feature client for vegetation and water tallies
//!
//! Two fixed queries against the Overpass API: burnable vegetation ways
//! within 5 km, and water bodies / waterways / reservoirs within 10 km
//! plus fire hydrants within 5 km. Radii and tag sets are constants,
//! not user-configurable.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::models::{Coordinates, FuelReport, WaterReport};

const SOURCE: &str = "OpenStreetMap via Overpass API";

const VEGETATION_RADIUS_M: u32 = 5_000;
const WATER_RADIUS_M: u32 = 10_000;
const HYDRANT_RADIUS_M: u32 = 5_000;

/// Overpass API client
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

/// One returned map element; skeleton nodes carry no tags
#[derive(Debug, Deserialize)]
struct Element {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

impl OverpassClient {
    /// Create a new Overpass client
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.query_timeout_seconds))
            .user_agent(super::USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.overpass_url.clone(),
        })
    }

    /// Tally burnable vegetation ways within 5 km of the point
    pub async fn fetch_fuel_sources(&self, point: Coordinates) -> Result<FuelReport> {
        let response = self.run_query(&vegetation_query(point)).await?;
        Ok(tally_fuel(&response.elements))
    }

    /// Tally water features within 10 km and hydrants within 5 km
    pub async fn fetch_water_sources(&self, point: Coordinates) -> Result<WaterReport> {
        let response = self.run_query(&water_query(point)).await?;
        Ok(tally_water(&response.elements))
    }

    async fn run_query(&self, query: &str) -> Result<OverpassResponse> {
        let url = format!("{}?data={}", self.base_url, urlencoding::encode(query));
        debug!("Overpass query: {}", query);

        self.client
            .get(&url)
            .send()
            .await
            .with_context(|| "Overpass request failed")?
            .error_for_status()
            .with_context(|| "Overpass request rejected")?
            .json()
            .await
            .with_context(|| "Failed to parse Overpass response")
    }
}

fn vegetation_query(point: Coordinates) -> String {
    let around = format!("around:{VEGETATION_RADIUS_M},{}", point.to_query_pair());
    format!(
        "[out:json];\
         (\
           way[\"natural\"=\"wood\"]({around});\
           way[\"landuse\"=\"forest\"]({around});\
           way[\"landuse\"=\"grass\"]({around});\
           way[\"landuse\"=\"meadow\"]({around});\
           way[\"natural\"=\"grassland\"]({around});\
           way[\"natural\"=\"scrub\"]({around});\
         );\
         out body;>;out skel qt;"
    )
}

fn water_query(point: Coordinates) -> String {
    let around_water = format!("around:{WATER_RADIUS_M},{}", point.to_query_pair());
    let around_hydrant = format!("around:{HYDRANT_RADIUS_M},{}", point.to_query_pair());
    format!(
        "[out:json];\
         (\
           way[\"natural\"=\"water\"]({around_water});\
           way[\"waterway\"]({around_water});\
           node[\"emergency\"=\"fire_hydrant\"]({around_hydrant});\
           way[\"landuse\"=\"reservoir\"]({around_water});\
         );\
         out body;>;out skel qt;"
    )
}

/// Tally vegetation ways by tag: `natural` first, `landuse` as fallback
fn tally_fuel(elements: &[Element]) -> FuelReport {
    let mut fuel_types: BTreeMap<String, u32> = BTreeMap::new();
    let mut total_areas = 0;

    for element in elements.iter().filter(|e| e.kind == "way") {
        total_areas += 1;
        let fuel_type = element
            .tags
            .get("natural")
            .or_else(|| element.tags.get("landuse"));
        if let Some(fuel_type) = fuel_type {
            *fuel_types.entry(fuel_type.clone()).or_insert(0) += 1;
        }
    }

    let dominant_fuel = dominant_category(&fuel_types);
    FuelReport {
        source: SOURCE.to_string(),
        fuel_types_found: fuel_types,
        total_areas,
        dominant_fuel,
    }
}

/// Tally water features by tag, counting fire hydrants separately
///
/// The total counts every returned element, untagged skeleton nodes
/// included, matching the raw query result size.
fn tally_water(elements: &[Element]) -> WaterReport {
    let mut water_bodies: BTreeMap<String, u32> = BTreeMap::new();
    let mut fire_hydrants = 0;

    for element in elements {
        if element.tags.get("emergency").map(String::as_str) == Some("fire_hydrant") {
            fire_hydrants += 1;
            continue;
        }
        let water_type = element
            .tags
            .get("natural")
            .or_else(|| element.tags.get("waterway"))
            .or_else(|| element.tags.get("landuse"));
        if let Some(water_type) = water_type {
            *water_bodies.entry(water_type.clone()).or_insert(0) += 1;
        }
    }

    WaterReport {
        source: SOURCE.to_string(),
        water_bodies,
        fire_hydrants,
        total_water_sources: u32::try_from(elements.len()).unwrap_or(u32::MAX),
    }
}

/// The first tag at the maximum count; `BTreeMap` ordering makes ties
/// resolve to the same tag on every run
fn dominant_category(tally: &BTreeMap<String, u32>) -> String {
    let mut best: Option<(&str, u32)> = None;
    for (tag, count) in tally {
        if best.is_none_or(|(_, best_count)| *count > best_count) {
            best = Some((tag, *count));
        }
    }
    best.map_or_else(|| "Unknown".to_string(), |(tag, _)| tag.to_string())
}
