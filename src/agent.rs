//! Burn analysis orchestrator
//!
//! Resolves the place name first, then runs the four data lookups
//! sequentially against the resolved coordinates and merges everything
//! into one [`AnalysisReport`]. A geocoding miss is request-fatal; each
//! data lookup failure is absorbed into its own report section.

use anyhow::Result;
use tracing::{info, instrument};

use crate::BurnPlanError;
use crate::assessment;
use crate::config::BurnPlanConfig;
use crate::models::{AnalysisReport, Section};
use crate::sources::{ElevationClient, GeocodingClient, OverpassClient, WeatherClient};

/// Orchestrates the per-request chain: geocode, fetch, assess, assemble
pub struct BurnAgent {
    geocoder: GeocodingClient,
    weather: WeatherClient,
    elevation: ElevationClient,
    overpass: OverpassClient,
}

impl BurnAgent {
    /// Create an agent with clients configured from `config`
    pub fn new(config: &BurnPlanConfig) -> Result<Self> {
        Ok(Self {
            geocoder: GeocodingClient::new(&config.upstream)?,
            weather: WeatherClient::new(&config.upstream)?,
            elevation: ElevationClient::new(&config.upstream)?,
            overpass: OverpassClient::new(&config.upstream)?,
        })
    }

    /// Gather all burn-relevant data for a place name
    #[instrument(skip(self))]
    pub async fn analyze(&self, city: &str) -> Result<AnalysisReport> {
        if city.trim().is_empty() {
            return Err(BurnPlanError::validation("City name is required").into());
        }

        let location = self.geocoder.geocode(city).await?;
        let point = location.coordinates;
        info!(
            "Analyzing burn conditions for {} ({:.4}, {:.4})",
            location.name, point.latitude, point.longitude
        );

        let weather = Section::from_result(
            self.weather.fetch_forecast(point).await,
            "Weather data unavailable",
        );
        let topography = Section::from_result(
            self.elevation.fetch_terrain(point).await,
            "Topography data unavailable",
        );
        let fuel_sources = Section::from_result(
            self.overpass.fetch_fuel_sources(point).await,
            "Fuel source data unavailable",
        );
        let water_sources = Section::from_result(
            self.overpass.fetch_water_sources(point).await,
            "Water source data unavailable",
        );

        let burn_assessment = assessment::assess(&weather);

        Ok(AnalysisReport {
            location,
            weather,
            topography,
            fuel_sources,
            water_sources,
            burn_assessment,
        })
    }
}
