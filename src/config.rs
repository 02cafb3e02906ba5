//! Configuration management for the `BurnPlan` service
//!
//! Provides typed settings with defaults, `BURNPLAN_*` environment
//! variable overrides, and validation. Search radii and Overpass tag
//! sets are deliberately not configurable; only operational knobs
//! (port, base URLs, timeouts) are.

use crate::BurnPlanError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Root configuration structure for the `BurnPlan` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnPlanConfig {
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream service endpoints and timeouts
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the HTTP server to
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream service endpoints and timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Nominatim geocoding base URL
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    /// National Weather Service API base URL
    #[serde(default = "default_nws_url")]
    pub nws_url: String,
    /// Open-Elevation API base URL
    #[serde(default = "default_elevation_url")]
    pub elevation_url: String,
    /// Overpass API interpreter URL
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,
    /// Timeout for point lookups (geocode, forecast, elevation) in seconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_seconds: u64,
    /// Timeout for Overpass tag-feature queries in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout_seconds: u64,
}

fn default_port() -> u16 {
    5000
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_nws_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_elevation_url() -> String {
    "https://api.open-elevation.com".to_string()
}

fn default_overpass_url() -> String {
    "http://overpass-api.de/api/interpreter".to_string()
}

fn default_lookup_timeout() -> u64 {
    10
}

fn default_query_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            nws_url: default_nws_url(),
            elevation_url: default_elevation_url(),
            overpass_url: default_overpass_url(),
            lookup_timeout_seconds: default_lookup_timeout(),
            query_timeout_seconds: default_query_timeout(),
        }
    }
}

impl Default for BurnPlanConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl BurnPlanConfig {
    /// Load configuration from defaults plus `BURNPLAN_*` environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = env::var("BURNPLAN_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| BurnPlanError::config(format!("Invalid BURNPLAN_PORT: {port}")))?;
        }
        if let Ok(url) = env::var("BURNPLAN_NOMINATIM_URL") {
            config.upstream.nominatim_url = url;
        }
        if let Ok(url) = env::var("BURNPLAN_NWS_URL") {
            config.upstream.nws_url = url;
        }
        if let Ok(url) = env::var("BURNPLAN_ELEVATION_URL") {
            config.upstream.elevation_url = url;
        }
        if let Ok(url) = env::var("BURNPLAN_OVERPASS_URL") {
            config.upstream.overpass_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.upstream.lookup_timeout_seconds == 0 || self.upstream.lookup_timeout_seconds > 300 {
            return Err(
                BurnPlanError::config("Lookup timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.upstream.query_timeout_seconds == 0 || self.upstream.query_timeout_seconds > 300 {
            return Err(
                BurnPlanError::config("Query timeout must be between 1 and 300 seconds").into(),
            );
        }

        for url in [
            &self.upstream.nominatim_url,
            &self.upstream.nws_url,
            &self.upstream.elevation_url,
            &self.upstream.overpass_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(BurnPlanError::config(format!(
                    "Upstream URL must be a valid HTTP or HTTPS URL: {url}"
                ))
                .into());
            }
        }

        Ok(())
    }
}
