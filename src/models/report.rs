//! Report models assembled from the individual data sources
//!
//! Every section of the report is a [`Section`]: either the populated
//! payload or an `{"error": ...}` object carrying a source-prefixed
//! message. A failed section never aborts its siblings; the report is
//! always returned with whatever sections succeeded.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::models::LocationRecord;

/// A report section that either resolved or failed at its own boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    Unavailable { error: String },
}

impl<T> Section<T> {
    /// Absorb a failure into the section, prefixing the message with the
    /// source description (e.g. "Weather data unavailable")
    pub fn from_result(result: anyhow::Result<T>, unavailable_prefix: &str) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(err) => Section::Unavailable {
                error: format!("{unavailable_prefix}: {err:#}"),
            },
        }
    }

    /// The payload, if this section resolved
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Unavailable { .. } => None,
        }
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Section::Ready(value) => value.serialize(serializer),
            Section::Unavailable { error } => {
                let mut map = BTreeMap::new();
                map.insert("error", error);
                map.serialize(serializer)
            }
        }
    }
}

/// Relative humidity for a forecast period
///
/// Upstream periods frequently omit humidity; the sentinel serializes as
/// the string `"N/A"` and must never be conflated with 0%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Humidity {
    Percent(f64),
    NotAvailable,
}

impl Humidity {
    /// The numeric percentage, if known
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        match self {
            Humidity::Percent(value) => Some(*value),
            Humidity::NotAvailable => None,
        }
    }
}

impl From<Option<f64>> for Humidity {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Humidity::NotAvailable, Humidity::Percent)
    }
}

impl Serialize for Humidity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Humidity::Percent(value) => serializer.serialize_f64(*value),
            Humidity::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

/// One normalized forecast period
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastPeriod {
    /// Normalized name: Today, Tonight, Tomorrow, or Tomorrow Night
    pub name: String,
    /// Name as reported by the upstream forecast
    pub original_name: String,
    pub temperature: f64,
    pub temperature_unit: String,
    /// Free-text wind speed, e.g. "10 to 15 mph"
    pub wind_speed: String,
    pub wind_direction: String,
    pub humidity: Humidity,
    pub short_forecast: String,
    pub detailed_forecast: String,
}

/// Short-range forecast, at most 3 periods
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeatherReport {
    pub source: String,
    pub forecast: Vec<ForecastPeriod>,
}

/// Elevation and terrain shape around the target point
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TerrainReport {
    pub source: String,
    pub elevation_meters: f64,
    /// `elevation_meters * 3.28084`, rounded to 1 decimal
    pub elevation_feet: f64,
    /// Max minus min of the 4 sampled neighbor elevations, rounded to 1 decimal
    pub elevation_range_nearby: f64,
    pub terrain_class: String,
}

/// Burnable vegetation tally within the search radius
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FuelReport {
    pub source: String,
    pub fuel_types_found: BTreeMap<String, u32>,
    pub total_areas: u32,
    /// Tag with the highest count, "Unknown" when nothing was found
    pub dominant_fuel: String,
}

/// Water bodies and hydrants tally within the search radii
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaterReport {
    pub source: String,
    pub water_bodies: BTreeMap<String, u32>,
    pub fire_hydrants: u32,
    pub total_water_sources: u32,
}

/// Qualitative burn-condition flags derived from the weather section
#[derive(Debug, Clone, PartialEq)]
pub enum BurnAssessment {
    /// Concerns were computable from the first forecast period
    Evaluated {
        concerns: Vec<String>,
        recommendation: String,
    },
    /// Weather was unavailable or unparseable
    Unavailable { assessment: String },
}

impl Serialize for BurnAssessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        match self {
            BurnAssessment::Evaluated {
                concerns,
                recommendation,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("concerns", concerns)?;
                map.serialize_entry("recommendation", recommendation)?;
                map.end()
            }
            BurnAssessment::Unavailable { assessment } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("assessment", assessment)?;
                map.end()
            }
        }
    }
}

/// The top-level analysis report returned to the caller
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub location: LocationRecord,
    pub weather: Section<WeatherReport>,
    pub topography: Section<TerrainReport>,
    pub fuel_sources: Section<FuelReport>,
    pub water_sources: Section<WaterReport>,
    pub burn_assessment: BurnAssessment,
}
