//! Report assembly and serialization shape tests

use burnplan::models::{
    AnalysisReport, Coordinates, ForecastPeriod, FuelReport, Humidity, LocationRecord, Section,
    TerrainReport, WaterReport, WeatherReport,
};
use burnplan::assessment;

fn sample_location() -> LocationRecord {
    LocationRecord {
        source: "Nominatim (OpenStreetMap)".to_string(),
        name: "Bend, Deschutes County, Oregon, United States".to_string(),
        coordinates: Coordinates::new(44.0582, -121.3153),
    }
}

fn sample_period() -> ForecastPeriod {
    ForecastPeriod {
        name: "Today".to_string(),
        original_name: "This Afternoon".to_string(),
        temperature: 78.0,
        temperature_unit: "F".to_string(),
        wind_speed: "10 to 15 mph".to_string(),
        wind_direction: "NW".to_string(),
        humidity: Humidity::Percent(35.0),
        short_forecast: "Sunny".to_string(),
        detailed_forecast: "Sunny, with a high near 78.".to_string(),
    }
}

fn sample_weather() -> WeatherReport {
    WeatherReport {
        source: "National Weather Service (NOAA)".to_string(),
        forecast: vec![sample_period()],
    }
}

fn sample_terrain() -> TerrainReport {
    TerrainReport {
        source: "Open-Elevation API (SRTM 2000)".to_string(),
        elevation_meters: 1108.0,
        elevation_feet: 3635.2,
        elevation_range_nearby: 42.0,
        terrain_class: "Gently rolling".to_string(),
    }
}

fn sample_water() -> WaterReport {
    WaterReport {
        source: "OpenStreetMap via Overpass API".to_string(),
        water_bodies: [("water".to_string(), 3), ("stream".to_string(), 7)]
            .into_iter()
            .collect(),
        fire_hydrants: 12,
        total_water_sources: 140,
    }
}

/// A failed section coexists with fully populated siblings.
#[test]
fn test_failed_section_does_not_disturb_siblings() {
    let weather = Section::Ready(sample_weather());
    let burn_assessment = assessment::assess(&weather);
    let report = AnalysisReport {
        location: sample_location(),
        weather,
        topography: Section::Ready(sample_terrain()),
        fuel_sources: Section::from_result(
            Err(anyhow::anyhow!("Overpass request failed")),
            "Fuel source data unavailable",
        ),
        water_sources: Section::Ready(sample_water()),
        burn_assessment,
    };

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(
        value["fuel_sources"]["error"],
        "Fuel source data unavailable: Overpass request failed"
    );
    assert_eq!(value["weather"]["forecast"][0]["name"], "Today");
    assert_eq!(value["topography"]["terrain_class"], "Gently rolling");
    assert_eq!(value["water_sources"]["fire_hydrants"], 12);
    assert_eq!(
        value["burn_assessment"]["concerns"][0],
        "Conditions appear moderate"
    );
}

/// The response object carries exactly the documented top-level keys.
#[test]
fn test_report_top_level_keys() {
    let weather = Section::Ready(sample_weather());
    let burn_assessment = assessment::assess(&weather);
    let report = AnalysisReport {
        location: sample_location(),
        weather,
        topography: Section::Ready(sample_terrain()),
        fuel_sources: Section::Ready(FuelReport {
            source: "OpenStreetMap via Overpass API".to_string(),
            fuel_types_found: [("wood".to_string(), 9)].into_iter().collect(),
            total_areas: 11,
            dominant_fuel: "wood".to_string(),
        }),
        water_sources: Section::Ready(sample_water()),
        burn_assessment,
    };

    let value = serde_json::to_value(&report).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for expected in [
        "location",
        "weather",
        "topography",
        "fuel_sources",
        "water_sources",
        "burn_assessment",
    ] {
        assert!(keys.contains(&expected), "missing key {expected}");
    }
    assert_eq!(keys.len(), 6);
}

/// Periods with no resolvable humidity serialize the "N/A" sentinel.
#[test]
fn test_humidity_sentinel_survives_report_serialization() {
    let mut period = sample_period();
    period.humidity = Humidity::NotAvailable;
    let weather = Section::Ready(WeatherReport {
        source: "National Weather Service (NOAA)".to_string(),
        forecast: vec![period],
    });

    let value = serde_json::to_value(&weather).unwrap();
    assert_eq!(value["forecast"][0]["humidity"], "N/A");
}

/// An unavailable weather section degrades the assessment but leaves
/// the rest of the report untouched.
#[test]
fn test_weather_failure_degrades_assessment_only() {
    let weather: Section<WeatherReport> = Section::from_result(
        Err(anyhow::anyhow!("timed out")),
        "Weather data unavailable",
    );
    let burn_assessment = assessment::assess(&weather);
    let report = AnalysisReport {
        location: sample_location(),
        weather,
        topography: Section::Ready(sample_terrain()),
        fuel_sources: Section::Ready(FuelReport {
            source: "OpenStreetMap via Overpass API".to_string(),
            fuel_types_found: std::collections::BTreeMap::new(),
            total_areas: 0,
            dominant_fuel: "Unknown".to_string(),
        }),
        water_sources: Section::Ready(sample_water()),
        burn_assessment,
    };

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value["weather"]["error"],
        "Weather data unavailable: timed out"
    );
    assert_eq!(
        value["burn_assessment"]["assessment"],
        "Unable to assess - weather data unavailable"
    );
    assert_eq!(value["topography"]["elevation_feet"], 3635.2);
}
