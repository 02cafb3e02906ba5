//! National Weather Service forecast client and period normalizer
//!
//! The NWS API resolves a point to a forecast grid first:
//! `/points/{lat},{lon}` returns the URLs of the standard (~12h period)
//! and hourly forecasts. Upstream period names vary ("This Afternoon",
//! "Overnight", ...), so names are normalized positionally, and missing
//! period humidity is backfilled from the hourly feed.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::models::{Coordinates, ForecastPeriod, Humidity, WeatherReport};

const SOURCE: &str = "National Weather Service (NOAA)";

/// How many standard forecast periods the report retains
const PERIOD_LIMIT: usize = 3;

/// Hourly entries scanned per 12-hour period when backfilling humidity
const HOURLY_WINDOW: usize = 4;

/// NWS gridpoint forecast client
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast: String,
    forecast_hourly: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<RawPeriod>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    properties: HourlyProperties,
}

#[derive(Debug, Deserialize)]
struct HourlyProperties {
    periods: Vec<HourlyPeriod>,
}

/// One standard forecast period as returned by the NWS API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPeriod {
    name: String,
    temperature: f64,
    temperature_unit: String,
    wind_speed: String,
    wind_direction: String,
    #[serde(default)]
    relative_humidity: Option<HumidityField>,
    short_forecast: String,
    detailed_forecast: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HourlyPeriod {
    #[serde(default)]
    relative_humidity: Option<HumidityField>,
}

/// Relative humidity as sent upstream: either a plain number or a
/// `{ "unitCode": ..., "value": ... }` wrapper
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HumidityField {
    Wrapped { value: Option<f64> },
    Plain(f64),
}

impl HumidityField {
    fn value(&self) -> Option<f64> {
        match self {
            HumidityField::Wrapped { value } => *value,
            HumidityField::Plain(value) => Some(*value),
        }
    }
}

impl WeatherClient {
    /// Create a new weather client
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.lookup_timeout_seconds))
            .user_agent(super::USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.nws_url.clone(),
        })
    }

    /// Fetch and normalize the short-range forecast for a point
    pub async fn fetch_forecast(&self, point: Coordinates) -> Result<WeatherReport> {
        let points_url = format!("{}/points/{}", self.base_url, point.to_query_pair());
        debug!("Resolving forecast grid: {}", points_url);
        let points: PointsResponse = self.get_json(&points_url).await?;

        let forecast: ForecastResponse = self.get_json(&points.properties.forecast).await?;
        let hourly: HourlyResponse = self.get_json(&points.properties.forecast_hourly).await?;

        let periods = normalize_periods(forecast.properties.periods, &hourly.properties.periods);

        Ok(WeatherReport {
            source: SOURCE.to_string(),
            forecast: periods,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Forecast request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("Forecast request rejected: {url}"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse forecast response: {url}"))
    }
}

/// Normalize the first 3 periods: positional naming plus humidity backfill
fn normalize_periods(raw: Vec<RawPeriod>, hourly: &[HourlyPeriod]) -> Vec<ForecastPeriod> {
    let mut periods: Vec<ForecastPeriod> = Vec::new();

    for (index, period) in raw.into_iter().take(PERIOD_LIMIT).enumerate() {
        let previous = periods.last().map(|p| p.name.as_str());
        let name = normalized_name(index, &period.name, previous);

        let humidity: Humidity = period
            .relative_humidity
            .as_ref()
            .and_then(HumidityField::value)
            .or_else(|| backfill_humidity(index, hourly))
            .into();

        periods.push(ForecastPeriod {
            name: name.to_string(),
            original_name: period.name,
            temperature: period.temperature,
            temperature_unit: period.temperature_unit,
            wind_speed: period.wind_speed,
            wind_direction: period.wind_direction,
            humidity,
            short_forecast: period.short_forecast,
            detailed_forecast: period.detailed_forecast,
        });
    }

    periods
}

/// Positional period naming
///
/// Upstream labels are not trusted beyond the day/night check on the
/// first period; the rest follow from the day/night alternation.
fn normalized_name(index: usize, original_name: &str, previous: Option<&str>) -> &'static str {
    match index {
        0 => {
            if original_name.to_lowercase().contains("night") {
                "Tonight"
            } else {
                "Today"
            }
        }
        1 => {
            if previous == Some("Today") {
                "Tonight"
            } else {
                "Tomorrow"
            }
        }
        _ => {
            if previous == Some("Tonight") {
                "Tomorrow"
            } else {
                "Tomorrow Night"
            }
        }
    }
}

/// First humidity value in the hourly slice aligned with the period
///
/// Each ~12h period maps to a 4-entry hourly window at `index * 4`.
fn backfill_humidity(period_index: usize, hourly: &[HourlyPeriod]) -> Option<f64> {
    let start = period_index * HOURLY_WINDOW;
    hourly
        .iter()
        .skip(start)
        .take(HOURLY_WINDOW)
        .find_map(|entry| entry.relative_humidity.as_ref().and_then(HumidityField::value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw_period(name: &str, humidity: Option<HumidityField>) -> RawPeriod {
        RawPeriod {
            name: name.to_string(),
            temperature: 72.0,
            temperature_unit: "F".to_string(),
            wind_speed: "10 mph".to_string(),
            wind_direction: "NW".to_string(),
            relative_humidity: humidity,
            short_forecast: "Sunny".to_string(),
            detailed_forecast: "Sunny, with a high near 72.".to_string(),
        }
    }

    fn hourly_feed(values: &[Option<f64>]) -> Vec<HourlyPeriod> {
        values
            .iter()
            .map(|v| HourlyPeriod {
                relative_humidity: v.map(HumidityField::Plain),
            })
            .collect()
    }

    #[rstest]
    #[case("This Afternoon", "Today")]
    #[case("Today", "Today")]
    #[case("Tonight", "Tonight")]
    #[case("Overnight", "Tonight")]
    #[case("Monday Night", "Tonight")]
    fn test_first_period_name(#[case] original: &str, #[case] expected: &str) {
        assert_eq!(normalized_name(0, original, None), expected);
    }

    #[test]
    fn test_day_start_sequence() {
        let raw = vec![
            raw_period("This Afternoon", None),
            raw_period("Tonight", None),
            raw_period("Tuesday", None),
        ];
        let names: Vec<String> = normalize_periods(raw, &[])
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Today", "Tonight", "Tomorrow"]);
    }

    #[test]
    fn test_night_start_sequence() {
        let raw = vec![
            raw_period("Overnight", None),
            raw_period("Tuesday", None),
            raw_period("Tuesday Night", None),
        ];
        let names: Vec<String> = normalize_periods(raw, &[])
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Tonight", "Tomorrow", "Tomorrow Night"]);
    }

    #[test]
    fn test_keeps_at_most_three_periods() {
        let raw = (0..7).map(|_| raw_period("Today", None)).collect();
        assert_eq!(normalize_periods(raw, &[]).len(), 3);
    }

    #[test]
    fn test_period_humidity_takes_precedence_over_hourly() {
        let raw = vec![raw_period(
            "Today",
            Some(HumidityField::Wrapped { value: Some(41.0) }),
        )];
        let hourly = hourly_feed(&[Some(90.0)]);
        let periods = normalize_periods(raw, &hourly);
        assert_eq!(periods[0].humidity, Humidity::Percent(41.0));
    }

    #[test]
    fn test_plain_humidity_value_is_used() {
        let raw = vec![raw_period("Today", Some(HumidityField::Plain(55.0)))];
        let periods = normalize_periods(raw, &[]);
        assert_eq!(periods[0].humidity, Humidity::Percent(55.0));
    }

    #[test]
    fn test_humidity_backfill_uses_aligned_hourly_window() {
        // Second period scans hourly entries 4..8 and takes the first value.
        let raw = vec![raw_period("Today", None), raw_period("Tonight", None)];
        let hourly = hourly_feed(&[
            Some(10.0),
            None,
            None,
            None,
            None,
            Some(65.0),
            Some(70.0),
            None,
        ]);
        let periods = normalize_periods(raw, &hourly);
        assert_eq!(periods[0].humidity, Humidity::Percent(10.0));
        assert_eq!(periods[1].humidity, Humidity::Percent(65.0));
    }

    #[test]
    fn test_humidity_backfill_does_not_scan_past_window() {
        // Nothing in entries 0..4, value at 5 belongs to the next period.
        let raw = vec![raw_period("Today", None)];
        let hourly = hourly_feed(&[None, None, None, None, None, Some(65.0)]);
        let periods = normalize_periods(raw, &hourly);
        assert_eq!(periods[0].humidity, Humidity::NotAvailable);
    }

    #[test]
    fn test_missing_humidity_yields_sentinel() {
        let raw = vec![raw_period("Today", None)];
        let periods = normalize_periods(raw, &[]);
        assert_eq!(periods[0].humidity, Humidity::NotAvailable);
    }

    #[test]
    fn test_wrapped_null_humidity_falls_through_to_hourly() {
        let raw = vec![raw_period(
            "Today",
            Some(HumidityField::Wrapped { value: None }),
        )];
        let hourly = hourly_feed(&[Some(33.0)]);
        let periods = normalize_periods(raw, &hourly);
        assert_eq!(periods[0].humidity, Humidity::Percent(33.0));
    }

    #[test]
    fn test_humidity_field_deserializes_both_shapes() {
        let wrapped: HumidityField =
            serde_json::from_str(r#"{"unitCode": "wmoUnit:percent", "value": 47}"#).unwrap();
        assert_eq!(wrapped.value(), Some(47.0));

        let plain: HumidityField = serde_json::from_str("47").unwrap();
        assert_eq!(plain.value(), Some(47.0));
    }
}
