//! Burn-condition assessment over the normalized weather report
//!
//! Pure and deterministic: flags wind, humidity, and temperature
//! concerns from the first forecast period. Unusable weather input
//! degrades to an explanatory assessment instead of an error.

use crate::models::{BurnAssessment, Section, WeatherReport};

const RECOMMENDATION: &str = "Consult with fire management professionals before proceeding";

const WIND_LIMIT: i64 = 15;
const HUMIDITY_LIMIT: f64 = 30.0;
const TEMPERATURE_LIMIT: f64 = 85.0;

const HIGH_WIND: &str = "High wind speeds - increased fire spread risk";
const LOW_HUMIDITY: &str = "Low humidity - increased fire intensity risk";
const HIGH_TEMPERATURE: &str = "High temperature - increased fire behavior risk";
const MODERATE: &str = "Conditions appear moderate";

/// Assess burn conditions from the weather section
pub fn assess(weather: &Section<WeatherReport>) -> BurnAssessment {
    let Some(report) = weather.ready() else {
        return BurnAssessment::Unavailable {
            assessment: "Unable to assess - weather data unavailable".to_string(),
        };
    };

    let Some(current) = report.forecast.first() else {
        return BurnAssessment::Unavailable {
            assessment: "Unable to assess conditions: forecast contains no periods".to_string(),
        };
    };

    let Some(wind) = leading_wind_value(&current.wind_speed) else {
        return BurnAssessment::Unavailable {
            assessment: format!(
                "Unable to assess conditions: no numeric wind speed in '{}'",
                current.wind_speed
            ),
        };
    };

    let mut concerns = Vec::new();
    if wind > WIND_LIMIT {
        concerns.push(HIGH_WIND.to_string());
    }
    if let Some(humidity) = current.humidity.percent() {
        if humidity < HUMIDITY_LIMIT {
            concerns.push(LOW_HUMIDITY.to_string());
        }
    }
    if current.temperature > TEMPERATURE_LIMIT {
        concerns.push(HIGH_TEMPERATURE.to_string());
    }

    if concerns.is_empty() {
        concerns.push(MODERATE.to_string());
    }

    BurnAssessment::Evaluated {
        concerns,
        recommendation: RECOMMENDATION.to_string(),
    }
}

/// Leading integer of a free-text wind speed
///
/// Only the first whitespace-delimited token is considered, so ranges
/// like "10 to 15 mph" yield 10. Returns `None` when the token carries
/// no digits.
fn leading_wind_value(wind_speed: &str) -> Option<i64> {
    let token = wind_speed.split_whitespace().next()?;
    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
