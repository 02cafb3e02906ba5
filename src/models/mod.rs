//! Data models for burn site analysis

pub mod location;
pub mod report;

pub use location::{Coordinates, LocationRecord};
pub use report::{
    AnalysisReport, BurnAssessment, ForecastPeriod, FuelReport, Humidity, Section, TerrainReport,
    WaterReport, WeatherReport,
};
