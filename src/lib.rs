//! `BurnPlan` - prescribed burn site analysis
//!
//! This library geocodes a place name and gathers the conditions that
//! matter for planning a prescribed vegetation burn there: weather
//! forecast, terrain, burnable vegetation, and available water sources,
//! plus a rule-based flagging pass over the weather.

pub mod agent;
pub mod api;
pub mod assessment;
pub mod config;
pub mod error;
pub mod models;
pub mod sources;
pub mod web;

// Re-export core types for public API
pub use agent::BurnAgent;
pub use config::BurnPlanConfig;
pub use error::BurnPlanError;
pub use models::{AnalysisReport, BurnAssessment, Coordinates, LocationRecord, Section};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
