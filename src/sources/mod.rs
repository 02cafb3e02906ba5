//! Clients for the public geospatial data sources
//!
//! Each client owns its own HTTP client with the timeout appropriate to
//! its upstream: short for point lookups, longer for the Overpass
//! tag-feature queries. Failures are returned to the orchestrator and
//! absorbed into the matching report section there.

pub mod elevation;
pub mod geocode;
pub mod overpass;
pub mod weather;

pub use elevation::ElevationClient;
pub use geocode::GeocodingClient;
pub use overpass::OverpassClient;
pub use weather::WeatherClient;

/// Identifying client label sent with every outbound request
pub(crate) const USER_AGENT: &str = concat!("BurnPlan/", env!("CARGO_PKG_VERSION"));
