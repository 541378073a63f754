//! Olomouc open-data tools.
//!
//! Everything here reads from the shared PostgreSQL database, except
//! `places`, which calls the Mapy.cz geocoding API.

pub mod datasets;
pub mod meteo_data;
pub mod meteostations;
pub mod places;
pub mod sentiment;
pub mod station_names;
pub mod traffic;

pub use datasets::ListDatasetsTool;
pub use meteo_data::WeatherNearLocationTool;
pub use meteostations::NearbyMeteostationsTool;
pub use places::MapyPlacesTool;
pub use sentiment::LocationSentimentTool;
pub use station_names::MeteostationNamesTool;
pub use traffic::RecentTrafficTool;
