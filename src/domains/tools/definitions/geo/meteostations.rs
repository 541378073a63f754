//! Nearby meteostation finder.
//!
//! Ranks the city's weather stations by great-circle distance from a point.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::collaborators::{Database, Row, SqlParam};
use crate::domains::tools::definitions::common::{
    haversine_km_sql, latitude_param, longitude_param, row_f64, row_text,
};
use crate::domains::tools::{
    Annotations, Arguments, Bounds, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

fn sql() -> String {
    format!(
        r#"
        SELECT * FROM (
            SELECT
                "NAZEV"::text AS "NAZEV",
                "LAT"::float8 AS "LAT",
                "LON"::float8 AS "LON",
                {distance} AS distance_km
            FROM public."meteostanice_mesta_Olomouc"
        ) AS subquery
        WHERE distance_km <= $3::float8
        ORDER BY distance_km ASC
        "#,
        distance = haversine_km_sql("\"LAT\"", "\"LON\""),
    )
}

/// Weather stations within a radius, nearest first.
pub struct NearbyMeteostationsTool {
    db: Arc<dyn Database>,
}

impl NearbyMeteostationsTool {
    pub const NAME: &'static str = "find-nearby-meteostations";

    pub const DESCRIPTION: &'static str = "Find meteostations within a specified distance from given coordinates. Uses the Haversine formula to calculate distances between coordinates and returns stations sorted by proximity.";

    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Meteorological Station Finder Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                latitude_param(
                    "Latitude of the search origin point in decimal degrees (e.g., 49.5938)",
                ),
                longitude_param(
                    "Longitude of the search origin point in decimal degrees (e.g., 17.2509)",
                ),
                ParameterSpec::number(
                    "distance_km",
                    "Search radius in kilometers from the given coordinates",
                )
                .default_value(1.0)
                .bounded(Bounds::between(0.1, 100.0)),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for NearbyMeteostationsTool {
    #[instrument(skip_all, name = "nearby_meteostations")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let latitude = args.f64("latitude")?;
        let longitude = args.f64("longitude")?;
        let distance_km = args.f64("distance_km")?;

        let rows = self
            .db
            .query(
                &sql(),
                &[
                    SqlParam::Float(latitude),
                    SqlParam::Float(longitude),
                    SqlParam::Float(distance_km),
                ],
            )
            .await?;
        info!("{} station(s) within {} km", rows.len(), distance_km);

        Ok(format_stations(&rows, latitude, longitude, distance_km))
    }
}

fn format_stations(rows: &[Row], latitude: f64, longitude: f64, distance_km: f64) -> String {
    if rows.is_empty() {
        return format!(
            "No weather stations found within {:.1} km of coordinates ({:.4}, {:.4}).",
            distance_km, latitude, longitude
        );
    }

    let mut out = format!(
        "Found {} weather station(s) within {:.1} km of ({:.4}, {:.4}):\n\n",
        rows.len(),
        distance_km,
        latitude,
        longitude
    );
    for (index, row) in rows.iter().enumerate() {
        let _ = write!(
            out,
            "{}. {}\n   Distance: {:.2} km\n   Location: Lat {:.4}, Lon {:.4}\n\n",
            index + 1,
            row_text(row, "NAZEV"),
            row_f64(row, "distance_km"),
            row_f64(row, "LAT"),
            row_f64(row, "LON"),
        );
    }
    out
}
