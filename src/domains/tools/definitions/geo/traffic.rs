//! Recent traffic intensity at the closest measuring station.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::collaborators::{Database, Row, SqlParam};
use crate::domains::tools::definitions::common::{
    OLOMOUC_LATITUDE_DESCRIPTION, OLOMOUC_LONGITUDE_DESCRIPTION, latitude_param,
    longitude_param, row_f64, row_non_empty, row_text,
};
use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

/// Nearest station by planar distance in degrees, then its latest records.
const SQL: &str = r#"
    WITH nearest_point AS (
        SELECT DISTINCT lat, lon, name,
               SQRT(POWER(CAST(lat AS DOUBLE PRECISION) - $1::float8, 2)
                  + POWER(CAST(lon AS DOUBLE PRECISION) - $2::float8, 2)) AS distance
        FROM "dopravni-processed"
        ORDER BY distance
        LIMIT 1
    )
    SELECT
        d.time::text AS time,
        d.intensity::text AS intensity,
        d.lat::float8 AS lat,
        d.lon::float8 AS lon,
        d.name::text AS name
    FROM "dopravni-processed" d
    INNER JOIN nearest_point n ON d.lat = n.lat AND d.lon = n.lon
    ORDER BY d.time DESC
    LIMIT $3::bigint
"#;

/// Latest intensity records from the nearest traffic counter.
pub struct RecentTrafficTool {
    db: Arc<dyn Database>,
}

impl RecentTrafficTool {
    pub const NAME: &'static str = "recent-traffic";

    pub const DESCRIPTION: &'static str = "Retrieves the most recent traffic intensity measurements from the closest traffic monitoring station to a specified geographic location in Olomouc. Searches for the nearest measuring point to the provided coordinates and returns the 5 most recent traffic intensity records from that station, ordered by timestamp (most recent first). Each result includes the measurement timestamp, traffic intensity value, and the actual coordinates of the measuring station.";

    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Recent Traffic Intensity Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                latitude_param(OLOMOUC_LATITUDE_DESCRIPTION),
                longitude_param(OLOMOUC_LONGITUDE_DESCRIPTION),
                ParameterSpec::integer(
                    "limit",
                    "Maximum number of traffic intensity records to return. Default is 5.",
                )
                .default_value(5),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for RecentTrafficTool {
    #[instrument(skip_all, name = "recent_traffic")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let latitude = args.f64("latitude")?;
        let longitude = args.f64("longitude")?;
        let limit = args.i64("limit")?.max(1);

        let rows = self
            .db
            .query(
                SQL,
                &[
                    SqlParam::Float(latitude),
                    SqlParam::Float(longitude),
                    SqlParam::Int(limit),
                ],
            )
            .await?;
        info!("{} traffic record(s) near ({}, {})", rows.len(), latitude, longitude);

        Ok(format_traffic(&rows, latitude, longitude))
    }
}

fn format_traffic(rows: &[Row], latitude: f64, longitude: f64) -> String {
    let Some(station) = rows.first() else {
        return format!(
            "No traffic measurement data found near coordinates ({:.6}, {:.6}).",
            latitude, longitude
        );
    };

    let mut out = format!(
        "Nearest traffic measurement station: {}\n\
         Station location: Lat {:.6}, Lon {:.6}\n\
         Searched near: Lat {:.6}, Lon {:.6}\n\n\
         {} most recent traffic intensity measurements:\n\n",
        row_non_empty(station, "name").unwrap_or_else(|| "Unknown".to_string()),
        row_f64(station, "lat"),
        row_f64(station, "lon"),
        latitude,
        longitude,
        rows.len()
    );
    for (index, row) in rows.iter().enumerate() {
        let _ = write!(
            out,
            "{}. Time: {}\n   Intensity: {}\n\n",
            index + 1,
            row_text(row, "time"),
            row_text(row, "intensity"),
        );
    }
    out
}
