//! Today's weather readings near a location.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::collaborators::{Clock, Database, Row, SqlParam};
use crate::domains::tools::definitions::common::{
    OLOMOUC_LATITUDE_DESCRIPTION, OLOMOUC_LONGITUDE_DESCRIPTION, haversine_km_sql,
    latitude_param, longitude_param, row_f64, row_text,
};
use crate::domains::tools::{
    Annotations, Arguments, Bounds, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

const MAX_READINGS: i64 = 100;

/// `$1` latitude, `$2` longitude, `$3` day, `$4` radius km, `$5` limit.
fn sql() -> String {
    format!(
        r#"
        SELECT
            "LAT"::float8 AS "LAT",
            "LON"::float8 AS "LON",
            "NAME"::text AS "NAME",
            "TIMESTAMP"::text AS "TIMESTAMP",
            "PRESSURE"::text AS "PRESSURE",
            "HUMIDITY"::text AS "HUMIDITY",
            "WIND_DIRECTION"::text AS "WIND_DIRECTION",
            "WIND_SPEED"::float8 AS "WIND_SPEED",
            "TEMPERATURE_ADULT"::float8 AS "TEMPERATURE_ADULT",
            "TEMPERATURE_CHILD"::float8 AS "TEMPERATURE_CHILD",
            "SOLAR_RADIATION"::text AS "SOLAR_RADIATION",
            "PRECIPITATION"::text AS "PRECIPITATION",
            distance_km
        FROM (
            SELECT *, {distance} AS distance_km
            FROM public."meteo_data"
            WHERE "TIMESTAMP"::date = $3::date
        ) AS subquery
        WHERE distance_km <= $4::float8
        ORDER BY subquery."TIMESTAMP" DESC, distance_km ASC
        LIMIT $5::bigint
        "#,
        distance = haversine_km_sql("\"LAT\"", "\"LON\""),
    )
}

/// Most recent station readings of the current UTC day within a radius.
pub struct WeatherNearLocationTool {
    db: Arc<dyn Database>,
    clock: Arc<dyn Clock>,
}

impl WeatherNearLocationTool {
    pub const NAME: &'static str = "get-weather-near-location";

    pub const DESCRIPTION: &'static str = "Retrieves the most recent weather data from meteorological stations near a specified geographic location for today. Searches within a given radius (in kilometers) from the provided coordinates and returns measurements including temperature, humidity, pressure, wind speed/direction, and precipitation data from nearby weather stations. Results are sorted by most recent timestamp first, then by distance from the specified location.";

    pub fn new(db: Arc<dyn Database>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Meteorological Data Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                latitude_param(OLOMOUC_LATITUDE_DESCRIPTION),
                longitude_param(OLOMOUC_LONGITUDE_DESCRIPTION),
                ParameterSpec::number(
                    "distance",
                    "Search radius in kilometers from the specified coordinates. Default is 1.0 km.",
                )
                .default_value(1.0)
                .bounded(Bounds::between(0.1, 100.0)),
                ParameterSpec::integer(
                    "limit",
                    "Maximum number of weather station readings to return. Default is 10.",
                )
                .default_value(10),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for WeatherNearLocationTool {
    #[instrument(skip_all, name = "weather_near_location")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let latitude = args.f64("latitude")?;
        let longitude = args.f64("longitude")?;
        let distance = args.f64("distance")?;
        let limit = args.i64("limit")?.clamp(1, MAX_READINGS);
        let today = self.clock.now_utc().date_naive();

        let rows = self
            .db
            .query(
                &sql(),
                &[
                    SqlParam::Float(latitude),
                    SqlParam::Float(longitude),
                    SqlParam::Date(today),
                    SqlParam::Float(distance),
                    SqlParam::Int(limit),
                ],
            )
            .await?;
        info!("{} reading(s) for {}", rows.len(), today);

        Ok(format_readings(&rows, latitude, longitude, distance))
    }
}

fn format_readings(rows: &[Row], latitude: f64, longitude: f64, distance: f64) -> String {
    if rows.is_empty() {
        return format!(
            "No meteorological data found within {:.1} km of coordinates ({:.4}, {:.4}) for today.",
            distance, latitude, longitude
        );
    }

    let mut out = format!(
        "Found {} weather station reading(s) within {:.1} km of ({:.4}, {:.4}):\n\n",
        rows.len(),
        distance,
        latitude,
        longitude
    );
    for (index, row) in rows.iter().enumerate() {
        let _ = write!(
            out,
            "Station #{}: {}\n\
             \x20 Distance: {:.2} km\n\
             \x20 Location: Lat {:.4}, Lon {:.4}\n\
             \x20 Timestamp: {}\n\
             \x20 Temperature: Adult {:.1}°C, Child {:.1}°C\n\
             \x20 Pressure: {} hPa\n\
             \x20 Humidity: {}%\n\
             \x20 Wind: {:.1} km/h from {}°\n\
             \x20 Solar Radiation: {} W/m²\n\
             \x20 Precipitation: {} mm\n\n",
            index + 1,
            row_text(row, "NAME"),
            row_f64(row, "distance_km"),
            row_f64(row, "LAT"),
            row_f64(row, "LON"),
            row_text(row, "TIMESTAMP"),
            row_f64(row, "TEMPERATURE_ADULT"),
            row_f64(row, "TEMPERATURE_CHILD"),
            row_text(row, "PRESSURE"),
            row_text(row, "HUMIDITY"),
            row_f64(row, "WIND_SPEED"),
            row_text(row, "WIND_DIRECTION"),
            row_text(row, "SOLAR_RADIATION"),
            row_text(row, "PRECIPITATION"),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::testing::{FakeDatabase, FixedClock};
    use crate::domains::tools::ToolErrorKind;
    use crate::domains::tools::definitions::test_support::run;
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at(2025, 11, 11, 23, 59, 0))
    }

    #[tokio::test]
    async fn test_reading_layout() {
        let db = Arc::new(FakeDatabase::with_rows(vec![json!({
            "NAME": "Holice",
            "LAT": 49.5938,
            "LON": 17.2509,
            "TIMESTAMP": "2025-11-11 14:00:00",
            "PRESSURE": "1013.2",
            "HUMIDITY": "81",
            "WIND_DIRECTION": "270",
            "WIND_SPEED": 3.6,
            "TEMPERATURE_ADULT": 8.3,
            "TEMPERATURE_CHILD": 8.5,
            "SOLAR_RADIATION": null,
            "PRECIPITATION": "0.2",
            "distance_km": 0.123
        })]));
        let d = WeatherNearLocationTool::new(db, clock()).descriptor();
        let text = run(&d, json!({"latitude": 49.5913, "longitude": 17.2634}))
            .await
            .unwrap();

        assert_eq!(
            text,
            "Found 1 weather station reading(s) within 1.0 km of (49.5913, 17.2634):\n\n\
             Station #1: Holice\n\
             \x20 Distance: 0.12 km\n\
             \x20 Location: Lat 49.5938, Lon 17.2509\n\
             \x20 Timestamp: 2025-11-11 14:00:00\n\
             \x20 Temperature: Adult 8.3°C, Child 8.5°C\n\
             \x20 Pressure: 1013.2 hPa\n\
             \x20 Humidity: 81%\n\
             \x20 Wind: 3.6 km/h from 270°\n\
             \x20 Solar Radiation: N/A W/m²\n\
             \x20 Precipitation: 0.2 mm\n\n"
        );
    }

    #[tokio::test]
    async fn test_uses_current_utc_day_and_clamps_limit() {
        let db = Arc::new(FakeDatabase::default());
        let d = WeatherNearLocationTool::new(db.clone(), clock()).descriptor();
        let text = run(
            &d,
            json!({"latitude": 49.5, "longitude": 17.2, "distance": 2.5, "limit": 500}),
        )
        .await
        .unwrap();
        assert_eq!(
            text,
            "No meteorological data found within 2.5 km of coordinates (49.5000, 17.2000) for today."
        );

        let (sql, params) = db.calls().remove(0);
        assert!(sql.contains("\"TIMESTAMP\"::date = $3::date"));
        assert!(sql.contains("ORDER BY subquery.\"TIMESTAMP\" DESC, distance_km ASC"));
        assert_eq!(
            params,
            vec![
                SqlParam::Float(49.5),
                SqlParam::Float(17.2),
                SqlParam::Date(NaiveDate::from_ymd_opt(2025, 11, 11).unwrap()),
                SqlParam::Float(2.5),
                SqlParam::Int(100),
            ]
        );
    }

    #[tokio::test]
    async fn test_distance_bounds() {
        let db = Arc::new(FakeDatabase::default());
        let d = WeatherNearLocationTool::new(db.clone(), clock()).descriptor();
        let err = run(&d, json!({"latitude": 49.5, "longitude": 17.2, "distance": 0}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::OutOfRange);
        assert!(db.calls().is_empty());
    }

    #[tokio::test]
    async fn test_coordinates_out_of_range_never_query() {
        let db = Arc::new(FakeDatabase::default());
        let d = WeatherNearLocationTool::new(db.clone(), clock()).descriptor();
        for args in [
            json!({"latitude": 91, "longitude": 17.2}),
            json!({"latitude": 49.5, "longitude": 181}),
        ] {
            let err = run(&d, args).await.unwrap_err();
            assert_eq!(err.kind(), ToolErrorKind::OutOfRange);
        }
        assert!(db.calls().is_empty());
    }
}
