//! Citizen sentiment records around a location.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::collaborators::{Database, Row, SqlParam};
use crate::domains::tools::definitions::common::{
    OLOMOUC_LATITUDE_DESCRIPTION, OLOMOUC_LONGITUDE_DESCRIPTION, haversine_km_sql,
    latitude_param, longitude_param, row_f64, row_non_empty, row_text,
};
use crate::domains::tools::{
    Annotations, Arguments, Bounds, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

const SENTIMENT_TYPES: &[&str] = &["good", "bad", "neutral"];

/// `$1` latitude, `$2` longitude, `$3` class, `$4` radius km.
fn sql() -> String {
    format!(
        r#"
        SELECT
            "feature_id"::text AS "feature_id",
            "class"::text AS "class",
            "lat"::float8 AS "lat",
            "long"::float8 AS "long",
            "datetime"::text AS "datetime",
            "starttime_converted"::text AS "starttime_converted",
            "comments"::text AS "comments",
            "name"::text AS "name",
            "url"::text AS "url",
            distance_km
        FROM (
            SELECT *, {distance} AS distance_km
            FROM public."sentiment-data"
            WHERE LOWER("class") = $3::text
        ) AS subquery
        WHERE distance_km <= $4::float8
        ORDER BY subquery."datetime" DESC, distance_km ASC
        "#,
        distance = haversine_km_sql("\"lat\"", "\"long\""),
    )
}

/// Sentiment records of one class within a radius, newest first.
pub struct LocationSentimentTool {
    db: Arc<dyn Database>,
}

impl LocationSentimentTool {
    pub const NAME: &'static str = "get_location_sentiment";

    pub const DESCRIPTION: &'static str = "Retrieves sentiment data (good, bad, or neutral) for a specific geographic location from the sentiment database. Queries the sentiment-data table to find sentiment records matching the given coordinates and sentiment type. Returns relevant sentiment information including feature IDs, timestamps, and any associated comments.";

    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Location Sentiment Data Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                latitude_param(OLOMOUC_LATITUDE_DESCRIPTION),
                longitude_param(OLOMOUC_LONGITUDE_DESCRIPTION),
                ParameterSpec::string(
                    "sentiment_type",
                    "Type of sentiment to filter by. Options: 'good' for good sentiment, 'bad' for bad sentiment, 'neutral' for neutral sentiment.",
                )
                .lowercase()
                .one_of(SENTIMENT_TYPES)
                .default_value("good"),
                ParameterSpec::number(
                    "radius_km",
                    "Optional search radius in kilometers from the specified coordinates. If provided, returns all sentiment records within this distance. Default is exact match or nearest point.",
                )
                .default_value(1.0)
                .bounded(Bounds::at_least(0.0)),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for LocationSentimentTool {
    #[instrument(skip_all, name = "location_sentiment")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let latitude = args.f64("latitude")?;
        let longitude = args.f64("longitude")?;
        let sentiment = args.str("sentiment_type")?;
        let radius_km = args.f64("radius_km")?;

        let rows = self
            .db
            .query(
                &sql(),
                &[
                    SqlParam::Float(latitude),
                    SqlParam::Float(longitude),
                    SqlParam::Text(sentiment.to_string()),
                    SqlParam::Float(radius_km),
                ],
            )
            .await?;
        info!("{} {} sentiment record(s)", rows.len(), sentiment);

        Ok(format_sentiment(&rows, sentiment, latitude, longitude, radius_km))
    }
}

fn format_sentiment(
    rows: &[Row],
    sentiment: &str,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> String {
    if rows.is_empty() {
        return format!(
            "No {} sentiment data found within {:.1} km of coordinates ({:.4}, {:.4}).",
            sentiment, radius_km, latitude, longitude
        );
    }

    let mut out = format!(
        "Found {} {} sentiment record(s) within {:.1} km of ({:.4}, {:.4}):\n\n",
        rows.len(),
        sentiment,
        radius_km,
        latitude,
        longitude
    );
    for (index, row) in rows.iter().enumerate() {
        let _ = write!(
            out,
            "Record #{} (Feature ID: {})\n\
             \x20 Distance: {:.2} km\n\
             \x20 Location: Lat {:.4}, Lon {:.4}\n\
             \x20 Name: {}\n\
             \x20 URL: {}\n\
             \x20 Sentiment: {}\n\
             \x20 DateTime: {}\n\
             \x20 Start Time: {}\n\
             \x20 Comments: {}\n\n",
            index + 1,
            row_text(row, "feature_id"),
            row_f64(row, "distance_km"),
            row_f64(row, "lat"),
            row_f64(row, "long"),
            row_non_empty(row, "name").unwrap_or_else(|| "(No name)".to_string()),
            row_non_empty(row, "url").unwrap_or_else(|| "(No URL)".to_string()),
            row_text(row, "class"),
            row_text(row, "datetime"),
            row_text(row, "starttime_converted"),
            row_non_empty(row, "comments").unwrap_or_else(|| "(No comments)".to_string()),
        );
    }
    out
}
