//! Places of interest tool definition.
//!
//! Queries the Mapy.cz geocoding API for parks and churches close to a point
//! and renders a numbered list of the returned items.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::core::collaborators::{HttpClient, HttpError};
use crate::core::config::MapyConfig;
use crate::domains::tools::definitions::common::{
    OLOMOUC_LATITUDE_DESCRIPTION, OLOMOUC_LONGITUDE_DESCRIPTION, latitude_param,
    longitude_param, value_f64,
};
use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

// ============================================================================
// Request constants
// ============================================================================

const SEARCH_QUERY: &str = "park, kostel";
const SEARCH_LANG: &str = "cs";
const PREFER_NEAR_PRECISION_M: u32 = 300;
const REQUEST_TIMEOUT_MS: u64 = 10_000;

const PLACE_TYPES: [&str; 8] = [
    "regional",
    "regional.country",
    "regional.region",
    "regional.municipality",
    "regional.municipality_part",
    "regional.street",
    "regional.address",
    "poi",
];

// ============================================================================
// Tool Definition
// ============================================================================

/// Mapy.cz places tool - points of interest near coordinates.
pub struct MapyPlacesTool {
    http: Arc<dyn HttpClient>,
    config: MapyConfig,
}

impl MapyPlacesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-places-of-interest";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Retrieves places of interest near specified geographic coordinates using the Mapy.cz geocoding API. Returns information about nearby locations including names, types, addresses, and coordinates. Search radius can be customized (default 300 meters).";

    pub fn new(http: Arc<dyn HttpClient>, config: MapyConfig) -> Self {
        Self { http, config }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Mapy.cz Places of Interest Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                latitude_param(OLOMOUC_LATITUDE_DESCRIPTION),
                longitude_param(OLOMOUC_LONGITUDE_DESCRIPTION),
                ParameterSpec::integer(
                    "limit",
                    "Maximum number of places to return. Default is 10.",
                )
                .default_value(10),
            ],
            annotations: Annotations::read_only().open_world(),
            executor: Arc::new(self),
        }
    }

    /// Full request URL, with repeated `type` and `preferNear` keys.
    fn request_url(&self, latitude: f64, longitude: f64, limit: i64) -> Result<String, ToolError> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", SEARCH_QUERY.to_string()),
            ("lang", SEARCH_LANG.to_string()),
            ("limit", limit.to_string()),
        ];
        query.extend(PLACE_TYPES.iter().map(|t| ("type", t.to_string())));
        query.push(("preferNear", longitude.to_string()));
        query.push(("preferNear", latitude.to_string()));
        query.push(("preferNearPrecision", PREFER_NEAR_PRECISION_M.to_string()));

        let encoded = serde_urlencoded::to_string(&query)
            .map_err(|e| ToolError::executor(format!("Failed to encode query: {}", e)))?;
        Ok(format!("{}?{}", self.config.api_url, encoded))
    }
}

#[async_trait]
impl ToolExecutor for MapyPlacesTool {
    #[instrument(skip_all, name = "places_of_interest")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ToolError::executor("Missing required environment variable MAPY_API_KEY")
            })?;

        let latitude = args.f64("latitude")?;
        let longitude = args.f64("longitude")?;
        let limit = args.i64("limit")?.max(1);

        let url = self.request_url(latitude, longitude, limit)?;
        info!("Searching places near ({}, {})", latitude, longitude);

        let response = self
            .http
            .get(
                &url,
                &[("Accept", "application/json"), ("X-Mapy-Api-Key", api_key)],
                REQUEST_TIMEOUT_MS,
            )
            .await?;

        if !response.is_success() {
            warn!("Mapy.cz API answered with HTTP {}", response.status);
            return Err(HttpError::Status(response.status).into());
        }

        let data: Value = serde_json::from_str(&response.body)
            .map_err(|_| ToolError::executor("Invalid JSON response from API"))?;

        if let Some(error) = data.get("error").filter(|e| !e.is_null()) {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(ToolError::executor(format!("API Error: {}", message)));
        }

        let items = data
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(format_places(items, latitude, longitude))
    }
}

// ============================================================================
// Output formatting
// ============================================================================

fn format_places(items: &[Value], latitude: f64, longitude: f64) -> String {
    if items.is_empty() {
        return format!(
            "No places of interest found near coordinates ({:.4}, {:.4}) within {}m radius.",
            latitude, longitude, PREFER_NEAR_PRECISION_M
        );
    }

    let mut out = format!(
        "Found {} place(s) of interest near ({:.4}, {:.4}) within {}m radius:\n\n",
        items.len(),
        latitude,
        longitude,
        PREFER_NEAR_PRECISION_M
    );

    for (index, item) in items.iter().enumerate() {
        let position = item.get("position");
        let _ = write!(
            out,
            "{}. {}\n   Type: {}\n   Location: Lat {:.6}, Lon {:.6}\n   Address: {}\n",
            index + 1,
            text_field(item, "name").unwrap_or("N/A"),
            text_field(item, "type").unwrap_or("N/A"),
            value_f64(position.and_then(|p| p.get("lat"))),
            value_f64(position.and_then(|p| p.get("lon"))),
            address(item),
        );
        if let Some(label) = text_field(item, "label") {
            let _ = writeln!(out, "   Label: {}", label);
        }
        out.push('\n');
    }

    out
}

/// `location` when present, else address, city and zip from `regional`.
fn address(item: &Value) -> String {
    if let Some(location) = item.get("location").and_then(Value::as_str) {
        return location.to_string();
    }

    let parts: Vec<&str> = item
        .get("regional")
        .map(|regional| {
            ["address", "city", "zip"]
                .into_iter()
                .filter_map(|key| text_field(regional, key))
                .collect()
        })
        .unwrap_or_default();

    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(", ")
    }
}

fn text_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
