//! Common utilities shared across tool definitions.
//!
//! Coordinate parameters, the haversine SQL fragment and the helpers that turn
//! loosely typed database rows into report text.

use serde_json::Value;

use crate::core::collaborators::Row;
use crate::domains::tools::{Bounds, ParameterSpec};

/// Mean earth radius used by the distance queries.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const LATITUDE_BOUNDS: Bounds = Bounds::between(-90.0, 90.0);
pub const LONGITUDE_BOUNDS: Bounds = Bounds::between(-180.0, 180.0);

/// Required latitude parameter in decimal degrees.
pub fn latitude_param(description: &'static str) -> ParameterSpec {
    ParameterSpec::number("latitude", description)
        .required()
        .bounded(LATITUDE_BOUNDS)
}

/// Required longitude parameter in decimal degrees.
pub fn longitude_param(description: &'static str) -> ParameterSpec {
    ParameterSpec::number("longitude", description)
        .required()
        .bounded(LONGITUDE_BOUNDS)
}

pub const OLOMOUC_LATITUDE_DESCRIPTION: &str = "Latitude coordinate in decimal degrees (e.g., 49.5913 for Olomouc, Czech Republic). Range: -90 to 90.";
pub const OLOMOUC_LONGITUDE_DESCRIPTION: &str = "Longitude coordinate in decimal degrees (e.g., 17.2634 for Olomouc, Czech Republic). Range: -180 to 180.";

/// Great-circle distance in km between (`$1`, `$2`) and the given columns.
///
/// The `acos` argument is clamped so identical points do not produce NaN.
pub fn haversine_km_sql(lat_column: &str, lon_column: &str) -> String {
    format!(
        "({r} * acos(LEAST(1.0, GREATEST(-1.0, \
            cos(radians($1::float8)) * cos(radians({lat}::DOUBLE PRECISION)) * \
            cos(radians({lon}::DOUBLE PRECISION) - radians($2::float8)) + \
            sin(radians($1::float8)) * sin(radians({lat}::DOUBLE PRECISION))))))",
        r = EARTH_RADIUS_KM,
        lat = lat_column,
        lon = lon_column,
    )
}

/// Render a float the way a report expects: integral values without a
/// fractional part, everything else in shortest round-trip form. Overflow
/// renders as `INF`/`-INF`, an undefined result as `NAN`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NAN".to_string()
    } else if n == f64::INFINITY {
        "INF".to_string()
    } else if n == f64::NEG_INFINITY {
        "-INF".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Numeric column value; numeric strings are parsed, anything else is 0.
pub fn row_f64(row: &Row, column: &str) -> f64 {
    value_f64(row.get(column))
}

pub fn value_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    }
}

/// Column value as display text; missing or null becomes "N/A".
pub fn row_text(row: &Row, column: &str) -> String {
    row_non_empty(row, column).unwrap_or_else(|| "N/A".to_string())
}

/// Column value as display text, or `None` when missing, null or empty.
pub fn row_non_empty(row: &Row, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
