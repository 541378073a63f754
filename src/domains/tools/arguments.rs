//! Validated, typed tool arguments.
//!
//! Coercion rules applied to incoming JSON values:
//!
//! | declared  | accepted input                                                    |
//! |-----------|-------------------------------------------------------------------|
//! | `number`  | JSON number; string parsed as `f64`                               |
//! | `integer` | JSON integer; float truncated; string as `i64`, else `f64` truncated |
//! | `string`  | JSON string; numbers and booleans rendered as text                |
//! | `boolean` | JSON bool; `"true"`/`"false"`/`"1"`/`"0"`; numbers 0 and 1         |
//!
//! Anything else, and non-finite numbers, is a type mismatch. JSON `null` is
//! treated as an absent argument.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::error::ToolError;
use super::schema::{ParamType, ParameterSpec};

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Integer(i64),
    Boolean(bool),
}

impl ParamValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::from(s.as_str()),
            Self::Number(n) => Value::from(*n),
            Self::Integer(i) => Value::from(*i),
            Self::Boolean(b) => Value::from(*b),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Coerce a raw JSON value to the type declared by `spec`.
pub fn coerce(spec: &ParameterSpec, raw: &Value) -> Result<ParamValue, ToolError> {
    let mismatch = || ToolError::TypeMismatch {
        name: spec.name.to_string(),
        expected: spec.param_type.as_str(),
        actual: raw.to_string(),
    };

    let value = match spec.param_type {
        ParamType::Number => {
            let n = match raw {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            ParamValue::Number(n.filter(|n| n.is_finite()).ok_or_else(mismatch)?)
        }
        ParamType::Integer => {
            let i = match raw {
                Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
                Value::String(s) => {
                    let s = s.trim();
                    s.parse::<i64>()
                        .ok()
                        .or_else(|| s.parse::<f64>().ok().and_then(truncate))
                }
                _ => None,
            };
            ParamValue::Integer(i.ok_or_else(mismatch)?)
        }
        ParamType::String => {
            let s = match raw {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return Err(mismatch()),
            };
            ParamValue::String(if spec.lowercase { s.to_lowercase() } else { s })
        }
        ParamType::Boolean => match raw {
            Value::Bool(b) => ParamValue::Boolean(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => ParamValue::Boolean(true),
                "false" | "0" => ParamValue::Boolean(false),
                _ => return Err(mismatch()),
            },
            Value::Number(n) => match n.as_i64() {
                Some(1) => ParamValue::Boolean(true),
                Some(0) => ParamValue::Boolean(false),
                _ => return Err(mismatch()),
            },
            _ => return Err(mismatch()),
        },
    };

    Ok(value)
}

/// Float to integer by truncation toward zero, rejecting values `i64` cannot hold.
fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Check enum membership and numeric bounds of an already coerced value.
pub fn check_constraints(spec: &ParameterSpec, value: &ParamValue) -> Result<(), ToolError> {
    if let Some(allowed) = spec.enum_values {
        let literal = value.to_string();
        if !allowed.contains(&literal.as_str()) {
            return Err(ToolError::InvalidEnum {
                name: spec.name.to_string(),
                value: literal,
                allowed: allowed.join(", "),
            });
        }
    }

    if let (Some(bounds), Some(n)) = (&spec.bounds, value.as_f64()) {
        if !bounds.contains(n) {
            return Err(ToolError::OutOfRange {
                name: spec.name.to_string(),
                value: n,
                constraint: bounds.describe(),
            });
        }
    }

    Ok(())
}

/// Argument bag handed to executors after validation.
///
/// Every declared parameter that was supplied or has a default is present,
/// already converted to its declared type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<String, ParamValue>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn require(&self, name: &str) -> Result<&ParamValue, ToolError> {
        self.get(name)
            .ok_or_else(|| ToolError::missing_parameter(name))
    }

    fn wrong_type(name: &str, expected: &'static str, value: &ParamValue) -> ToolError {
        ToolError::TypeMismatch {
            name: name.to_string(),
            expected,
            actual: value.to_json().to_string(),
        }
    }

    pub fn f64(&self, name: &str) -> Result<f64, ToolError> {
        let value = self.require(name)?;
        value
            .as_f64()
            .ok_or_else(|| Self::wrong_type(name, "number", value))
    }

    pub fn i64(&self, name: &str) -> Result<i64, ToolError> {
        match self.require(name)? {
            ParamValue::Integer(i) => Ok(*i),
            other => Err(Self::wrong_type(name, "integer", other)),
        }
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        match self.require(name)? {
            ParamValue::String(s) => Ok(s),
            other => Err(Self::wrong_type(name, "string", other)),
        }
    }

    /// Optional string: `Ok(None)` when absent.
    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, ToolError> {
        if self.contains(name) {
            self.str(name).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolErrorKind;
    use crate::domains::tools::schema::Bounds;
    use serde_json::json;

    #[test]
    fn test_number_accepts_numeric_strings() {
        let spec = ParameterSpec::number("a", "");
        assert_eq!(coerce(&spec, &json!(2.5)).unwrap(), ParamValue::Number(2.5));
        assert_eq!(coerce(&spec, &json!(" 49.59 ")).unwrap(), ParamValue::Number(49.59));
        assert_eq!(coerce(&spec, &json!(7)).unwrap(), ParamValue::Number(7.0));
    }

    #[test]
    fn test_number_rejects_garbage() {
        let spec = ParameterSpec::number("a", "");
        let inputs = [
            json!("abc"),
            json!(true),
            json!([1]),
            json!({}),
            json!("NaN"),
            json!("inf"),
        ];
        for raw in inputs {
            let err = coerce(&spec, &raw).unwrap_err();
            assert_eq!(err.kind(), ToolErrorKind::TypeMismatch, "input {raw}");
        }
    }

    #[test]
    fn test_integer_truncates_floats() {
        let spec = ParameterSpec::integer("count", "");
        assert_eq!(coerce(&spec, &json!(3)).unwrap(), ParamValue::Integer(3));
        assert_eq!(coerce(&spec, &json!(3.9)).unwrap(), ParamValue::Integer(3));
        assert_eq!(coerce(&spec, &json!(-2.7)).unwrap(), ParamValue::Integer(-2));
        assert_eq!(coerce(&spec, &json!("5")).unwrap(), ParamValue::Integer(5));
        assert_eq!(coerce(&spec, &json!("5.8")).unwrap(), ParamValue::Integer(5));
        assert!(coerce(&spec, &json!("five")).is_err());
        assert!(coerce(&spec, &json!(1e300)).is_err());
    }

    #[test]
    fn test_string_renders_scalars() {
        let spec = ParameterSpec::string("message", "");
        assert_eq!(coerce(&spec, &json!("hi")).unwrap(), ParamValue::String("hi".into()));
        assert_eq!(coerce(&spec, &json!(42)).unwrap(), ParamValue::String("42".into()));
        assert_eq!(coerce(&spec, &json!(false)).unwrap(), ParamValue::String("false".into()));
        assert!(coerce(&spec, &json!(["x"])).is_err());
    }

    #[test]
    fn test_lowercase_applies_before_enum_check() {
        let spec = ParameterSpec::string("sentiment_type", "")
            .one_of(&["good", "bad", "neutral"])
            .lowercase();
        let value = coerce(&spec, &json!("BAD")).unwrap();
        assert_eq!(value, ParamValue::String("bad".into()));
        assert!(check_constraints(&spec, &value).is_ok());

        let exact = ParameterSpec::string("units", "").one_of(&["celsius"]);
        let value = coerce(&exact, &json!("Celsius")).unwrap();
        assert!(check_constraints(&exact, &value).is_err());
    }

    #[test]
    fn test_boolean_forms() {
        let spec = ParameterSpec {
            param_type: ParamType::Boolean,
            ..ParameterSpec::string("flag", "")
        };
        assert_eq!(coerce(&spec, &json!(true)).unwrap(), ParamValue::Boolean(true));
        assert_eq!(coerce(&spec, &json!("FALSE")).unwrap(), ParamValue::Boolean(false));
        assert_eq!(coerce(&spec, &json!(1)).unwrap(), ParamValue::Boolean(true));
        assert!(coerce(&spec, &json!(2)).is_err());
        assert!(coerce(&spec, &json!("yes")).is_err());
    }

    #[test]
    fn test_enum_constraint() {
        let spec = ParameterSpec::string("units", "").one_of(&["celsius", "fahrenheit"]);
        assert!(check_constraints(&spec, &ParamValue::from("celsius")).is_ok());
        let err = check_constraints(&spec, &ParamValue::from("kelvin")).unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::InvalidEnum);
        assert!(err.to_string().contains("celsius, fahrenheit"));
    }

    #[test]
    fn test_bounds_constraint() {
        let spec = ParameterSpec::number("latitude", "").bounded(Bounds::between(-90.0, 90.0));
        assert!(check_constraints(&spec, &ParamValue::Number(90.0)).is_ok());
        let err = check_constraints(&spec, &ParamValue::Number(90.5)).unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::OutOfRange);

        let spec = ParameterSpec::integer("exponent", "").bounded(Bounds::between(0.0, 10.0));
        assert!(check_constraints(&spec, &ParamValue::Integer(11)).is_err());
    }

    #[test]
    fn test_accessors() {
        let mut args = Arguments::new();
        args.insert("a", ParamValue::Integer(2));
        args.insert("b", ParamValue::Number(1.5));
        args.insert("s", ParamValue::from("x"));

        assert_eq!(args.i64("a").unwrap(), 2);
        assert_eq!(args.f64("a").unwrap(), 2.0);
        assert_eq!(args.f64("b").unwrap(), 1.5);
        assert_eq!(args.str("s").unwrap(), "x");
        assert_eq!(args.opt_str("missing").unwrap(), None);
        assert_eq!(
            args.f64("missing").unwrap_err().kind(),
            ToolErrorKind::MissingParameter
        );
        assert_eq!(args.i64("b").unwrap_err().kind(), ToolErrorKind::TypeMismatch);
    }
}
