//! Tool descriptors and their declared input schema.
//!
//! A [`ToolDescriptor`] is built once from struct literals at startup and never
//! changes afterwards. Its parameter list drives both argument validation in
//! the dispatcher and the JSON schema advertised to clients.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Tool, ToolAnnotations};
use serde_json::{Map, Value, json};

use super::arguments::{Arguments, ParamValue};
use super::error::ToolError;

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive numeric range; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Human readable constraint, e.g. "must be between -90 and 90".
    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("must be between {} and {}", min, max),
            (Some(min), None) => format!("must be at least {}", min),
            (None, Some(max)) => format!("must be at most {}", max),
            (None, None) => "is unbounded".to_string(),
        }
    }
}

/// One declared input parameter.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub param_type: ParamType,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<ParamValue>,
    pub enum_values: Option<&'static [&'static str]>,
    pub bounds: Option<Bounds>,
    /// String input is lowercased before constraints are checked.
    pub lowercase: bool,
}

impl ParameterSpec {
    fn new(name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        Self {
            name,
            param_type,
            description,
            required: false,
            default: None,
            enum_values: None,
            bounds: None,
            lowercase: false,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::String, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Number, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Integer, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    pub fn bounded(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// JSON schema fragment for this property.
    fn json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.param_type.as_str()));
        prop.insert("description".into(), json!(self.description));
        if let Some(values) = self.enum_values {
            prop.insert("enum".into(), json!(values));
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.to_json());
        }
        if let Some(bounds) = &self.bounds {
            if let Some(min) = bounds.min {
                prop.insert("minimum".into(), json!(min));
            }
            if let Some(max) = bounds.max {
                prop.insert("maximum".into(), json!(max));
            }
        }
        Value::Object(prop)
    }
}

/// Side-effect class advertised to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotations {
    pub read_only: bool,
    pub destructive: bool,
    pub idempotent: bool,
    pub open_world: bool,
}

impl Annotations {
    /// Read-only, non-destructive, idempotent, closed world.
    pub const fn read_only() -> Self {
        Self {
            read_only: true,
            destructive: false,
            idempotent: true,
            open_world: false,
        }
    }

    pub const fn non_idempotent(mut self) -> Self {
        self.idempotent = false;
        self
    }

    pub const fn open_world(mut self) -> Self {
        self.open_world = true;
        self
    }
}

/// Behaviour behind a tool name.
///
/// Executors receive arguments that already passed schema validation, so they
/// only enforce business rules the schema cannot express.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError>;
}

/// Immutable metadata and executor for one tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
    pub annotations: Annotations,
    pub executor: Arc<dyn ToolExecutor>,
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

impl ToolDescriptor {
    /// JSON-schema-shaped description of the accepted arguments.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        schema
    }

    /// Listing entry used by the HTTP transport.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": self.input_schema(),
            "annotations": {
                "title": self.title,
                "readOnlyHint": self.annotations.read_only,
                "destructiveHint": self.annotations.destructive,
                "idempotentHint": self.annotations.idempotent,
                "openWorldHint": self.annotations.open_world,
            }
        })
    }

    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: Cow::Borrowed(self.name),
            description: Some(Cow::Borrowed(self.description)),
            input_schema: Arc::new(self.input_schema()),
            annotations: Some(ToolAnnotations {
                title: Some(self.title.to_string()),
                read_only_hint: Some(self.annotations.read_only),
                destructive_hint: Some(self.annotations.destructive),
                idempotent_hint: Some(self.annotations.idempotent),
                open_world_hint: Some(self.annotations.open_world),
            }),
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(self.title.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    #[async_trait]
    impl ToolExecutor for Noop {
        async fn execute(&self, _args: &Arguments) -> Result<String, ToolError> {
            Ok(String::new())
        }
    }

    fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: "probe",
            title: "Probe",
            description: "Test tool",
            parameters: vec![
                ParameterSpec::number("latitude", "Latitude")
                    .required()
                    .bounded(Bounds::between(-90.0, 90.0)),
                ParameterSpec::string("units", "Units")
                    .one_of(&["celsius", "fahrenheit"])
                    .default_value("celsius"),
            ],
            annotations: Annotations::read_only().open_world(),
            executor: Arc::new(Noop),
        }
    }

    #[test]
    fn test_input_schema_shape() {
        let schema = Value::Object(descriptor().input_schema());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["latitude"]));
        assert_eq!(schema["properties"]["latitude"]["type"], "number");
        assert_eq!(schema["properties"]["latitude"]["minimum"], json!(-90.0));
        assert_eq!(schema["properties"]["latitude"]["maximum"], json!(90.0));
        assert_eq!(
            schema["properties"]["units"]["enum"],
            json!(["celsius", "fahrenheit"])
        );
        assert_eq!(schema["properties"]["units"]["default"], "celsius");
    }

    #[test]
    fn test_schema_without_required_omits_key() {
        let mut d = descriptor();
        d.parameters.retain(|p| !p.required);
        assert!(!d.input_schema().contains_key("required"));
    }

    #[test]
    fn test_to_tool_carries_annotations() {
        let tool = descriptor().to_tool();
        assert_eq!(tool.name, "probe");
        let annotations = tool.annotations.unwrap();
        assert_eq!(annotations.read_only_hint, Some(true));
        assert_eq!(annotations.open_world_hint, Some(true));
        assert_eq!(annotations.idempotent_hint, Some(true));
    }

    #[test]
    fn test_bounds() {
        let b = Bounds::between(0.1, 100.0);
        assert!(b.contains(0.1));
        assert!(b.contains(100.0));
        assert!(!b.contains(0.05));
        assert!(!b.contains(100.5));
        assert_eq!(b.describe(), "must be between 0.1 and 100");
        assert!(Bounds::at_least(0.0).contains(1e9));
        assert_eq!(Bounds::at_least(0.0).describe(), "must be at least 0");
    }
}
