//! Integer arithmetic tools and the power tool.
//!
//! Each tool returns the bare result so clients can feed it straight into
//! the next call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domains::tools::definitions::common::format_number;
use crate::domains::tools::{
    Annotations, Arguments, Bounds, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

fn integer_operands() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::integer("a", "First number").required(),
        ParameterSpec::integer("b", "Second number").required(),
    ]
}

fn overflow(a: i64, op: &str, b: i64) -> ToolError {
    ToolError::executor(format!("Integer overflow: {} {} {}", a, op, b))
}

/// Adds two integers.
pub struct AddNumbersTool;

impl AddNumbersTool {
    pub const NAME: &'static str = "add_numbers";
    pub const DESCRIPTION: &'static str = "Add two numbers together";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Add Numbers",
            description: Self::DESCRIPTION,
            parameters: integer_operands(),
            annotations: Annotations::read_only(),
            executor: Arc::new(Self),
        }
    }
}

#[async_trait]
impl ToolExecutor for AddNumbersTool {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let (a, b) = (args.i64("a")?, args.i64("b")?);
        debug!("add_numbers({}, {})", a, b);
        a.checked_add(b)
            .map(|r| r.to_string())
            .ok_or_else(|| overflow(a, "+", b))
    }
}

/// Subtracts the second integer from the first.
pub struct SubtractNumbersTool;

impl SubtractNumbersTool {
    pub const NAME: &'static str = "subtract_numbers";
    pub const DESCRIPTION: &'static str = "Subtract second number from first";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Subtract Numbers",
            description: Self::DESCRIPTION,
            parameters: integer_operands(),
            annotations: Annotations::read_only(),
            executor: Arc::new(Self),
        }
    }
}

#[async_trait]
impl ToolExecutor for SubtractNumbersTool {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let (a, b) = (args.i64("a")?, args.i64("b")?);
        debug!("subtract_numbers({}, {})", a, b);
        a.checked_sub(b)
            .map(|r| r.to_string())
            .ok_or_else(|| overflow(a, "-", b))
    }
}

/// Multiplies two integers.
pub struct MultiplyNumbersTool;

impl MultiplyNumbersTool {
    pub const NAME: &'static str = "multiply_numbers";
    pub const DESCRIPTION: &'static str = "Multiply two numbers";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Multiply Numbers",
            description: Self::DESCRIPTION,
            parameters: integer_operands(),
            annotations: Annotations::read_only(),
            executor: Arc::new(Self),
        }
    }
}

#[async_trait]
impl ToolExecutor for MultiplyNumbersTool {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let (a, b) = (args.i64("a")?, args.i64("b")?);
        debug!("multiply_numbers({}, {})", a, b);
        a.checked_mul(b)
            .map(|r| r.to_string())
            .ok_or_else(|| overflow(a, "*", b))
    }
}

/// Raises a bounded base to a small integer exponent.
pub struct CalculatePowerTool;

impl CalculatePowerTool {
    pub const NAME: &'static str = "calculate_power";
    pub const DESCRIPTION: &'static str = "Calculate base raised to the power of exponent";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Calculate Power",
            description: Self::DESCRIPTION,
            parameters: vec![
                ParameterSpec::number("base", "Base number")
                    .required()
                    .bounded(Bounds::between(0.0, 1000.0)),
                ParameterSpec::integer("exponent", "Exponent")
                    .required()
                    .bounded(Bounds::between(0.0, 10.0)),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(Self),
        }
    }
}

#[async_trait]
impl ToolExecutor for CalculatePowerTool {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let base = args.f64("base")?;
        let exponent = i32::try_from(args.i64("exponent")?)
            .map_err(|_| ToolError::executor("Exponent is out of range"))?;
        debug!("calculate_power({}, {})", base, exponent);
        Ok(format_number(base.powi(exponent)))
    }
}
