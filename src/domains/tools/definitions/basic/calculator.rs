//! Calculator tool definition.
//!
//! Basic arithmetic on two floating point operands.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::format_number;
use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

// ============================================================================
// Operations
// ============================================================================

const OPERATIONS: &[&str] = &["add", "subtract", "multiply", "divide"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            "multiply" => Some(Self::Multiply),
            "divide" => Some(Self::Divide),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    fn apply(self, a: f64, b: f64) -> Result<f64, ToolError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => {
                Err(ToolError::executor("Division by zero is not allowed"))
            }
            Self::Divide => Ok(a / b),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculator tool - add, subtract, multiply or divide two numbers.
pub struct CalculatorTool;

impl CalculatorTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculator";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Performs basic arithmetic operations (add, subtract, multiply, divide) on two numbers";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Calculator",
            description: Self::DESCRIPTION,
            parameters: vec![
                ParameterSpec::string("operation", "The arithmetic operation to perform")
                    .required()
                    .one_of(OPERATIONS),
                ParameterSpec::number("a", "First number").required(),
                ParameterSpec::number("b", "Second number").required(),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(Self),
        }
    }
}

#[async_trait]
impl ToolExecutor for CalculatorTool {
    #[instrument(skip_all, name = "calculator")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let name = args.str("operation")?;
        let operation = Operation::parse(name)
            .ok_or_else(|| ToolError::executor(format!("Invalid operation: {}", name)))?;
        let a = args.f64("a")?;
        let b = args.f64("b")?;

        let result = operation.apply(a, b)?;
        info!("Calculated {} {} {}", a, name, b);

        Ok(format!(
            "{} {} {} = {}",
            format_number(a),
            operation.symbol(),
            format_number(b),
            format_number(result)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolErrorKind;
    use crate::domains::tools::definitions::test_support::run;
    use serde_json::json;

    #[tokio::test]
    async fn test_calculator_operations() {
        let d = CalculatorTool::descriptor();
        let cases = [
            (json!({"operation": "add", "a": 2, "b": 3}), "2 + 3 = 5"),
            (json!({"operation": "subtract", "a": 2.5, "b": 1}), "2.5 - 1 = 1.5"),
            (json!({"operation": "multiply", "a": "4", "b": 5}), "4 × 5 = 20"),
            (json!({"operation": "divide", "a": 10, "b": 4}), "10 ÷ 4 = 2.5"),
        ];
        for (args, expected) in cases {
            assert_eq!(run(&d, args).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_division_by_zero() {
        let err = run(
            &CalculatorTool::descriptor(),
            json!({"operation": "divide", "a": 1, "b": 0}),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::ExecutorError);
        assert_eq!(err.to_string(), "Division by zero is not allowed");
    }

    #[tokio::test]
    async fn test_unknown_operation_rejected_by_schema() {
        let err = run(
            &CalculatorTool::descriptor(),
            json!({"operation": "modulo", "a": 1, "b": 2}),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::InvalidEnum);
    }

    #[tokio::test]
    async fn test_overflow_renders_inf() {
        let text = run(
            &CalculatorTool::descriptor(),
            json!({"operation": "multiply", "a": 1e308, "b": -10}),
        )
        .await
        .unwrap();
        assert!(text.ends_with(" × -10 = -INF"), "{text}");
    }
}
