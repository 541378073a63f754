//! Echo tool definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

/// Echo tool - returns the message, optionally prefixed.
pub struct EchoTool;

impl EchoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "echo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Echoes back the provided message with an optional prefix";

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Echo Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                ParameterSpec::string("message", "The message to echo back").required(),
                ParameterSpec::string("prefix", "Optional prefix to add before the message"),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(Self),
        }
    }
}

#[async_trait]
impl ToolExecutor for EchoTool {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let message = args.str("message")?;
        Ok(match args.opt_str("prefix")? {
            Some(prefix) => format!("{}: {}", prefix, message),
            None => message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolErrorKind;
    use crate::domains::tools::definitions::test_support::run;
    use serde_json::json;

    #[tokio::test]
    async fn test_echo() {
        let d = EchoTool::descriptor();
        assert_eq!(run(&d, json!({"message": "hi"})).await.unwrap(), "hi");
        assert_eq!(
            run(&d, json!({"message": "hi", "prefix": "note"})).await.unwrap(),
            "note: hi"
        );
        assert_eq!(
            run(&d, json!({"message": "hi", "prefix": ""})).await.unwrap(),
            ": hi"
        );
        assert_eq!(
            run(&d, json!({"message": "hi", "prefix": null})).await.unwrap(),
            "hi"
        );
    }

    #[tokio::test]
    async fn test_echo_requires_message() {
        let err = run(&EchoTool::descriptor(), json!({"prefix": "x"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::MissingParameter);
    }
}
