//! Outcome of a tool invocation.

use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};

/// Text on success, a human readable message on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    Text(String),
    Error(String),
}

impl ToolResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Text(t) | Self::Error(t) => t,
        }
    }

    /// Protocol envelope: `{content: [{type: "text", text}], isError}`.
    pub fn to_json(&self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.text() }],
            "isError": self.is_error(),
        })
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        match result {
            ToolResult::Text(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolResult::Error(message) => CallToolResult::error(vec![Content::text(message)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_error_envelope() {
        let json = ToolResult::Error("Division by zero is not allowed".into()).to_json();
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Division by zero is not allowed");
    }

    #[test]
    fn test_text_envelope() {
        let json = ToolResult::Text("hi".into()).to_json();
        assert_eq!(json["isError"], false);
        assert_eq!(json["content"][0]["text"], "hi");
    }

    #[test]
    fn test_into_call_tool_result() {
        let result: CallToolResult = ToolResult::Error("nope".into()).into();
        assert_eq!(result.is_error, Some(true));
        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "nope"),
            _ => panic!("Expected text content"),
        }

        let result: CallToolResult = ToolResult::Text("ok".into()).into();
        assert_eq!(result.is_error, Some(false));
    }
}
