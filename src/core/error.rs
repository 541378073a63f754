//! Error types and handling for the MCP server.
//!
//! Tool failures never reach this type at request time: the dispatcher turns
//! them into error results. `Error` covers startup and transport wiring.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain (e.g. duplicate registration).
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolError;

    #[test]
    fn test_tool_error_wrapped() {
        let err: Error = ToolError::DuplicateTool("echo".into()).into();
        assert_eq!(err.to_string(), "Tool error: Tool already registered: echo");
    }

    #[test]
    fn test_helpers() {
        assert_eq!(
            Error::config("bad port").to_string(),
            "Configuration error: bad port"
        );
        assert!(matches!(Error::internal("x"), Error::Internal(_)));
    }
}
