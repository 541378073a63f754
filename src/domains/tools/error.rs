//! Tool-specific error types.

use thiserror::Error;

use crate::core::collaborators::{DatabaseError, HttpError};

/// Errors that can occur while registering, resolving or invoking tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with the same name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// A required parameter was not supplied.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A parameter could not be coerced to its declared type.
    #[error("Invalid type for parameter '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: String,
    },

    /// A parameter value is not one of the allowed literals.
    #[error("Invalid value for parameter '{name}': '{value}' (allowed: {allowed})")]
    InvalidEnum {
        name: String,
        value: String,
        allowed: String,
    },

    /// A numeric parameter is outside its declared bounds.
    #[error("Parameter '{name}' {constraint}, got {value}")]
    OutOfRange {
        name: String,
        value: f64,
        constraint: String,
    },

    /// The database collaborator failed.
    #[error("{0}")]
    Query(#[from] DatabaseError),

    /// The HTTP collaborator failed.
    #[error("{0}")]
    Network(#[from] HttpError),

    /// The executor rejected the request on its own business rules.
    #[error("{0}")]
    Executor(String),
}

/// Stable classification of a [`ToolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    UnknownTool,
    DuplicateTool,
    MissingParameter,
    TypeMismatch,
    InvalidEnum,
    OutOfRange,
    QueryError,
    NetworkError,
    ExecutorError,
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "missing parameter" error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new executor (business rule) error.
    pub fn executor(msg: impl Into<String>) -> Self {
        Self::Executor(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ToolErrorKind {
        match self {
            Self::UnknownTool(_) => ToolErrorKind::UnknownTool,
            Self::DuplicateTool(_) => ToolErrorKind::DuplicateTool,
            Self::MissingParameter(_) => ToolErrorKind::MissingParameter,
            Self::TypeMismatch { .. } => ToolErrorKind::TypeMismatch,
            Self::InvalidEnum { .. } => ToolErrorKind::InvalidEnum,
            Self::OutOfRange { .. } => ToolErrorKind::OutOfRange,
            Self::Query(_) => ToolErrorKind::QueryError,
            Self::Network(_) => ToolErrorKind::NetworkError,
            Self::Executor(_) => ToolErrorKind::ExecutorError,
        }
    }
}
