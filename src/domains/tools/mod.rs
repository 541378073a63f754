//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are named, independently invocable functions with a declared input
//! schema.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Descriptors, parameter specs and the executor trait
//! - `arguments.rs` - Typed argument bag and coercion rules
//! - `registry.rs` - Name to descriptor mapping, built once at startup
//! - `dispatcher.rs` - Validation, execution and error normalisation
//! - `result.rs` / `error.rs` - Invocation outcome and error taxonomy
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/basic` or `definitions/geo`
//! 2. Give it `NAME`, `DESCRIPTION`, a `descriptor()` and a `ToolExecutor` impl
//! 3. Add it to `definitions::builtin_tools`
//!
//! The registry, dispatcher and every transport pick it up from there.

mod arguments;
pub mod definitions;
mod dispatcher;
mod error;
mod registry;
mod result;
mod schema;

pub use arguments::{Arguments, ParamValue};
pub use dispatcher::Dispatcher;
pub use error::{ToolError, ToolErrorKind};
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use schema::{Annotations, Bounds, ParamType, ParameterSpec, ToolDescriptor, ToolExecutor};
