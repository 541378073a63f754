//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the collaborator capabilities
//! tools depend on, the protocol handler and the transport layer.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use collaborators::Collaborators;
pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
