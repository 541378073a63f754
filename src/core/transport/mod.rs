//! Transport layer for the MCP server.
//!
//! - **STDIO**: rmcp over stdin/stdout, the default - feature: `stdio`
//! - **TCP**: one rmcp session per connection - feature: `tcp`
//! - **HTTP**: plain JSON-RPC 2.0 over POST, served by axum - feature: `http`
//!
//! Every transport hands requests to the same [`McpServer`](crate::core::McpServer),
//! whose registry is immutable after startup, so connections need no locking.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
