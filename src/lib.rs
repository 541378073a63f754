//! Olomouc MCP Server Library
//!
//! A Model Context Protocol server exposing a fixed catalog of tools: small
//! utilities (calculator, arithmetic, echo, time, UUID, simulated weather)
//! and lookups over Olomouc open data backed by PostgreSQL and the Mapy.cz
//! geocoding API.
//!
//! # Architecture
//!
//! - **core**: configuration, error types, collaborator capabilities
//!   (database, HTTP client, clock, randomness), the protocol handler and
//!   the transports
//! - **domains::tools**: parameter schemas, the registry, the dispatcher and
//!   one file per tool
//!
//! # Example
//!
//! ```rust,no_run
//! use olomouc_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
