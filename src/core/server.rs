//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool dispatcher.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and collected by `definitions::builtin_tools`. The registry is built once
//! here; every transport shares it through the [`Dispatcher`].
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use super::collaborators::Collaborators;
use super::config::Config;
use super::error::Result;
use crate::domains::tools::{Dispatcher, ToolRegistry, ToolResult};

const INSTRUCTIONS: &str = "MCP server exposing utility tools (calculator, echo, time, UUID, \
    simulated weather) and lookups over Olomouc open data: datasets, meteostations, \
    weather readings, traffic intensity, citizen sentiment and Mapy.cz places of interest.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. Cloning is
/// cheap; clones share the same registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Validates and runs tool invocations.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server with production collaborators.
    pub fn new(config: Config) -> Result<Self> {
        let collaborators = Collaborators::from_config(&config);
        Self::with_collaborators(config, collaborators)
    }

    /// Create a server whose tools use the given collaborators.
    pub fn with_collaborators(config: Config, collaborators: Collaborators) -> Result<Self> {
        let registry = ToolRegistry::with_builtin_tools(&config, &collaborators)?;
        Ok(Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(Arc::new(registry)),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as JSON (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<Value> {
        self.dispatcher
            .registry()
            .descriptors()
            .map(|d| d.to_json())
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Always succeeds at the protocol level; tool failures come back as a
    /// result with `isError: true`.
    pub async fn call_tool_json(&self, name: &str, arguments: &Map<String, Value>) -> Value {
        self.dispatcher.invoke(name, arguments).await.to_json()
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.dispatcher.registry().list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        let result: ToolResult = self.dispatcher.invoke(&request.name, &arguments).await;
        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::testing::fake_collaborators;
    use serde_json::json;

    fn test_server() -> McpServer {
        McpServer::with_collaborators(Config::default(), fake_collaborators()).unwrap()
    }

    #[test]
    fn test_server_info() {
        let server = test_server();
        assert_eq!(server.name(), "olomouc-mcp-server");
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "olomouc-mcp-server");
        assert!(info.instructions.unwrap().contains("Olomouc"));
    }

    #[test]
    fn test_list_tools_json() {
        let tools = test_server().list_tools_json();
        assert_eq!(tools.len(), 16);
        assert_eq!(tools[0]["name"], "calculator");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["operation", "a", "b"]));
    }

    #[tokio::test]
    async fn test_call_tool_json() {
        let server = test_server();
        let args = json!({"a": 2, "b": 3}).as_object().cloned().unwrap();
        let result = server.call_tool_json("add_numbers", &args).await;
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "5");

        let result = server.call_tool_json("nope", &Map::new()).await;
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Unknown tool: nope");
    }
}
