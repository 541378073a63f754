//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry is filled once at startup and shared read-only afterwards,
//! so concurrent lookups need no locking.

use std::collections::HashMap;

use rmcp::model::Tool;
use tracing::{debug, info};

use crate::core::collaborators::Collaborators;
use crate::core::config::Config;

use super::definitions;
use super::error::ToolError;
use super::schema::ToolDescriptor;

/// Name to descriptor mapping, preserving registration order for listing.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, ToolDescriptor>,
    order: Vec<&'static str>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full built-in catalog.
    pub fn with_builtin_tools(
        config: &Config,
        collaborators: &Collaborators,
    ) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        for descriptor in definitions::builtin_tools(config, collaborators) {
            registry.register(descriptor)?;
        }
        info!("Registered {} tools", registry.len());
        Ok(registry)
    }

    /// Add a tool. Fails if the name is already taken.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        let name = descriptor.name;
        if self.tools.contains_key(name) {
            return Err(ToolError::DuplicateTool(name.to_string()));
        }
        debug!("Registering tool: {}", name);
        self.tools.insert(name, descriptor);
        self.order.push(name);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.tools
            .get(name)
            .ok_or_else(|| ToolError::unknown_tool(name))
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.order.clone()
    }

    /// All descriptors, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    /// All tools as rmcp Tool models (metadata).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.descriptors().map(ToolDescriptor::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolErrorKind;

    fn builtin() -> ToolRegistry {
        let config = Config::default();
        let collaborators = Collaborators::from_config(&config);
        ToolRegistry::with_builtin_tools(&config, &collaborators).unwrap()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = builtin();
        let names = registry.tool_names();
        assert_eq!(names.len(), 16);
        for expected in [
            "calculator",
            "add_numbers",
            "subtract_numbers",
            "multiply_numbers",
            "calculate_power",
            "echo",
            "get-time",
            "generate-uuid",
            "get-weather",
            "get-places-of-interest",
            "list_olomouc_datasets",
            "find-nearby-meteostations",
            "get-weather-near-location",
            "recent-traffic",
            "get_location_sentiment",
            "get-meteostanice-nazev",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let registry = builtin();
        for name in registry.tool_names() {
            let first = registry.resolve(name).unwrap();
            let second = registry.resolve(name).unwrap();
            assert_eq!(first.name, name);
            assert!(std::ptr::eq(first, second));
        }
    }

    #[test]
    fn test_resolve_unknown() {
        let err = builtin().resolve("unknown-tool").unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::UnknownTool);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let config = Config::default();
        let collaborators = Collaborators::from_config(&config);
        let mut registry = ToolRegistry::new();
        let mut tools = definitions::builtin_tools(&config, &collaborators).into_iter();
        let echo = tools.find(|d| d.name == "echo").unwrap();

        registry.register(echo.clone()).unwrap();
        let err = registry.register(echo).unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::DuplicateTool);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_tools_matches_names() {
        let registry = builtin();
        let tools = registry.list_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, registry.tool_names());
        assert!(tools.iter().all(|t| t.annotations.is_some()));
    }
}
