//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod basic;
pub mod common;
pub mod geo;

pub use basic::{
    AddNumbersTool, CalculatePowerTool, CalculatorTool, EchoTool, MultiplyNumbersTool,
    SubtractNumbersTool, TimeTool, UuidTool, WeatherTool,
};
pub use geo::{
    ListDatasetsTool, LocationSentimentTool, MapyPlacesTool, MeteostationNamesTool,
    NearbyMeteostationsTool, RecentTrafficTool, WeatherNearLocationTool,
};

use crate::core::collaborators::Collaborators;
use crate::core::config::Config;

use super::schema::ToolDescriptor;

/// Every built-in tool, in the order they are listed to clients.
pub fn builtin_tools(config: &Config, collaborators: &Collaborators) -> Vec<ToolDescriptor> {
    let db = &collaborators.database;

    vec![
        CalculatorTool::descriptor(),
        AddNumbersTool::descriptor(),
        SubtractNumbersTool::descriptor(),
        MultiplyNumbersTool::descriptor(),
        CalculatePowerTool::descriptor(),
        EchoTool::descriptor(),
        TimeTool::new(collaborators.clock.clone()).descriptor(),
        UuidTool::new(collaborators.random.clone()).descriptor(),
        WeatherTool::new(collaborators.random.clone()).descriptor(),
        MapyPlacesTool::new(collaborators.http.clone(), config.mapy.clone()).descriptor(),
        ListDatasetsTool::new(db.clone()).descriptor(),
        NearbyMeteostationsTool::new(db.clone()).descriptor(),
        WeatherNearLocationTool::new(db.clone(), collaborators.clock.clone()).descriptor(),
        RecentTrafficTool::new(db.clone()).descriptor(),
        LocationSentimentTool::new(db.clone()).descriptor(),
        MeteostationNamesTool::new(db.clone()).descriptor(),
    ]
}
