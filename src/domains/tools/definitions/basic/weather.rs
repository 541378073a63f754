//! Simulated weather tool definition.
//!
//! Produces a plausible looking report from the random source. No weather
//! service is contacted.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::collaborators::RandomSource;
use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

const CONDITIONS: [&str; 5] = ["Sunny", "Cloudy", "Rainy", "Partly Cloudy", "Stormy"];
const UNITS: &[&str] = &["celsius", "fahrenheit"];

/// Weather tool - simulated conditions for a city.
pub struct WeatherTool {
    random: Arc<dyn RandomSource>,
}

impl WeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Gets simulated weather information for a given city";

    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Weather Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                ParameterSpec::string("city", "City name").required(),
                ParameterSpec::string("units", "Temperature units")
                    .one_of(UNITS)
                    .default_value("celsius"),
            ],
            annotations: Annotations::read_only().non_idempotent().open_world(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for WeatherTool {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let city = args.str("city")?;
        let units = args.str("units")?;

        let condition = CONDITIONS[self.random.range(0, CONDITIONS.len() as u32 - 1) as usize];
        let celsius = f64::from(self.random.range(15, 30));
        let (temperature, unit) = match units {
            "fahrenheit" => (celsius * 9.0 / 5.0 + 32.0, "°F"),
            _ => (celsius, "°C"),
        };
        let humidity = self.random.range(40, 90);
        let wind_speed = self.random.range(5, 25);

        Ok(format!(
            "Weather for {}:\n\
             Condition: {}\n\
             Temperature: {:.1}{}\n\
             Humidity: {}%\n\
             Wind Speed: {} km/h\n\
             \n(Note: This is simulated data for demonstration purposes)",
            city, condition, temperature, unit, humidity, wind_speed
        ))
    }
}
