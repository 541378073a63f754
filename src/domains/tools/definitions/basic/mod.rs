//! Self-contained tools with no external data source.

pub mod arithmetic;
pub mod calculator;
pub mod date_format;
pub mod echo;
pub mod time;
pub mod uuid;
pub mod weather;

pub use arithmetic::{AddNumbersTool, CalculatePowerTool, MultiplyNumbersTool, SubtractNumbersTool};
pub use calculator::CalculatorTool;
pub use echo::EchoTool;
pub use time::TimeTool;
pub use uuid::UuidTool;
pub use weather::WeatherTool;
