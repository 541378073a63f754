//! Time tool definition.

use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use tracing::{info, instrument};

use super::date_format::format_date;
use crate::core::collaborators::Clock;
use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

/// Time tool - current date and time in a timezone.
pub struct TimeTool {
    clock: Arc<dyn Clock>,
}

impl TimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get-time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Gets the current date and time in the specified timezone and format";

    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Time Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                ParameterSpec::string(
                    "timezone",
                    "Timezone identifier (e.g., \"UTC\", \"America/New_York\", \"Europe/London\")",
                )
                .default_value("UTC"),
                ParameterSpec::string("format", "Date format (e.g., \"Y-m-d H:i:s\", \"c\", \"r\")")
                    .default_value("Y-m-d H:i:s"),
            ],
            annotations: Annotations::read_only().non_idempotent(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for TimeTool {
    #[instrument(skip_all, name = "get_time")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let timezone = args.str("timezone")?;
        let format = args.str("format")?;

        let tz: Tz = timezone
            .parse()
            .map_err(|_| ToolError::executor(format!("Unknown or bad timezone ({})", timezone)))?;

        info!("Formatting current time for {}", tz.name());
        let now = self.clock.now(tz);
        Ok(format!("Current time in {}: {}", timezone, format_date(&now, format)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::testing::FixedClock;
    use crate::domains::tools::ToolErrorKind;
    use crate::domains::tools::definitions::test_support::run;
    use serde_json::json;

    fn tool() -> ToolDescriptor {
        TimeTool::new(Arc::new(FixedClock::at(2025, 11, 11, 10, 30, 45))).descriptor()
    }

    #[tokio::test]
    async fn test_defaults_to_utc() {
        let text = run(&tool(), json!({})).await.unwrap();
        assert_eq!(text, "Current time in UTC: 2025-11-11 10:30:45");
    }

    #[tokio::test]
    async fn test_timezone_and_format() {
        let text = run(&tool(), json!({"timezone": "Europe/Prague", "format": "c"}))
            .await
            .unwrap();
        assert_eq!(text, "Current time in Europe/Prague: 2025-11-11T11:30:45+01:00");

        let text = run(&tool(), json!({"timezone": "America/New_York", "format": "H:i T"}))
            .await
            .unwrap();
        assert_eq!(text, "Current time in America/New_York: 05:30 EST");
    }

    #[tokio::test]
    async fn test_unknown_timezone() {
        let err = run(&tool(), json!({"timezone": "Mars/Olympus"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::ExecutorError);
        assert!(err.to_string().contains("Mars/Olympus"));
    }
}
