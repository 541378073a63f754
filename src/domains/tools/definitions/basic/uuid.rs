//! UUID generator tool definition.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::core::collaborators::RandomSource;
use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

const MAX_UUIDS: i64 = 10;

/// UUID tool - random version 4 identifiers.
pub struct UuidTool {
    random: Arc<dyn RandomSource>,
}

impl UuidTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate-uuid";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generates a random UUID (version 4)";

    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "UUID Generator",
            description: Self::DESCRIPTION,
            parameters: vec![
                ParameterSpec::integer("count", "Number of UUIDs to generate (1-10)")
                    .default_value(1),
            ],
            annotations: Annotations::read_only().non_idempotent(),
            executor: Arc::new(self),
        }
    }

    fn generate(&self) -> String {
        let mut bytes = [0u8; 16];
        self.random.fill(&mut bytes);
        // Sets the version nibble to 4 and the variant bits to 10.
        ::uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string()
    }
}

#[async_trait]
impl ToolExecutor for UuidTool {
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let count = args.i64("count")?.clamp(1, MAX_UUIDS);
        debug!("Generating {} UUID(s)", count);

        let uuids: Vec<String> = (0..count).map(|_| self.generate()).collect();
        if let [single] = uuids.as_slice() {
            return Ok(single.clone());
        }
        Ok(format!("Generated {} UUIDs:\n{}", count, uuids.join("\n")))
    }
}
