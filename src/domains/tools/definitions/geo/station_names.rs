//! Distinct meteostation names.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::collaborators::Database;
use crate::domains::tools::{Annotations, Arguments, ToolDescriptor, ToolError, ToolExecutor};

const SQL: &str = r#"SELECT DISTINCT "NAZEV"::text AS "NAZEV" FROM public."meteostanice_mesta_Olomouc" ORDER BY "NAZEV""#;

pub struct MeteostationNamesTool {
    db: Arc<dyn Database>,
}

impl MeteostationNamesTool {
    pub const NAME: &'static str = "get-meteostanice-nazev";

    pub const DESCRIPTION: &'static str = "Connects to PostgreSQL database and returns unique values from the \"nazev\" column in the meteostanice_mesta_Olomouc table";

    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "PostgreSQL Meteostanice Tool",
            description: Self::DESCRIPTION,
            parameters: vec![],
            annotations: Annotations::read_only(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for MeteostationNamesTool {
    async fn execute(&self, _args: &Arguments) -> Result<String, ToolError> {
        let rows = self.db.query(SQL, &[]).await?;
        if rows.is_empty() {
            return Ok("No unique values found in the \"nazev\" column.".to_string());
        }

        let lines: Vec<String> = rows
            .iter()
            .map(|row| match row.get("NAZEV") {
                Some(Value::String(name)) => format!("- {}", name),
                Some(Value::Null) | None => "- (NULL)".to_string(),
                Some(other) => format!("- {}", other),
            })
            .collect();

        Ok(format!(
            "Found {} unique value(s) in the \"nazev\" column:\n\n{}",
            lines.len(),
            lines.join("\n")
        ))
    }
}
