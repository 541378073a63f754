//! Dataset catalog tool definition.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::collaborators::{Database, Row, SqlParam};
use crate::domains::tools::definitions::common::row_non_empty;
use crate::domains::tools::{
    Annotations, Arguments, ParameterSpec, ToolDescriptor, ToolError, ToolExecutor,
};

/// Printed fields: column name and label, in output order.
const FIELDS: [(&str, &str); 11] = [
    ("title", "Title"),
    ("type", "Type"),
    ("description", "Description"),
    ("url", "URL"),
    ("owner", "Owner"),
    ("source", "Source"),
    ("categories", "Categories"),
    ("tags", "Tags"),
    ("access", "Access"),
    ("fields", "Field Definitions"),
    ("sample_data", "Sample Data"),
];

const SQL: &str = r#"
    SELECT
        "title"::text AS "title",
        "type"::text AS "type",
        "description"::text AS "description",
        "url"::text AS "url",
        "owner"::text AS "owner",
        "source"::text AS "source",
        "categories"::text AS "categories",
        "tags"::text AS "tags",
        "access"::text AS "access",
        "fields"::text AS "fields",
        "sample_data"::text AS "sample_data"
    FROM public."collections-cleaned"
    ORDER BY "title" ASC
    LIMIT $1::bigint
"#;

/// Lists open datasets of the Olomouc Region, alphabetically.
pub struct ListDatasetsTool {
    db: Arc<dyn Database>,
}

impl ListDatasetsTool {
    pub const NAME: &'static str = "list_olomouc_datasets";

    pub const DESCRIPTION: &'static str = "Retrieves a list of open datasets from the Olomouc Region (Olomoucký kraj) database, sorted alphabetically by title. Each dataset includes comprehensive metadata such as title, type, description, URL, owner, source, categories, tags, access information, field definitions, and sample data. This tool is useful for discovering available datasets, browsing data resources, and understanding what information is publicly available for the Olomouc region.";

    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: Self::NAME,
            title: "Olomouc Datasets List Tool",
            description: Self::DESCRIPTION,
            parameters: vec![
                ParameterSpec::integer(
                    "limit",
                    "Maximum number of datasets to return. Must be a positive integer. Default is 50.",
                )
                .default_value(50),
            ],
            annotations: Annotations::read_only(),
            executor: Arc::new(self),
        }
    }
}

#[async_trait]
impl ToolExecutor for ListDatasetsTool {
    #[instrument(skip_all, name = "list_datasets")]
    async fn execute(&self, args: &Arguments) -> Result<String, ToolError> {
        let limit = args.i64("limit")?.max(1);
        let rows = self.db.query(SQL, &[SqlParam::Int(limit)]).await?;
        info!("Fetched {} dataset(s)", rows.len());
        Ok(format_datasets(&rows))
    }
}

fn format_datasets(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "No datasets found in the collections-cleaned table.".to_string();
    }

    let mut out = format!("Found {} dataset(s) from Olomouc Region:\n\n", rows.len());
    for (index, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "Dataset #{}:", index + 1);
        for (column, label) in FIELDS {
            if let Some(value) = row_non_empty(row, column) {
                let _ = writeln!(out, "  {}: {}", label, value);
            }
        }
        out.push('\n');
    }
    out
}
