//! Relational database capability and its PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tokio_postgres::NoTls;
use tokio_postgres::types::{ToSql, Type};
use tracing::{debug, info, instrument, warn};

use crate::core::config::DatabaseConfig;

/// One result row: column name to JSON value.
pub type Row = serde_json::Map<String, Value>;

/// A positional query parameter (`$1`, `$2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Float(f64),
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl SqlParam {
    fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            Self::Float(v) => v,
            Self::Int(v) => v,
            Self::Text(v) => v,
            Self::Date(v) => v,
        }
    }
}

/// Errors raised by the database collaborator.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(
        "Missing required environment variables (POSTGRES_HOST, POSTGRES_DATABASE, POSTGRES_USERNAME)"
    )]
    NotConfigured,

    #[error("Database Error: {0}")]
    Connect(String),

    #[error(
        "Database Error: {message}{}",
        .code.as_deref().map(|c| format!("\n\nError Code: {c}")).unwrap_or_default()
    )]
    Query {
        message: String,
        code: Option<String>,
    },
}

impl DatabaseError {
    /// Build a query error from a driver error, keeping the SQLSTATE code.
    fn from_pg(err: tokio_postgres::Error) -> Self {
        let message = err
            .as_db_error()
            .map(|db| db.message().to_string())
            .unwrap_or_else(|| err.to_string());
        Self::Query {
            message,
            code: err.code().map(|c| c.code().to_string()),
        }
    }
}

/// Query capability used by the data lookup tools.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run one statement and return its rows in order.
    async fn query(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, DatabaseError>;
}

/// PostgreSQL-backed [`Database`] opening one connection per query.
pub struct PgDatabase {
    config: DatabaseConfig,
}

impl PgDatabase {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn pg_config(&self) -> Result<tokio_postgres::Config, DatabaseError> {
        if !self.config.is_complete() {
            return Err(DatabaseError::NotConfigured);
        }

        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.config.host)
            .port(self.config.port)
            .dbname(&self.config.database)
            .user(&self.config.username)
            .password(&self.config.password)
            .options("--client_encoding=UTF8")
            .application_name(env!("CARGO_PKG_NAME"))
            .connect_timeout(self.config.connect_timeout);
        Ok(pg)
    }
}

#[async_trait]
impl Database for PgDatabase {
    #[instrument(skip_all, fields(host = %self.config.host, database = %self.config.database))]
    async fn query(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, DatabaseError> {
        let pg = self.pg_config()?;

        let (client, connection) = pg
            .connect(NoTls)
            .await
            .map_err(|e| DatabaseError::Connect(e.to_string()))?;

        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!("PostgreSQL connection error: {}", e);
            }
        });

        let refs: Vec<&(dyn ToSql + Sync)> = params.iter().map(SqlParam::as_sql).collect();
        let result = client.query(sql, &refs).await;

        // Dropping the client closes the connection task.
        drop(client);
        if let Err(e) = connection.await {
            debug!("PostgreSQL connection task did not finish cleanly: {}", e);
        }

        let rows = result.map_err(DatabaseError::from_pg)?;
        info!("Query returned {} row(s)", rows.len());

        rows.iter().map(convert_row).collect()
    }
}

fn convert_row(row: &tokio_postgres::Row) -> Result<Row, DatabaseError> {
    let mut out = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let value = column_value(row, idx, column.type_()).map_err(DatabaseError::from_pg)?;
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

fn column_value(
    row: &tokio_postgres::Row,
    idx: usize,
    ty: &Type,
) -> Result<Value, tokio_postgres::Error> {
    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)?.map(Value::from)
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)?.map(Value::from)
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)?.map(Value::from)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)?.map(Value::from)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)?.map(Value::from)
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)?.map(Value::from)
    } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR || *ty == Type::NAME
    {
        row.try_get::<_, Option<String>>(idx)?.map(Value::from)
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<NaiveDate>>(idx)?
            .map(|d| Value::from(d.to_string()))
    } else if *ty == Type::TIMESTAMP {
        row.try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(|t| Value::from(t.format("%Y-%m-%d %H:%M:%S").to_string()))
    } else if *ty == Type::TIMESTAMPTZ {
        row.try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|t| Value::from(t.format("%Y-%m-%d %H:%M:%S%:z").to_string()))
    } else if *ty == Type::JSON || *ty == Type::JSONB {
        row.try_get::<_, Option<Value>>(idx)?
    } else {
        debug!("Unsupported column type {} at index {}, returning null", ty, idx);
        None
    };

    Ok(value.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(host: &str) -> DatabaseConfig {
        DatabaseConfig {
            host: host.to_string(),
            port: 1,
            database: "olomouc".to_string(),
            username: "reader".to_string(),
            password: "secret".to_string(),
            connect_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_query_error_display_with_code() {
        let err = DatabaseError::Query {
            message: "relation \"missing\" does not exist".to_string(),
            code: Some("42P01".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Database Error: relation \"missing\" does not exist\n\nError Code: 42P01"
        );
    }

    #[test]
    fn test_query_error_display_without_code() {
        let err = DatabaseError::Query {
            message: "boom".to_string(),
            code: None,
        };
        assert_eq!(err.to_string(), "Database Error: boom");
    }

    #[tokio::test]
    async fn test_incomplete_config_fails_before_connecting() {
        let db = PgDatabase::new(config(""));
        let err = db.query("SELECT 1", &[]).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotConfigured));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connect_error() {
        let db = PgDatabase::new(config("127.0.0.1"));
        let err = db.query("SELECT 1", &[]).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Connect(_)));
        assert!(err.to_string().starts_with("Database Error: "));
    }
}
