//! Configuration management for the MCP server.
//!
//! All settings are read once at startup by [`Config::from_env`] and then
//! injected into the collaborators and tools that need them. Nothing else in
//! the crate reads the process environment.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default PostgreSQL port.
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Default Mapy.cz geocoding endpoint.
pub const DEFAULT_MAPY_API_URL: &str = "https://api.mapy.com/v1/geocode";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// PostgreSQL connection settings for the data lookup tools.
    pub database: DatabaseConfig,

    /// Mapy.cz geocoding API settings.
    pub mapy: MapyConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// PostgreSQL connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub connect_timeout: Duration,
}

/// Mapy.cz API settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct MapyConfig {
    /// API key sent as `X-Mapy-Api-Key`.
    pub api_key: Option<String>,

    /// Geocoding endpoint.
    pub api_url: String,
}

impl DatabaseConfig {
    /// Host, database and username must all be set before connecting.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.database.is_empty() && !self.username.is_empty()
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field(
                "password",
                &if self.password.is_empty() { "" } else { "[REDACTED]" },
            )
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl std::fmt::Debug for MapyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_POSTGRES_PORT,
            database: String::new(),
            username: String::new(),
            password: String::new(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for MapyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_MAPY_API_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "olomouc-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            database: DatabaseConfig::default(),
            mapy: MapyConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// Server settings use the `MCP_` prefix. Database and Mapy.cz settings use
    /// the `POSTGRES_*` and `MAPY_*` names shared with the deployment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.database = DatabaseConfig::from_env();
        config.mapy = MapyConfig::from_env();

        config
    }
}

impl DatabaseConfig {
    /// Read `POSTGRES_*` variables. An unparsable port falls back to 5432.
    pub fn from_env() -> Self {
        let mut db = Self::default();

        db.host = std::env::var("POSTGRES_HOST").unwrap_or_default();
        db.database = std::env::var("POSTGRES_DATABASE").unwrap_or_default();
        db.username = std::env::var("POSTGRES_USERNAME").unwrap_or_default();
        db.password = std::env::var("POSTGRES_PASSWORD").unwrap_or_default();

        if let Ok(port) = std::env::var("POSTGRES_PORT") {
            db.port = port.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid POSTGRES_PORT '{}', using {}", port, DEFAULT_POSTGRES_PORT);
                DEFAULT_POSTGRES_PORT
            });
        }

        if let Some(secs) = std::env::var("POSTGRES_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            db.connect_timeout = Duration::from_secs(secs);
        }

        if db.is_complete() {
            info!(
                "Database configured: {}@{}:{}/{}",
                db.username, db.host, db.port, db.database
            );
        } else {
            warn!(
                "POSTGRES_HOST, POSTGRES_DATABASE or POSTGRES_USERNAME not set - \
                 database tools will report a configuration error"
            );
        }

        db
    }
}

impl MapyConfig {
    /// Read `MAPY_API_KEY` and `MAPY_API_URL`.
    pub fn from_env() -> Self {
        let mut mapy = Self::default();

        match std::env::var("MAPY_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                mapy.api_key = Some(key);
                info!("Mapy.cz API key loaded from environment");
            }
            _ => warn!("MAPY_API_KEY not set - places of interest tool will be unavailable"),
        }

        if let Ok(url) = std::env::var("MAPY_API_URL") {
            mapy.api_url = url;
        }

        mapy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const DB_VARS: [&str; 5] = [
        "POSTGRES_HOST",
        "POSTGRES_PORT",
        "POSTGRES_DATABASE",
        "POSTGRES_USERNAME",
        "POSTGRES_PASSWORD",
    ];

    fn clear_db_vars() {
        for var in DB_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_database_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_db_vars();
        unsafe {
            std::env::set_var("POSTGRES_HOST", "db.example");
            std::env::set_var("POSTGRES_PORT", "6543");
            std::env::set_var("POSTGRES_DATABASE", "opendata");
            std::env::set_var("POSTGRES_USERNAME", "reader");
            std::env::set_var("POSTGRES_PASSWORD", "hunter2");
        }

        let db = DatabaseConfig::from_env();
        assert_eq!(db.host, "db.example");
        assert_eq!(db.port, 6543);
        assert_eq!(db.database, "opendata");
        assert_eq!(db.username, "reader");
        assert_eq!(db.password, "hunter2");
        assert!(db.is_complete());

        clear_db_vars();
    }

    #[test]
    fn test_database_port_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_db_vars();
        assert_eq!(DatabaseConfig::from_env().port, 5432);

        unsafe {
            std::env::set_var("POSTGRES_PORT", "not-a-port");
        }
        assert_eq!(DatabaseConfig::from_env().port, 5432);

        clear_db_vars();
    }

    #[test]
    fn test_database_incomplete_without_username() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_db_vars();
        unsafe {
            std::env::set_var("POSTGRES_HOST", "db.example");
            std::env::set_var("POSTGRES_DATABASE", "opendata");
        }
        assert!(!DatabaseConfig::from_env().is_complete());
        clear_db_vars();
    }

    #[test]
    fn test_mapy_key_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MAPY_API_KEY", "mapy_key_12345");
        }
        let mapy = MapyConfig::from_env();
        assert_eq!(mapy.api_key.as_deref(), Some("mapy_key_12345"));
        assert_eq!(mapy.api_url, DEFAULT_MAPY_API_URL);
        unsafe {
            std::env::remove_var("MAPY_API_KEY");
        }
        assert!(MapyConfig::from_env().api_key.is_none());
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let db = DatabaseConfig {
            password: "super_secret_password".to_string(),
            ..Default::default()
        };
        let mapy = MapyConfig {
            api_key: Some("super_secret_key".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?} {:?}", db, mapy);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_password"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.name, "olomouc-mcp-server");
        assert_eq!(config.database.port, 5432);
        assert!(!config.database.is_complete());
        assert!(config.mapy.api_key.is_none());
    }
}
