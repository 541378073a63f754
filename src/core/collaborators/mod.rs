//! Capability interfaces for the external systems tools depend on.
//!
//! Executors never talk to PostgreSQL, the network, the system clock or the
//! OS random generator directly. They receive these handles at construction
//! time, which keeps every tool testable with in-memory fakes.

mod clock;
mod database;
mod http_client;
mod random;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

pub use clock::{Clock, SystemClock};
pub use database::{Database, DatabaseError, PgDatabase, Row, SqlParam};
pub use http_client::{HttpClient, HttpError, HttpResponse, ReqwestHttpClient};
pub use random::{OsRandom, RandomSource};

use super::config::Config;

/// Bundle of collaborator handles shared by all executors.
#[derive(Clone)]
pub struct Collaborators {
    pub database: Arc<dyn Database>,
    pub http: Arc<dyn HttpClient>,
    pub clock: Arc<dyn Clock>,
    pub random: Arc<dyn RandomSource>,
}

impl Collaborators {
    /// Build the production collaborators from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            database: Arc::new(PgDatabase::new(config.database.clone())),
            http: Arc::new(ReqwestHttpClient::new()),
            clock: Arc::new(SystemClock),
            random: Arc::new(OsRandom),
        }
    }
}
