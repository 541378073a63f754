//! In-memory collaborator fakes for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use super::{
    Clock, Database, DatabaseError, HttpClient, HttpError, HttpResponse, RandomSource, Row,
    SqlParam,
};

/// Records every query and answers with canned rows (or a canned failure).
#[derive(Default)]
pub struct FakeDatabase {
    rows: Vec<Row>,
    failure: Option<String>,
    calls: Mutex<Vec<(String, Vec<SqlParam>)>>,
}

impl FakeDatabase {
    pub fn with_rows(rows: Vec<serde_json::Value>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|v| v.as_object().cloned().unwrap_or_default())
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<SqlParam>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Database for FakeDatabase {
    async fn query(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, DatabaseError> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        match &self.failure {
            Some(message) => Err(DatabaseError::Query {
                message: message.clone(),
                code: Some("42P01".to_string()),
            }),
            None => Ok(self.rows.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout_ms: u64,
}

/// Answers every GET with the same response and records the request.
pub struct FakeHttpClient {
    response: Result<HttpResponse, String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeHttpClient {
    pub fn ok(status: u16, body: &str) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            response: Err("connection refused".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout_ms: u64,
    ) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout_ms,
        });
        self.response.clone().map_err(HttpError::Connect)
    }
}

/// A clock frozen at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self(Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap())
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Produces the same byte everywhere.
pub struct FixedRandom(pub u8);

impl RandomSource for FixedRandom {
    fn fill(&self, buf: &mut [u8]) {
        buf.fill(self.0);
    }
}

/// Fake bundle: empty database, unreachable network, frozen clock.
pub fn fake_collaborators() -> super::Collaborators {
    use std::sync::Arc;

    super::Collaborators {
        database: Arc::new(FakeDatabase::default()),
        http: Arc::new(FakeHttpClient::unreachable()),
        clock: Arc::new(FixedClock::at(2025, 11, 11, 10, 30, 45)),
        random: Arc::new(FixedRandom(0)),
    }
}
