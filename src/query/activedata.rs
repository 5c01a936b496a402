//! ActiveData HTTP backend.

use super::{render_query, QueryBackend, QueryStore};
use crate::core::config::Config;
use crate::core::types::{Params, QueryResult};
use crate::error::{AdrError, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Runs rendered queries against an ActiveData endpoint.
pub struct ActiveDataBackend<'a> {
    store: &'a QueryStore,
    client: Client,
}

impl<'a> ActiveDataBackend<'a> {
    pub fn new(store: &'a QueryStore, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("adr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { store, client })
    }
}

impl QueryBackend for ActiveDataBackend<'_> {
    fn run_query(&self, name: &str, config: &Config, context: &Params) -> Result<QueryResult> {
        let definition = self.store.get(name)?;
        let body = render_query(name, definition, context)?;
        debug!(query = name, body = %body, "rendered query");

        let start = Instant::now();
        let response = self.client.post(&config.url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AdrError::Backend(format!(
                "query {} failed with HTTP {}: {}",
                name,
                status,
                detail.trim()
            )));
        }

        let payload: Value = response.json()?;
        info!(
            query = name,
            elapsed_ms = millis(start.elapsed()),
            "query complete"
        );
        parse_response(name, payload)
    }
}

/// Interpret a `format: table` response. An empty `data` list means the
/// service had nothing to return.
pub fn parse_response(name: &str, payload: Value) -> Result<QueryResult> {
    let result: QueryResult = serde_json::from_value(payload).map_err(|e| {
        AdrError::Backend(format!("query {} returned a malformed response: {}", name, e))
    })?;
    if result.data.is_empty() {
        return Err(AdrError::MissingData {
            query: name.to_string(),
        });
    }
    Ok(result)
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
