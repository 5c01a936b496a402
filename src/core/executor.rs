//! Query execution context for one recipe invocation.
//!
//! Holds the configuration and the query context parsed from the command
//! line. Recipes receive it by reference and call [`QueryExecutor::execute_query`]
//! for every query they need; nothing here is global, so each invocation
//! owns its own executor.

use super::config::Config;
use super::types::{Params, QueryResult};
use crate::error::{AdrError, Result};
use crate::query::QueryBackend;
use tracing::{debug, warn};

pub struct QueryExecutor<'a> {
    backend: &'a dyn QueryBackend,
    config: Option<Config>,
    query_context: Params,
    declared: Option<Vec<String>>,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(backend: &'a dyn QueryBackend) -> Self {
        Self {
            backend,
            config: None,
            query_context: Params::new(),
            declared: None,
        }
    }

    /// Replace the active configuration.
    pub fn set_config(&mut self, config: Config) {
        self.config = Some(config);
    }

    /// Replace (never merge) the stored query context.
    pub fn set_query_context(&mut self, context: Params) {
        self.query_context = context;
    }

    /// Queries the running recipe declared; others are still run but logged.
    pub fn set_declared_queries(&mut self, queries: Vec<String>) {
        self.declared = Some(queries);
    }

    pub fn query_context(&self) -> &Params {
        &self.query_context
    }

    /// Run `name` with the stored context, or with `override_context`
    /// topped up from the stored context. Override values win.
    pub fn execute_query(
        &self,
        name: &str,
        override_context: Option<Params>,
    ) -> Result<QueryResult> {
        let config = self.config.as_ref().ok_or_else(|| {
            AdrError::Configuration(format!("query {} executed before configuration was set", name))
        })?;

        if let Some(ref declared) = self.declared {
            if !declared.iter().any(|q| q == name) {
                warn!(query = name, "executing a query the recipe did not declare");
            }
        }

        let context = effective_context(&self.query_context, override_context);
        debug!(query = name, params = context.len(), "executing query");
        self.backend.run_query(name, config, &context)
    }
}

/// Merge an override onto the stored context. An absent or empty override
/// yields the stored context unchanged.
pub fn effective_context(stored: &Params, override_context: Option<Params>) -> Params {
    match override_context {
        Some(mut context) if !context.is_empty() => {
            for (key, value) in stored {
                if !context.contains_key(key) {
                    context.insert(key.clone(), value.clone());
                }
            }
            context
        }
        _ => stored.clone(),
    }
}
