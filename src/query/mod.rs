//! Query definitions and the backend seam.
//!
//! A query is a YAML document naming the contexts its arguments come from
//! and carrying an ActiveData request body:
//!
//! ```yaml
//! context: [path, rev]
//! query:
//!   from: coverage
//!   where: {eq: {repo.changeset.id12: {$eval: rev}}}
//! ```
//!
//! `{$eval: name}` nodes are replaced with context values when rendered.

pub mod activedata;

use crate::core::config::Config;
use crate::core::context::ContextRegistry;
use crate::core::types::{ArgumentSchema, Params, QueryResult};
use crate::error::{AdrError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// File extension of query definitions on disk.
pub const QUERY_EXTENSION: &str = "query";

const BUILTIN_QUERIES: &[(&str, &str)] = &[(
    "code_coverage",
    include_str!("../../queries/code_coverage.query"),
)];

/// Executes named queries. Implemented over HTTP by
/// [`activedata::ActiveDataBackend`]; tests substitute their own.
pub trait QueryBackend {
    fn run_query(&self, name: &str, config: &Config, context: &Params) -> Result<QueryResult>;
}

/// A parsed `.query` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDefinition {
    #[serde(default)]
    pub description: Option<String>,

    /// Context names supplying this query's arguments
    #[serde(default)]
    pub context: Vec<String>,

    /// Request body template
    pub query: Value,
}

/// Parse a query definition from YAML.
pub fn parse_query(yaml: &str) -> Result<QueryDefinition> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// All known query definitions, by name.
#[derive(Debug, Clone, Default)]
pub struct QueryStore {
    queries: IndexMap<String, QueryDefinition>,
}

impl QueryStore {
    /// Queries shipped with adr.
    pub fn builtin() -> Result<Self> {
        let mut store = Self::default();
        for (name, yaml) in BUILTIN_QUERIES {
            store.insert(*name, parse_query(yaml)?);
        }
        Ok(store)
    }

    /// Add every `*.query` file in `dir`, replacing same-named queries.
    /// Returns the number of definitions loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            AdrError::Configuration(format!("cannot read queries dir {}: {}", dir.display(), e))
        })?;

        let mut paths: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == QUERY_EXTENSION))
            .collect();
        paths.sort();

        for path in &paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = std::fs::read_to_string(path)?;
            let definition = parse_query(&content).map_err(|e| {
                AdrError::Configuration(format!("invalid query {}: {}", path.display(), e))
            })?;
            debug!(query = name, path = %path.display(), "loaded query definition");
            self.insert(name, definition);
        }

        Ok(paths.len())
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: QueryDefinition) {
        self.queries.insert(name.into(), definition);
    }

    pub fn get(&self, name: &str) -> Result<&QueryDefinition> {
        self.queries
            .get(name)
            .ok_or_else(|| AdrError::UnknownQuery(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }

    /// The argument definitions a query needs, resolved through its contexts.
    pub fn load_query_context(
        &self,
        name: &str,
        contexts: &ContextRegistry,
    ) -> Result<ArgumentSchema> {
        let definition = self.get(name)?;
        contexts.definitions(&definition.context)
    }
}

/// Render a query body: substitute `$eval` nodes and default the response
/// format to `table`.
pub fn render_query(name: &str, definition: &QueryDefinition, context: &Params) -> Result<Value> {
    let mut body = substitute(name, &definition.query, context)?;
    if let Value::Object(ref mut map) = body {
        map.entry("format")
            .or_insert_with(|| Value::String("table".to_string()));
    }
    Ok(body)
}

fn substitute(name: &str, node: &Value, context: &Params) -> Result<Value> {
    match node {
        Value::Object(map) => {
            if let (1, Some(Value::String(param))) = (map.len(), map.get("$eval")) {
                return match context.get(param) {
                    Some(value) if !value.is_null() => Ok(value.clone()),
                    _ => Err(AdrError::Configuration(format!(
                        "query {} needs a value for '{}'",
                        name, param
                    ))),
                };
            }
            map.iter()
                .map(|(k, v)| Ok((k.clone(), substitute(name, v, context)?)))
                .collect::<Result<serde_json::Map<_, _>>>()
                .map(Value::Object)
        }
        Value::Array(items) => items
            .iter()
            .map(|v| substitute(name, v, context))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}
