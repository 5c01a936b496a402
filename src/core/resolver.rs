//! Schema resolution and merging.
//!
//! Resolves the argument definitions behind a recipe's queries and run
//! contexts, then merges them into the single schema its command line is
//! built from. Query definitions win on collision: queries define the
//! canonical shape of their inputs.

use super::context::ContextRegistry;
use super::types::ArgumentSchema;
use crate::error::Result;
use crate::query::QueryStore;
use indexmap::IndexSet;
use tracing::debug;

/// Definitions a recipe invocation needs, split by origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSchemas {
    pub query: ArgumentSchema,
    pub run: ArgumentSchema,
}

impl ResolvedSchemas {
    /// The combined schema (see [`merge_schemas`]).
    pub fn merged(&self) -> ArgumentSchema {
        merge_schemas(&self.run, &self.query)
    }
}

/// Resolve query and run-context definitions.
///
/// Query names are deduplicated keeping first occurrence; across queries
/// and across contexts, later definitions overwrite earlier ones. Unknown
/// query or context names fail the resolution.
pub fn resolve(
    queries: &[String],
    run_contexts: &[String],
    store: &QueryStore,
    contexts: &ContextRegistry,
) -> Result<ResolvedSchemas> {
    let mut query = ArgumentSchema::new();
    let unique: IndexSet<&str> = queries.iter().map(String::as_str).collect();
    for name in unique {
        let defs = store.load_query_context(name, contexts)?;
        debug!(query = name, params = defs.len(), "resolved query context");
        query.extend(defs);
    }

    let run = contexts.definitions(run_contexts)?;
    Ok(ResolvedSchemas { query, run })
}

/// Start from `run`, then overwrite and extend with every entry of `query`.
pub fn merge_schemas(run: &ArgumentSchema, query: &ArgumentSchema) -> ArgumentSchema {
    let mut merged = run.clone();
    for (name, definition) in query {
        merged.insert(name.clone(), definition.clone());
    }
    merged
}
