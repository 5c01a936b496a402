//! Recipe runner: resolve, parse, execute, format.
//!
//! One invocation moves strictly forward:
//! loaded → schema resolved → parsed → context set → executed → formatted
//! (or no-data handled). Any other failure ends the invocation.

use super::config::Config;
use super::context::ContextRegistry;
use super::executor::QueryExecutor;
use super::formatter::FormatterRegistry;
use super::parser::RecipeParser;
use super::resolver::{self, ResolvedSchemas};
use super::types::{Params, RunArgs};
use crate::error::{AdrError, Result};
use crate::query::{QueryBackend, QueryStore};
use crate::recipes::{self, RecipeRegistry};
use tracing::{debug, info};

/// Printed in place of a result when a query comes back empty.
pub const NO_DATA_MESSAGE: &str = "ActiveData didn't return any data.";

/// Everything an invocation looks things up in.
pub struct Runtime<'a> {
    pub recipes: &'a RecipeRegistry,
    pub contexts: &'a ContextRegistry,
    pub queries: &'a QueryStore,
    pub formatters: &'a FormatterRegistry,
    pub backend: &'a dyn QueryBackend,
}

/// Run the recipe `name` with raw command-line `args`; returns the
/// formatted output.
pub fn run_recipe(rt: &Runtime, name: &str, args: &[String], config: &Config) -> Result<String> {
    let recipe = rt.recipes.get(name)?;
    let deps = recipes::resolve_dependencies(recipe);
    debug!(recipe = name, queries = ?deps.queries, run_contexts = ?deps.run_contexts, "recipe loaded");

    let schemas = resolver::resolve(&deps.queries, &deps.run_contexts, rt.queries, rt.contexts)?;
    let parser = RecipeParser::new(name, &schemas.merged())?;
    debug!(recipe = name, "schema resolved");

    let parsed = parser.parse(args)?;
    debug!(recipe = name, "arguments parsed");

    let mut executor = QueryExecutor::new(rt.backend);
    executor.set_config(config.clone());
    let (query_args, run_args) = partition(parsed, &schemas);
    executor.set_query_context(query_args);
    executor.set_declared_queries(deps.queries.clone());
    debug!(recipe = name, "query context set");

    let output = match recipe.run(&run_args, &executor) {
        Ok(output) => output,
        Err(AdrError::MissingData { query }) => {
            info!(recipe = name, query = %query, "no data returned");
            return Ok(NO_DATA_MESSAGE.to_string());
        }
        Err(e) => return Err(e),
    };
    debug!(recipe = name, "recipe executed");

    let formatter = rt.formatters.get(&config.fmt)?;
    Ok(formatter(&output))
}

/// Run a single query by name, parsing `args` against its own schema, and
/// format the raw header-plus-rows result.
pub fn run_query(rt: &Runtime, name: &str, args: &[String], config: &Config) -> Result<String> {
    let schema = rt.queries.load_query_context(name, rt.contexts)?;
    let parser = RecipeParser::new(name, &schema)?;
    let parsed = parser.parse(args)?;

    let mut executor = QueryExecutor::new(rt.backend);
    executor.set_config(config.clone());
    executor.set_query_context(parsed);

    let result = match executor.execute_query(name, None) {
        Ok(result) => result,
        Err(AdrError::MissingData { .. }) => return Ok(NO_DATA_MESSAGE.to_string()),
        Err(e) => return Err(e),
    };

    let formatter = rt.formatters.get(&config.fmt)?;
    Ok(formatter(&result.to_rows()))
}

/// Split parsed values into the query context and the run arguments.
/// A name defined on both sides lands in both.
fn partition(parsed: Params, schemas: &ResolvedSchemas) -> (Params, RunArgs) {
    let mut query_args = Params::new();
    let mut run_args = Params::new();
    for (name, value) in parsed {
        if schemas.run.contains_key(&name) {
            run_args.insert(name.clone(), value.clone());
        }
        if schemas.query.contains_key(&name) {
            query_args.insert(name, value);
        }
    }
    (query_args, RunArgs::new(run_args))
}
