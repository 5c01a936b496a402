//! Recipes: named units that run queries and shape the result.
//!
//! Each recipe declares the queries it executes and the run contexts its own
//! post-processing reads. The runner derives the recipe's command line from
//! those declarations, so a recipe never parses arguments itself.

pub mod code_coverage;

use crate::core::executor::QueryExecutor;
use crate::core::types::RunArgs;
use crate::error::{AdrError, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// What a recipe needs resolved before it runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    pub queries: Vec<String>,
    pub run_contexts: Vec<String>,
}

impl Dependencies {
    pub fn new(queries: &[&str], run_contexts: &[&str]) -> Self {
        Self {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            run_contexts: run_contexts.iter().map(|c| c.to_string()).collect(),
        }
    }
}

pub trait Recipe {
    fn name(&self) -> &str;

    /// One-line summary for `adr list`.
    fn description(&self) -> &str {
        ""
    }

    /// Queries executed and run contexts read by [`Recipe::run`].
    fn dependencies(&self) -> Dependencies;

    /// Replaces the declared queries when `Some`.
    fn query_overrides(&self) -> Option<Vec<String>> {
        None
    }

    /// Replaces the declared run contexts when `Some`.
    fn run_context_overrides(&self) -> Option<Vec<String>> {
        None
    }

    fn run(&self, args: &RunArgs, executor: &QueryExecutor<'_>) -> Result<Value>;
}

/// Queries and run contexts to resolve for `recipe`: overrides first,
/// declarations otherwise.
pub fn resolve_dependencies(recipe: &dyn Recipe) -> Dependencies {
    let declared = recipe.dependencies();
    Dependencies {
        queries: recipe.query_overrides().unwrap_or(declared.queries),
        run_contexts: recipe.run_context_overrides().unwrap_or(declared.run_contexts),
    }
}

/// Recipe name → recipe.
#[derive(Default)]
pub struct RecipeRegistry {
    recipes: IndexMap<String, Box<dyn Recipe>>,
}

impl RecipeRegistry {
    /// Recipes shipped with adr.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register(Box::new(code_coverage::CodeCoverage));
        registry
    }

    /// Add a recipe, replacing any existing one with the same name.
    pub fn register(&mut self, recipe: Box<dyn Recipe>) {
        self.recipes.insert(recipe.name().to_string(), recipe);
    }

    pub fn get(&self, name: &str) -> Result<&dyn Recipe> {
        self.recipes
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| AdrError::UnknownRecipe(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Recipe> {
        self.recipes.values().map(|r| r.as_ref())
    }
}
