//! Code coverage for a path at a revision.
//!
//! ```bash
//! adr code_coverage --path <path> --rev <rev>
//! ```
//!
//! Percentages are averaged over test chunks, and chunks overlap on common
//! lines, so the numbers are an estimate.

use super::{Dependencies, Recipe};
use crate::core::executor::QueryExecutor;
use crate::core::types::RunArgs;
use crate::error::Result;
use serde_json::Value;

pub struct CodeCoverage;

impl Recipe for CodeCoverage {
    fn name(&self) -> &str {
        "code_coverage"
    }

    fn description(&self) -> &str {
        "Code coverage information for a path at a revision."
    }

    fn dependencies(&self) -> Dependencies {
        Dependencies::new(&["code_coverage"], &[])
    }

    fn run(&self, _args: &RunArgs, executor: &QueryExecutor<'_>) -> Result<Value> {
        let result = executor.execute_query("code_coverage", None)?;
        Ok(result.to_rows())
    }
}
