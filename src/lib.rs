//! adr: ActiveData recipe dispatch.
//!
//! Recipes declare the queries they run and the contexts they read; the
//! command line for each recipe is derived from those declarations, parsed,
//! split between query and run arguments, and the result formatted.

pub mod cli;
pub mod core;
pub mod error;
pub mod query;
pub mod recipes;
