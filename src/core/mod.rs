//! Core dispatch logic: types, contexts, parsing, resolution, execution, output.

pub mod config;
pub mod context;
pub mod executor;
pub mod formatter;
pub mod parser;
pub mod resolver;
pub mod runner;
pub mod types;
