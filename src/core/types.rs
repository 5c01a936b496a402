//! Argument definitions, parsed values, and query results.
//!
//! Argument definitions are written in YAML (context registry, query files)
//! in one of two shapes:
//!
//! ```yaml
//! # flat options, registered under the parameter name itself
//! path:
//!   type: str
//!   help: "Source path"
//!
//! # a form: flag spellings first, options second; dest = parameter name
//! rev:
//!   - ["-r", "--rev"]
//!   - type: str
//!     required: true
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Argument definitions
// ============================================================================

/// Parameter name → parsing definition, in declaration order.
pub type ArgumentSchema = IndexMap<String, ArgumentDefinition>;

/// Parameter name → parsed value.
pub type Params = IndexMap<String, Value>;

/// One parameter's parsing spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentDefinition {
    /// `[flags, options, ...]`. Validated when a parser is built.
    Form(Vec<FormPart>),
    /// A bare options mapping.
    Options(ArgumentOptions),
    /// Anything else, including options with unknown keys; rejected by the
    /// parser with a configuration error.
    Invalid(serde_yaml_ng::Value),
}

impl ArgumentDefinition {
    /// Build a well-formed two-element definition.
    pub fn form(flags: &[&str], options: ArgumentOptions) -> Self {
        Self::Form(vec![
            FormPart::Flags(flags.iter().map(|f| f.to_string()).collect()),
            FormPart::Options(options),
        ])
    }
}

/// An element of a form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormPart {
    Flags(Vec<String>),
    Options(ArgumentOptions),
    /// Anything else; rejected by the parser with a configuration error.
    Invalid(serde_yaml_ng::Value),
}

/// Parsing options for a single argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentOptions {
    /// Value coercion
    #[serde(rename = "type", default)]
    pub arg_type: ArgType,

    /// What to do when the argument is seen
    #[serde(default)]
    pub action: ArgAction,

    /// Value used when the argument is absent
    #[serde(default)]
    pub default: Option<Value>,

    /// Help text shown in usage
    #[serde(default)]
    pub help: Option<String>,

    /// Fail parsing when absent
    #[serde(default)]
    pub required: bool,

    /// Allowed values
    #[serde(default)]
    pub choices: Vec<String>,

    /// Placeholder shown in usage
    #[serde(default)]
    pub metavar: Option<String>,

    /// Target field name (forced to the parameter name for forms)
    #[serde(default)]
    pub dest: Option<String>,
}

/// Value type of an argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgType {
    #[default]
    #[serde(alias = "string")]
    Str,
    #[serde(alias = "integer")]
    Int,
    Float,
    #[serde(alias = "boolean")]
    Bool,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "str"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// Argument action, mirroring the usual command-line conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgAction {
    #[default]
    Store,
    StoreTrue,
    StoreFalse,
    Append,
}

// ============================================================================
// Run arguments
// ============================================================================

/// Read-only namespace of run-context values handed to a recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    values: Params,
}

impl RunArgs {
    pub fn new(values: Params) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl From<RunArgs> for Params {
    fn from(args: RunArgs) -> Self {
        args.values
    }
}

impl From<&RunArgs> for Params {
    fn from(args: &RunArgs) -> Self {
        args.values.clone()
    }
}

// ============================================================================
// Query results
// ============================================================================

/// Tabular result of a backend query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub header: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Header row followed by the data rows.
    pub fn to_rows(&self) -> Value {
        let mut rows = Vec::with_capacity(self.data.len() + 1);
        rows.push(Value::Array(
            self.header.iter().cloned().map(Value::String).collect(),
        ));
        rows.extend(self.data.iter().cloned().map(Value::Array));
        Value::Array(rows)
    }
}
