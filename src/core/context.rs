//! Static registry of run-context argument definitions.
//!
//! A context name resolves to one or more argument definitions. Most
//! contexts define a single parameter of the same name; `build` defines the
//! `branch`/`rev` pair together.

use super::types::ArgumentSchema;
use crate::error::{AdrError, Result};
use indexmap::IndexMap;

const BUILTIN_CONTEXTS: &str = r#"
path:
  path:
    - ["--path"]
    - type: str
      required: true
      help: "Source file or directory to report on."
rev:
  rev:
    - ["-r", "--rev", "--revision"]
    - type: str
      required: true
      help: "Changeset revision (12 or 40 characters)."
branch:
  branch:
    - ["-B", "--branch"]
    - type: str
      default: mozilla-central
      help: "Branch to query."
limit:
  limit:
    - ["-l", "--limit"]
    - type: int
      default: 10
      help: "Maximum number of rows to return."
platform:
  platform:
    - ["-p", "--platform"]
    - type: str
      help: "Restrict results to a single platform."
build:
  branch:
    - ["-B", "--branch"]
    - type: str
      default: mozilla-central
      help: "Branch to query."
  rev:
    - ["-r", "--rev", "--revision"]
    - type: str
      required: true
      help: "Changeset revision (12 or 40 characters)."
"#;

/// Context name → the argument definitions it contributes.
#[derive(Debug, Clone, Default)]
pub struct ContextRegistry {
    contexts: IndexMap<String, ArgumentSchema>,
}

impl ContextRegistry {
    /// The contexts shipped with adr.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CONTEXTS)
    }

    /// Parse a registry from YAML (`context name → parameter → definition`).
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let contexts: IndexMap<String, ArgumentSchema> = serde_yaml_ng::from_str(yaml)?;
        Ok(Self { contexts })
    }

    /// Add or replace a context.
    pub fn insert(&mut self, name: impl Into<String>, definitions: ArgumentSchema) {
        self.contexts.insert(name.into(), definitions);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Fold the definitions of every named context into one schema.
    /// Later contexts overwrite earlier ones on parameter-name collision.
    pub fn definitions<I, S>(&self, names: I) -> Result<ArgumentSchema>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut schema = ArgumentSchema::new();
        for name in names {
            let name = name.as_ref();
            let defs = self
                .contexts
                .get(name)
                .ok_or_else(|| AdrError::UnknownContext(name.to_string()))?;
            for (param, def) in defs {
                schema.insert(param.clone(), def.clone());
            }
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ArgType, ArgumentDefinition, ArgumentOptions};

    #[test]
    fn test_context_builtin_parses() {
        let registry = ContextRegistry::builtin().unwrap();
        for name in ["path", "rev", "branch", "limit", "platform", "build"] {
            assert!(registry.contains(name), "missing builtin context {}", name);
        }
    }

    #[test]
    fn test_context_definitions_single() {
        let registry = ContextRegistry::builtin().unwrap();
        let schema = registry.definitions(["path"]).unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["path"]);
    }

    #[test]
    fn test_context_definitions_multi_param_context() {
        let registry = ContextRegistry::builtin().unwrap();
        let schema = registry.definitions(["build"]).unwrap();
        assert!(schema.contains_key("branch"));
        assert!(schema.contains_key("rev"));
    }

    #[test]
    fn test_context_definitions_empty() {
        let registry = ContextRegistry::builtin().unwrap();
        let schema = registry.definitions(Vec::<String>::new()).unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_context_definitions_unknown() {
        let registry = ContextRegistry::builtin().unwrap();
        let err = registry.definitions(["path", "nope"]).unwrap_err();
        assert!(matches!(err, AdrError::UnknownContext(ref n) if n == "nope"));
    }

    #[test]
    fn test_context_definitions_last_write_wins() {
        let mut registry = ContextRegistry::default();
        let mut first = ArgumentSchema::new();
        first.insert(
            "limit".into(),
            ArgumentDefinition::form(&["--limit"], ArgumentOptions::default()),
        );
        let mut second = ArgumentSchema::new();
        second.insert(
            "limit".into(),
            ArgumentDefinition::form(
                &["--limit"],
                ArgumentOptions {
                    arg_type: ArgType::Int,
                    ..Default::default()
                },
            ),
        );
        registry.insert("a", first);
        registry.insert("b", second.clone());

        let schema = registry.definitions(["a", "b"]).unwrap();
        assert_eq!(schema["limit"], second["limit"]);
    }
}
