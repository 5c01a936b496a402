//! Runtime command-line parser built from an argument schema.
//!
//! The schema is validated before anything is handed to clap:
//! - form definitions must be `[flags, options, ...]`
//! - dests, long flags, and short flags must be unique
//! - `-h`/`--help` are reserved
//! - defaults must parse as the declared type
//!
//! Every problem is reported at once as a single configuration error.

use super::types::{
    ArgAction, ArgType, ArgumentDefinition, ArgumentOptions, ArgumentSchema, FormPart, Params,
};
use crate::error::{AdrError, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser, ValueParser};
use clap::{Arg, ArgMatches, Command};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;

/// One schema entry after shape validation.
#[derive(Debug, Clone)]
struct ArgSpec {
    dest: String,
    flags: Vec<String>,
    positional: bool,
    options: ArgumentOptions,
}

enum Flag<'a> {
    Long(&'a str),
    Short(char),
}

/// Parser for a single recipe (or query) invocation.
#[derive(Debug, Clone)]
pub struct RecipeParser {
    command: Command,
    specs: Vec<ArgSpec>,
}

impl RecipeParser {
    /// Build a parser over `schema`. `name` appears in usage and help output.
    pub fn new(name: &str, schema: &ArgumentSchema) -> Result<Self> {
        let specs = collect_specs(schema)?;
        let errors = validate_specs(&specs);
        if !errors.is_empty() {
            return Err(AdrError::Configuration(errors.join("; ")));
        }

        let mut command = Command::new(name.to_string())
            .bin_name(format!("adr {}", name))
            .no_binary_name(true);
        let mut index = 1;
        for spec in &specs {
            let mut arg = build_arg(spec);
            if spec.positional {
                arg = arg.index(index);
                index += 1;
            }
            command = command.arg(arg);
        }

        Ok(Self { command, specs })
    }

    /// Parse raw tokens (without a program name).
    ///
    /// Usage problems and `--help` come back as [`AdrError::Usage`]; the
    /// wrapped clap error knows how to print itself and which exit code to use.
    pub fn parse<I, T>(&self, tokens: I) -> Result<Params>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(tokens)?;
        Ok(self
            .specs
            .iter()
            .map(|spec| (spec.dest.clone(), extract(&matches, spec)))
            .collect())
    }

    /// Names of the values `parse` produces, in schema order.
    pub fn dests(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.dest.as_str())
    }
}

/// Turn definitions into specs, collecting every malformed form.
fn collect_specs(schema: &ArgumentSchema) -> Result<Vec<ArgSpec>> {
    let mut specs = Vec::new();
    let mut malformed = Vec::new();

    for (name, definition) in schema {
        match definition {
            ArgumentDefinition::Options(options) => {
                let dest = options.dest.clone().unwrap_or_else(|| name.clone());
                specs.push(ArgSpec {
                    dest,
                    flags: vec![name.clone()],
                    positional: !name.starts_with('-'),
                    options: options.clone(),
                });
            }
            ArgumentDefinition::Form(parts) => match parts.as_slice() {
                [FormPart::Flags(flags), FormPart::Options(options), ..] if !flags.is_empty() => {
                    let mut options = options.clone();
                    options.dest = Some(name.clone());
                    specs.push(ArgSpec {
                        dest: name.clone(),
                        flags: flags.clone(),
                        positional: !flags.iter().any(|f| f.starts_with('-')),
                        options,
                    });
                }
                [FormPart::Flags(flags), FormPart::Invalid(value), ..]
                    if !flags.is_empty() && value.is_mapping() =>
                {
                    malformed.push(options_error(name, value));
                }
                _ => malformed.push(format!("definition of {} should be a two-element form", name)),
            },
            ArgumentDefinition::Invalid(value) if value.is_mapping() => {
                malformed.push(options_error(name, value));
            }
            ArgumentDefinition::Invalid(_) => {
                malformed.push(format!("definition of {} should be a two-element form", name))
            }
        }
    }

    if malformed.is_empty() {
        Ok(specs)
    } else {
        Err(AdrError::Configuration(malformed.join("; ")))
    }
}

/// Why an options mapping failed to deserialize, e.g. an unknown key.
fn options_error(name: &str, value: &serde_yaml_ng::Value) -> String {
    match serde_yaml_ng::from_value::<ArgumentOptions>(value.clone()) {
        Err(e) => format!("definition of {}: {}", name, e),
        Ok(_) => format!("definition of {} should be a two-element form", name),
    }
}

fn validate_specs(specs: &[ArgSpec]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut dests = HashSet::new();
    let mut flag_owners: HashMap<String, &str> = HashMap::new();
    let mut optional_positional: Option<&str> = None;

    for spec in specs {
        let dest = spec.dest.as_str();
        if !dests.insert(dest) {
            errors.push(format!("argument {} is defined more than once", dest));
        }
        if dest == "help" {
            errors.push("argument name help is reserved".to_string());
        }

        if spec.positional {
            if spec.flags.len() != 1 {
                errors.push(format!("positional argument {} must have exactly one name", dest));
            }
            if spec.options.action != ArgAction::Store {
                errors.push(format!(
                    "positional argument {} only supports the store action",
                    dest
                ));
            }
            if positional_required(&spec.options) {
                if let Some(previous) = optional_positional {
                    errors.push(format!(
                        "required positional argument {} follows optional positional argument {}",
                        dest, previous
                    ));
                }
            } else {
                optional_positional.get_or_insert(dest);
            }
        } else {
            for flag in &spec.flags {
                match parse_flag(flag) {
                    Some(Flag::Long("help")) | Some(Flag::Short('h')) => {
                        errors.push(format!("flag {} of {} is reserved for help", flag, dest));
                    }
                    Some(_) => {
                        if let Some(owner) = flag_owners.insert(flag.clone(), dest) {
                            errors.push(format!(
                                "flag {} is defined by both {} and {}",
                                flag, owner, dest
                            ));
                        }
                    }
                    None => errors.push(format!("invalid flag '{}' for argument {}", flag, dest)),
                }
            }
        }

        if let Err(e) = default_strings(&spec.options) {
            errors.push(format!("default of {}: {}", dest, e));
        }
    }

    errors
}

fn parse_flag(flag: &str) -> Option<Flag<'_>> {
    if let Some(long) = flag.strip_prefix("--") {
        let valid = !long.is_empty()
            && !long.starts_with('-')
            && !long.contains(|c: char| c == '=' || c.is_whitespace());
        return valid.then_some(Flag::Long(long));
    }
    let short = flag.strip_prefix('-')?;
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' && !c.is_whitespace() => Some(Flag::Short(c)),
        _ => None,
    }
}

/// Positionals are required unless they carry a default.
fn positional_required(options: &ArgumentOptions) -> bool {
    options.required || options.default.as_ref().is_none_or(Value::is_null)
}

/// Render a default as the strings clap expects, checking it against the
/// declared type and choices.
fn default_strings(options: &ArgumentOptions) -> std::result::Result<Vec<String>, String> {
    let default = match &options.default {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(d) => d,
    };

    let items: Vec<&Value> = match (options.action, default) {
        (ArgAction::StoreTrue | ArgAction::StoreFalse, Value::Bool(b)) => {
            return Ok(vec![b.to_string()])
        }
        (ArgAction::StoreTrue | ArgAction::StoreFalse, other) => {
            return Err(format!("flag default {} is not true or false", other))
        }
        (ArgAction::Append, Value::Array(items)) => items.iter().collect(),
        (_, Value::Array(_)) => return Err("only append arguments take a list".to_string()),
        (_, scalar) => vec![scalar],
    };

    items
        .into_iter()
        .map(|item| {
            let s = match item {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => return Err(format!("unsupported value {}", other)),
            };
            let valid = match options.arg_type {
                ArgType::Str => true,
                ArgType::Int => s.parse::<i64>().is_ok(),
                ArgType::Float => s.parse::<f64>().is_ok(),
                ArgType::Bool => s.parse::<bool>().is_ok(),
            };
            if !valid {
                return Err(format!("'{}' is not a valid {}", s, options.arg_type));
            }
            if !options.choices.is_empty() && !options.choices.contains(&s) {
                return Err(format!("'{}' is not one of: {}", s, options.choices.join(", ")));
            }
            Ok(s)
        })
        .collect()
}

fn value_parser(options: &ArgumentOptions) -> ValueParser {
    if options.choices.is_empty() {
        return match options.arg_type {
            ArgType::Str => ValueParser::string(),
            ArgType::Int => clap::value_parser!(i64).into(),
            ArgType::Float => clap::value_parser!(f64).into(),
            ArgType::Bool => ValueParser::bool(),
        };
    }
    let choices = PossibleValuesParser::new(options.choices.clone());
    match options.arg_type {
        ArgType::Str => choices.into(),
        ArgType::Int => choices.try_map(|s| s.parse::<i64>()).into(),
        ArgType::Float => choices.try_map(|s| s.parse::<f64>()).into(),
        ArgType::Bool => choices.try_map(|s| s.parse::<bool>()).into(),
    }
}

fn build_arg(spec: &ArgSpec) -> Arg {
    let options = &spec.options;
    let mut arg = Arg::new(spec.dest.clone());

    if spec.positional {
        arg = arg.required(positional_required(options));
    } else {
        let mut longs = Vec::new();
        let mut shorts = Vec::new();
        for flag in &spec.flags {
            match parse_flag(flag) {
                Some(Flag::Long(l)) => longs.push(l.to_string()),
                Some(Flag::Short(c)) => shorts.push(c),
                None => {}
            }
        }
        let mut longs = longs.into_iter();
        if let Some(first) = longs.next() {
            arg = arg.long(first);
        }
        for alias in longs {
            arg = arg.visible_alias(alias);
        }
        let mut shorts = shorts.into_iter();
        if let Some(first) = shorts.next() {
            arg = arg.short(first);
        }
        for alias in shorts {
            arg = arg.visible_short_alias(alias);
        }
        arg = arg.required(options.required);
    }

    if let Some(ref metavar) = options.metavar {
        arg = arg.value_name(metavar.clone());
    }
    if let Some(ref help) = options.help {
        arg = arg.help(help.clone());
    }

    arg = match options.action {
        ArgAction::StoreTrue => arg.action(clap::ArgAction::SetTrue),
        ArgAction::StoreFalse => arg.action(clap::ArgAction::SetFalse),
        ArgAction::Store => arg
            .action(clap::ArgAction::Set)
            .value_parser(value_parser(options)),
        ArgAction::Append => arg
            .action(clap::ArgAction::Append)
            .value_parser(value_parser(options)),
    };

    // A default on a required argument can never apply.
    if !options.required {
        if let Ok(defaults) = default_strings(options) {
            if !defaults.is_empty() {
                arg = arg.default_values(defaults);
            }
        }
    }

    arg
}

fn one<T>(matches: &ArgMatches, id: &str) -> Value
where
    T: Clone + Send + Sync + Into<Value> + 'static,
{
    matches
        .get_one::<T>(id)
        .cloned()
        .map(Into::into)
        .unwrap_or(Value::Null)
}

fn many<T>(matches: &ArgMatches, id: &str) -> Value
where
    T: Clone + Send + Sync + Into<Value> + 'static,
{
    matches
        .get_many::<T>(id)
        .map(|values| Value::Array(values.cloned().map(Into::into).collect()))
        .unwrap_or(Value::Null)
}

fn extract(matches: &ArgMatches, spec: &ArgSpec) -> Value {
    let id = spec.dest.as_str();
    match (spec.options.action, spec.options.arg_type) {
        (ArgAction::StoreTrue | ArgAction::StoreFalse, _) => Value::Bool(matches.get_flag(id)),
        (ArgAction::Store, ArgType::Str) => one::<String>(matches, id),
        (ArgAction::Store, ArgType::Int) => one::<i64>(matches, id),
        (ArgAction::Store, ArgType::Float) => one::<f64>(matches, id),
        (ArgAction::Store, ArgType::Bool) => one::<bool>(matches, id),
        (ArgAction::Append, ArgType::Str) => many::<String>(matches, id),
        (ArgAction::Append, ArgType::Int) => many::<i64>(matches, id),
        (ArgAction::Append, ArgType::Float) => many::<f64>(matches, id),
        (ArgAction::Append, ArgType::Bool) => many::<bool>(matches, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use serde_json::json;

    fn schema(yaml: &str) -> ArgumentSchema {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn usage_kind(err: AdrError) -> ErrorKind {
        match err {
            AdrError::Usage(e) => e.kind(),
            other => panic!("expected usage error, got {:?}", other),
        }
    }

    const COVERAGE_SCHEMA: &str = r#"
path:
  - ["--path"]
  - type: str
    required: true
    help: "Source path"
rev:
  - ["-r", "--rev", "--revision"]
  - type: str
    required: true
limit:
  - ["-l", "--limit"]
  - type: int
    default: 10
"#;

    #[test]
    fn test_parser_form_flags() {
        let parser = RecipeParser::new("code_coverage", &schema(COVERAGE_SCHEMA)).unwrap();
        let parsed = parser
            .parse(["--path", "dom/", "-r", "abcdef123456"])
            .unwrap();
        assert_eq!(parsed["path"], json!("dom/"));
        assert_eq!(parsed["rev"], json!("abcdef123456"));
        assert_eq!(parsed["limit"], json!(10));
    }

    #[test]
    fn test_parser_long_alias() {
        let parser = RecipeParser::new("code_coverage", &schema(COVERAGE_SCHEMA)).unwrap();
        let parsed = parser
            .parse(["--path", "a", "--revision", "abc", "--limit", "3"])
            .unwrap();
        assert_eq!(parsed["rev"], json!("abc"));
        assert_eq!(parsed["limit"], json!(3));
    }

    #[test]
    fn test_parser_result_order_follows_schema() {
        let parser = RecipeParser::new("x", &schema(COVERAGE_SCHEMA)).unwrap();
        assert_eq!(parser.dests().collect::<Vec<_>>(), vec!["path", "rev", "limit"]);
        let parsed = parser.parse(["-r", "r", "--path", "p"]).unwrap();
        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["path", "rev", "limit"]);
    }

    #[test]
    fn test_parser_flat_positional() {
        let parser = RecipeParser::new("x", &schema("query:\n  help: \"Query name\"\n")).unwrap();
        let parsed = parser.parse(["tests_by_file"]).unwrap();
        assert_eq!(parsed["query"], json!("tests_by_file"));
    }

    #[test]
    fn test_parser_flat_flag() {
        let parser = RecipeParser::new("x", &schema("--debug:\n  action: store_true\n")).unwrap();
        assert_eq!(parser.parse(Vec::<String>::new()).unwrap()["--debug"], json!(false));
        assert_eq!(parser.parse(["--debug"]).unwrap()["--debug"], json!(true));
    }

    #[test]
    fn test_parser_optional_absent_is_null() {
        let parser = RecipeParser::new(
            "x",
            &schema("platform:\n  - [\"--platform\"]\n  - type: str\n"),
        )
        .unwrap();
        assert_eq!(parser.parse(Vec::<String>::new()).unwrap()["platform"], Value::Null);
    }

    #[test]
    fn test_parser_store_false() {
        let parser = RecipeParser::new(
            "x",
            &schema("cache:\n  - [\"--no-cache\"]\n  - action: store_false\n"),
        )
        .unwrap();
        assert_eq!(parser.parse(Vec::<String>::new()).unwrap()["cache"], json!(true));
        assert_eq!(parser.parse(["--no-cache"]).unwrap()["cache"], json!(false));
    }

    #[test]
    fn test_parser_flag_default_honoured() {
        let yaml = r#"
verbose:
  - ["--verbose"]
  - action: store_true
    default: true
cache:
  - ["--no-cache"]
  - action: store_false
    default: false
"#;
        let parser = RecipeParser::new("x", &schema(yaml)).unwrap();
        let parsed = parser.parse(Vec::<String>::new()).unwrap();
        assert_eq!(parsed["verbose"], json!(true));
        assert_eq!(parsed["cache"], json!(false));
        let parsed = parser.parse(["--verbose", "--no-cache"]).unwrap();
        assert_eq!(parsed["verbose"], json!(true));
        assert_eq!(parsed["cache"], json!(false));
    }

    #[test]
    fn test_parser_flag_default_must_be_bool() {
        let err = RecipeParser::new(
            "x",
            &schema("quiet:\n  - [\"-q\"]\n  - action: store_true\n    default: often\n"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("default of quiet: flag default \"often\" is not true or false"));
    }

    #[test]
    fn test_parser_append() {
        let parser = RecipeParser::new(
            "x",
            &schema("suite:\n  - [\"-s\", \"--suite\"]\n  - action: append\n"),
        )
        .unwrap();
        let parsed = parser.parse(["-s", "mochitest", "--suite", "xpcshell"]).unwrap();
        assert_eq!(parsed["suite"], json!(["mochitest", "xpcshell"]));
        assert_eq!(parser.parse(Vec::<String>::new()).unwrap()["suite"], Value::Null);
    }

    #[test]
    fn test_parser_append_default_list() {
        let parser = RecipeParser::new(
            "x",
            &schema("n:\n  - [\"-n\"]\n  - type: int\n    action: append\n    default: [1, 2]\n"),
        )
        .unwrap();
        assert_eq!(parser.parse(Vec::<String>::new()).unwrap()["n"], json!([1, 2]));
        assert_eq!(parser.parse(["-n", "7"]).unwrap()["n"], json!([7]));
    }

    #[test]
    fn test_parser_float_and_bool_types() {
        let parser = RecipeParser::new(
            "x",
            &schema(
                "ratio:\n  - [\"--ratio\"]\n  - type: float\nstrict:\n  - [\"--strict\"]\n  - type: bool\n",
            ),
        )
        .unwrap();
        let parsed = parser.parse(["--ratio", "0.5", "--strict", "true"]).unwrap();
        assert_eq!(parsed["ratio"], json!(0.5));
        assert_eq!(parsed["strict"], json!(true));
    }

    #[test]
    fn test_parser_choices() {
        let parser = RecipeParser::new(
            "x",
            &schema("platform:\n  - [\"--platform\"]\n  - choices: [linux64, win64]\n"),
        )
        .unwrap();
        assert_eq!(parser.parse(["--platform", "win64"]).unwrap()["platform"], json!("win64"));
        let err = parser.parse(["--platform", "macosx"]).unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_parser_int_choices() {
        let parser = RecipeParser::new(
            "x",
            &schema("level:\n  - [\"--level\"]\n  - type: int\n    choices: [\"1\", \"3\"]\n"),
        )
        .unwrap();
        assert_eq!(parser.parse(["--level", "3"]).unwrap()["level"], json!(3));
    }

    #[test]
    fn test_parser_missing_required() {
        let parser = RecipeParser::new("x", &schema(COVERAGE_SCHEMA)).unwrap();
        let err = parser.parse(["--path", "dom/"]).unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_parser_invalid_int() {
        let parser = RecipeParser::new("x", &schema(COVERAGE_SCHEMA)).unwrap();
        let err = parser
            .parse(["--path", "a", "-r", "b", "--limit", "many"])
            .unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_parser_unknown_flag() {
        let parser = RecipeParser::new("x", &schema(COVERAGE_SCHEMA)).unwrap();
        let err = parser
            .parse(["--path", "a", "-r", "b", "--bogus"])
            .unwrap_err();
        assert!(err.is_usage());
        assert_eq!(usage_kind(err), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_parser_help() {
        let parser = RecipeParser::new("code_coverage", &schema(COVERAGE_SCHEMA)).unwrap();
        match parser.parse(["--help"]).unwrap_err() {
            AdrError::Usage(e) => {
                assert_eq!(e.kind(), ErrorKind::DisplayHelp);
                assert_eq!(e.exit_code(), 0);
                let text = e.render().to_string();
                assert!(text.contains("--path"));
                assert!(text.contains("Source path"));
            }
            other => panic!("expected help, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_usage_errors_exit_nonzero() {
        let parser = RecipeParser::new("x", &schema(COVERAGE_SCHEMA)).unwrap();
        match parser.parse(["--bogus"]).unwrap_err() {
            AdrError::Usage(e) => assert_ne!(e.exit_code(), 0),
            other => panic!("expected usage error, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_short_form_is_configuration_error() {
        let err = RecipeParser::new("x", &schema("rev:\n  - [\"--rev\"]\n")).unwrap_err();
        match err {
            AdrError::Configuration(msg) => {
                assert_eq!(msg, "definition of rev should be a two-element form")
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_reports_every_malformed_definition() {
        let yaml = r#"
rev:
  - ["--rev"]
path:
  - ["--path"]
  - type: str
branch: []
"#;
        let err = RecipeParser::new("x", &schema(yaml)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("definition of rev should be a two-element form"));
        assert!(msg.contains("definition of branch should be a two-element form"));
        assert!(!msg.contains("definition of path"));
    }

    #[test]
    fn test_parser_unknown_option_key_is_configuration_error() {
        let yaml = r#"
rev:
  - ["--rev"]
  - type: str
    requird: true
"#;
        let err = RecipeParser::new("x", &schema(yaml)).unwrap_err();
        match err {
            AdrError::Configuration(msg) => {
                assert!(msg.starts_with("definition of rev:"), "{}", msg);
                assert!(msg.contains("unknown field `requird`"), "{}", msg);
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_unsupported_option_key_rejected() {
        let yaml = r#"
suite:
  - ["--suite"]
  - nargs: "+"
limit:
  type: int
  defualt: 3
"#;
        let msg = RecipeParser::new("x", &schema(yaml)).unwrap_err().to_string();
        assert!(msg.contains("definition of suite: unknown field `nargs`"), "{}", msg);
        assert!(msg.contains("definition of limit: unknown field `defualt`"), "{}", msg);
    }

    #[test]
    fn test_parser_wrong_part_shapes() {
        let yaml = r#"
rev:
  - type: str
  - ["--rev"]
"#;
        let err = RecipeParser::new("x", &schema(yaml)).unwrap_err();
        assert!(err.to_string().contains("definition of rev"));
    }

    #[test]
    fn test_parser_form_dest_forced_to_name() {
        let yaml = r#"
revision:
  - ["--rev"]
  - dest: something_else
"#;
        let parser = RecipeParser::new("x", &schema(yaml)).unwrap();
        let parsed = parser.parse(["--rev", "abc"]).unwrap();
        assert_eq!(parsed["revision"], json!("abc"));
        assert!(!parsed.contains_key("something_else"));
    }

    #[test]
    fn test_parser_duplicate_flag() {
        let yaml = r#"
rev:
  - ["-r", "--rev"]
  - {}
revision:
  - ["--revision", "-r"]
  - {}
"#;
        let err = RecipeParser::new("x", &schema(yaml)).unwrap_err();
        assert!(err.to_string().contains("flag -r is defined by both rev and revision"));
    }

    #[test]
    fn test_parser_reserved_help_flag() {
        let err = RecipeParser::new("x", &schema("host:\n  - [\"-h\", \"--host\"]\n  - {}\n"))
            .unwrap_err();
        assert!(err.to_string().contains("reserved for help"));
    }

    #[test]
    fn test_parser_invalid_flag_spelling() {
        let err = RecipeParser::new("x", &schema("rev:\n  - [\"-rev\", \"--rev\"]\n  - {}\n"))
            .unwrap_err();
        assert!(err.to_string().contains("invalid flag '-rev'"));
    }

    #[test]
    fn test_parser_bad_default() {
        let err = RecipeParser::new(
            "x",
            &schema("limit:\n  - [\"--limit\"]\n  - type: int\n    default: lots\n"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("'lots' is not a valid int"));
    }

    #[test]
    fn test_parser_positional_after_optional_positional() {
        let yaml = r#"
first:
  default: a
second:
  help: "required"
"#;
        let err = RecipeParser::new("x", &schema(yaml)).unwrap_err();
        assert!(err.to_string().contains("follows optional positional"));
    }

    #[test]
    fn test_parser_empty_schema() {
        let parser = RecipeParser::new("x", &ArgumentSchema::new()).unwrap();
        assert!(parser.parse(Vec::<String>::new()).unwrap().is_empty());
        let err = parser.parse(["--anything"]).unwrap_err();
        assert_eq!(usage_kind(err), ErrorKind::UnknownArgument);
    }
}
