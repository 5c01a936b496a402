//! CLI subcommands: list, query, and recipe dispatch.

use crate::core::config::Config;
use crate::core::context::ContextRegistry;
use crate::core::formatter::FormatterRegistry;
use crate::core::runner::{self, Runtime};
use crate::error::{AdrError, Result};
use crate::query::activedata::ActiveDataBackend;
use crate::query::{QueryBackend, QueryStore};
use crate::recipes::RecipeRegistry;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Flags accepted anywhere on the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Path to config.toml (default: $ADR_CONFIG_PATH, then ~/.config/adr/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output formatter (json, table, markdown, tab)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// ActiveData query endpoint
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// List recipes, queries, contexts, and formatters
    List,

    /// Run a single query and print its raw result
    #[command(disable_help_flag = true)]
    Query {
        /// Query name
        name: String,

        /// Arguments for the query's contexts
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a recipe: adr <recipe> [ARGS...] (global flags may follow the recipe name)
    #[command(external_subcommand)]
    Recipe(Vec<String>),
}

/// Fold command-line flags over the loaded config.
pub fn apply_overrides(mut config: Config, args: &GlobalArgs) -> Config {
    if let Some(ref fmt) = args.format {
        config.fmt = fmt.clone();
    }
    if let Some(ref url) = args.url {
        config.url = url.clone();
    }
    config.verbose |= args.verbose;
    config
}

/// Move global flags given after a recipe or query name out of its raw
/// arguments and into `globals`. Everything after `--` is left alone.
pub fn hoist_global_args(cmd: Commands, globals: &mut GlobalArgs) -> Commands {
    match cmd {
        Commands::Query { name, args } => Commands::Query {
            name,
            args: take_global_args(args, globals),
        },
        Commands::Recipe(args) => Commands::Recipe(take_global_args(args, globals)),
        other => other,
    }
}

fn take_global_args(args: Vec<String>, globals: &mut GlobalArgs) -> Vec<String> {
    let mut rest = Vec::with_capacity(args.len());
    let mut tokens = args.into_iter();

    while let Some(token) = tokens.next() {
        if token == "--" {
            rest.push(token);
            rest.extend(tokens.by_ref());
            break;
        }
        if token == "-v" || token == "--verbose" {
            globals.verbose = true;
            continue;
        }

        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
            _ => (token.as_str(), None),
        };
        if !matches!(flag, "-f" | "--format" | "--url" | "--config") {
            rest.push(token);
            continue;
        }
        let flag = flag.to_string();
        let Some(value) = inline.or_else(|| tokens.next()) else {
            // Missing value; leave it for the recipe parser to report.
            rest.push(token);
            break;
        };
        match flag.as_str() {
            "--url" => globals.url = Some(value),
            "--config" => globals.config = Some(PathBuf::from(value)),
            _ => globals.format = Some(value),
        }
    }
    rest
}

/// The registries one invocation looks names up in.
pub struct Registries {
    pub recipes: RecipeRegistry,
    pub contexts: ContextRegistry,
    pub queries: QueryStore,
    pub formatters: FormatterRegistry,
}

impl Registries {
    /// Builtins plus any queries under `config.queries_dir`.
    pub fn load(config: &Config) -> Result<Self> {
        let mut queries = QueryStore::builtin()?;
        if let Some(ref dir) = config.queries_dir {
            let count = queries.load_dir(dir)?;
            debug!(dir = %dir.display(), count, "loaded extra queries");
        }
        Ok(Self {
            recipes: RecipeRegistry::builtin(),
            contexts: ContextRegistry::builtin()?,
            queries,
            formatters: FormatterRegistry::builtin(),
        })
    }

    pub fn runtime<'a>(&'a self, backend: &'a dyn QueryBackend) -> Runtime<'a> {
        Runtime {
            recipes: &self.recipes,
            contexts: &self.contexts,
            queries: &self.queries,
            formatters: &self.formatters,
            backend,
        }
    }
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, config: &Config) -> Result<()> {
    let registries = Registries::load(config)?;
    match cmd {
        Commands::List => {
            println!("{}", list_output(&registries));
            Ok(())
        }
        Commands::Query { name, args } => cmd_query(&registries, &name, &args, config),
        Commands::Recipe(args) => cmd_recipe(&registries, &args, config),
    }
}

fn cmd_query(registries: &Registries, name: &str, args: &[String], config: &Config) -> Result<()> {
    let backend = ActiveDataBackend::new(&registries.queries, config)?;
    let output = runner::run_query(&registries.runtime(&backend), name, args, config)?;
    println!("{}", output);
    Ok(())
}

fn cmd_recipe(registries: &Registries, args: &[String], config: &Config) -> Result<()> {
    let (name, rest) = args
        .split_first()
        .ok_or_else(|| AdrError::Configuration("no recipe given".to_string()))?;
    let backend = ActiveDataBackend::new(&registries.queries, config)?;
    let output = runner::run_recipe(&registries.runtime(&backend), name, rest, config)?;
    println!("{}", output);
    Ok(())
}

fn list_output(registries: &Registries) -> String {
    let mut out = vec!["Recipes:".to_string()];
    for recipe in registries.recipes.iter() {
        if recipe.description().is_empty() {
            out.push(format!("  {}", recipe.name()));
        } else {
            out.push(format!("  {:<20} {}", recipe.name(), recipe.description()));
        }
    }

    out.push(String::new());
    out.push("Queries:".to_string());
    for name in registries.queries.names() {
        out.push(format!("  {}", name));
    }

    out.push(String::new());
    out.push(format!(
        "Contexts:   {}",
        registries.contexts.names().collect::<Vec<_>>().join(", ")
    ));
    out.push(format!(
        "Formatters: {}",
        registries.formatters.names().collect::<Vec<_>>().join(", ")
    ));
    out.join("\n")
}
