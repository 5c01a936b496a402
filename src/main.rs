//! adr CLI: run ActiveData recipes from the command line.

use adr::cli::{apply_overrides, hoist_global_args, Commands, GlobalArgs};
use adr::core::config::resolve_config;
use adr::error::AdrError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "adr",
    version,
    about = "ActiveData recipes: named queries with a command line derived from their contexts"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "adr=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let mut globals = cli.global;
    let command = hoist_global_args(cli.command, &mut globals);
    let config = match resolve_config(globals.config.as_deref()) {
        Ok(config) => apply_overrides(config, &globals),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(config.verbose);

    match adr::cli::dispatch(command, &config) {
        Ok(()) => {}
        Err(AdrError::Usage(e)) => e.exit(),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
