//! dircheck CLI - consistency checks for biobank directory snapshots.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            file,
            output,
            format,
            config,
            disable,
            min_severity,
            strict,
        } => commands::check::run(commands::check::CheckArgs {
            file,
            output,
            format,
            config,
            disable,
            min_severity: min_severity.map(Into::into),
            strict,
            verbose: cli.verbose,
        }),

        Commands::ListChecks => commands::list_checks::run(cli.verbose),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "dircheck=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
