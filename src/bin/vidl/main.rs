//! vidl CLI - generate build modules for versioned interfaces

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use versioned_idl::util::diagnostic::emit;
use versioned_idl::ConfigError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ConfigError>() {
            Some(config_error) => emit(&config_error.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("vidl=debug,versioned_idl=debug")
    } else {
        EnvFilter::new("vidl=info,versioned_idl=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Versions(args) => commands::versions::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args),
    }
}
