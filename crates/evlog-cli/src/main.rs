use std::io::stdout;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use evlog_cli::commands::{entry, events, export, format, table};
use evlog_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Format(args) => format::run(&mut out, args, &config)?,
        Commands::Csv(args) => export::run(&mut out, args, &config)?,
        Commands::Table(args) => table::run(&mut out, args, &config)?,
        Commands::Events(args) => events::run(&mut out, args, &config)?,
        Commands::Entry(args) => entry::run(&mut out, args, &config)?,
    }

    Ok(())
}
