//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.no_color);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    // Create context for commands
    let ctx = commands::Context {
        api_key: cli.api_key.or_else(|| config.api_key.clone()),
        api_url: cli.api_url,
        config,
        config_path,
    };

    // Dispatch to appropriate command
    match cli.command {
        Some(Commands::Scan(args)) => commands::scan::execute(ctx, args).await,
        Some(Commands::Check(args)) => commands::check::execute(ctx, args).await,
        Some(Commands::Resolve(args)) => commands::resolve::execute(ctx, args).await,
        Some(Commands::Report(args)) => commands::report::execute(&ctx, &args),
        Some(Commands::Config(args)) => commands::config::execute(ctx, args),
        None => commands::scan::execute(ctx, args::ScanArgs::default()).await,
    }
}
