//! evermark - migrate Evernote notes and rewrite note links to titles

pub mod cli;
pub mod domain;
pub mod graph;
pub mod index;
pub mod links;
pub mod logging;
pub mod markup;
pub mod migrate;
pub mod store;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_graph, handle_links, handle_migrate},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let anchor: Option<PathBuf> = match &cli.command {
        Command::Migrate(args) => config.destination(args.dest.as_ref()),
        Command::Links(args) => config.destination(args.db.as_ref()),
        Command::Graph(args) => config.destination(args.db.as_ref()),
    };
    let log_file = config.log_file(cli.log_file.as_ref(), anchor.as_deref());
    let level = config.log_level(cli.verbose);
    logging::init_logging(&level, &log_file)
        .with_context(|| format!("failed to start logging to {}", log_file.display()))?;

    let verbose = cli.verbose > 0;

    let result = match &cli.command {
        Command::Migrate(args) => handle_migrate(args, &config, verbose),
        Command::Links(args) => handle_links(args, &config),
        Command::Graph(args) => handle_graph(args, &config),
    };
    if let Err(err) = &result {
        log::error!("{:#}", err);
    }
    // The logger lives in a static that is never dropped.
    log::logger().flush();
    result
}
