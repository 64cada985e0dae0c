//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use output::OutputFormat;

/// evermark - migrate Evernote notes with their note links intact
#[derive(Parser, Debug)]
#[command(name = "evermark", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ~/.config/evermark/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file (overrides config file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy notes to a destination store, rewriting note links to titles
    Migrate(MigrateArgs),

    /// List link audit records from a migrated store
    Links(LinksArgs),

    /// Export the note link graph as D3 JSON and GraphML
    Graph(GraphArgs),
}

/// Arguments for the `migrate` command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Source note store (SQLite)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Destination note store (SQLite), created if missing
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Only migrate notes from this notebook
    #[arg(short, long)]
    pub notebook: Option<String>,

    /// Clear notes at or above this many bytes instead of migrating them
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Output format for the summary
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `links` command
#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// Migrated note store (SQLite)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Only show links whose target was not found
    #[arg(long)]
    pub failed: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Migrated note store (SQLite)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output JSON file
    #[arg(short, long, default_value = "d3.json")]
    pub out: PathBuf,

    /// Keep every note in the D3 output instead of only the largest connected component
    #[arg(long)]
    pub all: bool,

    /// Output format for the summary
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}
