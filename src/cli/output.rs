//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single audit record in `links` output.
#[derive(Debug, Serialize)]
pub struct LinkListing {
    pub from_guid: String,
    pub from_title: String,
    pub to_guid: Option<String>,
    pub text: Option<String>,
    pub success: bool,
}

/// Summary of a graph export.
#[derive(Debug, Serialize)]
pub struct GraphSummary {
    /// D3 JSON file
    pub path: String,
    pub nodes: usize,
    pub links: usize,
    /// GraphML of every note
    pub graphml: String,
    /// GraphML of the largest connected component
    pub graphml_main: String,
}
