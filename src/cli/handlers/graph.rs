//! Handler for the `graph` command.

use anyhow::{Context, Result};
use std::path::Path;

use super::existing_store;
use crate::cli::GraphArgs;
use crate::cli::config::Config;
use crate::cli::output::{GraphSummary, Output, OutputFormat};
use crate::graph::LinkGraph;
use crate::store::SqliteNoteStore;

/// GraphML of the whole graph, written next to the D3 file.
const GRAPHML_FILE: &str = "notes.graphml";
/// GraphML of the largest connected component.
const GRAPHML_MAIN_FILE: &str = "notes_main.graphml";

/// Handle the `graph` command.
pub fn handle_graph(args: &GraphArgs, config: &Config) -> Result<()> {
    let db_path = existing_store(config.destination(args.db.as_ref()), "--db")?;
    let store = SqliteNoteStore::open(&db_path)
        .with_context(|| format!("failed to open store at {}", db_path.display()))?;

    let notes = store.all_notes()?;
    let audit = store.link_records()?;

    let graph = LinkGraph::build(&notes, &audit);
    let d3 = graph.to_d3(&notes, &audit, !args.all);
    d3.write_json(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    let dir = args.out.parent().unwrap_or_else(|| Path::new(""));
    let full_path = dir.join(GRAPHML_FILE);
    let main_path = dir.join(GRAPHML_MAIN_FILE);
    graph
        .write_graphml(&full_path, false)
        .with_context(|| format!("failed to write {}", full_path.display()))?;
    graph
        .write_graphml(&main_path, true)
        .with_context(|| format!("failed to write {}", main_path.display()))?;

    let summary = GraphSummary {
        path: args.out.display().to_string(),
        nodes: d3.nodes.len(),
        links: d3.links.len(),
        graphml: full_path.display().to_string(),
        graphml_main: main_path.display().to_string(),
    };

    match args.format {
        OutputFormat::Human => {
            println!(
                "Wrote {} nodes and {} links to {}",
                summary.nodes, summary.links, summary.path
            );
            println!("Wrote {} and {}", summary.graphml, summary.graphml_main);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(summary))?);
        }
    }

    Ok(())
}
