//! Handler for the `links` command.

use anyhow::{Context, Result};

use super::{existing_store, truncate_str};
use crate::cli::LinksArgs;
use crate::cli::config::Config;
use crate::cli::output::{LinkListing, Output, OutputFormat};
use crate::store::SqliteNoteStore;

/// Handle the `links` command.
pub fn handle_links(args: &LinksArgs, config: &Config) -> Result<()> {
    let db_path = existing_store(config.destination(args.db.as_ref()), "--db")?;
    let store = SqliteNoteStore::open(&db_path)
        .with_context(|| format!("failed to open store at {}", db_path.display()))?;

    let records: Vec<_> = store
        .link_records()?
        .into_iter()
        .filter(|entry| !args.failed || !entry.resolved)
        .collect();

    match args.format {
        OutputFormat::Human => {
            if records.is_empty() {
                println!("No links found");
                return Ok(());
            }
            for entry in &records {
                let status = if entry.resolved { "ok" } else { "missing" };
                let target = entry
                    .target_note_id
                    .as_ref()
                    .map(|g| g.as_str())
                    .unwrap_or("-");
                println!(
                    "{:<8} {:<30} -> {:<30} {}",
                    status,
                    truncate_str(&entry.source_note_title, 30),
                    truncate_str(entry.display_text().unwrap_or_default(), 30),
                    target
                );
            }
        }
        OutputFormat::Json => {
            let listings: Vec<LinkListing> = records
                .iter()
                .map(|entry| LinkListing {
                    from_guid: entry.source_note_id.to_string(),
                    from_title: entry.source_note_title.clone(),
                    to_guid: entry.target_note_id.as_ref().map(|g| g.to_string()),
                    text: entry.display_text().map(str::to_string),
                    success: entry.resolved,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    Ok(())
}
