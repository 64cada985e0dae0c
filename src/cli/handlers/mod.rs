//! Command handlers for the CLI.

mod graph;
mod links;
mod migrate;

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::domain::Note;
use crate::migrate::{NoteOutcome, ProgressReporter};

pub use graph::handle_graph;
pub use links::handle_links;
pub use migrate::handle_migrate;

// ===========================================
// Shared Utilities
// ===========================================

/// Progress reporter that prints to stdout.
pub(crate) struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn on_start(&mut self, total: usize) {
        println!("Migrating {} notes...", total);
    }

    fn on_note(&mut self, note: &Note, outcome: NoteOutcome) {
        match outcome {
            NoteOutcome::Transformed(links) if self.verbose => {
                println!("  migrated: {} ({} links)", note.title(), links)
            }
            NoteOutcome::Cleared if self.verbose => {
                println!("  cleared: {} ({} bytes)", note.title(), note.content_size())
            }
            NoteOutcome::Failed(msg) => eprintln!("  error: {}: {}", note.title(), msg),
            _ => {}
        }
    }

    fn on_complete(&mut self, total: usize, errors: usize) {
        if errors > 0 {
            eprintln!("Migrated {} notes with {} errors", total, errors);
        } else {
            println!("Migrated {} notes", total);
        }
    }
}

/// Returns `path` if it names an existing store, failing with a hint otherwise.
pub(crate) fn existing_store(path: Option<PathBuf>, flag: &str) -> Result<PathBuf> {
    let Some(path) = path else {
        bail!("no store given: pass {} or set it in the config file", flag);
    };
    if !path.exists() {
        bail!("store not found: {}", path.display());
    }
    Ok(path)
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
