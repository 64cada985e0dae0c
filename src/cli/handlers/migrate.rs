//! Handler for the `migrate` command.

use anyhow::{Context, Result, bail};
use serde::Serialize;

use super::{ConsoleReporter, existing_store};
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::MigrateArgs;
use crate::index::IndexBuilder;
use crate::links::LinkFixer;
use crate::migrate::{Migration, MigrationOptions, MigrationReport, NoopReporter, NoteFailure};
use crate::store::{AuditSink, NoteQuery, SqliteNoteStore};

/// Summary printed after a migration.
#[derive(Debug, Serialize)]
pub struct MigrateSummary<'a> {
    pub total: usize,
    pub transformed: usize,
    pub cleared: usize,
    pub errors: usize,
    pub resolved_links: usize,
    pub unresolved_links: usize,
    pub failures: &'a [NoteFailure],
}

impl<'a> From<&'a MigrationReport> for MigrateSummary<'a> {
    fn from(report: &'a MigrationReport) -> Self {
        Self {
            total: report.total,
            transformed: report.transformed,
            cleared: report.cleared,
            errors: report.errors(),
            resolved_links: report.resolved_links(),
            unresolved_links: report.unresolved_links(),
            failures: &report.failures,
        }
    }
}

/// Handle the `migrate` command.
pub fn handle_migrate(args: &MigrateArgs, config: &Config, verbose: bool) -> Result<()> {
    let source_path = existing_store(config.source(args.source.as_ref()), "--source")?;
    let Some(dest_path) = config.destination(args.dest.as_ref()) else {
        bail!("no destination given: pass --dest or set it in the config file");
    };
    if dest_path == source_path {
        bail!("source and destination must be different stores");
    }

    let source = SqliteNoteStore::open(&source_path)
        .with_context(|| format!("failed to open source store at {}", source_path.display()))?;
    let mut dest = SqliteNoteStore::open(&dest_path)
        .with_context(|| format!("failed to open destination store at {}", dest_path.display()))?;

    let query = match &args.notebook {
        Some(name) => NoteQuery::notebook(name),
        None => NoteQuery::all(),
    };
    let index = IndexBuilder::new(query)
        .build(&source)
        .context("failed to read notes from source store")?;

    let options = MigrationOptions {
        size_threshold: config.size_threshold(args.max_size),
    };
    let migration = Migration::new(LinkFixer::new(), options);

    let report = match args.format {
        OutputFormat::Human => {
            let mut reporter = ConsoleReporter::new(verbose);
            migration.run_with_progress(&index, &mut dest, &mut reporter)
        }
        OutputFormat::Json => migration.run_with_progress(&index, &mut dest, &mut NoopReporter),
    }
    .context("failed to write destination store")?;

    dest.record_links(&report.audit)
        .context("failed to record link audit")?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Links: {} resolved, {} unresolved",
                report.resolved_links(),
                report.unresolved_links()
            );
            if report.cleared > 0 {
                println!("Cleared {} oversized notes", report.cleared);
            }
        }
        OutputFormat::Json => {
            let output = Output::new(MigrateSummary::from(&report));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
