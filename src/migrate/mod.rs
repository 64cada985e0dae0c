//! Migration job: drives the link fixer over every indexed note.

use log::{error, info};
use serde::Serialize;

use crate::domain::{LinkAuditEntry, Note, NoteGuid};
use crate::index::NoteIndex;
use crate::links::LinkFixer;
use crate::store::{NoteSink, StoreResult};

/// Notes at or above this many bytes are cleared instead of transformed.
pub const DEFAULT_SIZE_THRESHOLD: usize = 50_000;

/// Returns the content a note is given when it trips the size guard.
pub fn cleared_content(original_size: usize) -> String {
    format!("Cleared note, original size was {}", original_size)
}

// ===========================================
// Options and Results
// ===========================================

/// Tunables for a migration job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Size guard: notes with `content_size >= size_threshold` are cleared.
    pub size_threshold: usize,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            size_threshold: DEFAULT_SIZE_THRESHOLD,
        }
    }
}

/// A note whose transform failed. It was still written to the destination.
#[derive(Debug, Clone, Serialize)]
pub struct NoteFailure {
    pub guid: NoteGuid,
    pub title: String,
    pub message: String,
}

/// Result of a migration job.
#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    /// Number of notes written to the destination.
    pub total: usize,
    /// Notes whose links were rewritten.
    pub transformed: usize,
    /// Notes cleared by the size guard.
    pub cleared: usize,
    /// Notes whose transform failed.
    pub failures: Vec<NoteFailure>,
    /// Audit entries for every internal link processed, in job order.
    #[serde(skip)]
    pub audit: Vec<LinkAuditEntry>,
}

impl MigrationReport {
    pub fn errors(&self) -> usize {
        self.failures.len()
    }

    pub fn resolved_links(&self) -> usize {
        self.audit.iter().filter(|e| e.resolved).count()
    }

    pub fn unresolved_links(&self) -> usize {
        self.audit.iter().filter(|e| !e.resolved).count()
    }
}

// ===========================================
// Progress Reporting
// ===========================================

/// What happened to a single note.
#[derive(Debug, Clone)]
pub enum NoteOutcome {
    /// Links were rewritten; carries the number of audit entries.
    Transformed(usize),
    /// The size guard replaced the content.
    Cleared,
    /// The transform failed; the note was written unchanged.
    Failed(String),
}

/// Trait for receiving progress updates during a migration.
pub trait ProgressReporter {
    /// Called before notes are processed.
    fn on_start(&mut self, total: usize);
    /// Called after each note has been written.
    fn on_note(&mut self, note: &Note, outcome: NoteOutcome);
    /// Called when every note has been written.
    fn on_complete(&mut self, total: usize, errors: usize);
}

/// A no-op progress reporter.
#[derive(Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_start(&mut self, _total: usize) {}
    fn on_note(&mut self, _note: &Note, _outcome: NoteOutcome) {}
    fn on_complete(&mut self, _total: usize, _errors: usize) {}
}

// ===========================================
// Migration
// ===========================================

/// Runs the link fixer over a whole index and writes every note out.
///
/// Notes are processed one at a time in index order. A note that fails to
/// transform is logged, counted and still written, so no note is dropped.
/// Only destination failures abort the job.
pub struct Migration {
    fixer: LinkFixer,
    options: MigrationOptions,
}

impl Migration {
    pub fn new(fixer: LinkFixer, options: MigrationOptions) -> Self {
        Self { fixer, options }
    }

    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    /// Runs the job without progress reporting.
    pub fn run<S: NoteSink + ?Sized>(
        &self,
        index: &NoteIndex,
        sink: &mut S,
    ) -> StoreResult<MigrationReport> {
        self.run_with_progress(index, sink, &mut NoopReporter)
    }

    /// Runs the job with progress reporting.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `sink`. Transform errors never
    /// abort the job; they are collected in the report.
    pub fn run_with_progress<S, P>(
        &self,
        index: &NoteIndex,
        sink: &mut S,
        progress: &mut P,
    ) -> StoreResult<MigrationReport>
    where
        S: NoteSink + ?Sized,
        P: ProgressReporter,
    {
        let mut report = MigrationReport::default();
        progress.on_start(index.len());

        for original in index.iter() {
            let mut note = original.clone();
            let outcome = self.process(&mut note, index, &mut report);

            sink.add_note(&note)?;
            report.total += 1;
            progress.on_note(&note, outcome);
        }

        info!("Total notes: {}, errors: {}", report.total, report.errors());
        progress.on_complete(report.total, report.errors());
        Ok(report)
    }

    fn process(&self, note: &mut Note, index: &NoteIndex, report: &mut MigrationReport) -> NoteOutcome {
        if note.content_size() >= self.options.size_threshold {
            info!(
                "Clearing note {}, size {} is over the limit",
                note.title(),
                note.content_size()
            );
            note.set_content(cleared_content(note.content_size()));
            report.cleared += 1;
            return NoteOutcome::Cleared;
        }

        match self.fixer.transform(note, index) {
            Ok(entries) => {
                let count = entries.len();
                report.audit.extend(entries);
                report.transformed += 1;
                NoteOutcome::Transformed(count)
            }
            Err(e) => {
                error!("Failed note {} with exception {}", note.title(), e);
                report.failures.push(NoteFailure {
                    guid: note.guid().clone(),
                    title: note.title().to_string(),
                    message: e.to_string(),
                });
                NoteOutcome::Failed(e.to_string())
            }
        }
    }
}

impl Default for Migration {
    fn default() -> Self {
        Self::new(LinkFixer::new(), MigrationOptions::default())
    }
}
