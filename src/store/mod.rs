//! Note sources, destinations and audit persistence.
//!
//! The migration only talks to the traits defined here; `SqliteNoteStore`
//! implements all three for on-disk stores and `Vec<Note>` covers the
//! in-memory case.

mod schema;
mod sqlite;

pub use schema::create_schema;
pub use sqlite::SqliteNoteStore;

use crate::domain::{LinkAuditEntry, Note};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a note store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be turned back into a domain type.
    #[error("invalid stored value in {column}: {message}")]
    InvalidValue { column: &'static str, message: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-supplied filter for reading notes from a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Only return notes from this notebook.
    pub notebook: Option<String>,
}

impl NoteQuery {
    /// A query matching every note.
    pub fn all() -> Self {
        Self::default()
    }

    /// A query restricted to one notebook.
    pub fn notebook(name: impl Into<String>) -> Self {
        Self {
            notebook: Some(name.into()),
        }
    }

    /// Returns true if `note` passes this filter.
    pub fn matches(&self, note: &Note) -> bool {
        self.notebook
            .as_deref()
            .is_none_or(|notebook| note.notebook() == notebook)
    }
}

/// A store notes can be read from.
pub trait NoteSource {
    /// Returns the notes matching `query`, grouped by notebook.
    fn notes(&self, query: &NoteQuery) -> StoreResult<Vec<Note>>;
}

/// A store finished notes are written to, one at a time.
pub trait NoteSink {
    fn add_note(&mut self, note: &Note) -> StoreResult<()>;
}

/// A store link audit entries are exported to.
pub trait AuditSink {
    fn record_links(&mut self, entries: &[LinkAuditEntry]) -> StoreResult<()>;
}

impl NoteSource for Vec<Note> {
    fn notes(&self, query: &NoteQuery) -> StoreResult<Vec<Note>> {
        Ok(self.iter().filter(|n| query.matches(n)).cloned().collect())
    }
}

impl NoteSink for Vec<Note> {
    fn add_note(&mut self, note: &Note) -> StoreResult<()> {
        self.push(note.clone());
        Ok(())
    }
}

impl AuditSink for Vec<LinkAuditEntry> {
    fn record_links(&mut self, entries: &[LinkAuditEntry]) -> StoreResult<()> {
        self.extend_from_slice(entries);
        Ok(())
    }
}
