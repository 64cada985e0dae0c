//! In-memory note index built once per migration job.

use log::{debug, info, warn};
use std::collections::HashMap;

use crate::domain::{Note, NoteGuid};
use crate::store::{NoteQuery, NoteSource, StoreResult};

// ===========================================
// NoteIndex
// ===========================================

/// Every note of a job, keyed by guid.
///
/// Link targets are resolved against the whole collection, so the index is
/// filled completely before any note is transformed and is not changed
/// afterwards. Iteration follows first-insertion order; a later note with
/// an already-seen guid replaces the earlier one in place.
#[derive(Debug, Default, Clone)]
pub struct NoteIndex {
    notes: Vec<Note>,
    positions: HashMap<NoteGuid, usize>,
}

impl NoteIndex {
    /// Builds an index from an in-memory sequence of notes.
    pub fn from_notes<I>(notes: I) -> Self
    where
        I: IntoIterator<Item = Note>,
    {
        let mut index = Self::default();
        for note in notes {
            index.insert(note);
        }
        index
    }

    /// Inserts a note, replacing any note with the same guid.
    fn insert(&mut self, note: Note) {
        match self.positions.get(note.guid()) {
            Some(&pos) => {
                warn!(
                    "Duplicate note guid {}, keeping '{}' over '{}'",
                    note.guid(),
                    note.title(),
                    self.notes[pos].title()
                );
                self.notes[pos] = note;
            }
            None => {
                self.positions.insert(note.guid().clone(), self.notes.len());
                self.notes.push(note);
            }
        }
    }

    /// Looks up a note by guid.
    pub fn get(&self, guid: &str) -> Option<&Note> {
        self.positions.get(guid).map(|&pos| &self.notes[pos])
    }

    pub fn contains(&self, guid: &str) -> bool {
        self.positions.contains_key(guid)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Iterates over the notes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }
}

// ===========================================
// IndexBuilder
// ===========================================

/// Loads a [`NoteIndex`] from a note source.
pub struct IndexBuilder {
    query: NoteQuery,
}

impl IndexBuilder {
    /// Creates a builder that will read the notes matching `query`.
    pub fn new(query: NoteQuery) -> Self {
        Self { query }
    }

    /// Returns the query notes are read with.
    pub fn query(&self) -> &NoteQuery {
        &self.query
    }

    /// Reads the source and builds the index.
    ///
    /// # Errors
    ///
    /// Any source failure is returned as-is; no partial index is produced.
    pub fn build<S: NoteSource + ?Sized>(&self, source: &S) -> StoreResult<NoteIndex> {
        debug!("Reading notes with {:?}", self.query);
        let notes = source.notes(&self.query)?;
        let read = notes.len();
        let index = NoteIndex::from_notes(notes);
        info!("Indexed {} notes ({} read)", index.len(), read);
        Ok(index)
    }
}
