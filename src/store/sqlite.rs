//! SQLite-backed note store.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::fs;
use std::path::Path;

use super::{AuditSink, NoteQuery, NoteSink, NoteSource, StoreError, StoreResult, create_schema};
use crate::domain::{LinkAuditEntry, Note, NoteGuid};

/// A note store held in a SQLite database.
///
/// The same layout serves as migration source and destination; a
/// destination additionally accumulates `links` rows.
pub struct SqliteNoteStore {
    conn: Connection,
}

/// Raw `notes` row before validation.
type NoteRow = (String, String, String, String, i64);

/// Raw `links` row before validation.
type LinkRow = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    bool,
    String,
);

impl SqliteNoteStore {
    /// Opens an in-memory store with the schema created.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens or creates a store at the given path.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Reads every note in the store.
    pub fn all_notes(&self) -> StoreResult<Vec<Note>> {
        self.notes(&NoteQuery::all())
    }

    /// Number of notes in the store.
    pub fn note_count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Reads back the recorded link audit rows in insertion order.
    pub fn link_records(&self) -> StoreResult<Vec<LinkAuditEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT from_title, from_guid, to_guid, to_old, to_new, success, ts
             FROM links ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            })?
            .collect::<Result<Vec<LinkRow>, _>>()?;

        rows.into_iter().map(entry_from_row).collect()
    }
}

impl NoteSource for SqliteNoteStore {
    fn notes(&self, query: &NoteQuery) -> StoreResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT guid, title, notebook, content, content_length
             FROM notes
             WHERE ?1 IS NULL OR notebook = ?1
             ORDER BY notebook, title, guid",
        )?;
        let rows = stmt
            .query_map(params![query.notebook], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect::<Result<Vec<NoteRow>, _>>()?;

        rows.into_iter().map(note_from_row).collect()
    }
}

impl NoteSink for SqliteNoteStore {
    fn add_note(&mut self, note: &Note) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO notes (guid, title, notebook, content, content_length)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                note.guid().as_str(),
                note.title(),
                note.notebook(),
                note.content(),
                note.content_size() as i64,
            ],
        )?;
        Ok(())
    }
}

impl AuditSink for SqliteNoteStore {
    fn record_links(&mut self, entries: &[LinkAuditEntry]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO links (from_title, from_guid, to_guid, to_old, to_new, success, ts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.source_note_title,
                    entry.source_note_id.as_str(),
                    entry.target_note_id.as_ref().map(|g| g.as_str()),
                    entry.old_text,
                    entry.new_text,
                    entry.resolved,
                    entry.timestamp.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_guid(column: &'static str, value: String) -> StoreResult<NoteGuid> {
    NoteGuid::new(value).map_err(|e| StoreError::InvalidValue {
        column,
        message: e.to_string(),
    })
}

fn note_from_row((guid, title, notebook, content, length): NoteRow) -> StoreResult<Note> {
    let guid = parse_guid("notes.guid", guid)?;
    let length = usize::try_from(length).map_err(|e| StoreError::InvalidValue {
        column: "notes.content_length",
        message: e.to_string(),
    })?;
    Ok(Note::new(guid, title, notebook, content).with_content_size(length))
}

fn entry_from_row(
    (from_title, from_guid, to_guid, to_old, to_new, success, ts): LinkRow,
) -> StoreResult<LinkAuditEntry> {
    let timestamp = DateTime::parse_from_rfc3339(&ts)
        .map_err(|e| StoreError::InvalidValue {
            column: "links.ts",
            message: e.to_string(),
        })?
        .with_timezone(&Utc);

    Ok(LinkAuditEntry {
        source_note_title: from_title,
        source_note_id: parse_guid("links.from_guid", from_guid)?,
        target_note_id: to_guid
            .map(|g| parse_guid("links.to_guid", g))
            .transpose()?,
        old_text: to_old,
        new_text: to_new,
        resolved: success,
        timestamp,
    })
}
