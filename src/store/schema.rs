//! SQLite schema for note stores.

use rusqlite::Connection;

/// Creates the tables used by both source and destination stores.
///
/// Idempotent.
///
/// # Tables Created
/// - `notes` - One row per note, keyed by guid
/// - `links` - Link audit rows, looked up by `(from_guid, to_guid)`
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            notebook TEXT NOT NULL,
            content TEXT NOT NULL,
            content_length INTEGER NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY,
            from_title TEXT NOT NULL,
            from_guid TEXT NOT NULL,
            to_guid TEXT,
            to_old TEXT,
            to_new TEXT,
            success INTEGER NOT NULL,
            ts TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_notebook ON notes(notebook, title);
         CREATE INDEX IF NOT EXISTS idx_links_edge ON links(from_guid, to_guid);",
    )?;

    Ok(())
}
