//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{EvermarkCommand, TestNote};
use evermark::store::{NoteSink, SqliteNoteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment holding a source store, a destination path
/// and a log file, all inside a temp directory removed on drop.
pub struct TestEnv {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join("source.db")
    }

    pub fn dest_path(&self) -> PathBuf {
        self.root.join("dest.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join("evermark.log")
    }

    /// Config file location handed to every command; absent unless written.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes a note into the source store.
    pub fn add_note(&self, test_note: &TestNote) {
        let mut store = SqliteNoteStore::open(&self.source_path()).expect("Failed to open source");
        store
            .add_note(&test_note.to_note())
            .expect("Failed to write test note");
    }

    /// Opens the destination store written by `migrate`.
    pub fn open_dest(&self) -> SqliteNoteStore {
        SqliteNoteStore::open(&self.dest_path()).expect("Failed to open destination")
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Creates a command isolated from the user's config and log file.
    pub fn cmd(&self) -> EvermarkCommand {
        EvermarkCommand::new()
            .config(&self.config_path())
            .log_file(&self.log_path())
    }

    /// `migrate` from this environment's source to its destination.
    pub fn migrate(&self) -> EvermarkCommand {
        self.cmd()
            .args(["migrate"])
            .path_arg("--source", &self.source_path())
            .path_arg("--dest", &self.dest_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evermark::store::{NoteQuery, NoteSource};

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_creates_source() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("g1", "First"));
        env.add_note(&TestNote::new("g2", "Second"));

        let store = SqliteNoteStore::open(&env.source_path()).unwrap();
        assert_eq!(store.notes(&NoteQuery::all()).unwrap().len(), 2);
    }
}
