//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use evermark::domain::{Note, NoteGuid};

/// Builder for creating test notes.
#[derive(Debug, Clone)]
pub struct TestNote {
    guid: String,
    title: String,
    notebook: String,
    body: String,
}

impl TestNote {
    /// Creates a note with the given guid and title in notebook `Inbox`.
    pub fn new(guid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            title: title.into(),
            notebook: "Inbox".to_string(),
            body: String::new(),
        }
    }

    pub fn notebook(mut self, notebook: impl Into<String>) -> Self {
        self.notebook = notebook.into();
        self
    }

    /// Sets the markup placed inside `<en-note>`.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a `<div>` linking to `guid` with display text `text`.
    pub fn link_to(mut self, guid: &str, text: &str) -> Self {
        self.body.push_str(&super::super::link_div(guid, text));
        self
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn to_note(&self) -> Note {
        let guid = NoteGuid::new(self.guid.clone()).expect("Invalid guid");
        Note::new(
            guid,
            self.title.clone(),
            self.notebook.clone(),
            super::super::enml(&self.body),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_wraps_body() {
        let note = TestNote::new("g1", "One").body("<div>hi</div>").to_note();
        assert!(note.content().contains("<en-note><div>hi</div></en-note>"));
        assert_eq!(note.notebook(), "Inbox");
    }

    #[test]
    fn test_note_link_to_appends_div() {
        let note = TestNote::new("g1", "One").link_to("g2", "Two").to_note();
        assert!(note.content().contains("evernote:///view/1/s1/g2/g2/"));
    }
}
