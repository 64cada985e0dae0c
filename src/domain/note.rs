//! Note struct representing one ENML note on its way through the migration.

use crate::domain::NoteGuid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A note as read from the source store.
///
/// Only `content` is ever changed by the migration; the other fields are
/// read-only inputs. `content_size` is the byte length reported by the
/// source and is carried through unchanged, even after the content has been
/// rewritten or cleared.
///
/// # Examples
///
/// ```
/// use evermark::domain::{Note, NoteGuid};
///
/// let guid = NoteGuid::new("abc-123").unwrap();
/// let note = Note::new(guid, "Recipes", "Kitchen", "<en-note/>");
/// assert_eq!(note.content_size(), 10);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    guid: NoteGuid,
    title: String,
    notebook: String,
    content: String,
    content_size: usize,
}

impl Note {
    /// Creates a note whose `content_size` is the byte length of `content`.
    pub fn new(
        guid: NoteGuid,
        title: impl Into<String>,
        notebook: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let content_size = content.len();
        Self {
            guid,
            title: title.into(),
            notebook: notebook.into(),
            content,
            content_size,
        }
    }

    /// Overrides the recorded content size.
    ///
    /// Source stores report the length of the raw export, which may differ
    /// from the length of the decoded content.
    pub fn with_content_size(mut self, content_size: usize) -> Self {
        self.content_size = content_size;
        self
    }

    pub fn guid(&self) -> &NoteGuid {
        &self.guid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn notebook(&self) -> &str {
        &self.notebook
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_size(&self) -> usize {
        self.content_size
    }

    /// Replaces the markup body. `content_size` is left untouched.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Content is usually large; show its size only
        f.debug_struct("Note")
            .field("guid", &self.guid)
            .field("title", &self.title)
            .field("notebook", &self.notebook)
            .field("content_size", &self.content_size)
            .finish()
    }
}
