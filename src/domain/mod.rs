//! Core types: Note, NoteGuid, LinkAuditEntry

mod audit;
mod note;
mod note_guid;

pub use audit::LinkAuditEntry;
pub use note::Note;
pub use note_guid::{NoteGuid, ParseNoteGuidError};
