//! Audit records for internal links met while rewriting notes.

use crate::domain::{Note, NoteGuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record per internal link processed during a note transform.
///
/// Serializes with the column names used by the link export
/// (`from_title`, `from_guid`, `to_guid`, `to_old`, `to_new`, `success`,
/// `ts`), which downstream graph building keys on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAuditEntry {
    #[serde(rename = "from_title")]
    pub source_note_title: String,
    #[serde(rename = "from_guid")]
    pub source_note_id: NoteGuid,
    #[serde(rename = "to_guid")]
    pub target_note_id: Option<NoteGuid>,
    #[serde(rename = "to_old")]
    pub old_text: Option<String>,
    #[serde(rename = "to_new")]
    pub new_text: Option<String>,
    #[serde(rename = "success")]
    pub resolved: bool,
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
}

impl LinkAuditEntry {
    /// Records a link from `source` that was rewritten to point at `target`.
    pub fn resolved(source: &Note, target: &Note, old_text: Option<String>) -> Self {
        Self {
            source_note_title: source.title().to_string(),
            source_note_id: source.guid().clone(),
            target_note_id: Some(target.guid().clone()),
            old_text,
            new_text: Some(target.title().to_string()),
            resolved: true,
            timestamp: Utc::now(),
        }
    }

    /// Records a well-formed link from `source` whose target is not in the index.
    pub fn unresolved(source: &Note, old_text: Option<String>) -> Self {
        Self {
            source_note_title: source.title().to_string(),
            source_note_id: source.guid().clone(),
            target_note_id: None,
            old_text,
            new_text: None,
            resolved: false,
            timestamp: Utc::now(),
        }
    }

    /// Text the link ends up displaying: the new title if resolved, else the old text.
    pub fn display_text(&self) -> Option<&str> {
        self.new_text.as_deref().or(self.old_text.as_deref())
    }
}
