//! Rewrites internal note links to show their target's title.

use log::{debug, error};
use thiserror::Error;

use super::href::{HrefTarget, INTERNAL_LINK_PREFIX, is_internal_link};
use crate::domain::{LinkAuditEntry, Note};
use crate::index::NoteIndex;
use crate::markup::{self, MarkupError};

/// Path from the note root to the anchors that are considered links.
const LINK_PATH: &[&str] = &["div", "a"];

/// Errors that abort the transform of a single note.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The note content is not well-formed markup.
    #[error("failed to parse note content: {0}")]
    Markup(#[from] MarkupError),

    /// The root wrapped an escaped document that is not well-formed.
    #[error("failed to parse wrapped note content: {0}")]
    WrappedMarkup(#[source] MarkupError),
}

/// Resolves the internal links of one note at a time against a [`NoteIndex`].
///
/// For every `div/a` anchor whose href starts with the internal prefix, the
/// target guid is looked up. A hit replaces the anchor's contents with the
/// target title; a miss leaves the anchor alone. Both outcomes produce one
/// [`LinkAuditEntry`]. Hrefs with too few path segments are logged and
/// produce no entry.
#[derive(Debug, Clone)]
pub struct LinkFixer {
    internal_prefix: String,
}

impl Default for LinkFixer {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkFixer {
    /// Creates a fixer for `evernote:///` links.
    pub fn new() -> Self {
        Self::with_prefix(INTERNAL_LINK_PREFIX)
    }

    /// Creates a fixer treating hrefs starting with `prefix` as internal.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            internal_prefix: prefix.into(),
        }
    }

    pub fn internal_prefix(&self) -> &str {
        &self.internal_prefix
    }

    /// Rewrites the links in `note` and returns one audit entry per internal
    /// link processed.
    ///
    /// The note's content is only replaced once the rewritten document has
    /// been serialized, so on error the note is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `TransformError` if the content, or the document wrapped in
    /// the root's text, cannot be parsed.
    pub fn transform(
        &self,
        note: &mut Note,
        index: &NoteIndex,
    ) -> Result<Vec<LinkAuditEntry>, TransformError> {
        let mut doc = markup::parse(note.content())?;
        if let Some(text) = doc.leading_text(doc.root()) {
            let wrapped = text.trim();
            if !wrapped.is_empty() {
                doc = markup::parse(wrapped).map_err(TransformError::WrappedMarkup)?;
            }
        }

        debug!("Processing {}", note.title());
        let mut audit = Vec::new();

        for anchor in doc.select(doc.root(), LINK_PATH) {
            let old_text = doc.leading_text(anchor);
            debug!("New link {:?}", old_text);
            if old_text.is_none() && !doc.has_child_elements(anchor) {
                continue;
            }

            let Some(href) = doc.attribute(anchor, "href").map(str::to_owned) else {
                continue;
            };
            if !is_internal_link(&href, &self.internal_prefix) {
                continue;
            }

            let guid = match HrefTarget::parse(&href) {
                HrefTarget::Note(guid) => guid,
                // Only reachable with a custom prefix; `evernote:///` hrefs always split into three or more.
                HrefTarget::Malformed => {
                    error!("Invalid evernote link {} in note {}", href, note.title());
                    continue;
                }
            };

            match index.get(guid) {
                Some(target) => {
                    doc.set_text(anchor, target.title());
                    audit.push(LinkAuditEntry::resolved(note, target, old_text));
                }
                None => {
                    error!(
                        "Processing note {}, link {} not found",
                        note.title(),
                        old_text.as_deref().unwrap_or_default()
                    );
                    audit.push(LinkAuditEntry::unresolved(note, old_text));
                }
            }
        }

        note.set_content(markup::to_string(&doc));
        Ok(audit)
    }
}
