//! Owned markup document model for ENML note bodies.

mod document;
mod parse;
mod serialize;

pub use document::{Document, Element, NodeId, NodeKind};
pub use parse::parse;
pub use serialize::to_string;

use thiserror::Error;

/// Errors that can occur while parsing note markup.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The tokenizer rejected the input.
    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be read.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The input holds no root element.
    #[error("no element found")]
    Empty,

    /// An element was still open at the end of input.
    #[error("unclosed element <{name}>")]
    Unclosed { name: String },

    /// An end tag appeared with no element open.
    #[error("unexpected end tag </{name}>")]
    UnexpectedEnd { name: String },

    /// A second top-level element followed the root.
    #[error("junk after document element: <{name}>")]
    MultipleRoots { name: String },

    /// Non-whitespace text appeared outside the root element.
    #[error("text outside of the root element")]
    TextOutsideRoot,
}

/// Result type for markup operations.
pub type MarkupResult<T> = Result<T, MarkupError>;
