//! Note index over the source collection

mod builder;

pub use builder::{IndexBuilder, NoteIndex};
