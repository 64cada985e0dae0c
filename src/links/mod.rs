//! Internal link resolution for migrated notes.

mod fixer;
mod href;

pub use fixer::{LinkFixer, TransformError};
pub use href::{HrefTarget, INTERNAL_LINK_PREFIX, is_internal_link};
