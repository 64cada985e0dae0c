//! Shared helpers for integration tests.

pub mod harness;

/// Wraps `body` in an ENML document root.
#[allow(dead_code)]
pub fn enml(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><en-note>{}</en-note>",
        body
    )
}

/// A `<div>` holding one internal link to `guid` displaying `text`.
#[allow(dead_code)]
pub fn link_div(guid: &str, text: &str) -> String {
    format!(
        "<div><a href=\"evernote:///view/1/s1/{}/{}/\">{}</a></div>",
        guid, guid, text
    )
}
