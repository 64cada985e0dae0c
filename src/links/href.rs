//! Parsing of internal note-link hrefs.

/// Prefix of hrefs that point at another note in the same account.
pub const INTERNAL_LINK_PREFIX: &str = "evernote:///";

/// What an internal href points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HrefTarget<'a> {
    /// The href names a candidate note guid.
    Note(&'a str),
    /// The href has fewer than three path segments.
    Malformed,
}

impl<'a> HrefTarget<'a> {
    /// Extracts the target guid from an internal href.
    ///
    /// One trailing `/` is dropped, the rest is split on `/`, and the
    /// second-to-last segment is the guid. Internal links repeat the guid in
    /// the last two segments:
    ///
    /// ```
    /// use evermark::links::HrefTarget;
    ///
    /// let href = "evernote:///view/111/s1/TARGET123/TARGET123/";
    /// assert_eq!(HrefTarget::parse(href), HrefTarget::Note("TARGET123"));
    /// assert_eq!(HrefTarget::parse("a/b"), HrefTarget::Malformed);
    /// ```
    pub fn parse(href: &'a str) -> Self {
        let href = href.strip_suffix('/').unwrap_or(href);
        let segments: Vec<&str> = href.split('/').collect();
        if segments.len() < 3 {
            return HrefTarget::Malformed;
        }
        HrefTarget::Note(segments[segments.len() - 2])
    }
}

/// Returns true if `href` addresses a note rather than an external resource.
pub fn is_internal_link(href: &str, prefix: &str) -> bool {
    href.starts_with(prefix)
}
