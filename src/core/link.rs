//! Link classification utilities.

/// Syntactic classification of image link destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, data:, etc.)
    External(&'a str),
    /// Already carries a Liquid expression or the relative_url marker.
    /// Must never be rewritten again.
    Templated(&'a str),
    /// Site-root-relative path (/assets/images/logo.png).
    SiteRoot(&'a str),
    /// File-relative path (./logo.png, ../images/a.jpg, bare paths,
    /// or a Windows drive path like C:\site\assets\images\a.jpg).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    ///
    /// The `Templated` check runs first: a converted reference may contain
    /// slashes and prefixes that would otherwise classify it as a path.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if Self::is_templated(link) {
            Self::Templated(link)
        } else if is_external_link(link) {
            Self::External(link)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Check if link already contains a Liquid opener or the filter marker.
    #[inline]
    pub fn is_templated(link: &str) -> bool {
        link.contains("{{") || link.contains("relative_url")
    }

    /// Check if link is HTTP/HTTPS.
    #[inline]
    pub fn is_http(link: &str) -> bool {
        link.starts_with("http://") || link.starts_with("https://")
    }
}

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 2 characters before the colon - a single letter is a
///   Windows drive (C:\...), not a scheme
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
#[inline]
fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 1
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
