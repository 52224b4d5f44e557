//! The link-rewrite engine: a pure text transform.
//!
//! Detects Markdown image syntax and HTML `<img>` tags whose URL points at
//! a local asset path and replaces the URL with a templated lookup
//! expression:
//!
//! ```text
//! ![logo](../assets/images/logo.png)
//!   -> ![logo]({{ '/assets/images/logo.png' | relative_url }})
//! <img src="assets/images/b.jpg">
//!   -> <img src="{{ '/assets/images/b.jpg' | relative_url }}">
//! ```
//!
//! The skip rule is per-reference: a matched reference is left byte-exact
//! when its URL is already templated or an http(s) link, so a line holding
//! one converted reference and one local reference still gets the local
//! one rewritten. All I/O belongs to the caller.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::core::{LinkKind, SitePath};

/// Markdown image syntax: `![alt](url)`. Matches stay within one line;
/// alt text and parentheses are captured so they survive byte-exact.
static MD_IMG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!\[[^\]\n]*\]\()([^)\n]+)(\))").unwrap());

/// HTML image tag: `<img src="url">` with either quote style.
static HTML_IMG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(<img[^>\n]*\bsrc=["'])([^"'\n]+)(["'])"#).unwrap());

/// A single reference that would be rewritten (used by the check command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRewrite {
    /// Raw URL as found in the document (trimmed).
    pub url: String,
    /// Normalized site path it would become.
    pub site_path: SitePath,
}

/// Result of rewriting one document.
#[derive(Debug)]
pub struct RewriteResult<'t> {
    /// Possibly-modified document text.
    pub text: Cow<'t, str>,
    /// Number of references actually rewritten.
    pub rewritten: usize,
}

impl RewriteResult<'_> {
    #[inline]
    pub fn changed(&self) -> bool {
        self.rewritten > 0
    }
}

/// Rewrites local image references into the templated relative-url form.
#[derive(Debug, Clone)]
pub struct Rewriter {
    /// Asset path segment that marks a rewritable reference.
    prefix: String,
    /// Liquid filter wrapped around the site path.
    filter: String,
}

impl Rewriter {
    pub fn new(prefix: &str, filter: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            filter: filter.to_string(),
        }
    }

    /// Rewrite every qualifying image reference in `text`.
    ///
    /// Pure transform: never errors on malformed input. Skipped and
    /// ineligible references pass through byte-identical, which makes the
    /// transform idempotent - its own output is caught by the templated
    /// skip rule on a second pass.
    pub fn rewrite<'t>(&self, text: &'t str) -> RewriteResult<'t> {
        let mut rewritten = 0;

        // Markdown syntax first, then HTML tags (fixed order).
        let md = MD_IMG.replace_all(text, |caps: &Captures| self.replace(caps, &mut rewritten));
        let out = match md {
            Cow::Borrowed(_) => {
                HTML_IMG.replace_all(text, |caps: &Captures| self.replace(caps, &mut rewritten))
            }
            Cow::Owned(owned) => Cow::Owned(
                HTML_IMG
                    .replace_all(&owned, |caps: &Captures| self.replace(caps, &mut rewritten))
                    .into_owned(),
            ),
        };

        RewriteResult {
            text: out,
            rewritten,
        }
    }

    /// List the references `rewrite` would change, without changing them.
    pub fn plan(&self, text: &str) -> Vec<PlannedRewrite> {
        MD_IMG
            .captures_iter(text)
            .chain(HTML_IMG.captures_iter(text))
            .filter_map(|caps| {
                let url = caps[2].trim();
                self.site_path(url).map(|site_path| PlannedRewrite {
                    url: url.to_string(),
                    site_path,
                })
            })
            .collect()
    }

    /// Build the replacement for one matched reference, or echo the match
    /// unchanged when the skip rule or normalization rejects it.
    fn replace(&self, caps: &Captures, rewritten: &mut usize) -> String {
        let url = caps[2].trim();
        match self.site_path(url) {
            Some(site_path) => {
                *rewritten += 1;
                format!(
                    "{}{{{{ '{}' | {} }}}}{}",
                    &caps[1], site_path, self.filter, &caps[3]
                )
            }
            None => caps[0].to_string(),
        }
    }

    /// Compute the normalized site path for a reference URL, or `None` when
    /// the reference must be left untouched.
    fn site_path(&self, url: &str) -> Option<SitePath> {
        match LinkKind::parse(url) {
            LinkKind::Templated(_) => None,
            LinkKind::External(u) if LinkKind::is_http(u) => None,
            LinkKind::External(u) | LinkKind::SiteRoot(u) | LinkKind::FileRelative(u) => {
                SitePath::from_url(u, &self.prefix)
            }
        }
    }
}
