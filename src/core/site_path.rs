//! Site-root path normalization for image references.

/// A normalized site-root path: forward slashes only, exactly one leading
/// `/`, no repeated separators, always containing the asset prefix
/// immediately inside it (e.g. `/assets/images/logo.png`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePath(String);

impl SitePath {
    /// Normalize a raw URL into a site path rooted at `prefix`.
    ///
    /// Folds backslashes to forward slashes, locates the first
    /// case-insensitive occurrence of `<prefix>/`, and takes the tail from
    /// there with a single leading slash. Relative prefixes (`../`, `./`,
    /// a single `/`) and Windows drive components before the prefix are
    /// dropped by the same search.
    ///
    /// Returns `None` when the URL does not contain the prefix, which marks
    /// the reference as ineligible for rewriting.
    pub fn from_url(url: &str, prefix: &str) -> Option<Self> {
        let folded = url.replace('\\', "/");
        let start = find_prefix(&folded, prefix)?;

        // Single leading slash, then the tail with slash runs collapsed.
        let tail = &folded[start..];
        let mut path = String::with_capacity(tail.len() + 1);
        path.push('/');
        let mut prev_slash = true;
        for c in tail.chars() {
            if c == '/' {
                if prev_slash {
                    continue;
                }
                prev_slash = true;
            } else {
                prev_slash = false;
            }
            path.push(c);
        }

        Some(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SitePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find the byte offset of the first case-insensitive `<prefix>/`
/// occurrence in a slash-folded URL.
///
/// ASCII lowercasing preserves byte offsets, so the index found in the
/// folded haystack is valid in the original.
fn find_prefix(folded: &str, prefix: &str) -> Option<usize> {
    let needle = format!("{}/", prefix.trim_matches('/').to_ascii_lowercase());
    if needle == "/" {
        return None;
    }
    folded.to_ascii_lowercase().find(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "assets/images";

    fn site(url: &str) -> Option<String> {
        SitePath::from_url(url, PREFIX).map(|p| p.as_str().to_string())
    }

    #[test]
    fn test_relative_prefixes_stripped() {
        assert_eq!(site("../assets/images/logo.png").as_deref(), Some("/assets/images/logo.png"));
        assert_eq!(site("./assets/images/logo.png").as_deref(), Some("/assets/images/logo.png"));
        assert_eq!(site("/assets/images/logo.png").as_deref(), Some("/assets/images/logo.png"));
        assert_eq!(site("assets/images/logo.png").as_deref(), Some("/assets/images/logo.png"));
    }

    #[test]
    fn test_backslashes_folded() {
        assert_eq!(site(r"..\assets\images\foo.jpg").as_deref(), Some("/assets/images/foo.jpg"));
        assert_eq!(site(r"assets\images\foo.jpg").as_deref(), Some("/assets/images/foo.jpg"));
    }

    #[test]
    fn test_windows_drive_path() {
        assert_eq!(
            site(r"C:\Users\me\site\assets\images\file.jpg").as_deref(),
            Some("/assets/images/file.jpg")
        );
        assert_eq!(
            site(r"D:\a\b\assets\images\X.ext").as_deref(),
            Some("/assets/images/X.ext")
        );
    }

    #[test]
    fn test_case_insensitive_prefix() {
        assert_eq!(site("Assets/Images/Logo.PNG").as_deref(), Some("/Assets/Images/Logo.PNG"));
    }

    #[test]
    fn test_slash_runs_collapsed() {
        assert_eq!(site("/assets/images//logo.png").as_deref(), Some("/assets/images/logo.png"));
        assert_eq!(site("assets/images/a///b.png").as_deref(), Some("/assets/images/a/b.png"));
    }

    #[test]
    fn test_no_prefix_is_ineligible() {
        assert_eq!(site("images/logo.png"), None);
        assert_eq!(site("../static/logo.png"), None);
        assert_eq!(site(""), None);
    }

    #[test]
    fn test_custom_prefix() {
        let p = SitePath::from_url("../static/img/a.png", "static/img").unwrap();
        assert_eq!(p.as_str(), "/static/img/a.png");
        assert_eq!(SitePath::from_url("../assets/images/a.png", "static/img"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        // The subdirectory repeats the prefix; the tail keeps it intact.
        assert_eq!(
            site("../assets/images/assets/images/a.png").as_deref(),
            Some("/assets/images/assets/images/a.png")
        );
    }
}
