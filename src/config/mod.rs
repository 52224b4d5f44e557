//! Tool configuration management for `relink.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                             |
//! |-------------|-----------------------------------------------------|
//! | `[rewrite]` | Asset prefix and Liquid filter name                 |
//! | `[backup]`  | Backup suffix and on/off switch                     |
//! | `[scan]`    | Markdown extensions considered during discovery     |
//!
//! The config file is optional: without one, the current directory is the
//! project root and every field takes its default. When present, it is
//! searched upward from cwd and its parent directory becomes the root.

mod error;

pub use error::ConfigError;

use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::cli::Cli;
use crate::log;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing relink.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelinkConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Rewrite settings (prefix, filter)
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Backup settings (suffix, enable)
    #[serde(default)]
    pub backup: BackupConfig,

    /// File discovery settings (extensions)
    #[serde(default)]
    pub scan: ScanConfig,
}

impl RelinkConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file; the project root
    /// is its parent directory. A missing config file is not an error -
    /// defaults apply and cwd becomes the root.
    pub fn load(cli: &Cli) -> Result<Self> {
        match find_config_file(&cli.config) {
            Some(path) => {
                let content = fs::read_to_string(&path)
                    .map_err(|err| ConfigError::Io(path.clone(), err))?;
                let mut config = Self::parse_with_ignored(&content, &path)?;
                config.root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                Ok(config)
            }
            None => {
                let mut config = Self::default();
                config.root = std::env::current_dir().unwrap_or_default();
                Ok(config)
            }
        }
    }

    /// Parse TOML content, warning about unknown fields.
    fn parse_with_ignored(content: &str, path: &Path) -> Result<Self> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |field: serde_ignored::Path| {
            ignored.push(field.to_string());
        })
        .map_err(ConfigError::Toml)?;

        if !ignored.is_empty() {
            log!("warning"; "unknown fields in `{}`: {}", path.display(), ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string (defaults for omitted keys).
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Render a path relative to the project root for display.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Search upward from cwd for the config file.
fn find_config_file(name: &Path) -> Option<PathBuf> {
    if name.is_absolute() {
        return name.exists().then(|| name.to_path_buf());
    }
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

// ============================================================================
// sections
// ============================================================================

/// `[rewrite]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Asset path segment that marks a rewritable reference.
    pub prefix: String,
    /// Liquid filter wrapped around the site path.
    pub filter: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            prefix: "assets/images".to_string(),
            filter: "relative_url".to_string(),
        }
    }
}

/// `[backup]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Create a one-time backup before the first overwrite.
    pub enable: bool,
    /// Suffix appended to the original path.
    pub suffix: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enable: true,
            suffix: ".bak".to_string(),
        }
    }
}

/// `[scan]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extensions treated as Markdown (matched case-insensitively).
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelinkConfig::default();
        assert_eq!(config.rewrite.prefix, "assets/images");
        assert_eq!(config.rewrite.filter, "relative_url");
        assert!(config.backup.enable);
        assert_eq!(config.backup.suffix, ".bak");
        assert_eq!(config.scan.extensions, ["md", "markdown"]);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = RelinkConfig::from_str("").unwrap();
        assert_eq!(config.rewrite.prefix, "assets/images");
        assert!(config.backup.enable);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = RelinkConfig::from_str(
            r#"
            [rewrite]
            prefix = "static/img"

            [backup]
            enable = false
            "#,
        )
        .unwrap();
        assert_eq!(config.rewrite.prefix, "static/img");
        assert_eq!(config.rewrite.filter, "relative_url");
        assert!(!config.backup.enable);
        assert_eq!(config.backup.suffix, ".bak");
    }

    #[test]
    fn test_invalid_toml_errors() {
        assert!(RelinkConfig::from_str("[rewrite\nprefix = 1").is_err());
    }

    #[test]
    fn test_display_path_relative_to_root() {
        let mut config = RelinkConfig::default();
        config.root = PathBuf::from("/site");
        assert_eq!(
            config.display_path(Path::new("/site/posts/a.md")),
            "posts/a.md"
        );
        // Paths outside the root fall back to the full path
        assert_eq!(
            config.display_path(Path::new("/other/a.md")),
            "/other/a.md"
        );
    }
}
