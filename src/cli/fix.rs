//! Fix command - rewrite image links in place.

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::common::collect_markdown_files;
use crate::config::RelinkConfig;
use crate::log;
use crate::process::{BackupPolicy, Outcome, process_file};
use crate::rewrite::Rewriter;
use crate::utils::plural_count;

/// Run the fix command: sequential batch over every candidate document.
///
/// Any read or write error aborts the remaining batch; partially converted
/// trees are safe to re-run since converted references are skipped and
/// backups are never re-created.
pub fn run_fix(config: &RelinkConfig, paths: &[PathBuf], dry: bool) -> Result<()> {
    let files = collect_markdown_files(paths, &config.root, &config.scan.extensions)?;
    if files.is_empty() {
        log!("fix"; "no markdown files found");
        return Ok(());
    }

    let rewriter = Rewriter::new(&config.rewrite.prefix, &config.rewrite.filter);
    let backup = BackupPolicy {
        enable: config.backup.enable,
        suffix: config.backup.suffix.clone(),
    };

    let mut updated = 0usize;
    let mut links = 0usize;
    for file in &files {
        let report = process_file(file, &rewriter, &backup, dry)?;
        match report.outcome {
            Outcome::Changed => {
                log!("fix"; "rewrote {} ({})",
                    config.display_path(file), plural_count(report.links, "link"));
            }
            Outcome::WouldChange => {
                log!("fix"; "would rewrite {} ({})",
                    config.display_path(file), plural_count(report.links, "link"));
            }
            Outcome::Unchanged => continue,
        }
        updated += 1;
        links += report.links;
    }

    let verb = if dry { "would update" } else { "updated" };
    log!("fix"; "{} {} of {} ({})",
        verb,
        plural_count(updated, "file"),
        files.len(),
        plural_count(links, "link"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &std::path::Path) -> RelinkConfig {
        let mut config = RelinkConfig::default();
        config.root = root.to_path_buf();
        config
    }

    fn seed_site(dir: &TempDir) {
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/a.md"),
            "![logo](../assets/images/logo.png)\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("posts/b.md"),
            "![ext](https://example.com/assets/images/x.png)\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("index.md"),
            "<img src=\"assets/images/b.jpg\">\n",
        )
        .unwrap();
    }

    #[test]
    fn test_fix_rewrites_tree() {
        let dir = TempDir::new().unwrap();
        seed_site(&dir);

        run_fix(&config_for(dir.path()), &[], false).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("posts/a.md")).unwrap(),
            "![logo]({{ '/assets/images/logo.png' | relative_url }})\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("index.md")).unwrap(),
            "<img src=\"{{ '/assets/images/b.jpg' | relative_url }}\">\n"
        );
        // External link untouched, so no backup either
        assert_eq!(
            fs::read_to_string(dir.path().join("posts/b.md")).unwrap(),
            "![ext](https://example.com/assets/images/x.png)\n"
        );
        assert!(dir.path().join("posts/a.md.bak").exists());
        assert!(dir.path().join("index.md.bak").exists());
        assert!(!dir.path().join("posts/b.md.bak").exists());
    }

    #[test]
    fn test_second_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        seed_site(&dir);
        let config = config_for(dir.path());

        run_fix(&config, &[], false).unwrap();
        let bak = fs::read_to_string(dir.path().join("posts/a.md.bak")).unwrap();
        let converted = fs::read_to_string(dir.path().join("posts/a.md")).unwrap();

        run_fix(&config, &[], false).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("posts/a.md")).unwrap(),
            converted
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("posts/a.md.bak")).unwrap(),
            bak
        );
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        seed_site(&dir);

        run_fix(&config_for(dir.path()), &[], true).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("posts/a.md")).unwrap(),
            "![logo](../assets/images/logo.png)\n"
        );
        assert!(!dir.path().join("posts/a.md.bak").exists());
    }

    #[test]
    fn test_fix_single_path() {
        let dir = TempDir::new().unwrap();
        seed_site(&dir);

        run_fix(
            &config_for(dir.path()),
            &[dir.path().join("posts/a.md")],
            false,
        )
        .unwrap();

        assert!(
            fs::read_to_string(dir.path().join("posts/a.md"))
                .unwrap()
                .contains("relative_url")
        );
        // Other files untouched
        assert_eq!(
            fs::read_to_string(dir.path().join("index.md")).unwrap(),
            "<img src=\"assets/images/b.jpg\">\n"
        );
    }
}
