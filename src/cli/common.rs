//! Shared CLI helpers: candidate file discovery.

use anyhow::Result;
use jwalk::WalkDir;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Collect Markdown files from the given paths.
///
/// Explicit files are validated by extension; directories are walked
/// recursively. No paths means the whole project root. `-` reads paths
/// from stdin, one per line. Results are sorted for deterministic
/// processing order.
pub fn collect_markdown_files(
    paths: &[PathBuf],
    root: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    // Handle stdin case: read paths from stdin when `-` is passed
    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    if paths.is_empty() {
        return Ok(walk_markdown(root, extensions));
    }

    let mut files = Vec::new();
    for path in &paths {
        let resolved = resolve_path(path, root);

        if resolved.is_file() {
            if has_markdown_extension(&resolved, extensions) {
                files.push(resolved);
            } else {
                anyhow::bail!("not a markdown file: {}", path.display());
            }
        } else if resolved.is_dir() {
            files.extend(walk_markdown(&resolved, extensions));
        } else {
            anyhow::bail!(
                "path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                root.join(path).display()
            );
        }
    }

    Ok(files)
}

/// Recursively collect Markdown files under `dir`, sorted.
fn walk_markdown(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| has_markdown_extension(p, extensions))
        .collect();
    files.sort();
    files
}

/// Extension check, case-insensitive. Backup files (`post.md.bak`) fall
/// out here since their extension is the backup suffix.
fn has_markdown_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Resolve a user-supplied path: absolute and cwd-relative paths win,
/// otherwise try relative to the project root.
fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Read file paths from stdin, one per line
fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}
