//! Per-file processing: read, rewrite, back up, persist.
//!
//! A document is read once, pushed through the [`Rewriter`], and only
//! persisted when the transform actually changed it. The original content
//! is kept as `<path><suffix>` before the first overwrite; the backup is
//! never overwritten on later runs, so re-running the tool cannot clobber
//! the true original.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::debug;
use crate::rewrite::Rewriter;

/// Outcome of processing a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rewritten and persisted (backup created if missing).
    Changed,
    /// No qualifying references; nothing written.
    Unchanged,
    /// Dry run: would have been rewritten, nothing written.
    WouldChange,
}

/// Backup behavior for changed documents.
#[derive(Debug, Clone)]
pub struct BackupPolicy {
    pub enable: bool,
    pub suffix: String,
}

/// Per-file processing report.
#[derive(Debug, Clone, Copy)]
pub struct FileReport {
    pub outcome: Outcome,
    /// Number of references rewritten (or that would be, under dry run).
    pub links: usize,
}

/// Process one document: rewrite and conditionally persist.
///
/// Read and write errors propagate and abort the batch.
pub fn process_file(
    path: &Path,
    rewriter: &Rewriter,
    backup: &BackupPolicy,
    dry: bool,
) -> Result<FileReport> {
    let original = read_document(path)?;
    let result = rewriter.rewrite(&original);

    if !result.changed() {
        return Ok(FileReport {
            outcome: Outcome::Unchanged,
            links: 0,
        });
    }

    if dry {
        return Ok(FileReport {
            outcome: Outcome::WouldChange,
            links: result.rewritten,
        });
    }

    if backup.enable {
        write_backup_once(path, &original, &backup.suffix)?;
    }

    fs::write(path, result.text.as_bytes())
        .with_context(|| format!("failed to write `{}`", path.display()))?;

    Ok(FileReport {
        outcome: Outcome::Changed,
        links: result.rewritten,
    })
}

/// Read a document as UTF-8, falling back to lossy decoding on invalid
/// sequences so a stray legacy-encoded file cannot abort the batch.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            debug!("fix"; "`{}` is not valid utf-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Backup path: the original path with `suffix` appended.
fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Create `<path><suffix>` holding the original content, only if absent.
fn write_backup_once(path: &Path, original: &str, suffix: &str) -> Result<()> {
    let bak = backup_path(path, suffix);
    if bak.exists() {
        return Ok(());
    }
    fs::write(&bak, original)
        .with_context(|| format!("failed to write backup `{}`", bak.display()))
}
