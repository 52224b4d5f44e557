//! Check command - report rewritable links without touching files.

mod report;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::common::collect_markdown_files;
use crate::config::RelinkConfig;
use crate::log;
use crate::process::read_document;
use crate::rewrite::Rewriter;
use crate::utils::{plural_count, plural_s};

use report::CheckReport;

/// Scan the tree and report every reference `fix` would rewrite.
///
/// Exits non-zero (via error) when anything would change, so it can gate
/// CI on a fully converted tree.
pub fn run_check(config: &RelinkConfig, paths: &[PathBuf]) -> Result<()> {
    let files = collect_markdown_files(paths, &config.root, &config.scan.extensions)?;
    if files.is_empty() {
        log!("check"; "no markdown files found");
        return Ok(());
    }

    log!("check"; "checking {}", plural_count(files.len(), "file"));

    let rewriter = Rewriter::new(&config.rewrite.prefix, &config.rewrite.filter);
    let mut report = CheckReport::default();
    for file in &files {
        let text = read_document(file)?;
        for planned in rewriter.plan(&text) {
            report.add(config.display_path(file), planned);
        }
    }

    if report.is_empty() {
        log!("check"; "all image links already converted");
        return Ok(());
    }

    report.print();
    anyhow::bail!(
        "found {} across {} file{}",
        plural_count(report.link_count(), "rewritable link"),
        report.file_count(),
        plural_s(report.file_count())
    )
}
