//! Check report types and formatting.

use std::collections::BTreeMap;

use owo_colors::OwoColorize;

use crate::rewrite::PlannedRewrite;

/// Rewritable references grouped by source file
#[derive(Debug, Default)]
pub struct CheckReport {
    entries: BTreeMap<String, Vec<PlannedRewrite>>,
}

impl CheckReport {
    /// Record a rewritable reference found in `source`.
    pub fn add(&mut self, source: String, planned: PlannedRewrite) {
        self.entries.entry(source).or_default().push(planned);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of files with rewritable references.
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// Total rewritable reference count.
    pub fn link_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Print the grouped report to stderr.
    pub fn print(&self) {
        for (source, links) in &self.entries {
            eprintln!();
            eprintln!("{}", source.bold());
            for planned in links {
                eprintln!(
                    "  {} `{}` {} `{}`",
                    "→".red(),
                    planned.url,
                    "becomes".dimmed(),
                    planned.site_path.as_str().cyan()
                );
            }
        }
        eprintln!();
    }
}
