//! Batch driver for the reorder engine.
//!
//! Walks the configured index range, resolves each page, runs the
//! normalization pipeline, and writes back whole documents only when the
//! content actually changed. Outcomes accumulate into a single report value;
//! no per-page problem ever aborts the run, and re-running the batch is
//! always safe because normalization is idempotent.
//!
//! Per-index state machine:
//!
//! ```text
//! LOCATE → EXTRACT → DETECT → SPLIT → NORMALIZE → REASSEMBLE → {WRITE | SKIP}
//! ```
//!
//! Terminal outcomes: `changed`, `unchanged`, `missing` (no accepted
//! filename exists), `failed` (structural failure, with a reason).

use crate::config::CatalogueConfig;
use crate::locate;
use crate::reorder::{self, Normalization};
use crate::types::Failure;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Aggregate result of one reorder run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Pages rewritten (or, in dry-run mode, pages that would be).
    pub changed: usize,
    /// Pages already canonical; nothing written.
    pub unchanged: usize,
    /// Indices with no page under any accepted filename.
    pub missing: usize,
    /// Pages that could not be normalized.
    pub failed: usize,
    /// One entry per failed page.
    pub failures: Vec<Failure>,
}

impl BatchReport {
    fn fail(&mut self, filename: &str, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(Failure::new(filename, reason));
    }
}

/// Run the reorder engine over the configured index range.
///
/// With `dry_run` set, changed pages are counted but nothing is written.
/// The function itself is infallible: every per-page problem lands in the
/// report.
pub fn reorder_range(root: &Path, config: &CatalogueConfig, dry_run: bool) -> BatchReport {
    let dir = root.join(&config.pages.dir);
    let mut report = BatchReport::default();

    for index in config.range.start..=config.range.end {
        let Some(path) = locate::locate_document(&dir, &config.pages.prefix, index) else {
            report.missing += 1;
            continue;
        };
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let html = match fs::read_to_string(&path) {
            Ok(html) => html,
            Err(err) => {
                report.fail(&filename, format!("read error: {err}"));
                continue;
            }
        };

        match reorder::normalize_document(&html) {
            Ok(Normalization::Unchanged) => report.unchanged += 1,
            Ok(Normalization::Changed(new_html)) => {
                if dry_run {
                    report.changed += 1;
                } else {
                    match fs::write(&path, new_html) {
                        Ok(()) => report.changed += 1,
                        Err(err) => report.fail(&filename, format!("write error: {err}")),
                    }
                }
            }
            Err(err) => report.fail(&filename, err.to_string()),
        }
    }

    report
}
