//! Numbering audit.
//!
//! Cross-checks three things that drift apart when pages are edited by hand:
//!
//! - the number in each page's filename vs the number in the first
//!   `src="<asset_dir>/N.jpg"` reference inside it
//! - page references vs the JPEGs actually on disk
//! - gaps in the asset numbering range
//!
//! The audit only reports; it never rewrites anything.

use crate::config::CatalogueConfig;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page whose number disagrees with the image it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberMismatch {
    pub filename: String,
    /// Number from the page's filename.
    pub page: u32,
    /// Number from the page's `src` reference.
    pub referenced: u32,
}

/// Result of one audit run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// Item pages examined.
    pub page_count: usize,
    /// JPEGs found in the asset directory.
    pub asset_count: usize,
    /// Pages whose filename number differs from the referenced image number.
    pub mismatches: Vec<NumberMismatch>,
    /// Pages referencing a JPEG that does not exist on disk.
    pub broken_refs: Vec<NumberMismatch>,
    /// Pages with no recognizable image reference at all.
    pub no_reference: Vec<String>,
    /// Numbers absent from the asset numbering range (min..=max).
    pub numbering_gaps: Vec<u32>,
}

impl AuditReport {
    /// True when nothing is out of order.
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
            && self.broken_refs.is_empty()
            && self.no_reference.is_empty()
            && self.numbering_gaps.is_empty()
    }
}

/// Numeric-stem JPEGs present in the asset directory.
fn asset_numbers(dir: &Path) -> Result<BTreeSet<u32>, std::io::Error> {
    let mut numbers = BTreeSet::new();
    if !dir.is_dir() {
        return Ok(numbers);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_jpg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("jpg"))
            .unwrap_or(false);
        if !is_jpg {
            continue;
        }
        if let Some(number) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<u32>().ok())
        {
            numbers.insert(number);
        }
    }
    Ok(numbers)
}

/// Item pages in a directory, as `(number, filename)` sorted by number.
fn numbered_pages(dir: &Path, prefix: &str) -> Result<Vec<(u32, String)>, std::io::Error> {
    let name_re = Regex::new(&format!(r"^{}(\d+)\.html$", regex::escape(prefix))).unwrap();

    let mut pages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(caps) = name_re.captures(name) {
            if let Ok(number) = caps[1].parse::<u32>() {
                pages.push((number, name.to_string()));
            }
        }
    }
    pages.sort();
    Ok(pages)
}

/// Audit page numbering against asset references and the assets on disk.
pub fn audit_catalogue(root: &Path, config: &CatalogueConfig) -> Result<AuditReport, AuditError> {
    let pages_dir = root.join(&config.pages.dir);
    let asset_dir = root.join(&config.audit.asset_dir);

    // src="assets/catalogue/78.jpg" — asset_dir as written in the pages
    let src_re = Regex::new(&format!(
        r#"src="{}/(\d+)\.jpg""#,
        regex::escape(&config.audit.asset_dir)
    ))
    .unwrap();

    let pages = numbered_pages(&pages_dir, &config.pages.prefix)?;
    let assets = asset_numbers(&asset_dir)?;

    let mut report = AuditReport {
        page_count: pages.len(),
        asset_count: assets.len(),
        ..AuditReport::default()
    };

    for (page_number, filename) in &pages {
        let content = match fs::read_to_string(pages_dir.join(filename)) {
            Ok(content) => content,
            Err(_) => {
                // Unreadable page: counts as "no reference found"
                report.no_reference.push(filename.clone());
                continue;
            }
        };

        let Some(caps) = src_re.captures(&content) else {
            report.no_reference.push(filename.clone());
            continue;
        };
        let Ok(referenced) = caps[1].parse::<u32>() else {
            report.no_reference.push(filename.clone());
            continue;
        };

        if referenced != *page_number {
            report.mismatches.push(NumberMismatch {
                filename: filename.clone(),
                page: *page_number,
                referenced,
            });
        }
        if !assets.contains(&referenced) {
            report.broken_refs.push(NumberMismatch {
                filename: filename.clone(),
                page: *page_number,
                referenced,
            });
        }
    }

    if let (Some(&min), Some(&max)) = (assets.iter().next(), assets.iter().next_back()) {
        report.numbering_gaps = (min..=max).filter(|n| !assets.contains(n)).collect();
    }

    Ok(report)
}
