//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::audit::{AuditReport, NumberMismatch};
use crate::batch::BatchReport;
use crate::listing::ListingReport;
use crate::thumbs::ThumbReport;
use crate::types::Failure;

/// How many entries of a problem list to show before eliding.
const MAX_LISTED: usize = 50;

fn push_capped<T>(lines: &mut Vec<String>, items: &[T], mut format: impl FnMut(&T) -> String) {
    for item in items.iter().take(MAX_LISTED) {
        lines.push(format!("  {}", format(item)));
    }
    if items.len() > MAX_LISTED {
        lines.push(format!("  ... +{} more", items.len() - MAX_LISTED));
    }
}

// ============================================================================
// Reorder
// ============================================================================

/// Format the reorder batch report.
pub fn format_reorder_report(report: &BatchReport, dry_run: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "Done. Changed: {}, unchanged: {}, missing: {}, failed: {}{}",
        report.changed,
        report.unchanged,
        report.missing,
        report.failed,
        if dry_run { " (dry run, nothing written)" } else { "" },
    )];

    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push("Failed files:".to_string());
        push_capped(&mut lines, &report.failures, |f: &Failure| {
            format!("{}: {}", f.filename, f.reason)
        });
    }
    lines
}

pub fn print_reorder_report(report: &BatchReport, dry_run: bool) {
    for line in format_reorder_report(report, dry_run) {
        println!("{line}");
    }
}

// ============================================================================
// Thumbnails
// ============================================================================

/// Format the thumbnail generation report.
pub fn format_thumbs_report(report: &ThumbReport, output_dir: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "Done. Created {} thumbnails in {}",
        report.created, output_dir
    )];
    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push("Failed images:".to_string());
        push_capped(&mut lines, &report.failures, |f: &Failure| {
            format!("{}: {}", f.filename, f.reason)
        });
    }
    lines
}

pub fn print_thumbs_report(report: &ThumbReport, output_dir: &str) {
    for line in format_thumbs_report(report, output_dir) {
        println!("{line}");
    }
}

// ============================================================================
// Listing
// ============================================================================

/// Format the listing generation report.
pub fn format_listing_report(report: &ListingReport, output_file: &str) -> Vec<String> {
    let missing = if report.missing.is_empty() {
        "none".to_string()
    } else {
        report
            .missing
            .iter()
            .map(|n| format!("{n:02}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    vec![
        format!("Missing thumbnails: {missing}"),
        format!(
            "Catalogue index created with {} works: {}",
            report.entries, output_file
        ),
    ]
}

pub fn print_listing_report(report: &ListingReport, output_file: &str) {
    for line in format_listing_report(report, output_file) {
        println!("{line}");
    }
}

// ============================================================================
// Audit
// ============================================================================

/// Format the audit report, section by section.
pub fn format_audit_report(report: &AuditReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Found {} item pages, {} catalogue JPGs",
            report.page_count, report.asset_count
        ),
        String::new(),
    ];

    if report.mismatches.is_empty() {
        lines.push("No page/image number mismatches found.".to_string());
    } else {
        lines.push("MISMATCH (page -> img):".to_string());
        push_capped(&mut lines, &report.mismatches, |m: &NumberMismatch| {
            format!("{}: {} -> {}", m.filename, m.page, m.referenced)
        });
    }

    if report.broken_refs.is_empty() {
        lines.push("No broken jpg references found.".to_string());
    } else {
        lines.push("BROKEN REFERENCES (jpg missing on disk):".to_string());
        push_capped(&mut lines, &report.broken_refs, |m: &NumberMismatch| {
            format!("{}: references {}.jpg (missing)", m.filename, m.referenced)
        });
    }

    if !report.no_reference.is_empty() {
        lines.push("NO IMAGE SRC FOUND IN:".to_string());
        push_capped(&mut lines, &report.no_reference, |name: &String| name.clone());
    }

    if report.numbering_gaps.is_empty() {
        lines.push("No gaps in jpg numbering range.".to_string());
    } else {
        lines.push("GAPS IN JPG NUMBERING (missing files):".to_string());
        push_capped(&mut lines, &report.numbering_gaps, |n: &u32| n.to_string());
    }

    lines
}

pub fn print_audit_report(report: &AuditReport) {
    for line in format_audit_report(report) {
        println!("{line}");
    }
}
