//! Bilingual text-block normalization.
//!
//! The core engine of the toolkit. Given a catalogue page whose text-block
//! holds an English and a German segment in arbitrary order, it rewrites the
//! block so English comes first, with exactly one `<hr />` separator at the
//! seam. Pages already in canonical form come back byte-identical, so the
//! whole transform is idempotent and safe to re-run.
//!
//! The pipeline per page:
//!
//! ```text
//! extract container → find EN + DE markers → split at marker offsets
//!   → collapse trailing separator runs on both segments → reassemble
//!   EN-first → verbatim compare (changed / unchanged)
//! ```
//!
//! Only separator runs at a segment's trailing edge (with nothing but
//! whitespace between them and the edge) are collapsed: that covers the
//! original seam and the end of the interior, and leaves no separator as a
//! trailing artifact next to the closing tag. Separators buried inside a
//! segment body stay where they are — when in doubt the normalizer leaves
//! markup alone rather than guessing.

use crate::marker::{self, MarkerKind};
use crate::textblock::{self, BlockError};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error(transparent)]
    Block(#[from] BlockError),
    #[error("missing {0} marker")]
    MarkerNotFound(MarkerKind),
}

/// Outcome of normalizing one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// The page needs rewriting; the new full content is attached.
    Changed(String),
    /// The page is already canonical. Nothing to write.
    Unchanged,
}

static TRAILING_SEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\s*<hr\s*/?>\s*)+$").unwrap());

/// Normalize the text-block of one page.
///
/// Pure function from page content to new content (or "unchanged"). All
/// failures are per-page: the caller decides how to aggregate them.
pub fn normalize_document(html: &str) -> Result<Normalization, NormalizeError> {
    let block = textblock::extract_text_block(html)?;

    let en = marker::find_marker(block.inner, MarkerKind::En)
        .ok_or(NormalizeError::MarkerNotFound(MarkerKind::En))?;
    let de = marker::find_marker(block.inner, MarkerKind::De)
        .ok_or(NormalizeError::MarkerNotFound(MarkerKind::De))?;

    let (en_seg, de_seg) = split_segments(block.inner, en.offset, de.offset);

    // A segment starts at its marker, so stray separators only ever sit at
    // a trailing edge: at the original seam (before the second marker) or
    // at the end of the interior. Trailing runs on both segments collapse;
    // the reassembler inserts the one canonical separator.
    let en_seg = strip_trailing_separators(en_seg);
    let de_seg = strip_trailing_separators(de_seg);

    let rebuilt = reassemble(block.open_tag, &en_seg, &de_seg, block.close_tag);

    let mut out = String::with_capacity(html.len() + rebuilt.len());
    out.push_str(&html[..block.start]);
    out.push_str(&rebuilt);
    out.push_str(&html[block.end..]);

    if out == html {
        Ok(Normalization::Unchanged)
    } else {
        Ok(Normalization::Changed(out))
    }
}

/// Split the interior at the two marker offsets.
///
/// Purely positional: the earlier marker starts the first segment, running
/// up to the later marker; the later segment runs to the end of the
/// interior. The return value is labelled by kind — `(EN, DE)` — regardless
/// of which came first. Content before the earlier marker belongs to no
/// segment and is dropped on rewrite.
fn split_segments(inner: &str, en_offset: usize, de_offset: usize) -> (&str, &str) {
    if en_offset < de_offset {
        (&inner[en_offset..de_offset], &inner[de_offset..])
    } else {
        (&inner[en_offset..], &inner[de_offset..en_offset])
    }
}

/// Remove a run of separators (whitespace-interleaved only) from the
/// trailing edge, then trim.
fn strip_trailing_separators(segment: &str) -> String {
    TRAILING_SEP_RE.replace(segment, "").trim().to_string()
}

/// Rebuild the container: EN segment, one separator, DE segment, wrapped in
/// the original tags verbatim. Indentation matches the hand-written pages.
fn reassemble(open_tag: &str, en_seg: &str, de_seg: &str, close_tag: &str) -> String {
    format!("{open_tag}\n      {en_seg}\n      <hr />\n      {de_seg}\n    {close_tag}")
}
