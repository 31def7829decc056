//! Text-block container extraction.
//!
//! Every catalogue page embeds exactly one `<div class="text-block">…</div>`
//! holding both language segments. This module locates that container and
//! exposes its open tag, interior, close tag, and absolute offsets so the
//! reorder engine can splice a rewritten block back into the page verbatim.
//!
//! The single-container assumption is a checked precondition: a page with a
//! second opening tag anywhere (including nested inside the first container)
//! is rejected rather than rewritten on a guessed span.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("no text-block container")]
    NotFound,
    #[error("multiple text-block containers")]
    Multiple,
}

/// The bilingual container, borrowed from the page it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock<'a> {
    /// Opening tag exactly as it appears in the page.
    pub open_tag: &'a str,
    /// Everything between the opening and closing tags.
    pub inner: &'a str,
    /// Closing tag exactly as it appears in the page.
    pub close_tag: &'a str,
    /// Byte offset of the opening tag in the page.
    pub start: usize,
    /// Byte offset one past the closing tag in the page.
    pub end: usize,
}

static OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<div\s+class="text-block"\s*>"#).unwrap());
static BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)(<div\s+class="text-block"\s*>)(.*?)(</div>)"#).unwrap());

/// Find the single text-block container in a page.
///
/// The container runs from the first opening tag to the first subsequent
/// `</div>`. Nested or repeated containers are out of contract and reported
/// as [`BlockError::Multiple`].
pub fn extract_text_block(html: &str) -> Result<TextBlock<'_>, BlockError> {
    if OPEN_RE.find_iter(html).count() > 1 {
        return Err(BlockError::Multiple);
    }

    let caps = BLOCK_RE.captures(html).ok_or(BlockError::NotFound)?;
    let whole = caps.get(0).expect("capture 0 always present");

    Ok(TextBlock {
        open_tag: caps.get(1).map(|m| m.as_str()).unwrap_or_default(),
        inner: caps.get(2).map(|m| m.as_str()).unwrap_or_default(),
        close_tag: caps.get(3).map(|m| m.as_str()).unwrap_or_default(),
        start: whole.start(),
        end: whole.end(),
    })
}
