//! Language marker detection.
//!
//! The catalogue accumulated several equivalent ways of labelling a language
//! segment over the years. All of these mark the start of the English
//! segment:
//!
//! ```text
//! <p><strong>EN:</strong></p>        (paragraph-wrapped bold label)
//! <div class="label">EN:</div>       (labelled division)
//! <strong>EN:</strong>               (bare bold label)
//! EN:                                (bare token, last resort)
//! ```
//!
//! Detection tries the form categories in that priority order and stops at
//! the first category that matches anywhere in the interior; within a
//! category the earliest occurrence wins. The result is a tagged match —
//! kind, offset, and which form matched — rather than a dispatch on markup
//! shape.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Which language a marker introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    En,
    De,
}

impl MarkerKind {
    /// The literal label as it appears in markup.
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::En => "EN",
            MarkerKind::De => "DE",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The surface encoding a marker was recognized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerForm {
    /// `<p><strong>EN:</strong></p>`
    LabeledParagraph,
    /// `<div class="label">EN:</div>`
    LabeledDiv,
    /// `<strong>EN:</strong>`
    BoldInline,
    /// Bare `EN:` token, case-insensitive.
    BareToken,
}

/// A recognized marker occurrence inside a container interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Byte offset of the match within the interior.
    pub offset: usize,
    pub form: MarkerForm,
}

/// Pattern variants for one marker kind, in priority order.
fn form_patterns(label: &str) -> Vec<(MarkerForm, Regex)> {
    vec![
        (
            MarkerForm::LabeledParagraph,
            Regex::new(&format!(
                r"(?is)<p[^>]*>\s*<strong[^>]*>\s*{label}:\s*</strong>\s*</p>"
            ))
            .unwrap(),
        ),
        (
            MarkerForm::LabeledDiv,
            Regex::new(&format!(
                r#"(?is)<div[^>]*class="label"[^>]*>\s*{label}:\s*</div>"#
            ))
            .unwrap(),
        ),
        (
            MarkerForm::BoldInline,
            Regex::new(&format!(r"(?is)<strong[^>]*>\s*{label}:\s*</strong>")).unwrap(),
        ),
        (
            MarkerForm::BareToken,
            Regex::new(&format!(r"(?i)\b{label}:")).unwrap(),
        ),
    ]
}

static EN_FORMS: Lazy<Vec<(MarkerForm, Regex)>> = Lazy::new(|| form_patterns("EN"));
static DE_FORMS: Lazy<Vec<(MarkerForm, Regex)>> = Lazy::new(|| form_patterns("DE"));

/// Find the marker of `kind` in a container interior.
///
/// Returns `None` when no accepted form matches. Both kinds must resolve for
/// a page to be normalized; enforcing that is the caller's job.
pub fn find_marker(inner: &str, kind: MarkerKind) -> Option<Marker> {
    let forms = match kind {
        MarkerKind::En => &*EN_FORMS,
        MarkerKind::De => &*DE_FORMS,
    };

    for (form, re) in forms {
        if let Some(m) = re.find(inner) {
            return Some(Marker {
                kind,
                offset: m.start(),
                form: *form,
            });
        }
    }
    None
}
