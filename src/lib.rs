//! # kustos
//!
//! Maintenance toolkit for a numbered bilingual art catalogue: one HTML page
//! per work (`item7.html` / `item07.html`), each embedding an English and a
//! German description in a single `<div class="text-block">`.
//!
//! # The Core: Text-Block Normalization
//!
//! Pages were written by hand over years, so the two language segments
//! appear in arbitrary order, the markers labelling them come in several
//! equivalent markup shapes, and `<hr/>` separators got duplicated around
//! the seam. The [`reorder`] engine fixes all of that deterministically:
//!
//! ```text
//! locate page → extract text-block → detect EN/DE markers → split segments
//!   → collapse stale seam separators → reassemble EN-first → write if changed
//! ```
//!
//! Two properties make it safe to run blindly over the whole catalogue:
//!
//! - **Idempotent**: a canonical page comes back byte-identical and is
//!   reported as unchanged, so re-running the batch is always harmless.
//! - **Whole-document writes**: a page is either rewritten completely or not
//!   touched; there is no partial-write state to corrupt.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`locate`] | Resolves the on-disk filename variant for a catalogue index |
//! | [`textblock`] | Extracts the single text-block container from a page |
//! | [`marker`] | Detects EN/DE markers across their equivalent surface forms |
//! | [`reorder`] | Splits, normalizes, and reassembles the bilingual block |
//! | [`batch`] | Drives the reorder pipeline over the configured index range |
//! | [`thumbs`] | Generates JPEG thumbnails from source images (cover/contain) |
//! | [`listing`] | Renders the catalogue index page from present thumbnails |
//! | [`audit`] | Cross-checks page numbering against image assets |
//! | [`config`] | `catalogue.toml` loading, defaults, validation |
//! | [`output`] | CLI report formatting — pure `format_*`, thin `print_*` |
//! | [`types`] | Shared report records |
//!
//! # Design Decisions
//!
//! ## Per-Page Failures Never Abort a Batch
//!
//! A page with no container or a missing marker is counted and reported with
//! a reason; the batch moves on. The run exits zero regardless — the summary
//! is the diagnostic surface, and re-running after a fix is free because the
//! engine is idempotent.
//!
//! ## Maud Over Template Engines
//!
//! The listing page is generated with [Maud](https://maud.lambda.xyz/):
//! compile-time checked HTML, auto-escaped interpolation, no template files
//! to ship.
//!
//! ## Pure-Rust Imaging
//!
//! Thumbnails use the `image` crate (Lanczos3 resampling, JPEG encoding) —
//! no ImageMagick, no system dependencies. The binary is self-contained.

pub mod audit;
pub mod batch;
pub mod config;
pub mod listing;
pub mod locate;
pub mod marker;
pub mod output;
pub mod reorder;
pub mod textblock;
pub mod thumbs;
pub mod types;
