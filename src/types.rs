//! Shared report types.
//!
//! The batch driver and the thumbnail generator both collect per-file
//! failures without aborting their run; this record is what they agree on.

use serde::Serialize;

/// One file that could not be processed, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub filename: String,
    pub reason: String,
}

impl Failure {
    pub fn new(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            reason: reason.into(),
        }
    }
}
