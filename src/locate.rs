//! Catalogue page filename resolution.
//!
//! Pages were created by hand over several years, so both `item7.html` and
//! `item07.html` exist in the wild. For an index the unpadded name is tried
//! first, then the two-digit zero-padded one; the first that exists wins.
//! A page that exists under neither name is "missing" — a signal the batch
//! counts, not an error.

use std::path::{Path, PathBuf};

/// Accepted filenames for one catalogue index, in priority order.
///
/// For indices of two or more digits the candidates coincide; checking the
/// same path twice is harmless.
pub fn candidate_names(prefix: &str, index: u32) -> [String; 2] {
    [
        format!("{prefix}{index}.html"),
        format!("{prefix}{index:02}.html"),
    ]
}

/// Resolve the on-disk page for a catalogue index, if any.
pub fn locate_document(dir: &Path, prefix: &str, index: u32) -> Option<PathBuf> {
    candidate_names(prefix, index)
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn candidates_for_single_digit_index() {
        assert_eq!(
            candidate_names("item", 7),
            ["item7.html".to_string(), "item07.html".to_string()]
        );
    }

    #[test]
    fn candidates_coincide_for_two_digit_index() {
        assert_eq!(
            candidate_names("item", 42),
            ["item42.html".to_string(), "item42.html".to_string()]
        );
    }

    #[test]
    fn unpadded_name_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("item7.html"), "a").unwrap();
        fs::write(tmp.path().join("item07.html"), "b").unwrap();

        let found = locate_document(tmp.path(), "item", 7).unwrap();
        assert_eq!(found.file_name().unwrap(), "item7.html");
    }

    #[test]
    fn padded_name_is_fallback() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("item07.html"), "b").unwrap();

        let found = locate_document(tmp.path(), "item", 7).unwrap();
        assert_eq!(found.file_name().unwrap(), "item07.html");
    }

    #[test]
    fn missing_page_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(locate_document(tmp.path(), "item", 3), None);
    }

    #[test]
    fn directories_do_not_count() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("item5.html")).unwrap();
        assert_eq!(locate_document(tmp.path(), "item", 5), None);
    }
}
