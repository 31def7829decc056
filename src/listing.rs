//! Catalogue index page generation.
//!
//! Scans the thumbnail directory for numeric-stem JPEGs and writes a fixed-
//! template HTML listing, one link per present work, in numeric order. Works
//! missing from the configured range are reported so gaps surface before the
//! page goes live.
//!
//! Each link targets the page filename the locator actually resolves
//! (unpadded names take priority, same as the reorder batch); when no page
//! exists yet the link falls back to the zero-padded convention.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/) — compile-time
//! checked templates with auto-escaped interpolation.

use crate::config::CatalogueConfig;
use crate::locate;
use maud::{DOCTYPE, html};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("thumbnail directory not found: {0}")]
    MissingThumbsDir(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one listing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReport {
    /// Works linked from the listing page.
    pub entries: usize,
    /// Indices in the configured range with no thumbnail on disk.
    pub missing: Vec<u32>,
}

/// Collect the numeric stems of the JPEG thumbnails in a directory.
fn numbered_thumbs(dir: &Path) -> Result<BTreeSet<u32>, std::io::Error> {
    let mut numbers = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
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

/// Render the listing page for the present works, as `(number, filename)`.
fn render_listing(title: &str, link_prefix: &str, entries: &[(u32, String)]) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                ul {
                    @for (n, filename) in entries {
                        li {
                            a href=(format!("{link_prefix}{filename}")) {
                                (format!("{n:02}"))
                            }
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}

/// Generate the catalogue index page.
pub fn generate_listing(
    root: &Path,
    config: &CatalogueConfig,
) -> Result<ListingReport, ListingError> {
    let thumbs_dir = root.join(&config.thumbnails.output_dir);
    if !thumbs_dir.is_dir() {
        return Err(ListingError::MissingThumbsDir(thumbs_dir));
    }

    let present = numbered_thumbs(&thumbs_dir)?;
    let missing: Vec<u32> = (config.range.start..=config.range.end)
        .filter(|n| !present.contains(n))
        .collect();

    // Link the filename the locator resolves; fall back to the zero-padded
    // convention for works whose page does not exist yet.
    let pages_dir = root.join(&config.pages.dir);
    let entries: Vec<(u32, String)> = present
        .iter()
        .map(|&n| {
            let filename = locate::locate_document(&pages_dir, &config.pages.prefix, n)
                .and_then(|path| path.file_name().map(|f| f.to_string_lossy().into_owned()))
                .unwrap_or_else(|| format!("{}{n:02}.html", config.pages.prefix));
            (n, filename)
        })
        .collect();

    let page = render_listing(&config.listing.title, &config.listing.link_prefix, &entries);

    let out_path = root.join(&config.listing.output_file);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, page)?;

    Ok(ListingReport {
        entries: present.len(),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RangeConfig;
    use tempfile::TempDir;

    fn config(start: u32, end: u32) -> CatalogueConfig {
        CatalogueConfig {
            range: RangeConfig { start, end },
            ..CatalogueConfig::default()
        }
    }

    fn add_thumb(root: &Path, name: &str) {
        let dir = root.join("assets/thumbs");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), "jpg bytes").unwrap();
    }

    #[test]
    fn listing_links_present_works_in_order() {
        let tmp = TempDir::new().unwrap();
        add_thumb(tmp.path(), "3.jpg");
        add_thumb(tmp.path(), "1.jpg");
        add_thumb(tmp.path(), "12.jpg");

        let report = generate_listing(tmp.path(), &config(1, 12)).unwrap();
        assert_eq!(report.entries, 3);

        let page = fs::read_to_string(tmp.path().join("catalogue/index.html")).unwrap();
        assert!(page.contains(r#"href="../item01.html""#));
        assert!(page.contains(r#"href="../item03.html""#));
        assert!(page.contains(r#"href="../item12.html""#));
        // Numeric order, not lexicographic
        let p1 = page.find("item01.html").unwrap();
        let p3 = page.find("item03.html").unwrap();
        let p12 = page.find("item12.html").unwrap();
        assert!(p1 < p3 && p3 < p12);
    }

    #[test]
    fn missing_numbers_are_reported() {
        let tmp = TempDir::new().unwrap();
        add_thumb(tmp.path(), "1.jpg");
        add_thumb(tmp.path(), "4.jpg");

        let report = generate_listing(tmp.path(), &config(1, 5)).unwrap();
        assert_eq!(report.missing, vec![2, 3, 5]);
    }

    #[test]
    fn non_numeric_and_non_jpg_files_ignored() {
        let tmp = TempDir::new().unwrap();
        add_thumb(tmp.path(), "1.jpg");
        add_thumb(tmp.path(), "cover.jpg");
        add_thumb(tmp.path(), "2.png");

        let report = generate_listing(tmp.path(), &config(1, 1)).unwrap();
        assert_eq!(report.entries, 1);
    }

    #[test]
    fn links_follow_the_filename_the_locator_resolves() {
        let tmp = TempDir::new().unwrap();
        add_thumb(tmp.path(), "1.jpg");
        add_thumb(tmp.path(), "2.jpg");
        // Work 1 has an unpadded page on disk; work 2 has no page yet
        fs::write(tmp.path().join("item1.html"), "page").unwrap();

        generate_listing(tmp.path(), &config(1, 2)).unwrap();

        let page = fs::read_to_string(tmp.path().join("catalogue/index.html")).unwrap();
        assert!(page.contains(r#"href="../item1.html""#));
        assert!(page.contains(r#"href="../item02.html""#));
    }

    #[test]
    fn title_appears_in_page() {
        let tmp = TempDir::new().unwrap();
        add_thumb(tmp.path(), "1.jpg");

        let mut cfg = config(1, 1);
        cfg.listing.title = "Werkverzeichnis".to_string();
        generate_listing(tmp.path(), &cfg).unwrap();

        let page = fs::read_to_string(tmp.path().join("catalogue/index.html")).unwrap();
        assert!(page.contains("<title>Werkverzeichnis</title>"));
    }

    #[test]
    fn output_directory_is_created() {
        let tmp = TempDir::new().unwrap();
        add_thumb(tmp.path(), "1.jpg");

        let mut cfg = config(1, 1);
        cfg.listing.output_file = "deep/nested/index.html".to_string();
        generate_listing(tmp.path(), &cfg).unwrap();
        assert!(tmp.path().join("deep/nested/index.html").is_file());
    }

    #[test]
    fn missing_thumbs_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            generate_listing(tmp.path(), &config(1, 5)),
            Err(ListingError::MissingThumbsDir(_))
        ));
    }
}
