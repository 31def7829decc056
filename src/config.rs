//! Catalogue configuration.
//!
//! Handles loading and validating `catalogue.toml` from the catalogue root.
//! Every field has a default matching the live catalogue, so a missing file
//! is fine and user files only need the values they override. Unknown keys
//! are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [range]
//! start = 1                 # First catalogue index (inclusive)
//! end = 49                  # Last catalogue index (inclusive)
//!
//! [pages]
//! dir = "."                 # Directory holding the item pages
//! prefix = "item"           # Page filename prefix (item7.html / item07.html)
//!
//! [thumbnails]
//! source_dir = "assets/images"
//! output_dir = "assets/thumbs"
//! width = 360               # Target width in pixels
//! height = 480              # Target height in pixels (3:4 portrait)
//! quality = 82              # JPEG quality (0-100)
//! mode = "cover"            # "cover" (center crop) or "contain" (letterbox)
//!
//! [listing]
//! output_file = "catalogue/index.html"
//! title = "Catalogue"
//! link_prefix = "../"       # Prepended to page links from the listing page
//!
//! [audit]
//! asset_dir = "assets/catalogue"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file expected in the catalogue root.
pub const CONFIG_FILENAME: &str = "catalogue.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Toolkit configuration loaded from `catalogue.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogueConfig {
    /// Inclusive index range of catalogue entries.
    pub range: RangeConfig,
    /// Where the item pages live and how they are named.
    pub pages: PagesConfig,
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
    /// Catalogue index page settings.
    pub listing: ListingConfig,
    /// Numbering audit settings.
    pub audit: AuditConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl CatalogueConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.range.start > self.range.end {
            return Err(ConfigError::Validation(
                "range.start must not exceed range.end".into(),
            ));
        }
        if self.pages.prefix.is_empty() {
            return Err(ConfigError::Validation("pages.prefix must not be empty".into()));
        }
        if self.thumbnails.width == 0 || self.thumbnails.height == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width and thumbnails.height must be non-zero".into(),
            ));
        }
        if self.thumbnails.quality > 100 {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 0-100".into(),
            ));
        }
        Ok(())
    }
}

/// Inclusive index range of catalogue entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeConfig {
    pub start: u32,
    pub end: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self { start: 1, end: 49 }
    }
}

/// Page directory and filename convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// Directory holding the item pages, relative to the catalogue root.
    pub dir: String,
    /// Filename prefix; pages are `{prefix}{N}.html` or `{prefix}{NN}.html`.
    pub prefix: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            prefix: "item".to_string(),
        }
    }
}

/// How a source image is fitted into the thumbnail frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbMode {
    /// Scale to fill the frame, center-cropping the overflow.
    Cover,
    /// Scale to fit inside the frame, padding with a light-grey canvas.
    Contain,
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Directory of source images, relative to the catalogue root.
    pub source_dir: String,
    /// Directory thumbnails are written to, relative to the catalogue root.
    pub output_dir: String,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// JPEG encoding quality (0 = worst, 100 = best).
    pub quality: u8,
    /// Fit mode.
    pub mode: ThumbMode,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            source_dir: "assets/images".to_string(),
            output_dir: "assets/thumbs".to_string(),
            width: 360,
            height: 480,
            quality: 82,
            mode: ThumbMode::Cover,
        }
    }
}

/// Catalogue index page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Output file, relative to the catalogue root.
    pub output_file: String,
    /// Page `<title>` and heading.
    pub title: String,
    /// Prepended to page hrefs; the listing usually lives one level below
    /// the item pages.
    pub link_prefix: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            output_file: "catalogue/index.html".to_string(),
            title: "Catalogue".to_string(),
            link_prefix: "../".to_string(),
        }
    }
}

/// Numbering audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Directory of full-size catalogue JPEGs referenced by the item pages,
    /// relative to the catalogue root. Also the path as it appears inside
    /// `src="…"` attributes.
    pub asset_dir: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            asset_dir: "assets/catalogue".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel thumbnail workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load `catalogue.toml` from the catalogue root, falling back to defaults
/// when the file does not exist. The result is validated either way.
pub fn load_config(root: &Path) -> Result<CatalogueConfig, ConfigError> {
    let path = root.join(CONFIG_FILENAME);
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        CatalogueConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A stock `catalogue.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# kustos configuration. All options are optional - defaults shown.

[range]
start = 1                 # First catalogue index (inclusive)
end = 49                  # Last catalogue index (inclusive)

[pages]
dir = "."                 # Directory holding the item pages
prefix = "item"           # Page filename prefix (item7.html / item07.html)

[thumbnails]
source_dir = "assets/images"
output_dir = "assets/thumbs"
width = 360               # Target width in pixels
height = 480              # Target height in pixels (3:4 portrait)
quality = 82              # JPEG quality (0-100)
mode = "cover"            # "cover" (center crop) or "contain" (letterbox)

[listing]
output_file = "catalogue/index.html"
title = "Catalogue"
link_prefix = "../"       # Prepended to page links from the listing page

[audit]
asset_dir = "assets/catalogue"

[processing]
# max_processes = 4       # Max parallel workers (omit for auto = CPU cores)
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_live_catalogue() {
        let config = CatalogueConfig::default();
        assert_eq!(config.range.start, 1);
        assert_eq!(config.range.end, 49);
        assert_eq!(config.pages.prefix, "item");
        assert_eq!(config.thumbnails.width, 360);
        assert_eq!(config.thumbnails.height, 480);
        assert_eq!(config.thumbnails.mode, ThumbMode::Cover);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.range.end, 49);
    }

    #[test]
    fn partial_file_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "[range]\nstart = 10\nend = 20\n\n[thumbnails]\nmode = \"contain\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.range.start, 10);
        assert_eq!(config.range.end, 20);
        assert_eq!(config.thumbnails.mode, ThumbMode::Contain);
        // Untouched values keep their defaults
        assert_eq!(config.thumbnails.quality, 82);
        assert_eq!(config.pages.prefix, "item");
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILENAME), "[range]\nstrat = 1\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn inverted_range_fails_validation() {
        let config = CatalogueConfig {
            range: RangeConfig { start: 9, end: 3 },
            ..CatalogueConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn excessive_quality_fails_validation() {
        let mut config = CatalogueConfig::default();
        config.thumbnails.quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_dimension_fails_validation() {
        let mut config = CatalogueConfig::default();
        config.thumbnails.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_parses_and_matches_defaults() {
        let parsed: CatalogueConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = CatalogueConfig::default();
        assert_eq!(parsed.range.start, defaults.range.start);
        assert_eq!(parsed.thumbnails.quality, defaults.thumbnails.quality);
        assert_eq!(parsed.listing.output_file, defaults.listing.output_file);
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let cores = std::thread::available_parallelism().unwrap().get();
        let config = ProcessingConfig {
            max_processes: Some(cores + 100),
        };
        assert_eq!(effective_threads(&config), cores);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
        let one = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&one), 1);
    }
}
