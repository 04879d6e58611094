//! Build configuration.
//!
//! Everything the pipeline needs beyond the catalog itself: where the source
//! and output trees live, the public base URL, the literal template markers,
//! and the placeholder text. Values come from stock defaults overlaid with an
//! optional `emugames.toml` in the source directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://imadering.github.io/emugames-list/"
//! site_name = "EmuGames List"
//! catalog_file = "Systems.ini"      # relative to the source directory
//! template_file = "index.html"      # relative to the source directory
//! static_dir = "assets"             # mirrored into the output if present
//! placeholder = "No description available for this game."
//!
//! [markers]
//! title = "<title>EmuGames List</title>"
//! meta_description = '<meta name="description" content="Retro games catalog" />'
//! body_close = "</body>"
//! head_close = "</head>"
//!
//! [sitemap]
//! lastmod = true                    # stamp each URL with the build date
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Name of the optional config file looked up in the source directory.
pub const CONFIG_FILE_NAME: &str = "emugames.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site settings loaded from `emugames.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute URL the output directory is served from.
    pub base_url: String,
    /// Brand appended to system page titles.
    pub site_name: String,
    /// Root catalog, relative to the source directory.
    pub catalog_file: String,
    /// HTML template, relative to the source directory.
    pub template_file: String,
    /// Static assets mirrored into the output root when the directory exists.
    pub static_dir: String,
    /// Entry description used when neither `Info.txt` nor `Comment` exist.
    pub placeholder: String,
    /// Literal strings located in the template.
    pub markers: TemplateMarkers,
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://imadering.github.io/emugames-list/".to_string(),
            site_name: "EmuGames List".to_string(),
            catalog_file: "Systems.ini".to_string(),
            template_file: "index.html".to_string(),
            static_dir: "assets".to_string(),
            placeholder: "No description available for this game.".to_string(),
            markers: TemplateMarkers::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate values the pipeline cannot recover from at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Validation(format!("base_url '{}' is not a URL: {e}", self.base_url))
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::Validation(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }
        if self.catalog_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog_file must not be empty".into(),
            ));
        }
        if self.template_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "template_file must not be empty".into(),
            ));
        }
        let m = &self.markers;
        for (name, value) in [
            ("markers.title", &m.title),
            ("markers.meta_description", &m.meta_description),
            ("markers.body_close", &m.body_close),
            ("markers.head_close", &m.head_close),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Literal template fragments the page renderer replaces or inserts before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateMarkers {
    pub title: String,
    pub meta_description: String,
    pub body_close: String,
    pub head_close: String,
}

impl Default for TemplateMarkers {
    fn default() -> Self {
        Self {
            title: "<title>EmuGames List</title>".to_string(),
            meta_description: r#"<meta name="description" content="Retro games catalog" />"#
                .to_string(),
            body_close: "</body>".to_string(),
            head_close: "</head>".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Emit `<lastmod>` with the build date for every URL.
    pub lastmod: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self { lastmod: true }
    }
}

/// Everything one pipeline run needs, passed explicitly into [`crate::pipeline`].
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding the catalog, template, and `Systems/` tree.
    pub source_dir: PathBuf,
    /// Directory regenerated from scratch on every build.
    pub output_dir: PathBuf,
    pub site: SiteConfig,
}

impl BuildConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, site: SiteConfig) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            site,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.source_dir.join(&self.site.catalog_file)
    }

    pub fn template_path(&self) -> PathBuf {
        self.source_dir.join(&self.site.template_file)
    }

    pub fn static_path(&self) -> PathBuf {
        self.source_dir.join(&self.site.static_dir)
    }

    /// `Systems/` under the source directory.
    pub fn systems_root(&self) -> PathBuf {
        self.source_dir.join(SYSTEMS_DIR)
    }
}

/// Directory holding one subdirectory per system, in source and output.
pub const SYSTEMS_DIR: &str = "Systems";

/// Load a config file, falling back to stock defaults when it is absent.
///
/// Missing keys keep their defaults; unknown keys and invalid values are
/// errors.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `emugames.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# EmuGames List build configuration
# ==================================
# All settings are optional. Values shown below are the defaults.
# Place this file as emugames.toml next to Systems.ini.
# Unknown keys will cause an error.

# Absolute URL the generated directory is published under. Sitemap
# entries are resolved against it.
base_url = "https://imadering.github.io/emugames-list/"

# Appended to system page titles: "NES Games List | EmuGames List".
site_name = "EmuGames List"

# Root catalog listing every system, relative to the source directory.
catalog_file = "Systems.ini"

# HTML template every page is rendered from.
template_file = "index.html"

# Directory of static files (CSS, JS, icons) mirrored into the output root.
# Ignored when it does not exist.
static_dir = "assets"

# Description used for entries with neither Info.txt nor a Comment field.
placeholder = "No description available for this game."

# ---------------------------------------------------------------------------
# Template markers: literal text searched for in the template. The title and
# meta description tags are replaced; the SEO block goes before body_close
# and the redirect script before head_close.
# ---------------------------------------------------------------------------
[markers]
title = "<title>EmuGames List</title>"
meta_description = '<meta name="description" content="Retro games catalog" />'
body_close = "</body>"
head_close = "</head>"

[sitemap]
# Stamp every URL with the build date. Disable for byte-identical rebuilds.
lastmod = true
"##
}
