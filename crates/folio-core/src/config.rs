//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Name of the collection holding portfolio project entries.
pub const PROJECT_COLLECTION: &str = "projects";

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Deployed site URL (e.g., "https://example.github.io").
    pub url: String,

    /// Path the site is served under (e.g., "/portfolio").
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Site builder integrations in use.
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

/// Site builder integrations that affect content handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Integration {
    /// Utility CSS; does not affect content.
    Tailwind,
    /// Enables `.mdx` content files.
    Mdx,
}

/// Content configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding content collections, relative to the site root.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content")
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.url.is_empty() {
            return Err(CoreError::config("site.url cannot be empty"));
        }

        url::Url::parse(&self.site.url).map_err(|e| {
            CoreError::config_with_source(
                format!("site.url is not an absolute URL: {}", self.site.url),
                e,
            )
        })?;

        if !self.site.base_path.starts_with('/') {
            return Err(CoreError::config(format!(
                "site.base_path must start with '/': {}",
                self.site.base_path
            )));
        }

        if self.site.url.ends_with('/') {
            tracing::warn!("site.url should not have a trailing slash");
        }

        Ok(())
    }

    /// Whether an integration is enabled.
    pub fn has_integration(&self, integration: Integration) -> bool {
        self.site.integrations.contains(&integration)
    }

    /// File extensions read as content entries.
    pub fn content_extensions(&self) -> Vec<&'static str> {
        let mut extensions = vec!["md"];
        if self.has_integration(Integration::Mdx) {
            extensions.push("mdx");
        }
        extensions
    }

    /// Directory of the project collection under a site root.
    pub fn collection_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.content.dir).join(PROJECT_COLLECTION)
    }

    /// Get the full URL for a path, including the base path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.url.trim_end_matches('/');
        let base_path = self.site.base_path.trim_matches('/');
        let path = path.trim_start_matches('/');

        match (base_path.is_empty(), path.is_empty()) {
            (true, _) => format!("{base}/{path}"),
            (false, true) => format!("{base}/{base_path}/"),
            (false, false) => format!("{base}/{base_path}/{path}"),
        }
    }
}
