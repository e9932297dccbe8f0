//! End-to-end tests for Folio.
//!
//! These tests load the sample site and verify its project collection.

use std::path::Path;

use folio_collection::ProjectCollector;
use folio_core::{Config, ImageFormat, Integration};

const SAMPLE_CONFIG: &str = "../../site/folio.toml";

fn sample_config() -> Option<Config> {
    let config_path = Path::new(SAMPLE_CONFIG);
    if !config_path.exists() {
        // Skip if running from different working directory
        return None;
    }
    Some(Config::load(config_path).expect("Config should load"))
}

#[test]
fn test_sample_site_config_loads() {
    let Some(config) = sample_config() else {
        return;
    };

    assert_eq!(config.site.url, "https://ryanhailey21.github.io");
    assert_eq!(config.site.base_path, "/");
    assert!(config.has_integration(Integration::Tailwind));
    assert!(config.has_integration(Integration::Mdx));
}

#[test]
fn test_sample_site_projects_validate() {
    let Some(config) = sample_config() else {
        return;
    };

    let collection = ProjectCollector::new(config, "../../site")
        .collect()
        .expect("collect");

    assert!(collection.is_valid(), "{:?}", collection.failures);
    assert!(collection.all_warnings().is_empty());

    let slugs: Vec<_> = collection.projects.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["portfolio-site", "weather-dashboard"]);
}

#[test]
fn test_sample_site_portfolio_entry() {
    let Some(config) = sample_config() else {
        return;
    };

    let collection = ProjectCollector::new(config, "../../site")
        .collect()
        .expect("collect");
    let entry = &collection.get("portfolio-site").expect("entry").entry;

    assert_eq!(entry.title, "Portfolio Site");
    assert_eq!(entry.description, "A site.");
    assert_eq!(entry.image.src, "./cover.png");
    assert_eq!(entry.image.format, ImageFormat::Png);
    assert_eq!(entry.tags, vec!["astro"]);
    assert_eq!(entry.technologies, vec!["typescript"]);
    assert!(entry.github_url.is_none());
    assert!(entry.video_url.is_none());
}

#[test]
fn test_sample_site_mdx_entry() {
    let Some(config) = sample_config() else {
        return;
    };

    let collection = ProjectCollector::new(config, "../../site")
        .collect()
        .expect("collect");
    let entry = &collection.get("weather-dashboard").expect("entry").entry;

    assert_eq!(
        entry.technologies,
        vec!["react", "typescript", "tailwind"]
    );
    assert_eq!(
        entry.github_url.as_deref(),
        Some("https://github.com/RyanHailey21/weather-dashboard")
    );
    assert!(entry.url_warnings().is_empty());
}
