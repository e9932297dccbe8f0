//! Slug derivation for collection entries.

use std::path::{Component, Path};

/// Derive an entry slug from its path relative to the collection directory.
///
/// - `portfolio-site.md` → `portfolio-site`
/// - `2024/Weather App.md` → `2024/weather-app`
/// - `chess-engine/index.mdx` → `chess-engine`
///
/// Returns `None` for paths without a file stem.
pub fn slug_for(relative: &Path) -> Option<String> {
    let stem = relative.file_stem()?.to_str()?;

    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str().map(slugify_segment),
            _ => None,
        })
        .collect();

    if stem != "index" || segments.is_empty() {
        segments.push(slugify_segment(stem));
    }

    let slug = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    (!slug.is_empty()).then_some(slug)
}

/// Lowercase a path segment, turning whitespace into `-` and dropping
/// punctuation other than `-` and `_`.
fn slugify_segment(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_slug() {
        assert_eq!(
            slug_for(Path::new("portfolio-site.md")).as_deref(),
            Some("portfolio-site")
        );
    }

    #[test]
    fn test_nested_slug_is_normalized() {
        assert_eq!(
            slug_for(Path::new("2024/Weather App.md")).as_deref(),
            Some("2024/weather-app")
        );
    }

    #[test]
    fn test_index_file_uses_directory() {
        assert_eq!(
            slug_for(Path::new("chess-engine/index.mdx")).as_deref(),
            Some("chess-engine")
        );
    }

    #[test]
    fn test_top_level_index() {
        assert_eq!(slug_for(Path::new("index.md")).as_deref(), Some("index"));
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(
            slug_for(Path::new("Rust & WASM!.md")).as_deref(),
            Some("rust--wasm")
        );
    }

    #[test]
    fn test_unicode_is_kept() {
        assert_eq!(
            slug_for(Path::new("Café Menu.md")).as_deref(),
            Some("café-menu")
        );
    }
}
