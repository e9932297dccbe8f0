//! Frontmatter reading for content files.
//!
//! A content file starts with a YAML block fenced by `---` lines or a TOML
//! block fenced by `+++` lines. The block is read into an untyped
//! [`RawRecord`]; shaping it into a project entry is the job of
//! [`crate::schema`].

use std::{collections::BTreeMap, path::Path};

use crate::error::{CoreError, Result};

/// Untyped frontmatter fields keyed by name.
pub type RawRecord = BTreeMap<String, serde_yaml::Value>;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// The closing delimiter must sit on a line of its own, so a `---` inside a
/// field value does not end the block early. Returns `None` when the content
/// does not open with a delimiter or the block is never closed.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();
    let rest = &content[delimiter.len()..];
    let after_open = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = after_open[..offset].trim();
            let body = after_open[offset + line.len()..].trim_start();
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Read the frontmatter of a content file into a raw record.
///
/// Content without frontmatter yields an empty record and the full content as
/// body; the schema then reports every required field as missing.
pub fn parse_record(content: &str, path: &Path) -> Result<(RawRecord, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        if opens_unterminated_block(content) {
            return Err(CoreError::frontmatter(path, "frontmatter block is not closed"));
        }
        return Ok((RawRecord::new(), content.to_string()));
    };

    if fm_str.is_empty() {
        return Ok((RawRecord::new(), body.to_string()));
    }

    let record: RawRecord = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((record, body.to_string()))
}

fn opens_unterminated_block(content: &str) -> bool {
    let first_line = content
        .trim_start_matches('\u{feff}')
        .trim_start()
        .lines()
        .next()
        .unwrap_or("")
        .trim_end();
    first_line == "---" || first_line == "+++"
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Portfolio Site"
---

Project write-up."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert_eq!(body, "Project write-up.");
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = "+++\ntitle = \"Portfolio Site\"\n+++\n\nProject write-up.";

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert_eq!(body, "Project write-up.");
    }

    #[test]
    fn test_delimiter_inside_value_does_not_close() {
        let content = "---\ndescription: \"before --- after\"\n---\nBody";

        let (_, fm, body) = split_frontmatter(content).expect("split");
        assert!(fm.contains("before --- after"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(split_frontmatter("Just a body.").is_none());

        let (record, body) = parse_record("Just a body.", Path::new("p.md")).expect("parse");
        assert!(record.is_empty());
        assert_eq!(body, "Just a body.");
    }

    #[test]
    fn test_unclosed_frontmatter_is_an_error() {
        let err = parse_record("---\ntitle: x\n", Path::new("p.md")).unwrap_err();
        assert!(err.to_string().contains("not closed"));
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (record, body) = parse_record("---\n---\nBody", Path::new("p.md")).expect("parse");
        assert!(record.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_yaml_record() {
        let content = r#"---
title: "Portfolio Site"
tags:
  - astro
  - tailwind
---
Body"#;

        let (record, _) = parse_record(content, Path::new("p.md")).expect("parse");
        assert_eq!(record.get("title"), Some(&Value::from("Portfolio Site")));
        let tags = record.get("tags").and_then(Value::as_sequence).expect("tags");
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_parse_toml_record() {
        let content = "+++\ntitle = \"Portfolio Site\"\ntags = [\"astro\"]\n+++\nBody";

        let (record, _) = parse_record(content, Path::new("p.md")).expect("parse");
        assert_eq!(record.get("title"), Some(&Value::from("Portfolio Site")));
        assert!(record.get("tags").is_some_and(Value::is_sequence));
    }

    #[test]
    fn test_malformed_yaml_reports_path() {
        let content = "---\ntitle: [unclosed\n---\nBody";

        let err = parse_record(content, Path::new("projects/bad.md")).unwrap_err();
        assert!(err.to_string().contains("projects/bad.md"));
        assert!(matches!(err, CoreError::Frontmatter { .. }));
    }

    #[test]
    fn test_malformed_toml_reports_path() {
        let content = "+++
title = \"unclosed\n+++\nBody";

        let err = parse_record(content, Path::new("projects/bad.md")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Frontmatter { ref path, .. } if path == Path::new("projects/bad.md")
        ));
    }
}
