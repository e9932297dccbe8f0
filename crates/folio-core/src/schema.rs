//! Project entry schema.
//!
//! Every file in the `projects` collection must describe one [`ProjectEntry`].
//! [`validate`] checks a raw frontmatter record against the schema in a single
//! pass and reports all violated fields together, so an author can fix a
//! broken entry without re-running the check once per mistake.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::{
    frontmatter::RawRecord,
    image::{ImageRef, ImageResolver},
};

/// Field names in declaration order.
pub const FIELDS: [&str; 7] = [
    "title",
    "description",
    "image",
    "tags",
    "technologies",
    "githubUrl",
    "videoUrl",
];

/// A validated portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    /// Project title (non-empty).
    pub title: String,

    /// Short description (non-empty).
    pub description: String,

    /// Cover image.
    pub image: ImageRef,

    /// Display tags, in authored order.
    pub tags: Vec<String>,

    /// Technologies used, in authored order.
    pub technologies: Vec<String>,

    /// Source repository link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    /// Demo video link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl ProjectEntry {
    /// Validate a raw record into a project entry.
    pub fn from_record(
        record: &RawRecord,
        resolver: &dyn ImageResolver,
    ) -> Result<Self, SchemaValidationError> {
        validate(record, resolver)
    }

    /// Optional link fields that are not absolute http(s) URLs.
    ///
    /// The schema accepts any string for these fields; a link that cannot be
    /// opened is still worth telling the author about.
    pub fn url_warnings(&self) -> Vec<String> {
        [("githubUrl", &self.github_url), ("videoUrl", &self.video_url)]
            .into_iter()
            .filter_map(|(field, value)| {
                let value = value.as_deref()?;
                match url::Url::parse(value) {
                    Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => None,
                    Ok(parsed) => Some(format!(
                        "{field}: unexpected URL scheme '{}' in '{value}'",
                        parsed.scheme()
                    )),
                    Err(e) => Some(format!("{field}: '{value}' is not a valid URL ({e})")),
                }
            })
            .collect()
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// Required field is absent.
    Missing,
    /// Text field is empty or whitespace only.
    Empty,
    /// Field holds a value of the wrong kind.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// A sequence element is not text.
    InvalidItem { index: usize, found: &'static str },
    /// The image resolver could not resolve the path.
    UnresolvedImage(String),
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Empty => write!(f, "must not be empty"),
            Self::WrongType { expected, found } => write!(f, "expected {expected}, found {found}"),
            Self::InvalidItem { index, found } => {
                write!(f, "item {index} must be a string, found {found}")
            }
            Self::UnresolvedImage(reason) => write!(f, "unresolved image: {reason}"),
        }
    }
}

/// A violated field and the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: ViolationReason,
}

impl FieldViolation {
    pub fn new(field: &'static str, reason: ViolationReason) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validation failure listing every violated field of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    violations: Vec<FieldViolation>,
}

impl SchemaValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// All violations, in field declaration order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the violated fields.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }

    /// The violation recorded for `field`, if any.
    pub fn violation(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}

/// Validate a raw record against the project schema.
pub fn validate(
    record: &RawRecord,
    resolver: &dyn ImageResolver,
) -> Result<ProjectEntry, SchemaValidationError> {
    let mut violations = Vec::new();

    let title = required_text(record, "title", &mut violations);
    let description = required_text(record, "description", &mut violations);
    let image = required_image(record, resolver, &mut violations);
    let tags = required_text_list(record, "tags", &mut violations);
    let technologies = required_text_list(record, "technologies", &mut violations);
    let github_url = optional_text(record, "githubUrl", &mut violations);
    let video_url = optional_text(record, "videoUrl", &mut violations);

    if !violations.is_empty() {
        return Err(SchemaValidationError::new(violations));
    }

    match (title, description, image, tags, technologies) {
        (Some(title), Some(description), Some(image), Some(tags), Some(technologies)) => {
            Ok(ProjectEntry {
                title,
                description,
                image,
                tags,
                technologies,
                github_url: github_url.flatten(),
                video_url: video_url.flatten(),
            })
        }
        // Every `None` above pushed a violation.
        _ => Err(SchemaValidationError::new(violations)),
    }
}

/// Record keys that are not part of the schema.
pub fn unknown_fields(record: &RawRecord) -> Vec<&str> {
    record
        .keys()
        .map(String::as_str)
        .filter(|key| !FIELDS.iter().any(|field| field == key))
        .collect()
}

fn required_text(
    record: &RawRecord,
    field: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let Some(value) = record.get(field) else {
        violations.push(FieldViolation::new(field, ViolationReason::Missing));
        return None;
    };

    let Some(text) = value.as_str() else {
        violations.push(wrong_type(field, "string", value));
        return None;
    };

    if text.trim().is_empty() {
        violations.push(FieldViolation::new(field, ViolationReason::Empty));
        return None;
    }

    Some(text.to_string())
}

fn required_image(
    record: &RawRecord,
    resolver: &dyn ImageResolver,
    violations: &mut Vec<FieldViolation>,
) -> Option<ImageRef> {
    let src = required_text(record, "image", violations)?;

    match resolver.resolve(&src) {
        Ok(image) => Some(image),
        Err(e) => {
            violations.push(FieldViolation::new(
                "image",
                ViolationReason::UnresolvedImage(e.to_string()),
            ));
            None
        }
    }
}

fn required_text_list(
    record: &RawRecord,
    field: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<Vec<String>> {
    let Some(value) = record.get(field) else {
        violations.push(FieldViolation::new(field, ViolationReason::Missing));
        return None;
    };

    let Some(items) = value.as_sequence() else {
        violations.push(wrong_type(field, "sequence of strings", value));
        return None;
    };

    let mut texts = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(text) => texts.push(text.to_string()),
            None => {
                // Only the first bad item is reported per field.
                violations.push(FieldViolation::new(
                    field,
                    ViolationReason::InvalidItem {
                        index,
                        found: value_kind(item),
                    },
                ));
                return None;
            }
        }
    }

    Some(texts)
}

/// `Some(None)` for an absent field, `None` for a violation.
fn optional_text(
    record: &RawRecord,
    field: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<Option<String>> {
    let Some(value) = record.get(field) else {
        return Some(None);
    };

    match value.as_str() {
        Some(text) => Some(Some(text.to_string())),
        None => {
            violations.push(wrong_type(field, "string", value));
            None
        }
    }
}

fn wrong_type(field: &'static str, expected: &'static str, value: &Value) -> FieldViolation {
    FieldViolation::new(
        field,
        ViolationReason::WrongType {
            expected,
            found: value_kind(value),
        },
    )
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
