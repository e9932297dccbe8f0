//! Error types for the Folio core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaValidationError;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Folio.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frontmatter parsing error.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// A project entry failed schema validation.
    #[error("Schema error in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaValidationError,
    },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attach a file path to a schema validation failure.
    pub fn schema(path: impl Into<PathBuf>, source: SchemaValidationError) -> Self {
        Self::Schema {
            path: path.into(),
            source,
        }
    }

    /// The schema violations carried by this error, if any.
    pub fn as_schema(&self) -> Option<&SchemaValidationError> {
        match self {
            Self::Schema { source, .. } => Some(source),
            _ => None,
        }
    }
}
