//! Folio Core Library
//!
//! Project entry schema, frontmatter reading, image resolution, and site
//! configuration for the Folio portfolio content validator.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod image;
pub mod schema;

pub use config::{Config, Integration};
pub use error::{CoreError, Result};
pub use frontmatter::{RawRecord, parse_record};
pub use image::{FsImageResolver, ImageError, ImageFormat, ImageRef, ImageResolver};
pub use schema::{FieldViolation, ProjectEntry, SchemaValidationError, ViolationReason, validate};
