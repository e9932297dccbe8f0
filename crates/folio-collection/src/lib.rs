//! Folio Collection Library
//!
//! Loads the `projects` content collection from disk and validates every
//! entry against the project schema.
//!
//! # Modules
//!
//! - [`slug`] - Slug derivation from content file paths
//! - [`collector`] - Collection walking, parallel validation, and reporting

pub mod collector;
pub mod slug;

pub use collector::{
    CollectedProject, CollectorError, EntryFailure, ProjectCollection, ProjectCollector,
};
pub use slug::slug_for;
