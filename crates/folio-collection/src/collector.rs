//! Project collection loading.
//!
//! Walks the `projects` collection directory, validates every content file
//! against the project schema, and gathers the results into a
//! [`ProjectCollection`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use folio_core::{
    Config, CoreError, FsImageResolver, ProjectEntry, frontmatter::parse_record, schema,
};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::slug::slug_for;

/// Collection loading errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// A validated entry and where it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedProject {
    /// Slug derived from the file path.
    pub slug: String,

    /// Content file the entry was read from.
    pub source_path: PathBuf,

    /// The validated entry.
    #[serde(flatten)]
    pub entry: ProjectEntry,

    /// Non-fatal findings for this entry.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// A content file that could not be turned into an entry.
#[derive(Debug)]
pub struct EntryFailure {
    pub path: PathBuf,
    pub error: CoreError,
}

/// Result of loading the project collection.
#[derive(Debug, Default)]
pub struct ProjectCollection {
    /// Valid entries, sorted by slug.
    pub projects: Vec<CollectedProject>,

    /// Invalid entries, sorted by path.
    pub failures: Vec<EntryFailure>,

    /// Collection-level warnings.
    pub warnings: Vec<String>,
}

impl ProjectCollection {
    /// Whether every content file produced a valid entry.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of content files examined.
    pub fn total(&self) -> usize {
        self.projects.len() + self.failures.len()
    }

    /// Collection warnings followed by per-entry warnings.
    pub fn all_warnings(&self) -> Vec<String> {
        let mut warnings = self.warnings.clone();
        for project in &self.projects {
            for warning in &project.warnings {
                warnings.push(format!("{}: {warning}", project.source_path.display()));
            }
        }
        warnings
    }

    /// Look up a project by slug.
    ///
    /// When several entries share a slug, the one with the lowest source path
    /// is returned.
    pub fn get(&self, slug: &str) -> Option<&CollectedProject> {
        let idx = self.projects.partition_point(|p| p.slug.as_str() < slug);
        self.projects.get(idx).filter(|p| p.slug == slug)
    }
}

/// Loads and validates the project collection of a site.
#[derive(Debug)]
pub struct ProjectCollector {
    config: Config,
    root: PathBuf,
}

impl ProjectCollector {
    /// Create a collector for the site rooted at `root`.
    #[must_use]
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// Directory holding project content files.
    pub fn collection_dir(&self) -> PathBuf {
        self.config.collection_dir(&self.root)
    }

    /// Load and validate every entry in the collection.
    pub fn collect(&self) -> Result<ProjectCollection> {
        let dir = self.collection_dir();
        info!(dir = %dir.display(), "collecting projects");

        let mut collection = ProjectCollection::default();

        if !dir.is_dir() {
            warn!(dir = %dir.display(), "project collection directory not found");
            collection.warnings.push(format!(
                "Collection directory does not exist: {}",
                dir.display()
            ));
            return Ok(collection);
        }

        let files = self.find_entry_files(&dir)?;
        info!(count = files.len(), "found project files");

        let results: Vec<_> = files
            .par_iter()
            .map(|path| (path, self.load_entry(&dir, path)))
            .collect();

        for (path, result) in results {
            match result {
                Ok(project) => collection.projects.push(project),
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "invalid project entry");
                    collection.failures.push(EntryFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        collection
            .projects
            .sort_by(|a, b| (&a.slug, &a.source_path).cmp(&(&b.slug, &b.source_path)));
        collection.failures.sort_by(|a, b| a.path.cmp(&b.path));

        for pair in collection.projects.windows(2) {
            if pair[0].slug == pair[1].slug {
                collection.warnings.push(format!(
                    "Duplicate slug '{}': {} and {}",
                    pair[0].slug,
                    pair[0].source_path.display(),
                    pair[1].source_path.display()
                ));
            }
        }

        info!(
            projects = collection.projects.len(),
            failures = collection.failures.len(),
            "project collection complete"
        );

        Ok(collection)
    }

    /// Read and validate a single content file.
    pub fn load_entry(
        &self,
        collection_dir: &Path,
        path: &Path,
    ) -> folio_core::Result<CollectedProject> {
        debug!(path = %path.display(), "loading project");

        let content = fs::read_to_string(path)?;
        let (record, _body) = parse_record(&content, path)?;

        let relative = path.strip_prefix(collection_dir).unwrap_or(path);
        let slug = slug_for(relative).ok_or_else(|| {
            CoreError::frontmatter(path, "cannot derive a slug from the file name")
        })?;

        let base_dir = path.parent().unwrap_or(collection_dir);
        let resolver = FsImageResolver::new(base_dir);
        let entry =
            schema::validate(&record, &resolver).map_err(|e| CoreError::schema(path, e))?;

        let mut warnings: Vec<String> = schema::unknown_fields(&record)
            .into_iter()
            .map(|field| format!("unknown field '{field}' is ignored"))
            .collect();
        warnings.extend(entry.url_warnings());

        Ok(CollectedProject {
            slug,
            source_path: path.to_path_buf(),
            entry,
            warnings,
        })
    }

    /// Find content files with an enabled extension, skipping hidden entries.
    fn find_entry_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let extensions = self.config.content_extensions();
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let enabled = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));

            if enabled {
                files.push(path.to_path_buf());
            } else {
                debug!(path = %path.display(), "skipping non-content file");
            }
        }

        Ok(files)
    }
}

/// Dot-files and `_`-prefixed entries are never collection entries.
fn is_hidden(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}
