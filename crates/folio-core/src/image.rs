//! Image references and resolvers.
//!
//! A project entry's `image` field holds an authored path. The schema hands
//! that path to an [`ImageResolver`] and keeps the resulting [`ImageRef`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The referenced file does not exist or is not a regular file.
    #[error("image not found: {0}")]
    NotFound(PathBuf),

    /// The file extension is not a supported image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Remote URLs cannot be resolved to a local asset.
    #[error("remote images are not supported: {0}")]
    Remote(String),

    /// Absolute paths point outside the entry's directory tree.
    #[error("image path must be relative to the entry: {0}")]
    Absolute(String),
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
    Svg,
    Avif,
    Tiff,
}

impl ImageFormat {
    /// Determine image format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            "svg" => Some(Self::Svg),
            "avif" => Some(Self::Avif),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

/// A resolved image asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path as written by the author.
    pub src: String,

    /// Resolved location of the asset.
    pub path: PathBuf,

    /// Detected image format.
    pub format: ImageFormat,
}

/// Turns an authored image path into a validated image reference.
pub trait ImageResolver {
    /// Resolve `src` to an existing image asset.
    fn resolve(&self, src: &str) -> Result<ImageRef, ImageError>;
}

impl<F> ImageResolver for F
where
    F: Fn(&str) -> Result<ImageRef, ImageError>,
{
    fn resolve(&self, src: &str) -> Result<ImageRef, ImageError> {
        self(src)
    }
}

/// Resolves image paths against a directory on disk.
///
/// Content files reference their cover images relative to themselves, so the
/// collection loader creates one resolver per file, rooted at its directory.
#[derive(Debug, Clone)]
pub struct FsImageResolver {
    base_dir: PathBuf,
}

impl FsImageResolver {
    /// Create a resolver rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl ImageResolver for FsImageResolver {
    fn resolve(&self, src: &str) -> Result<ImageRef, ImageError> {
        if src.starts_with("http://") || src.starts_with("https://") {
            return Err(ImageError::Remote(src.to_string()));
        }

        let src_path = Path::new(src);
        if src_path.has_root() || src_path.is_absolute() {
            return Err(ImageError::Absolute(src.to_string()));
        }

        let path = self.base_dir.join(src_path);

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .ok_or_else(|| ImageError::UnsupportedFormat(src.to_string()))?;

        if !path.is_file() {
            return Err(ImageError::NotFound(path));
        }

        tracing::trace!(src, path = %path.display(), "resolved image");

        Ok(ImageRef {
            src: src.to_string(),
            path,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("svg"), Some(ImageFormat::Svg));
        assert_eq!(ImageFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_fs_resolver_finds_relative_image() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("cover.png"), b"png").expect("write");

        let resolver = FsImageResolver::new(dir.path());
        let image = resolver.resolve("./cover.png").expect("resolve");

        assert_eq!(image.src, "./cover.png");
        assert_eq!(image.format, ImageFormat::Png);
        assert!(image.path.is_file());
    }

    #[test]
    fn test_fs_resolver_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let resolver = FsImageResolver::new(dir.path());
        let err = resolver.resolve("./missing.png").unwrap_err();

        assert!(matches!(err, ImageError::NotFound(_)));
    }

    #[test]
    fn test_fs_resolver_rejects_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("shots.png")).expect("mkdir");

        let resolver = FsImageResolver::new(dir.path());
        assert!(matches!(
            resolver.resolve("shots.png"),
            Err(ImageError::NotFound(_))
        ));
    }

    #[test]
    fn test_fs_resolver_rejects_unknown_extension() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("notes.txt"), b"text").expect("write");

        let resolver = FsImageResolver::new(dir.path());
        assert_eq!(
            resolver.resolve("notes.txt"),
            Err(ImageError::UnsupportedFormat("notes.txt".to_string()))
        );
    }

    #[test]
    fn test_fs_resolver_rejects_remote() {
        let resolver = FsImageResolver::new(".");
        assert!(matches!(
            resolver.resolve("https://example.com/cover.png"),
            Err(ImageError::Remote(_))
        ));
    }

    #[test]
    fn test_fs_resolver_rejects_absolute_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let outside = tempfile::tempdir().expect("create temp dir");
        let stray = outside.path().join("stray.png");
        std::fs::write(&stray, b"png").expect("write");

        let resolver = FsImageResolver::new(dir.path());
        let src = stray.to_string_lossy().to_string();

        assert_eq!(resolver.resolve(&src), Err(ImageError::Absolute(src.clone())));
        assert!(matches!(
            resolver.resolve("/images/cover.png"),
            Err(ImageError::Absolute(_))
        ));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |src: &str| -> Result<ImageRef, ImageError> {
            Ok(ImageRef {
                src: src.to_string(),
                path: PathBuf::from("/assets").join(src),
                format: ImageFormat::Webp,
            })
        };

        let image = resolver.resolve("hero.webp").expect("resolve");
        assert_eq!(image.path, PathBuf::from("/assets/hero.webp"));
    }
}
