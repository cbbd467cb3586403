//! Content-addressed render cache for mdv.
//!
//! A rendered document is stored as `{root}/{fingerprint}.html`, where the
//! fingerprint is the SHA-256 digest of the source file's bytes. Relocated
//! images for a render live next to it in `{root}/{fingerprint}_images/`:
//!
//! ```text
//! {root}/
//! +-- 3a7bd3e2....html          # rendered document
//! +-- 3a7bd3e2...._images/      # relocated local images for that render
//! |   +-- screenshot.png
//! +-- 9f86d081....html
//! ```
//!
//! The root directory is an explicit value on [`RenderCache`] rather than an
//! ambient OS lookup, so tests can point the cache at a throwaway directory.
//! Documents are published write-then-rename: a reader never observes a
//! half-written entry.

mod fingerprint;
pub use fingerprint::{fingerprint_bytes, fingerprint_file};

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory name used for the default cache root under the system temp dir.
const CACHE_DIR_NAME: &str = "mdv";

/// Cache errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A source file could not be read for fingerprinting.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    /// The cache root could not be created.
    #[error("failed to create cache directory {path}: {source}")]
    CreateRoot {
        path: PathBuf,
        source: io::Error,
    },

    /// The cache root could not be removed during a clear.
    #[error("failed to clear cache directory {path}: {source}")]
    Clear {
        path: PathBuf,
        source: io::Error,
    },

    /// A rendered document could not be written anywhere, including the
    /// fallback location.
    #[error("failed to write rendered document: {0}")]
    Write(#[source] io::Error),
}

/// A stored rendered document.
#[derive(Debug)]
pub struct StoredDocument {
    /// Where the document ended up.
    pub path: PathBuf,
    /// True when the cache write failed and the document was written to a
    /// fallback temp location instead.
    pub fallback: bool,
}

/// File-based render cache rooted at a directory on disk.
pub struct RenderCache {
    root: PathBuf,
}

impl RenderCache {
    /// Create a cache rooted at `root`. The directory is created lazily on
    /// first write; construction never touches the filesystem.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Default cache root: `mdv/` under the system temp directory, shared by
    /// all invocations on the machine.
    #[must_use]
    pub fn default_root() -> PathBuf {
        std::env::temp_dir().join(CACHE_DIR_NAME)
    }

    /// The cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the cache root if it does not exist yet. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::CreateRoot`] if the directory cannot be created.
    pub fn ensure_root(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).map_err(|source| CacheError::CreateRoot {
            path: self.root.clone(),
            source,
        })
    }

    /// Path of the document entry for `fingerprint`, whether or not it exists.
    #[must_use]
    pub fn document_path(&self, fingerprint: &str) -> PathBuf {
        self.root.join(format!("{fingerprint}.html"))
    }

    /// Path of the relocated-images directory for `fingerprint`.
    #[must_use]
    pub fn images_dir(&self, fingerprint: &str) -> PathBuf {
        self.root.join(format!("{fingerprint}_images"))
    }

    /// Look up a cache entry.
    ///
    /// Always misses when `allow_cache` is false. Otherwise hits iff a
    /// document exists for `fingerprint`, returning its path.
    #[must_use]
    pub fn lookup(&self, fingerprint: &str, allow_cache: bool) -> Option<PathBuf> {
        if !allow_cache {
            return None;
        }
        let path = self.document_path(fingerprint);
        path.is_file().then_some(path)
    }

    /// Read the stored document content for `fingerprint`, if any.
    #[must_use]
    pub fn read_document(&self, fingerprint: &str) -> Option<String> {
        fs::read_to_string(self.document_path(fingerprint)).ok()
    }

    /// Store a rendered document under its fingerprint.
    ///
    /// The document is written to a temp file inside the root and renamed
    /// into place, overwriting any previous entry. If the cache cannot be
    /// written at all, the same content is written to a clearly distinct
    /// fallback temp location and reported with `fallback = true` — the
    /// render is never dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Write`] only when the fallback write fails too.
    pub fn store(&self, fingerprint: &str, document: &str) -> Result<StoredDocument, CacheError> {
        match self.publish(fingerprint, document) {
            Ok(path) => Ok(StoredDocument {
                path,
                fallback: false,
            }),
            Err(err) => {
                tracing::warn!(
                    "could not write to cache {}: {err}, falling back to temp file",
                    self.root.display()
                );
                let path = fallback_write(document).map_err(CacheError::Write)?;
                Ok(StoredDocument {
                    path,
                    fallback: true,
                })
            }
        }
    }

    /// Write-then-rename publish into the cache root.
    fn publish(&self, fingerprint: &str, document: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(document.as_bytes())?;
        let path = self.document_path(fingerprint);
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(path)
    }

    /// Remove every entry and recreate an empty root.
    ///
    /// Not an error when the root does not exist yet; safe to call
    /// repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Clear`] if removal fails, or
    /// [`CacheError::CreateRoot`] if the empty root cannot be recreated.
    pub fn clear(&self) -> Result<(), CacheError> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(|source| CacheError::Clear {
                path: self.root.clone(),
                source,
            })?;
        }
        self.ensure_root()
    }
}

/// Write a document to a standalone temp file outside the cache root.
fn fallback_write(document: &str) -> io::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("mdv-")
        .suffix(".html")
        .tempfile()?;
    file.write_all(document.as_bytes())?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_in(tmp: &TempDir) -> RenderCache {
        RenderCache::new(tmp.path().join("cache"))
    }

    #[test]
    fn test_lookup_misses_on_empty_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        assert_eq!(cache.lookup("abc123", true), None);
    }

    #[test]
    fn test_store_then_lookup_hits() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        let stored = cache.store("abc123", "<html>doc</html>").unwrap();
        assert!(!stored.fallback);
        assert_eq!(stored.path, cache.document_path("abc123"));

        let hit = cache.lookup("abc123", true).unwrap();
        assert_eq!(hit, stored.path);
        assert_eq!(cache.read_document("abc123").unwrap(), "<html>doc</html>");
    }

    #[test]
    fn test_lookup_with_cache_disallowed_always_misses() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        cache.store("abc123", "<html>doc</html>").unwrap();
        assert_eq!(cache.lookup("abc123", false), None);
    }

    #[test]
    fn test_store_overwrites_previous_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        cache.store("abc123", "first").unwrap();
        cache.store("abc123", "second").unwrap();

        assert_eq!(cache.read_document("abc123").unwrap(), "second");
    }

    #[test]
    fn test_store_falls_back_when_root_is_unwritable() {
        let tmp = TempDir::new().unwrap();
        // A plain file where the root should be makes create_dir_all fail
        let blocked = tmp.path().join("cache");
        fs::write(&blocked, "not a directory").unwrap();

        let cache = RenderCache::new(blocked.clone());
        let stored = cache.store("abc123", "<html>doc</html>").unwrap();

        assert!(stored.fallback);
        assert_ne!(stored.path, cache.document_path("abc123"));
        assert_eq!(fs::read_to_string(&stored.path).unwrap(), "<html>doc</html>");

        fs::remove_file(stored.path).unwrap();
    }

    #[test]
    fn test_ensure_root_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        cache.ensure_root().unwrap();
        cache.ensure_root().unwrap();
        assert!(cache.root().is_dir());
    }

    #[test]
    fn test_clear_on_missing_root_succeeds() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        assert!(!cache.root().exists());
        cache.clear().unwrap();
        assert!(cache.root().is_dir());

        // Repeated clears are fine
        cache.clear().unwrap();
    }

    #[test]
    fn test_clear_removes_documents_and_image_dirs() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        cache.store("abc123", "doc").unwrap();
        let images = cache.images_dir("abc123");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("pic.png"), b"png").unwrap();

        cache.clear().unwrap();

        // Root exists, but is empty of entries
        assert!(cache.root().is_dir());
        assert_eq!(cache.lookup("abc123", true), None);
        assert!(!images.exists());
        assert_eq!(fs::read_dir(cache.root()).unwrap().count(), 0);
    }

    #[test]
    fn test_no_partial_documents_left_in_root() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        cache.store("abc123", "doc").unwrap();

        // Only the published entry is present, no leftover temp files
        let names: Vec<_> = fs::read_dir(cache.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["abc123.html".to_owned()]);
    }
}
