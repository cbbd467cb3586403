//! Per-file render pipeline.
//!
//! For one input file: fingerprint the bytes, consult the cache, and on a
//! miss run conversion, image relocation, mermaid rewriting, and document
//! assembly before publishing the result back into the cache. Stages run
//! strictly in sequence with no retries; a failure aborts this file's
//! pipeline only, and the caller decides what happens to the rest of the
//! batch.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mdv_cache::{CacheError, RenderCache, fingerprint_file};
use mdv_diagrams::rewrite_mermaid_blocks;
use mdv_images::ImageRelocator;
use mdv_render::{MarkdownOptions, PageOptions, convert, page};

/// Render settings shared by every file in a batch.
pub(crate) struct RenderSettings {
    pub markdown: MarkdownOptions,
    pub page: PageOptions,
    /// False when `--no-cache` forces a re-render.
    pub use_cache: bool,
}

/// A successfully served document.
#[derive(Debug)]
pub(crate) struct RenderedPage {
    /// Path of the usable document.
    pub path: PathBuf,
    /// True when a previous render was reused without conversion.
    pub from_cache: bool,
    /// True when the cache was unwritable and the document went to a
    /// fallback temp location.
    pub fallback: bool,
    /// Non-fatal warnings collected along the way (missing images etc).
    pub warnings: Vec<String>,
}

/// Per-file pipeline errors.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        source: io::Error,
    },

    #[error("{0}")]
    Cache(#[from] CacheError),
}

/// Run the pipeline for a single markdown file.
pub(crate) fn render_file(
    input: &Path,
    settings: &RenderSettings,
    cache: &RenderCache,
) -> Result<RenderedPage, PipelineError> {
    let path = input
        .canonicalize()
        .map_err(|_| PipelineError::NotFound(input.to_path_buf()))?;
    if !path.is_file() {
        return Err(PipelineError::NotFound(path));
    }

    let fingerprint = fingerprint_file(&path)?;

    if let Some(hit) = cache.lookup(&fingerprint, settings.use_cache) {
        return Ok(RenderedPage {
            path: hit,
            from_cache: true,
            fallback: false,
            warnings: Vec::new(),
        });
    }

    let markdown = fs::read_to_string(&path).map_err(|source| PipelineError::ReadSource {
        path: path.clone(),
        source,
    })?;
    let fragment = convert(&markdown, &settings.markdown);

    let source_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut relocator = ImageRelocator::new();
    let fragment = relocator.relocate(&fragment, source_dir, cache.root(), &fingerprint);

    let fragment = rewrite_mermaid_blocks(&fragment);

    let title = path
        .file_stem()
        .map_or_else(|| "Untitled".to_owned(), |s| s.to_string_lossy().into_owned());
    let document = page(&title, &fragment, &settings.page);

    let stored = cache.store(&fingerprint, &document)?;
    Ok(RenderedPage {
        path: stored.path,
        from_cache: false,
        fallback: stored.fallback,
        warnings: relocator.warnings().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdv_cache::fingerprint_bytes;
    use tempfile::TempDir;

    fn settings() -> RenderSettings {
        RenderSettings {
            markdown: MarkdownOptions::default(),
            page: PageOptions::default(),
            use_cache: true,
        }
    }

    fn write_markdown(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_miss_then_hit_without_reconversion() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let md = write_markdown(tmp.path(), "doc.md", "# Hello\n");

        let first = render_file(&md, &settings(), &cache).unwrap();
        assert!(!first.from_cache);

        let second = render_file(&md, &settings(), &cache).unwrap();
        assert!(second.from_cache);
        assert_eq!(first.path, second.path);
        assert_eq!(
            fs::read_to_string(&first.path).unwrap(),
            fs::read_to_string(&second.path).unwrap()
        );
    }

    #[test]
    fn test_no_cache_rerenders() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let md = write_markdown(tmp.path(), "doc.md", "# Hello\n");

        render_file(&md, &settings(), &cache).unwrap();

        let no_cache = RenderSettings {
            use_cache: false,
            ..settings()
        };
        let again = render_file(&md, &no_cache, &cache).unwrap();
        assert!(!again.from_cache);
    }

    #[test]
    fn test_document_is_named_by_fingerprint() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let content = "# Named\n";
        let md = write_markdown(tmp.path(), "doc.md", content);

        let rendered = render_file(&md, &settings(), &cache).unwrap();

        let expected = format!("{}.html", fingerprint_bytes(content.as_bytes()));
        assert_eq!(
            rendered.path.file_name().unwrap().to_str().unwrap(),
            expected
        );
    }

    #[test]
    fn test_missing_file_fails_without_touching_others() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let good = write_markdown(tmp.path(), "good.md", "# Fine\n");
        let bad = tmp.path().join("missing.md");

        let err = render_file(&bad, &settings(), &cache).unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));

        // The rest of the batch still succeeds
        assert!(render_file(&good, &settings(), &cache).is_ok());
    }

    #[test]
    fn test_local_images_relocated_into_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        fs::write(tmp.path().join("test.png"), b"png").unwrap();
        fs::write(tmp.path().join("test.jpg"), b"jpg").unwrap();
        let md = write_markdown(
            tmp.path(),
            "doc.md",
            "# Image Test\n\n![Local PNG](test.png)\n![Local JPG](test.jpg)",
        );

        let rendered = render_file(&md, &settings(), &cache).unwrap();
        let html = fs::read_to_string(&rendered.path).unwrap();
        let fp = fingerprint_file(&md).unwrap();

        assert_eq!(html.matches("<img src=").count(), 2);
        assert!(html.contains(&format!(r#"src="{fp}_images/test.png""#)));
        assert!(html.contains(&format!(r#"src="{fp}_images/test.jpg""#)));
        assert!(cache.images_dir(&fp).join("test.png").is_file());
        assert!(cache.images_dir(&fp).join("test.jpg").is_file());
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn test_missing_image_is_a_warning_not_a_failure() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let md = write_markdown(tmp.path(), "doc.md", "![gone](ghost.png)\n");

        let rendered = render_file(&md, &settings(), &cache).unwrap();

        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.warnings[0].contains("ghost.png"));
        let html = fs::read_to_string(&rendered.path).unwrap();
        assert!(html.contains(r#"src="ghost.png""#));
    }

    #[test]
    fn test_mermaid_blocks_become_containers() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let md = write_markdown(
            tmp.path(),
            "doc.md",
            "# Diagram\n\n```mermaid\ngraph TD\n  A --> B\n```\n",
        );

        let rendered = render_file(&md, &settings(), &cache).unwrap();
        let html = fs::read_to_string(&rendered.path).unwrap();

        assert!(html.contains(r#"<div class="mermaid-container">"#));
        assert!(html.contains("A --> B"));
        assert!(!html.contains("language-mermaid"));
    }

    #[test]
    fn test_page_title_is_file_stem() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let md = write_markdown(tmp.path(), "release-notes.md", "hello\n");

        let rendered = render_file(&md, &settings(), &cache).unwrap();
        let html = fs::read_to_string(&rendered.path).unwrap();

        assert!(html.contains("<title>release-notes</title>"));
    }

    #[test]
    fn test_same_content_different_name_shares_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let a = write_markdown(tmp.path(), "a.md", "# Same\n");
        let b = write_markdown(tmp.path(), "b.md", "# Same\n");

        let first = render_file(&a, &settings(), &cache).unwrap();
        let second = render_file(&b, &settings(), &cache).unwrap();

        // Identical bytes, identical fingerprint, so the second is a hit
        assert!(second.from_cache);
        assert_eq!(first.path, second.path);
    }

    #[test]
    fn test_clear_then_render_misses_and_regenerates() {
        let tmp = TempDir::new().unwrap();
        let cache = RenderCache::new(tmp.path().join("cache"));
        let md = write_markdown(tmp.path(), "doc.md", "# Hello\n");

        render_file(&md, &settings(), &cache).unwrap();
        cache.clear().unwrap();

        let fp = fingerprint_file(&md).unwrap();
        assert_eq!(cache.lookup(&fp, true), None);

        let rendered = render_file(&md, &settings(), &cache).unwrap();
        assert!(!rendered.from_cache);
    }
}
