//! Local image relocation into the render cache.
//!
//! [`ImageRelocator`] scans an HTML fragment for `<img>` tags referencing
//! local files, copies each referenced file into the render's
//! `{fingerprint}_images/` cache subdirectory, and rewrites the `src`
//! attributes to point at the relocated copies. Remote references (network
//! URLs, protocol-relative URLs, data URIs) are never touched.
//!
//! Copies are keyed by base filename: a file referenced N times is copied
//! once, and subdirectory structure from the source tree is discarded. Two
//! distinct source files sharing a basename therefore collide, last write
//! wins — the documented cache layout (`{fingerprint}_images/{basename}`)
//! depends on this flat naming.
//!
//! Missing files are never fatal: the reference is left as-is, a warning is
//! recorded, and processing continues with the remaining references.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img\s[^>]*?src=["']([^"']+)["'][^>]*>"#).unwrap());

static ALT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)alt=["']([^"']*)["']"#).unwrap());

/// One local image reference found in a fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    /// The `src` attribute value as written in the fragment.
    pub src: String,
    /// The `alt` attribute value, when present.
    pub alt: Option<String>,
}

/// Copies locally-referenced images into the cache and rewrites their
/// references. One relocator handles one render; the basename dedup set is
/// scoped to it.
#[derive(Default)]
pub struct ImageRelocator {
    copied: HashSet<String>,
    warnings: Vec<String>,
}

impl ImageRelocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Relocate all local image references in `html`.
    ///
    /// Relative references (including `./` and `../` forms) resolve against
    /// `source_dir`; absolute references are used as-is. Copies land in
    /// `{cache_root}/{fingerprint}_images/`. A fragment without local
    /// references is returned unchanged with zero filesystem writes.
    #[must_use]
    pub fn relocate(
        &mut self,
        html: &str,
        source_dir: &Path,
        cache_root: &Path,
        fingerprint: &str,
    ) -> String {
        let images = detect_local_images(html);
        if images.is_empty() {
            return html.to_owned();
        }

        let images_dir = cache_root.join(format!("{fingerprint}_images"));
        let mut dir_ready = false;
        let mut result = html.to_owned();

        for image in images {
            let resolved = resolve_reference(&image.src, source_dir);

            if !resolved.is_file() {
                self.warn(format!("image not found: {}", image.src));
                continue;
            }
            let Some(basename) = resolved.file_name().and_then(OsStr::to_str) else {
                self.warn(format!("image has no usable filename: {}", image.src));
                continue;
            };

            if !dir_ready {
                if let Err(err) = fs::create_dir_all(&images_dir) {
                    self.warn(format!(
                        "failed to create image cache directory {}: {err}",
                        images_dir.display()
                    ));
                    return result;
                }
                dir_ready = true;
            }

            if self.copied.contains(basename) {
                // Same basename already copied this render; references reuse
                // that copy (and distinct files would overwrite it)
                tracing::debug!("reusing already-copied image {basename}");
            } else {
                if let Err(err) = fs::copy(&resolved, images_dir.join(basename)) {
                    self.warn(format!("failed to copy image {}: {err}", image.src));
                    continue;
                }
                self.copied.insert(basename.to_owned());
            }

            let new_src = format!("{fingerprint}_images/{basename}");
            result = result
                .replace(
                    &format!("src=\"{}\"", image.src),
                    &format!("src=\"{new_src}\""),
                )
                .replace(&format!("src='{}'", image.src), &format!("src='{new_src}'"));
        }

        result
    }

    /// Warnings accumulated while relocating.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Find all local (non-remote) image references in a fragment.
#[must_use]
pub fn detect_local_images(html: &str) -> Vec<ImageRef> {
    IMG_TAG
        .captures_iter(html)
        .filter_map(|caps| {
            let src = caps.get(1)?.as_str();
            if is_remote(src) {
                return None;
            }
            let alt = ALT_ATTR
                .captures(caps.get(0)?.as_str())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_owned());
            Some(ImageRef {
                src: src.to_owned(),
                alt,
            })
        })
        .collect()
}

/// Whether a reference points at something that must not be copied: a network
/// URL, a protocol-relative URL, or an embedded data URI.
#[must_use]
pub fn is_remote(src: &str) -> bool {
    src.starts_with("http://")
        || src.starts_with("https://")
        || src.starts_with("//")
        || src.starts_with("data:")
}

/// Resolve a reference to a filesystem path: strip any trailing query, then
/// join relative paths onto `source_dir` and keep absolute paths as-is.
fn resolve_reference(src: &str, source_dir: &Path) -> PathBuf {
    let clean = src.split('?').next().unwrap_or(src);
    let path = Path::new(clean);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        source_dir.join(clean)
    }
}
