//! Content fingerprinting.
//!
//! A fingerprint is the lowercase hex SHA-256 digest of a file's raw bytes.
//! It is computed over bytes, never decoded text, so the same content hashes
//! identically on every platform regardless of encoding assumptions.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::CacheError;

/// Compute the fingerprint of a byte sequence.
///
/// Pure function: identical bytes always produce the identical 64-character
/// hex digest, regardless of where the bytes came from.
#[must_use]
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Compute the fingerprint of a file's raw content.
///
/// # Errors
///
/// Returns [`CacheError::Read`] with the offending path if the file cannot
/// be read.
pub fn fingerprint_file(path: &Path) -> Result<String, CacheError> {
    let bytes = fs::read(path).map_err(|source| CacheError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(fingerprint_bytes(&bytes))
}
