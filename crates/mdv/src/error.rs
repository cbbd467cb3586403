//! CLI error types.

use mdv_cache::CacheError;
use mdv_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Cache(#[from] CacheError),

    #[error("invalid theme '{0}' (valid: auto, light, dark)")]
    InvalidTheme(String),
}
