//! Configuration management for mdv.
//!
//! Parses optional `mdv.toml` configuration files with serde and provides
//! auto-discovery in parent directories of the working directory. CLI
//! settings can be applied during load via [`CliSettings`]; only non-`None`
//! values override the loaded config.
//!
//! ```toml
//! # mdv.toml
//! width = 1200
//! theme = "dark"
//! browser = "Google Chrome"
//! cache_dir = "/tmp/mdv-cache"
//! highlight = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdv.toml";

/// Default maximum content width in pixels.
const DEFAULT_WIDTH: u32 = 980;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content width.
    pub width: Option<u32>,
    /// Override theme name.
    pub theme: Option<String>,
    /// Override browser selection.
    pub browser: Option<String>,
    /// Override cache root directory.
    pub cache_dir: Option<PathBuf>,
    /// Override syntax highlighting.
    pub highlight: Option<bool>,
}

/// Raw configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigRaw {
    width: Option<u32>,
    theme: Option<String>,
    browser: Option<String>,
    cache_dir: Option<String>,
    highlight: Option<bool>,
}

/// Resolved application configuration.
#[derive(Debug)]
pub struct Config {
    /// Maximum content width in pixels.
    pub width: u32,
    /// Theme name (`auto`, `light`, or `dark`; validated where it is used).
    pub theme: String,
    /// Preferred browser, if any.
    pub browser: Option<String>,
    /// Explicit cache root; `None` means the built-in default.
    pub cache_dir: Option<PathBuf>,
    /// Whether pages include syntax-highlighting assets.
    pub highlight: bool,
    /// Path of the config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            theme: "auto".to_owned(),
            browser: None,
            cache_dir: None,
            highlight: true,
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Uses `explicit` when given; otherwise discovers `mdv.toml` upward from
    /// the current working directory. A missing discovered file is not an
    /// error — defaults apply. CLI settings are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error when an explicitly named file cannot be read, or when
    /// any config file fails to parse.
    pub fn load(explicit: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let found = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| discover_from(&cwd)),
        };

        let mut config = match &found {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(cli) = cli {
            config.apply_cli(cli);
        }
        Ok(config)
    }

    /// Load and resolve a specific config file.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: ConfigRaw = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let defaults = Self::default();
        Ok(Self {
            width: raw.width.unwrap_or(defaults.width),
            theme: raw.theme.unwrap_or(defaults.theme),
            browser: raw.browser,
            cache_dir: raw.cache_dir.map(PathBuf::from),
            highlight: raw.highlight.unwrap_or(defaults.highlight),
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Apply CLI overrides on top of the loaded values.
    fn apply_cli(&mut self, cli: &CliSettings) {
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(theme) = &cli.theme {
            self.theme.clone_from(theme);
        }
        if let Some(browser) = &cli.browser {
            self.browser = Some(browser.clone());
        }
        if let Some(cache_dir) = &cli.cache_dir {
            self.cache_dir = Some(cache_dir.clone());
        }
        if let Some(highlight) = cli.highlight {
            self.highlight = highlight;
        }
    }
}

/// Search for `mdv.toml` in `start` and its ancestors.
fn discover_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
