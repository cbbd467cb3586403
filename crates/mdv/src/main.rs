//! mdv - Markdown preview tool.
//!
//! Converts markdown files to styled, self-contained HTML pages and opens
//! them in a browser. Renders are cached by content fingerprint under a
//! shared cache directory, so unchanged files open instantly.

mod error;
mod launcher;
mod output;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdv_cache::RenderCache;
use mdv_config::{CliSettings, Config};
use mdv_render::{MarkdownOptions, PageOptions, Theme};

use error::CliError;
use launcher::BrowserChoice;
use output::Output;
use pipeline::RenderSettings;

/// Convert Markdown to HTML and open it in a browser.
#[derive(Parser)]
#[command(name = "mdv", version, about)]
struct Cli {
    /// Markdown file(s) to convert.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Browser to open with (e.g. "Google Chrome", "Safari").
    #[arg(short, long)]
    browser: Option<String>,

    /// Open with Google Chrome.
    #[arg(short = 'g', long)]
    chrome: bool,

    /// Open with Safari.
    #[arg(short = 's', long)]
    safari: bool,

    /// Open with Firefox (the default).
    #[arg(short = 'f', long)]
    firefox: bool,

    /// Maximum content width in pixels (default: 980).
    #[arg(short = 'w', long)]
    width: Option<u32>,

    /// Color scheme: auto, light, or dark.
    #[arg(long)]
    theme: Option<String>,

    /// Skip the cache and regenerate the HTML.
    #[arg(short = 'N', long)]
    no_cache: bool,

    /// Remove every cached render and exit.
    #[arg(short = 'X', long)]
    clean_cache: bool,

    /// Cache directory (default: "mdv" under the system temp directory).
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdv.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render without opening a browser.
    #[arg(long)]
    no_open: bool,

    /// Enable verbose output (show relocation and cache logs).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&cli, &output) {
        Ok(code) => code,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: &Output) -> Result<ExitCode, CliError> {
    let cli_settings = CliSettings {
        width: cli.width,
        theme: cli.theme.clone(),
        browser: cli.browser.clone(),
        cache_dir: cli.cache_dir.clone(),
        highlight: None,
    };
    let config = Config::load(cli.config.as_deref(), Some(&cli_settings))?;
    let theme =
        Theme::parse(&config.theme).ok_or_else(|| CliError::InvalidTheme(config.theme.clone()))?;

    let cache_root = config
        .cache_dir
        .clone()
        .unwrap_or_else(RenderCache::default_root);
    let cache = RenderCache::new(cache_root);

    if cli.clean_cache {
        cache.clear()?;
        output.success("Cache cleaned successfully");
        return Ok(ExitCode::SUCCESS);
    }

    if cli.files.is_empty() {
        output.error("Error: no markdown file specified");
        output.info("Use --help for usage information");
        return Ok(ExitCode::FAILURE);
    }

    // Speculative: store() falls back to a temp location if this failed
    if let Err(err) = cache.ensure_root() {
        tracing::warn!("{err}");
    }

    let settings = RenderSettings {
        markdown: MarkdownOptions {
            gfm: true,
            highlight: config.highlight,
        },
        page: PageOptions {
            width: config.width,
            theme,
            highlight: config.highlight,
        },
        use_cache: !cli.no_cache,
    };
    let browser = BrowserChoice {
        browser: config.browser.clone(),
        chrome: cli.chrome,
        safari: cli.safari,
        firefox: cli.firefox,
    };

    let mut failed = false;
    for file in &cli.files {
        match pipeline::render_file(file, &settings, &cache) {
            Ok(rendered) => {
                for warning in &rendered.warnings {
                    output.warning(&format!("Warning: {warning}"));
                }
                if rendered.from_cache {
                    output.info(&format!("Using cached version: {}", rendered.path.display()));
                } else if rendered.fallback {
                    output.warning(&format!(
                        "Cache unavailable, wrote HTML to: {}",
                        rendered.path.display()
                    ));
                } else {
                    output.success(&format!("Generated HTML: {}", rendered.path.display()));
                }

                if !cli.no_open
                    && let Err(err) = launcher::open_in_browser(&rendered.path, &browser)
                {
                    output.error(&format!("Failed to open browser: {err}"));
                    output.info(&format!(
                        "You can open the file manually at: {}",
                        rendered.path.display()
                    ));
                }
            }
            Err(err) => {
                output.error(&format!("Error processing {}: {err}", file.display()));
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
