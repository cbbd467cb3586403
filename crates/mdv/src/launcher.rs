//! Browser launching.
//!
//! Opens the rendered document with the selected browser. On macOS this goes
//! through `open -a`; elsewhere the desktop default handler is used via
//! `xdg-open` and the browser selection is best-effort only.

use std::io;
use std::path::Path;
use std::process::Command;

const DEFAULT_BROWSER: &str = "Firefox";

/// Browser selection, from flags and configuration.
#[derive(Debug, Default)]
pub(crate) struct BrowserChoice {
    /// Browser named with `-b`/`--browser` or in config.
    pub browser: Option<String>,
    pub chrome: bool,
    pub safari: bool,
    pub firefox: bool,
}

impl BrowserChoice {
    /// Resolve the browser application name. A custom name takes precedence,
    /// then the shorthand flags in order; the default is Firefox.
    pub(crate) fn name(&self) -> &str {
        if let Some(browser) = &self.browser {
            browser
        } else if self.chrome {
            "Google Chrome"
        } else if self.safari {
            "Safari"
        } else if self.firefox {
            "Firefox"
        } else {
            DEFAULT_BROWSER
        }
    }
}

/// Open `path` with the chosen browser.
#[cfg(target_os = "macos")]
pub(crate) fn open_in_browser(path: &Path, choice: &BrowserChoice) -> io::Result<()> {
    run(Command::new("open").arg("-a").arg(choice.name()).arg(path))
}

/// Open `path` with the desktop's default handler.
#[cfg(not(target_os = "macos"))]
pub(crate) fn open_in_browser(path: &Path, _choice: &BrowserChoice) -> io::Result<()> {
    run(Command::new("xdg-open").arg(path))
}

fn run(command: &mut Command) -> io::Result<()> {
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("launcher exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_browser_is_firefox() {
        assert_eq!(BrowserChoice::default().name(), "Firefox");
    }

    #[test]
    fn test_flag_selection() {
        let chrome = BrowserChoice {
            chrome: true,
            ..BrowserChoice::default()
        };
        assert_eq!(chrome.name(), "Google Chrome");

        let safari = BrowserChoice {
            safari: true,
            ..BrowserChoice::default()
        };
        assert_eq!(safari.name(), "Safari");

        let firefox = BrowserChoice {
            firefox: true,
            ..BrowserChoice::default()
        };
        assert_eq!(firefox.name(), "Firefox");
    }

    #[test]
    fn test_custom_browser_takes_precedence() {
        let choice = BrowserChoice {
            browser: Some("Brave Browser".to_owned()),
            chrome: true,
            ..BrowserChoice::default()
        };
        assert_eq!(choice.name(), "Brave Browser");
    }
}
