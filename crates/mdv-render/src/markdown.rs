//! Markdown to HTML conversion via pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Conversion options, constructed once and passed into every call.
///
/// An explicit value rather than process-global state: two conversions with
/// different options never interfere, regardless of call order.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown extensions (tables, strikethrough,
    /// task lists, alerts). Default: on.
    pub gfm: bool,
    /// Include syntax-highlighting assets in the assembled page. Fenced code
    /// blocks always carry `language-*` classes; this knob only controls
    /// whether the final document loads a highlighter for them. Default: on.
    pub highlight: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            highlight: true,
        }
    }
}

impl MarkdownOptions {
    /// Parser options for the configured feature set.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

/// Convert markdown text to an HTML fragment.
#[must_use]
pub fn convert(markdown: &str, options: &MarkdownOptions) -> String {
    if markdown.is_empty() {
        return String::new();
    }
    let parser = Parser::new_ext(markdown, options.parser_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
