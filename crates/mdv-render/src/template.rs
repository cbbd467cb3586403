//! Final document assembly.
//!
//! Wraps a post-processed HTML fragment into a complete, self-contained HTML5
//! document: styles inline, mermaid loaded as an ESM module for client-side
//! diagram rendering, and a small script wiring up the source-view toggles.

use crate::html::escape_html;
use crate::styles::{Theme, github_css};

/// Default content width in pixels.
pub const DEFAULT_WIDTH: u32 = 980;

/// Options for document assembly.
#[derive(Clone, Copy, Debug)]
pub struct PageOptions {
    /// Maximum content width in pixels.
    pub width: u32,
    /// Color scheme.
    pub theme: Theme,
    /// Include highlight.js for client-side syntax highlighting.
    pub highlight: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            theme: Theme::Auto,
            highlight: true,
        }
    }
}

/// Assemble a complete HTML document around a rendered fragment.
#[must_use]
pub fn page(title: &str, body: &str, options: &PageOptions) -> String {
    let styles = github_css(options.width, options.theme);
    let highlight_scripts = if options.highlight {
        HIGHLIGHT_SCRIPTS
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {styles}
    <script type="module">
      import mermaid from 'https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs';
      mermaid.initialize({{ startOnLoad: true, theme: 'default' }});
    </script>{highlight_scripts}
</head>
<body>
    {body}
    <script>
      // Toggle source code visibility for mermaid diagrams
      document.querySelectorAll('.mermaid-toggle').forEach(button => {{
        button.addEventListener('click', (e) => {{
          const container = e.target.closest('.mermaid-container');
          const diagram = container.querySelector('.mermaid-diagram');
          const source = container.querySelector('.mermaid-source');

          if (source.style.display === 'none' || source.style.display === '') {{
            diagram.style.display = 'none';
            source.style.display = 'block';
            button.textContent = 'Show Diagram';
          }} else {{
            diagram.style.display = 'block';
            source.style.display = 'none';
            button.textContent = 'Toggle Source';
          }}
        }});
      }});
    </script>
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// highlight.js loader, included when highlighting is enabled. The matching
/// `.hljs-*` palette ships with the generated CSS.
const HIGHLIGHT_SCRIPTS: &str = r#"
    <script src="https://cdn.jsdelivr.net/gh/highlightjs/cdn-release@11/build/highlight.min.js"></script>
    <script>hljs.highlightAll();</script>"#;
