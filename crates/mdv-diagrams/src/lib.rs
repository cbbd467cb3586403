//! Mermaid code block rewriting.
//!
//! The markdown stage emits mermaid fences as
//! `<pre><code class="language-mermaid">...</code></pre>` with the diagram
//! source HTML-entity-escaped. [`rewrite_mermaid_blocks`] replaces each such
//! block with a container holding three parts:
//!
//! - a render region (`<pre class="mermaid">`) with the raw, decoded source
//!   for the client-side mermaid library to pick up,
//! - an initially hidden source region with the source re-escaped for safe
//!   display,
//! - a toggle button switching between the two.
//!
//! Replacement happens per match, so multiple blocks — identical ones
//! included — each get their own independent container.

use std::borrow::Cow;
use std::sync::LazyLock;

use mdv_render::{decode_entities, escape_html};
use regex::{Captures, Regex};

/// Matches a fenced mermaid code block. The class attribute may carry other
/// tokens before or after `language-mermaid`.
static MERMAID_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<pre><code\s+class=["'](?:[^"']*\s)?language-mermaid(?:\s[^"']*)?["']>(.*?)</code></pre>"#,
    )
    .unwrap()
});

/// Replace every mermaid code block in `html` with a render/source/toggle
/// container. A fragment without mermaid blocks is returned borrowed,
/// unchanged.
#[must_use]
pub fn rewrite_mermaid_blocks(html: &str) -> Cow<'_, str> {
    MERMAID_BLOCK.replace_all(html, |caps: &Captures| {
        let code = decode_entities(&caps[1]);
        wrap_block(&code)
    })
}

/// Build the container for one decoded diagram source.
fn wrap_block(code: &str) -> String {
    format!(
        r#"<div class="mermaid-container">
  <div class="mermaid-diagram">
    <pre class="mermaid">{code}</pre>
  </div>
  <pre class="mermaid-source" style="display: none">
    <code>{escaped}</code>
  </pre>
  <button class="mermaid-toggle">Toggle Source</button>
</div>"#,
        escaped = escape_html(code)
    )
}
