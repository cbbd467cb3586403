//! Markdown conversion and HTML document assembly for mdv.
//!
//! Conversion is delegated to `pulldown-cmark`; this crate wraps it behind an
//! explicit, immutable [`MarkdownOptions`] value and provides the pieces that
//! turn the resulting fragment into a self-contained page: HTML escaping and
//! entity decoding, GitHub-style CSS generation, and the final document
//! template.

mod html;
mod markdown;
mod styles;
mod template;

pub use html::{decode_entities, escape_html};
pub use markdown::{MarkdownOptions, convert};
pub use styles::{Theme, github_css};
pub use template::{DEFAULT_WIDTH, PageOptions, page};
