//! HTML escaping and entity decoding.

/// Escape HTML special characters for safe embedding in markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decode the standard HTML entities produced by the markdown stage.
///
/// `&amp;` is decoded last so that already-escaped text round-trips: for any
/// input, `decode_entities(escape_html(input)) == input`.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;= b &amp;&amp; c &gt; d"), "a <= b && c > d");
        assert_eq!(decode_entities("&quot;hi&quot; &#39;there&#039;"), "\"hi\" 'there'");
        assert_eq!(decode_entities("one&nbsp;two"), "one two");
    }

    #[test]
    fn test_escape_decode_round_trip() {
        for input in ["<brackets>", "a && b", "already &lt;escaped&gt;", "plain"] {
            assert_eq!(decode_entities(&escape_html(input)), input);
        }
    }

    #[test]
    fn test_untouched_text_passes_through() {
        assert_eq!(decode_entities("no entities here"), "no entities here");
        assert_eq!(escape_html("no specials here"), "no specials here");
    }
}
