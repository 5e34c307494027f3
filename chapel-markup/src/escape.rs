//! HTML escaping.
//!
//! Text recognized by the lexer is stored raw in the IR and escaped exactly
//! once, when a serializer writes it out. Escaping earlier would leak entities
//! into code blocks and URLs; escaping twice would show `&amp;lt;` to readers.

/// Escape text content: `&`, `<` and `>`.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value: text escapes plus `"`.
pub fn escape_attribute(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}
