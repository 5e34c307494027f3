//! Plain text output
//!
//! Strips every piece of markup and keeps only what a reader would see, for
//! listing excerpts and `<meta name="description">` values. Link text is
//! kept and the URL dropped, images contribute their alt text, videos and
//! rules contribute nothing.
//!
//! With the `max-chars` option the text is flattened to a single line and cut
//! at a word boundary, ending in `…`.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{DocNode, Document, InlineContent};
use std::collections::HashMap;

const ELLIPSIS: char = '…';

/// Serialize a document to plain text, one source line per output line.
pub fn serialize_to_text(doc: &Document) -> String {
    let mut output = String::new();
    for node in &doc.children {
        match node {
            DocNode::Heading(heading) => push_plain(&heading.content, &mut output),
            DocNode::Line(line) => push_plain(&line.content, &mut output),
            DocNode::Quote(quote) => push_plain(&quote.content, &mut output),
            DocNode::Verbatim(verbatim) => output.push_str(&verbatim.content),
            DocNode::Break => output.push('\n'),
            DocNode::Rule => {}
        }
    }
    output.trim().to_string()
}

fn push_plain(content: &[InlineContent], output: &mut String) {
    for inline in content {
        output.push_str(&inline.plain_text());
    }
}

/// Cut `text` to at most `max_chars` characters (ellipsis included),
/// preferring the last word boundary.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if max_chars == 0 || flat.chars().count() <= max_chars {
        return flat;
    }

    let keep = max_chars.saturating_sub(1);
    let cut = flat
        .char_indices()
        .nth(keep)
        .map_or(flat.len(), |(idx, _)| idx);
    let head = &flat[..cut];
    let head = if flat[cut..].starts_with(' ') {
        head
    } else {
        match head.rfind(' ') {
            Some(space) if space > 0 => &head[..space],
            _ => head,
        }
    };

    let mut result = head.trim_end().to_string();
    result.push(ELLIPSIS);
    result
}

/// Format implementation for plain text
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text with markup stripped"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_to_text(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut max_chars = 0;
        for (key, value) in options {
            match key.as_str() {
                "max-chars" => {
                    max_chars = value.parse().map_err(|_| FormatError::InvalidOption {
                        key: key.clone(),
                        value: value.clone(),
                    })?;
                }
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown text option '{key}'"
                    )))
                }
            }
        }

        let text = serialize_to_text(doc);
        if max_chars == 0 {
            Ok(text)
        } else {
            Ok(excerpt(&text, max_chars))
        }
    }
}
