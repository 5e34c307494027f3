//! Markdown parsing (source → IR)
//!
//! Block phase of the lexer. The source is walked once; fenced code blocks
//! are cut out first wherever they start (they may span lines), then each
//! remaining line segment is classified (rule, heading, quote or plain line)
//! and handed to [`super::inline::parse_inlines`]. Every newline outside a
//! code block becomes a [`DocNode::Break`].
//!
//! Nothing in here can fail: unrecognized markup stays literal text.

use super::inline::parse_inlines;
use crate::ir::nodes::{DocNode, Document, Heading, Line, Quote, Verbatim};
use std::borrow::Cow;

const FENCE: &str = "```";

/// Line prefixes, longest first so `###` is never read as `#`.
const HEADING_PREFIXES: [(&str, usize); 3] = [("### ", 3), ("## ", 2), ("# ", 1)];
const QUOTE_PREFIX: &str = "> ";
const RULE: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Rule,
    Heading(usize),
    Quote,
    Plain,
}

/// Parse markup source into an IR document.
pub fn parse_markdown(source: &str) -> Document {
    let source = normalize_newlines(source);
    let src = source.as_ref();
    let bytes = src.as_bytes();

    let mut children = Vec::new();
    let mut pos = 0;
    let mut at_line_start = true;

    while pos < bytes.len() {
        if src[pos..].starts_with(FENCE) {
            if let Some(close) = find_closing_fence(src, pos) {
                children.push(DocNode::Verbatim(Verbatim {
                    content: src[pos + FENCE.len()..close].to_string(),
                }));
                pos = close + FENCE.len();
                at_line_start = false;
                continue;
            }
        }

        if bytes[pos] == b'\n' {
            children.push(DocNode::Break);
            pos += 1;
            at_line_start = true;
            continue;
        }

        let line_end = src[pos..].find('\n').map_or(src.len(), |i| pos + i);
        let (kind, prefix_len) = if at_line_start {
            classify_line(&src[pos..line_end])
        } else {
            (LineKind::Plain, 0)
        };

        if kind == LineKind::Rule {
            children.push(DocNode::Rule);
            pos = line_end;
            at_line_start = false;
            continue;
        }

        let content_start = pos + prefix_len;
        let segment_end = find_fence_start(src, content_start, line_end).unwrap_or(line_end);
        let content = parse_inlines(&src[content_start..segment_end]);

        match kind {
            LineKind::Heading(level) => children.push(DocNode::Heading(Heading { level, content })),
            LineKind::Quote => children.push(DocNode::Quote(Quote { content })),
            LineKind::Plain if !content.is_empty() => {
                children.push(DocNode::Line(Line { content }))
            }
            _ => {}
        }

        pos = segment_end;
        at_line_start = false;
    }

    tracing::trace!(nodes = children.len(), "parsed markup");
    Document::new(children)
}

/// Browsers submit textarea content with CRLF line endings.
fn normalize_newlines(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

fn classify_line(line: &str) -> (LineKind, usize) {
    if line.trim_end() == RULE {
        return (LineKind::Rule, 0);
    }
    for (prefix, level) in HEADING_PREFIXES {
        if line.starts_with(prefix) {
            return (LineKind::Heading(level), prefix.len());
        }
    }
    if line.starts_with(QUOTE_PREFIX) {
        return (LineKind::Quote, QUOTE_PREFIX.len());
    }
    (LineKind::Plain, 0)
}

/// Position of the fence closing the one opened at `open`.
fn find_closing_fence(src: &str, open: usize) -> Option<usize> {
    let search_from = open + FENCE.len();
    src[search_from..].find(FENCE).map(|i| search_from + i)
}

/// First fence in `src[from..until]` that has a closing fence somewhere later.
///
/// Only the first opening needs checking: if it has no closing fence then
/// there is no fence after it at all.
fn find_fence_start(src: &str, from: usize, until: usize) -> Option<usize> {
    let open = from + src[from..until].find(FENCE)?;
    find_closing_fence(src, open).map(|_| open)
}
