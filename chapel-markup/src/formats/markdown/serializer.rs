//! Markdown serialization (IR → source)
//!
//! Writes the IR back out in the same dialect the parser reads. Literal text
//! is written as-is: it was literal in the source, so it stays literal when
//! parsed again. The only normalization is the spacing of video tokens.

use crate::error::FormatError;
use crate::ir::nodes::{DocNode, Document, InlineContent};

/// Serialize an IR document to markdown source
pub fn serialize_to_markdown(doc: &Document) -> Result<String, FormatError> {
    let mut out = String::new();

    for node in &doc.children {
        match node {
            DocNode::Heading(heading) => {
                out.push_str(&"#".repeat(heading.level));
                out.push(' ');
                write_inlines(&heading.content, &mut out);
            }
            DocNode::Line(line) => write_inlines(&line.content, &mut out),
            DocNode::Quote(quote) => {
                out.push_str("> ");
                write_inlines(&quote.content, &mut out);
            }
            DocNode::Rule => out.push_str("---"),
            DocNode::Verbatim(verbatim) => {
                out.push_str("```");
                out.push_str(&verbatim.content);
                out.push_str("```");
            }
            DocNode::Break => out.push('\n'),
        }
    }

    Ok(out)
}

fn write_inlines(content: &[InlineContent], out: &mut String) {
    for inline in content {
        write_inline(inline, out);
    }
}

fn write_inline(inline: &InlineContent, out: &mut String) {
    match inline {
        InlineContent::Text(text) => out.push_str(text),
        InlineContent::Bold(children) => wrap(children, "**", out),
        InlineContent::Italic(children) => wrap(children, "_", out),
        InlineContent::Strikethrough(children) => wrap(children, "~~", out),
        InlineContent::Code(code) => {
            out.push('`');
            out.push_str(code);
            out.push('`');
        }
        InlineContent::Link(link) => {
            out.push('[');
            write_inlines(&link.text, out);
            out.push_str("](");
            out.push_str(&link.href);
            out.push(')');
        }
        InlineContent::Image(image) => {
            out.push_str("![");
            out.push_str(&image.alt);
            out.push_str("](");
            out.push_str(&image.src);
            out.push(')');
        }
        InlineContent::Video(video) => {
            out.push_str("[[video: ");
            out.push_str(&video.src);
            out.push_str("]]");
        }
    }
}

fn wrap(children: &[InlineContent], delim: &str, out: &mut String) {
    out.push_str(delim);
    write_inlines(children, out);
    out.push_str(delim);
}
