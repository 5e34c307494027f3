//! XML-like IR tag serialization
//!
//! Dumps the IR produced by the lexer as indented tags, for debugging how a
//! piece of content was tokenized.
//!
//! ## Format
//!
//! - Node type → tag name (kebab-case)
//! - Text and code → text content
//! - Children → nested tags
//! - URLs and heading levels → attributes
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <heading level="2">
//!     <text>Welcome</text>
//!   </heading>
//!   <break/>
//!   <line>
//!     <link href="/events">
//!       <text>events</text>
//!     </link>
//!   </line>
//! </document>
//! ```

use crate::error::FormatError;
use crate::escape::escape_attribute;
use crate::format::Format;
use crate::ir::nodes::{DocNode, Document, InlineContent};

/// Serialize a document to the tag format
pub fn serialize_document(doc: &Document) -> String {
    let mut output = String::from("<document>\n");
    for node in &doc.children {
        format_block(node, 1, &mut output);
    }
    output.push_str("</document>");
    output
}

fn format_block(node: &DocNode, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    match node {
        DocNode::Heading(heading) => {
            let open = format!("heading level=\"{}\"", heading.level);
            format_container(&open, "heading", &heading.content, indent_level, output);
        }
        DocNode::Line(line) => format_container("line", "line", &line.content, indent_level, output),
        DocNode::Quote(quote) => {
            format_container("quote", "quote", &quote.content, indent_level, output)
        }
        DocNode::Rule => output.push_str(&format!("{indent}<rule/>\n")),
        DocNode::Break => output.push_str(&format!("{indent}<break/>\n")),
        DocNode::Verbatim(verbatim) => output.push_str(&format!(
            "{indent}<verbatim>{}</verbatim>\n",
            escape_attribute(&verbatim.content)
        )),
    }
}

fn format_inline(inline: &InlineContent, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    match inline {
        InlineContent::Text(text) => {
            output.push_str(&format!("{indent}<text>{}</text>\n", escape_attribute(text)))
        }
        InlineContent::Code(code) => {
            output.push_str(&format!("{indent}<code>{}</code>\n", escape_attribute(code)))
        }
        InlineContent::Bold(children) => {
            format_container("bold", "bold", children, indent_level, output)
        }
        InlineContent::Italic(children) => {
            format_container("italic", "italic", children, indent_level, output)
        }
        InlineContent::Strikethrough(children) => {
            format_container("strikethrough", "strikethrough", children, indent_level, output)
        }
        InlineContent::Link(link) => {
            let open = format!("link href=\"{}\"", escape_attribute(&link.href));
            format_container(&open, "link", &link.text, indent_level, output);
        }
        InlineContent::Image(image) => output.push_str(&format!(
            "{indent}<image src=\"{}\" alt=\"{}\"/>\n",
            escape_attribute(&image.src),
            escape_attribute(&image.alt)
        )),
        InlineContent::Video(video) => output.push_str(&format!(
            "{indent}<video src=\"{}\"/>\n",
            escape_attribute(&video.src)
        )),
    }
}

fn format_container(
    open: &str,
    tag: &str,
    children: &[InlineContent],
    indent_level: usize,
    output: &mut String,
) {
    let indent = "  ".repeat(indent_level);
    if children.is_empty() {
        output.push_str(&format!("{indent}<{open}/>\n"));
        return;
    }
    output.push_str(&format!("{indent}<{open}>\n"));
    for child in children {
        format_inline(child, indent_level + 1, output);
    }
    output.push_str(&format!("{indent}</{tag}>\n"));
}

/// Format implementation for XML-like tag format
pub struct TagFormat;

impl Format for TagFormat {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like dump of the parsed IR"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tag", "xml"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }
}
