//! Markdown format implementation
//!
//! The site's content editors write a small markdown dialect. It is not
//! CommonMark: there are no lists or tables, italics are only `_text_`, and
//! there is a `[[video: url]]` extension. This module implements both
//! directions between that dialect and the IR.
//!
//! # Element Mapping Table
//!
//! | Markup              | IR                          | Notes                                        |
//! |---------------------|-----------------------------|----------------------------------------------|
//! | `![alt](url)`       | `InlineContent::Image`      | Tried before links                           |
//! | `[[video: url]]`    | `InlineContent::Video`      | Tried before links                           |
//! | ```` ```code``` ````| `DocNode::Verbatim`         | May start mid-line and span lines            |
//! | `` `code` ``        | `InlineContent::Code`       | No backtick inside                           |
//! | `**text**`          | `InlineContent::Bold`       | No `*` inside                                |
//! | `_text_`            | `InlineContent::Italic`     | No `_` inside                                |
//! | `~~text~~`          | `InlineContent::Strikethrough` | No `~` inside                             |
//! | `---` line          | `DocNode::Rule`             |                                              |
//! | `### ` / `## ` / `# ` | `DocNode::Heading`        | Longest prefix first                         |
//! | `> ` line           | `DocNode::Quote`            |                                              |
//! | `[text](url)`       | `InlineContent::Link`       |                                              |
//! | newline             | `DocNode::Break`            | Outside code blocks                          |
//!
//! # Known Limitations
//!
//! The "no delimiter inside" rule is a heuristic, not a grammar:
//! - `**a*b*c**` stays literal text
//! - `snake_case_words` get italics in the middle
//! - emphasis never spans a newline
//!
//! Malformed markup is never rejected; it is rendered as the characters the
//! author typed.

mod inline;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub use inline::parse_inlines;
pub use parser::parse_markdown;

/// Format implementation for the site's markdown dialect
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Site markdown dialect (headings, emphasis, links, images, video embeds)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(doc)
    }
}
