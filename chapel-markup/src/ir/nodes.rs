//! Core data structures for the Intermediate Representation (IR).

use serde::Serialize;

/// A block-level node of a document.
///
/// The markup dialect is line oriented: every source line becomes one block
/// node, and the newlines between them are kept as [`DocNode::Break`] so the
/// serializers can decide how to present them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DocNode {
    Heading(Heading),
    Line(Line),
    Quote(Quote),
    Rule,
    Verbatim(Verbatim),
    Break,
}

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub children: Vec<DocNode>,
}

impl Document {
    pub fn new(children: Vec<DocNode>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Represents a heading with a specific level (1 to 3).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: usize,
    pub content: Vec<InlineContent>,
}

/// A run of inline content that is not a heading or a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub content: Vec<InlineContent>,
}

/// Represents a single quoted line (`> text`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub content: Vec<InlineContent>,
}

/// Represents a fenced code block. Content is kept exactly as written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verbatim {
    pub content: String,
}

/// Represents inline content, such as text, bold, italics, etc.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum InlineContent {
    Text(String),
    Bold(Vec<InlineContent>),
    Italic(Vec<InlineContent>),
    Strikethrough(Vec<InlineContent>),
    Code(String),
    Link(Link),
    Image(Image),
    Video(Video),
}

impl InlineContent {
    /// Concatenated text of this node and its children, without markup.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            InlineContent::Text(text) | InlineContent::Code(text) => out.push_str(text),
            InlineContent::Bold(children)
            | InlineContent::Italic(children)
            | InlineContent::Strikethrough(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            InlineContent::Link(link) => {
                for child in &link.text {
                    child.collect_text(out);
                }
            }
            InlineContent::Image(image) => out.push_str(&image.alt),
            InlineContent::Video(_) => {}
        }
    }
}

/// Represents a hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub text: Vec<InlineContent>,
    pub href: String,
}

/// Represents an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Represents an embedded video (`[[video: url]]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    pub src: String,
}
