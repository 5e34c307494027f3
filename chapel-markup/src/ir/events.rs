//! Defines the flat event stream representation of a document.

use crate::ir::nodes::InlineContent;

/// Represents a single event in the document stream.
///
/// Serializers consume this instead of the block list so that presentation
/// decisions (like grouping lines into paragraphs) are made in one place,
/// see [`crate::common::nested_to_flat`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartDocument,
    EndDocument,
    StartHeading(usize),
    EndHeading(usize),
    StartParagraph,
    EndParagraph,
    StartQuote,
    EndQuote,
    Rule,
    Verbatim(String),
    LineBreak,
    Inline(InlineContent),
}
