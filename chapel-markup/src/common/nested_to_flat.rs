//! Converts the block list of a [`Document`] into a flat event stream.
//!
//! # The High-Level Concept
//!
//! The lexer produces a flat list of blocks with explicit `Break` nodes for
//! every source newline. Serializers do not want to care how newlines are
//! presented, so this module makes that decision once and emits a stream of
//! start/content/end events that maps one to one onto output elements.
//!
//! # The Algorithm
//!
//! With [`LineBreaks::Br`] the walk is direct: every block becomes its events
//! in place and every `Break` becomes a `LineBreak`.
//!
//! With [`LineBreaks::Paragraphs`]:
//!
//! 1. A `Line` opens a paragraph if none is open. If one is open, the breaks
//!    seen since the previous line decide: one break joins the lines with a
//!    `LineBreak`, two or more close the paragraph and open a new one.
//! 2. Lines holding nothing but whitespace count as blank lines.
//! 3. Headings, quotes, rules and code blocks close the open paragraph and
//!    stand on their own.
//! 4. A video is a figure, and figures cannot sit inside `<p>`. A line is
//!    split at its top-level videos: the text before a video stays in the
//!    paragraph, the video closes it, and text after the video opens a new
//!    one. Whitespace-only runs between videos are dropped.
//! 5. Breaks outside a paragraph are dropped, the block elements already
//!    separate visually.

use crate::ir::events::Event;
use crate::ir::nodes::{DocNode, Document, InlineContent};
use crate::render::LineBreaks;

/// Converts a document to a flat vector of `Event`s.
pub fn to_events(doc: &Document, line_breaks: LineBreaks) -> Vec<Event> {
    let mut events = vec![Event::StartDocument];
    match line_breaks {
        LineBreaks::Br => {
            for node in &doc.children {
                walk_node(node, &mut events);
            }
        }
        LineBreaks::Paragraphs => group_paragraphs(&doc.children, &mut events),
    }
    events.push(Event::EndDocument);
    events
}

fn walk_node(node: &DocNode, events: &mut Vec<Event>) {
    match node {
        DocNode::Heading(heading) => {
            events.push(Event::StartHeading(heading.level));
            emit_inlines(&heading.content, events);
            events.push(Event::EndHeading(heading.level));
        }
        DocNode::Line(line) => emit_inlines(&line.content, events),
        DocNode::Quote(quote) => {
            events.push(Event::StartQuote);
            emit_inlines(&quote.content, events);
            events.push(Event::EndQuote);
        }
        DocNode::Rule => events.push(Event::Rule),
        DocNode::Verbatim(verbatim) => events.push(Event::Verbatim(verbatim.content.clone())),
        DocNode::Break => events.push(Event::LineBreak),
    }
}

fn emit_inlines(content: &[InlineContent], events: &mut Vec<Event>) {
    events.extend(content.iter().cloned().map(Event::Inline));
}

fn group_paragraphs(nodes: &[DocNode], events: &mut Vec<Event>) {
    let mut open = false;
    let mut breaks = 0;

    for node in nodes {
        match node {
            DocNode::Break => {
                if open {
                    breaks += 1;
                }
            }
            DocNode::Line(line) if is_blank(&line.content) => {}
            DocNode::Line(line) => {
                let mut run = 0;
                for (index, inline) in line.content.iter().enumerate() {
                    if let InlineContent::Video(_) = inline {
                        emit_run(&line.content[run..index], &mut open, breaks, events);
                        close_paragraph(&mut open, events);
                        events.push(Event::Inline(inline.clone()));
                        run = index + 1;
                    }
                }
                emit_run(&line.content[run..], &mut open, breaks, events);
            }
            block => {
                close_paragraph(&mut open, events);
                walk_node(block, events);
            }
        }
        if !matches!(node, DocNode::Break) && !is_blank_line(node) {
            breaks = 0;
        }
    }

    close_paragraph(&mut open, events);
}

/// Emit a video-free run of one line into the current paragraph.
fn emit_run(run: &[InlineContent], open: &mut bool, breaks: usize, events: &mut Vec<Event>) {
    if is_blank(run) {
        return;
    }
    if !*open {
        events.push(Event::StartParagraph);
        *open = true;
    } else if breaks == 1 {
        events.push(Event::LineBreak);
    } else if breaks > 1 {
        events.push(Event::EndParagraph);
        events.push(Event::StartParagraph);
    }
    emit_inlines(run, events);
}

fn close_paragraph(open: &mut bool, events: &mut Vec<Event>) {
    if *open {
        events.push(Event::EndParagraph);
        *open = false;
    }
}

fn is_blank_line(node: &DocNode) -> bool {
    matches!(node, DocNode::Line(line) if is_blank(&line.content))
}

fn is_blank(content: &[InlineContent]) -> bool {
    content
        .iter()
        .all(|inline| matches!(inline, InlineContent::Text(text) if text.trim().is_empty()))
}
