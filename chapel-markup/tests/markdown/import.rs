//! Import tests for the markdown dialect (markup → IR)

use crate::common::read_fixture;
use chapel_markup::ir::nodes::{DocNode, Heading, InlineContent, Line, Video};
use chapel_markup::FormatRegistry;
use serde_json::json;

fn text(s: &str) -> InlineContent {
    InlineContent::Text(s.to_string())
}

#[test]
fn test_kitchensink_block_structure() {
    let registry = FormatRegistry::with_defaults();
    let doc = registry
        .parse(&read_fixture("kitchensink.md"), "markdown")
        .unwrap();

    let kinds: Vec<&str> = doc
        .children
        .iter()
        .filter(|node| !matches!(node, DocNode::Break))
        .map(|node| match node {
            DocNode::Heading(_) => "heading",
            DocNode::Line(_) => "line",
            DocNode::Quote(_) => "quote",
            DocNode::Rule => "rule",
            DocNode::Verbatim(_) => "verbatim",
            DocNode::Break => "break",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "heading", "heading", "line", "line", "quote", "rule", "line", "line", "line",
            "verbatim", "heading", "line",
        ]
    );
    assert_eq!(
        doc.children
            .iter()
            .filter(|node| matches!(node, DocNode::Break))
            .count(),
        12
    );
}

#[test]
fn test_heading_levels() {
    let registry = FormatRegistry::with_defaults();
    let doc = registry.parse("# a\n## b\n### c\n#### d", "markdown").unwrap();

    let levels: Vec<usize> = doc
        .children
        .iter()
        .filter_map(|node| match node {
            DocNode::Heading(Heading { level, .. }) => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 3]);
    assert_eq!(
        doc.children.last(),
        Some(&DocNode::Line(Line {
            content: vec![text("#### d")],
        }))
    );
}

#[test]
fn test_video_line() {
    let registry = FormatRegistry::with_defaults();
    let doc = registry
        .parse("[[video:https://example.org/v.mp4]]", "markdown")
        .unwrap();
    assert_eq!(
        doc.children,
        vec![DocNode::Line(Line {
            content: vec![InlineContent::Video(Video {
                src: "https://example.org/v.mp4".to_string(),
            })],
        })]
    );
}

#[test]
fn test_ir_json_shape() {
    let registry = FormatRegistry::with_defaults();
    let doc = registry.parse("## Hi **there**\n---", "markdown").unwrap();

    assert_eq!(
        serde_json::to_value(&doc).unwrap(),
        json!({
            "children": [
                {
                    "type": "heading",
                    "level": 2,
                    "content": [
                        { "type": "text", "value": "Hi " },
                        { "type": "bold", "value": [{ "type": "text", "value": "there" }] }
                    ]
                },
                { "type": "break" },
                { "type": "rule" }
            ]
        })
    );
}
