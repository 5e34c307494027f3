//! HTML serialization (IR → HTML)
//!
//! Pipeline: IR → Events → RcDom → HTML string.
//!
//! Text and attribute values are stored raw in the DOM and escaped by the
//! html5ever serializer, once, on the way out.

use crate::common::links::sanitize_url;
use crate::common::nested_to_flat::to_events;
use crate::error::FormatError;
use crate::escape::escape_html;
use crate::ir::events::Event;
use crate::ir::nodes::{Document, InlineContent};
use crate::render::RenderOptions;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

const BASELINE_CSS: &str = include_str!("../../../css/baseline.css");

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    pub render: RenderOptions,
    /// Wrap the fragment in a complete HTML5 page
    pub standalone: bool,
    /// Page title, only used when standalone
    pub title: String,
    /// Optional CSS appended after the baseline, only used when standalone
    pub custom_css: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            standalone: false,
            title: "Chapel".to_string(),
            custom_css: None,
        }
    }
}

impl HtmlOptions {
    pub fn new(render: RenderOptions) -> Self {
        Self {
            render,
            ..Self::default()
        }
    }

    pub fn standalone(mut self, title: impl Into<String>) -> Self {
        self.standalone = true;
        self.title = title.into();
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Serialize a document to HTML, as a fragment or a full page.
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> Result<String, FormatError> {
    let fragment = serialize_fragment(doc, &options.render)?;
    if options.standalone {
        Ok(wrap_in_document(&fragment, options))
    } else {
        Ok(fragment)
    }
}

/// Serialize a document to an HTML fragment ready to be injected in a page.
pub fn serialize_fragment(doc: &Document, options: &RenderOptions) -> Result<String, FormatError> {
    tracing::debug!(
        nodes = doc.children.len(),
        line_breaks = %options.line_breaks,
        "serializing html fragment"
    );

    // Step 1: IR → Events
    let events = to_events(doc, options.line_breaks);

    // Step 2: Events → RcDom (HTML DOM tree)
    let dom = build_html_dom(&events, options)?;

    // Step 3: RcDom → HTML string
    serialize_dom(&dom)
}

/// Build an HTML DOM tree from IR events
fn build_html_dom(events: &[Event], options: &RenderOptions) -> Result<RcDom, FormatError> {
    let dom = RcDom::default();

    // Holds the fragment; only its children are serialized
    let container = create_element("div", vec![]);

    let mut current_parent: Handle = container.clone();
    let mut parent_stack: Vec<Handle> = vec![];

    for event in events {
        match event {
            Event::StartDocument | Event::EndDocument => {}

            Event::StartHeading(level) => {
                let heading = create_element(&format!("h{}", (*level).clamp(1, 6)), vec![]);
                open_element(&mut current_parent, &mut parent_stack, heading);
            }

            Event::StartParagraph => {
                let para = create_element("p", vec![]);
                open_element(&mut current_parent, &mut parent_stack, para);
            }

            Event::StartQuote => {
                let quote = create_element("blockquote", vec![]);
                open_element(&mut current_parent, &mut parent_stack, quote);
            }

            Event::EndHeading(_) | Event::EndParagraph | Event::EndQuote => {
                current_parent = parent_stack.pop().ok_or_else(|| {
                    FormatError::SerializationError(format!("Unbalanced {event:?}"))
                })?;
            }

            Event::Rule => append(&current_parent, create_element("hr", vec![])),

            Event::LineBreak => append(&current_parent, create_element("br", vec![])),

            Event::Verbatim(content) => {
                let pre = create_element("pre", vec![]);
                let code = create_element("code", vec![]);
                append(&code, create_text(content));
                append(&pre, code);
                append(&current_parent, pre);
            }

            Event::Inline(inline) => add_inline_to_node(&current_parent, inline, options),
        }
    }

    if !parent_stack.is_empty() {
        return Err(FormatError::SerializationError(
            "Unclosed element at end of document".to_string(),
        ));
    }

    dom.document.children.borrow_mut().push(container);

    Ok(dom)
}

fn open_element(current_parent: &mut Handle, parent_stack: &mut Vec<Handle>, element: Handle) {
    append(current_parent, element.clone());
    parent_stack.push(current_parent.clone());
    *current_parent = element;
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Add inline content to an HTML node
fn add_inline_to_node(parent: &Handle, inline: &InlineContent, options: &RenderOptions) {
    match inline {
        InlineContent::Text(text) => append(parent, create_text(text)),

        InlineContent::Bold(children) => add_wrapped(parent, "strong", children, options),

        InlineContent::Italic(children) => add_wrapped(parent, "em", children, options),

        InlineContent::Strikethrough(children) => add_wrapped(parent, "del", children, options),

        InlineContent::Code(code_text) => {
            let code = create_element("code", vec![]);
            append(&code, create_text(code_text));
            append(parent, code);
        }

        InlineContent::Link(link) => {
            let href = url_for(&link.href, options);
            let mut attrs = vec![("href", &*href)];
            if options.link_target_blank {
                attrs.push(("target", "_blank"));
                attrs.push(("rel", "noopener noreferrer"));
            }
            let anchor = create_element("a", attrs);
            for child in &link.text {
                add_inline_to_node(&anchor, child, options);
            }
            append(parent, anchor);
        }

        InlineContent::Image(image) => {
            let src = url_for(&image.src, options);
            let attrs = vec![("src", &*src), ("alt", image.alt.as_str())];
            append(parent, create_element("img", attrs));
        }

        InlineContent::Video(video) => {
            let src = url_for(&video.src, options);
            let figure = create_element("figure", vec![("class", "chapel-video")]);
            let vid = create_element("video", vec![("src", &*src), ("controls", "")]);
            append(&figure, vid);
            append(parent, figure);
        }
    }
}

fn add_wrapped(parent: &Handle, tag: &str, children: &[InlineContent], options: &RenderOptions) {
    let element = create_element(tag, vec![]);
    for child in children {
        add_inline_to_node(&element, child, options);
    }
    append(parent, element);
}

fn url_for<'a>(raw: &'a str, options: &RenderOptions) -> Cow<'a, str> {
    if options.sanitize_urls {
        sanitize_url(raw)
    } else {
        Cow::Borrowed(raw)
    }
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the DOM to an HTML string (just the container's children)
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    // IncludeNode serializes the element AND its children
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Wrap the fragment in a complete HTML document with embedded CSS
fn wrap_in_document(body_html: &str, options: &HtmlOptions) -> String {
    let title = escape_html(&options.title);
    let custom_css = options.custom_css.as_deref().unwrap_or("");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="chapel-markup">
  <title>{title}</title>
  <style>
{BASELINE_CSS}
{custom_css}
  </style>
</head>
<body>
<main class="chapel-content">
{body_html}
</main>
</body>
</html>"#
    )
}
