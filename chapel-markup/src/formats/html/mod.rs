//! HTML format implementation
//!
//! Export only: content is authored in the markdown dialect and rendered to
//! HTML for the public pages. Importing HTML is not supported.
//!
//! # Library Choice
//!
//! Output is built as an `html5ever` / `markup5ever_rcdom` DOM and serialized
//! by html5ever. The serializer owns escaping, so text and attribute values
//! are escaped exactly once and void elements come out HTML5-style (`<br>`,
//! `<hr>`, `<img …>`).
//!
//! # Element Mapping Table
//!
//! | IR              | HTML                                                                  |
//! |-----------------|-----------------------------------------------------------------------|
//! | Heading n       | `<hn>`                                                                |
//! | Line            | inline children directly, or inside `<p>` in paragraph mode           |
//! | Quote           | `<blockquote>`                                                        |
//! | Rule            | `<hr>`                                                                |
//! | Verbatim        | `<pre><code>`                                                         |
//! | Break           | `<br>` (in paragraph mode only between lines of one paragraph)        |
//! | Bold            | `<strong>`                                                            |
//! | Italic          | `<em>`                                                                |
//! | Strikethrough   | `<del>`                                                               |
//! | Code            | `<code>`                                                              |
//! | Link            | `<a href target="_blank" rel="noopener noreferrer">`                  |
//! | Image           | `<img src alt>`                                                       |
//! | Video           | `<figure class="chapel-video"><video src controls></video></figure>` |
//!
//! # Options
//!
//! Passed as string pairs through [`Format::serialize_with_options`]:
//!
//! - `line-breaks`: `br` (default) or `paragraphs`
//! - `link-target`: `blank` (default) or `self`
//! - `sanitize-urls`: boolean, default true
//! - `standalone`: boolean, wrap in a full page with `css/baseline.css` embedded
//! - `title`: page title for standalone output
//! - `custom-css`: CSS appended after the baseline for standalone output

pub mod serializer;

use crate::error::FormatError;
use crate::format::{parse_bool_option, Format};
use crate::ir::nodes::Document;
pub use serializer::{serialize_fragment, serialize_to_html, HtmlOptions};
use std::collections::HashMap;

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Layer string options over this format's defaults.
    pub fn resolve_options(
        &self,
        options: &HashMap<String, String>,
    ) -> Result<HtmlOptions, FormatError> {
        let mut resolved = self.options.clone();

        for (key, value) in options {
            match key.as_str() {
                "line-breaks" => {
                    resolved.render.line_breaks =
                        value.parse().map_err(|_| invalid(key, value))?;
                }
                "link-target" => {
                    resolved.render.link_target_blank = match value.as_str() {
                        "blank" | "_blank" => true,
                        "self" | "_self" => false,
                        _ => return Err(invalid(key, value)),
                    };
                }
                "sanitize-urls" => resolved.render.sanitize_urls = parse_bool_option(key, value)?,
                "standalone" => resolved.standalone = parse_bool_option(key, value)?,
                "title" => resolved.title = value.clone(),
                "custom-css" => {
                    resolved.custom_css = if value.is_empty() {
                        None
                    } else {
                        Some(value.clone())
                    };
                }
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown html option '{key}'"
                    )))
                }
            }
        }

        Ok(resolved)
    }
}

fn invalid(key: &str, value: &str) -> FormatError {
    FormatError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 fragment or standalone page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let resolved = self.resolve_options(options)?;
        serialize_to_html(doc, &resolved)
    }
}
