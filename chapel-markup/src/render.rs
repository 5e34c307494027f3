//! The renderer entry point used by page templates.
//!
//! `render` is the one function the public pages call for bulletin
//! descriptions, minister bios and event text. It parses the markup into the
//! IR and serializes an HTML fragment in a single pass. Calling it on its own
//! output escapes the generated tags, so each raw document must be rendered
//! exactly once per page.

use crate::escape::escape_html;
use crate::formats::html::serializer::serialize_fragment;
use crate::formats::markdown::parse_markdown;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How source newlines are presented in HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreaks {
    /// Every newline becomes `<br>`
    #[default]
    Br,
    /// Blank lines separate `<p>` paragraphs, single newlines become `<br>`
    Paragraphs,
}

impl FromStr for LineBreaks {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "br" => Ok(LineBreaks::Br),
            "paragraphs" | "p" => Ok(LineBreaks::Paragraphs),
            other => Err(format!(
                "unknown line break mode '{other}' (expected 'br' or 'paragraphs')"
            )),
        }
    }
}

impl fmt::Display for LineBreaks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineBreaks::Br => write!(f, "br"),
            LineBreaks::Paragraphs => write!(f, "paragraphs"),
        }
    }
}

/// Knobs shared by every HTML rendering of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub line_breaks: LineBreaks,
    /// Open links in a new tab (`target="_blank"` with `rel="noopener noreferrer"`)
    pub link_target_blank: bool,
    /// Replace URLs with unsafe schemes (`javascript:` and friends) by `#`
    pub sanitize_urls: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_breaks: LineBreaks::Br,
            link_target_blank: true,
            sanitize_urls: true,
        }
    }
}

impl RenderOptions {
    pub fn with_line_breaks(mut self, line_breaks: LineBreaks) -> Self {
        self.line_breaks = line_breaks;
        self
    }
}

/// Render markup to an HTML fragment with the default options.
pub fn render(raw: &str) -> String {
    render_with_options(raw, &RenderOptions::default())
}

/// Render markup to an HTML fragment.
///
/// Never fails: malformed markup is rendered as literal text. Should the
/// serializer itself fail, the escaped source is returned instead.
pub fn render_with_options(raw: &str, options: &RenderOptions) -> String {
    let doc = parse_markdown(raw);
    match serialize_fragment(&doc, options) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(%err, "html serialization failed, rendering source as text");
            escape_html(raw)
        }
    }
}
