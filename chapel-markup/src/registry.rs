//! The set of formats a chapel build knows about.
//!
//! The CLI resolves `--from` / `--to` and input file extensions here, and
//! [`crate::publish`] looks up the output format of every artifact. Formats
//! are kept sorted by name so `--list-formats` output is stable.

use crate::error::FormatError;
use crate::format::{unsupported, Format};
use crate::formats::html::HtmlFormat;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::tag::TagFormat;
use crate::formats::text::TextFormat;
use crate::ir::nodes::Document;
use std::collections::HashMap;
use std::path::Path;

pub struct FormatRegistry {
    /// Sorted by [`Format::name`], names unique.
    formats: Vec<Box<dyn Format>>,
}

impl FormatRegistry {
    /// A registry with no formats, for callers that assemble their own set.
    pub fn new() -> Self {
        FormatRegistry {
            formats: Vec::new(),
        }
    }

    /// Markdown, HTML, plain text and the tag dump.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MarkdownFormat);
        registry.register(HtmlFormat::default());
        registry.register(TextFormat);
        registry.register(TagFormat);
        registry
    }

    /// Add `format`, replacing any format already registered under its name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        match self.position(format.name()) {
            Ok(index) => self.formats[index] = Box::new(format),
            Err(index) => self.formats.insert(index, Box::new(format)),
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.position(name)
            .map(|index| self.formats[index].as_ref())
            .map_err(|_| FormatError::FormatNotFound(name.to_string()))
    }

    /// Every format, in name order.
    pub fn formats(&self) -> impl Iterator<Item = &dyn Format> + '_ {
        self.formats.iter().map(|format| format.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.formats().map(|format| format.name()).collect()
    }

    /// The format whose extensions claim `path`, e.g. `bulletin.md` →
    /// markdown. `None` when no format claims it.
    pub fn format_for_path(&self, path: impl AsRef<Path>) -> Option<&dyn Format> {
        let path = path.as_ref();
        let found = self.formats().find(|format| format.claims_path(path));
        tracing::debug!(
            path = %path.display(),
            format = found.map(|format| format.name()),
            "detected format"
        );
        found
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(unsupported(format, "parsing"));
        }
        fmt.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(unsupported(format, "serialization"));
        }
        tracing::debug!(format, options = options.len(), "serializing document");
        fmt.serialize_with_options(doc, options)
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.formats
            .binary_search_by(|format| format.name().cmp(name))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
