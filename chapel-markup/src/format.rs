//! The contract every chapel output (and input) format implements.
//!
//! A format converts between text and the IR [`Document`]. Markdown is the
//! only dialect editors write, so it is the only format that parses; the rest
//! (HTML for pages, plain text for excerpts, the tag dump for debugging) only
//! serialize. Per-render knobs arrive as string pairs so the CLI, the config
//! file and [`crate::publish`] can all pass them the same way.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use std::collections::HashMap;
use std::path::Path;

/// A named conversion between text and [`Document`].
///
/// Only `name` and `description` are required. A serialize-only format sets
/// [`supports_serialization`](Format::supports_serialization) and overrides
/// [`serialize`](Format::serialize); anything it does not override answers
/// with [`FormatError::NotSupported`].
///
/// ```ignore
/// struct Excerpt;
///
/// impl Format for Excerpt {
///     fn name(&self) -> &str {
///         "excerpt"
///     }
///
///     fn description(&self) -> &str {
///         "First sentence of a sermon note"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(first_sentence(doc))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry key, also the value of the CLI's `--from` / `--to`.
    fn name(&self) -> &str;

    /// One line shown by `chapel --list-formats`.
    fn description(&self) -> &str;

    /// Extensions (no dot, lowercase) of source files in this format.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether a file at `path` looks like this format. Extensions compare
    /// case-insensitively so `Bulletin.MD` is markdown too.
    fn claims_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.file_extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(unsupported(self.name(), "parsing"))
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(unsupported(self.name(), "serialization"))
    }

    /// Serialize with render options such as `line-breaks=paragraphs`.
    ///
    /// Formats without options keep this default: an empty map serializes
    /// normally, any key is rejected so a typo never silently does nothing.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        match options.keys().next() {
            None => self.serialize(doc),
            Some(key) => Err(FormatError::NotSupported(format!(
                "Format '{}' has no option '{key}'",
                self.name()
            ))),
        }
    }
}

/// The error for a direction a format does not convert in.
pub(crate) fn unsupported(format: &str, direction: &str) -> FormatError {
    FormatError::NotSupported(format!("Format '{format}' does not support {direction}"))
}

/// Parse a boolean option value the way the CLI accepts them.
pub(crate) fn parse_bool_option(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::InvalidOption {
            key: key.to_string(),
            value: other.to_string(),
        }),
    }
}
