//! Document publishing pipeline.
//!
//! Provides a high-level API for converting a parsed document to an output
//! format and optionally writing it to disk. This bridges the format
//! registry and file I/O for commands like "convert this bulletin to a
//! standalone HTML page".
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "html")
///     .with_output_path("bulletin.html")
///     .with_option("standalone", "true");
/// ```
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// The parsed document to convert.
    pub document: &'a Document,
    /// Target format name (e.g., "html", "text").
    pub format: &'a str,
    /// Optional file path for writing output.
    pub output: Option<PathBuf>,
    /// Format-specific options (e.g., line-breaks, standalone).
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (no output path given).
    InMemory(String),
    /// Path to the written file.
    File(PathBuf),
}

/// Serializes `spec.document` and writes it to the output path, if any.
///
/// # Errors
///
/// Returns [`FormatError`] if the format is unknown or cannot serialize,
/// an option is rejected, or the output file cannot be written.
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishArtifact, FormatError> {
    let registry = FormatRegistry::with_defaults();
    let text = registry.serialize_with_options(spec.document, spec.format, &spec.options)?;
    match spec.output {
        Some(path) => {
            fs::write(&path, text).map_err(|err| {
                FormatError::SerializationError(format!(
                    "Failed to write {}: {err}",
                    path.display()
                ))
            })?;
            tracing::debug!(path = %path.display(), format = spec.format, "wrote output");
            Ok(PublishArtifact::File(path))
        }
        None => Ok(PublishArtifact::InMemory(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::parse_markdown;
    use tempfile::tempdir;

    #[test]
    fn publishes_to_memory_when_no_output_path() {
        let doc = parse_markdown("Paragraph **text**.");
        let artifact = publish(PublishSpec::new(&doc, "html")).expect("publish");
        assert_eq!(
            artifact,
            PublishArtifact::InMemory("Paragraph <strong>text</strong>.".to_string())
        );
    }

    #[test]
    fn writes_to_disk_when_output_path_provided() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.html");
        let doc = parse_markdown("Paragraph text.");
        let artifact = publish(
            PublishSpec::new(&doc, "html")
                .with_output_path(&path)
                .with_option("standalone", "true"),
        )
        .expect("publish");

        assert_eq!(artifact, PublishArtifact::File(path.clone()));
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
        assert!(contents.contains("Paragraph text."));
    }

    #[test]
    fn rejected_option_is_an_error() {
        let doc = parse_markdown("x");
        let result = publish(PublishSpec::new(&doc, "html").with_option("theme", "dark"));
        assert!(result.is_err());
    }
}
