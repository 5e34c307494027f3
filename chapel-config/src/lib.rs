//! Shared configuration loader for the chapel tools.
//!
//! `defaults/chapel.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ChapelConfig`].

use chapel_markup::{LineBreaks, RenderOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/chapel.default.toml");

/// Top-level configuration consumed by chapel applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapelConfig {
    pub render: RenderConfig,
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

/// Knobs shared by every HTML rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub line_breaks: LineBreaks,
    pub link_target: LinkTarget,
    pub sanitize_urls: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LinkTarget {
    #[serde(rename = "blank")]
    Blank,
    #[serde(rename = "self")]
    SameTab,
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkTarget::Blank => "blank",
            LinkTarget::SameTab => "self",
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            line_breaks: config.line_breaks,
            link_target_blank: config.link_target == LinkTarget::Blank,
            sanitize_urls: config.sanitize_urls,
        }
    }
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions::from(&config)
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
    pub text: TextConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub standalone: bool,
    pub title: String,
    pub custom_css: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    pub max_chars: usize,
}

/// Controls JSON output of the inspect and record commands.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub pretty_json: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ChapelConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ChapelConfig, ConfigError> {
    Loader::new().build()
}
