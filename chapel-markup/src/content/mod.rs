//! Typed content records.
//!
//! Each kind of document the site manages (events, sermons, ministers,
//! bulletins, gallery photos and the site settings) has a record type with
//! serde support and a [`Validate`] implementation. [`ContentRecord`] ties
//! them together for callers that receive a record without knowing its kind,
//! such as the `chapel record` command.
//!
//! Markdown fields are rendered through [`ContentRecord::render_fields`],
//! exactly once per call.

pub mod records;
pub mod validate;

pub use records::{
    Bulletin, Event, GalleryPhoto, Minister, Recurrence, RecurrenceKind, Sermon, SiteSettings,
};
pub use validate::{FieldError, Problem, Validate, ValidationErrors};

use crate::render::{render_with_options, RenderOptions};
use serde::{Deserialize, Serialize, Serializer};

/// Any record, tagged by `kind` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentRecord {
    Event(Event),
    Sermon(Sermon),
    Minister(Minister),
    Bulletin(Bulletin),
    GalleryPhoto(GalleryPhoto),
    SiteSettings(SiteSettings),
}

impl ContentRecord {
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentRecord::Event(_) => "event",
            ContentRecord::Sermon(_) => "sermon",
            ContentRecord::Minister(_) => "minister",
            ContentRecord::Bulletin(_) => "bulletin",
            ContentRecord::GalleryPhoto(_) => "gallery-photo",
            ContentRecord::SiteSettings(_) => "site-settings",
        }
    }

    /// The record's markdown fields, by JSON field name.
    pub fn markdown_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            ContentRecord::Event(event) => vec![("description", event.description.as_str())],
            ContentRecord::Sermon(sermon) => vec![("summary", sermon.summary.as_str())],
            ContentRecord::Minister(minister) => vec![("bio", minister.bio.as_str())],
            ContentRecord::Bulletin(bulletin) => {
                vec![("description", bulletin.description.as_str())]
            }
            ContentRecord::GalleryPhoto(_) => vec![],
            ContentRecord::SiteSettings(settings) => vec![("about", settings.about.as_str())],
        }
    }

    /// Render every markdown field to HTML.
    pub fn render_fields(&self, options: &RenderOptions) -> RenderedFields {
        let fields = self
            .markdown_fields()
            .into_iter()
            .map(|(name, source)| (name, render_with_options(source, options)))
            .collect();
        tracing::debug!(kind = self.kind(), "rendered record fields");
        RenderedFields { fields }
    }
}

impl Validate for ContentRecord {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            ContentRecord::Event(record) => record.validate(),
            ContentRecord::Sermon(record) => record.validate(),
            ContentRecord::Minister(record) => record.validate(),
            ContentRecord::Bulletin(record) => record.validate(),
            ContentRecord::GalleryPhoto(record) => record.validate(),
            ContentRecord::SiteSettings(record) => record.validate(),
        }
    }
}

/// HTML for a record's markdown fields, in field order. Serializes as a JSON
/// object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedFields {
    fields: Vec<(&'static str, String)>,
}

impl RenderedFields {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, html)| html.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(name, html)| (*name, html.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for RenderedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
