//! Record validation.
//!
//! Validation never stops at the first problem: every field is checked and
//! all errors come back together, so a form can mark each bad field at once.

use super::records::{
    Bulletin, Event, GalleryPhoto, Minister, Recurrence, RecurrenceKind, Sermon, SiteSettings,
};
use crate::common::links::is_web_url;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

pub const TITLE_MAX_CHARS: usize = 200;
pub const MAX_INTERVAL: u32 = 99;
pub const MAX_COUNT: u32 = 999;

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "kebab-case")]
pub enum Problem {
    Required,
    TooLong { max: usize },
    InvalidUrl,
    InvalidEmail,
    EndBeforeStart,
    OutOfRange { min: u32, max: u32 },
    Conflict { reason: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Required => write!(f, "is required"),
            Problem::TooLong { max } => write!(f, "must be at most {max} characters"),
            Problem::InvalidUrl => write!(f, "must be an absolute http or https URL"),
            Problem::InvalidEmail => write!(f, "must be an email address"),
            Problem::EndBeforeStart => write!(f, "must not be before the start"),
            Problem::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
            Problem::Conflict { reason } => write!(f, "{reason}"),
        }
    }
}

/// A problem tied to the JSON name of the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    #[serde(flatten)]
    pub problem: Problem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// Every problem found in one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, problem: Problem) {
        self.errors.push(FieldError {
            field: field.into(),
            problem,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Problems recorded for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Problem> + 'a {
        self.errors
            .iter()
            .filter(move |error| error.field == field)
            .map(|error| &error.problem)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, Problem::Required);
        }
    }

    fn title(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, Problem::Required);
        } else if value.chars().count() > TITLE_MAX_CHARS {
            self.push(
                field,
                Problem::TooLong {
                    max: TITLE_MAX_CHARS,
                },
            );
        }
    }

    fn url(&mut self, field: &str, value: &str) {
        if !is_web_url(value.trim()) {
            self.push(field, Problem::InvalidUrl);
        }
    }

    fn optional_url(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.url(field, value);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks a record before it is stored or rendered.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// One `@`, a non-empty local part, and a dotted domain without whitespace.
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    }
}

impl Validate for Event {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.title("title", &self.title);
        if let Some(end) = self.end {
            if end < self.start {
                errors.push("end", Problem::EndBeforeStart);
            }
        }
        if let Some(recurrence) = &self.recurrence {
            validate_recurrence(recurrence, self.start.date_naive(), &mut errors);
        }
        errors.into_result()
    }
}

fn validate_recurrence(recurrence: &Recurrence, start: NaiveDate, errors: &mut ValidationErrors) {
    if recurrence.interval == 0 || recurrence.interval > MAX_INTERVAL {
        errors.push(
            "recurrence.interval",
            Problem::OutOfRange {
                min: 1,
                max: MAX_INTERVAL,
            },
        );
    }
    if recurrence.kind == RecurrenceKind::Weekly && recurrence.days.is_empty() {
        errors.push("recurrence.days", Problem::Required);
    }
    match (recurrence.until, recurrence.count) {
        (Some(_), Some(_)) => errors.push(
            "recurrence.count",
            Problem::Conflict {
                reason: "cannot be combined with until".to_string(),
            },
        ),
        (Some(until), None) if until < start => {
            errors.push("recurrence.until", Problem::EndBeforeStart)
        }
        (None, Some(count)) if count == 0 || count > MAX_COUNT => errors.push(
            "recurrence.count",
            Problem::OutOfRange {
                min: 1,
                max: MAX_COUNT,
            },
        ),
        _ => {}
    }
}

impl Validate for Sermon {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.title("title", &self.title);
        errors.required("preacher", &self.preacher);
        errors.optional_url("mediaUrl", self.media_url.as_deref());
        errors.into_result()
    }
}

impl Validate for Minister {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.title("name", &self.name);
        errors.required("role", &self.role);
        errors.optional_url("photoUrl", self.photo_url.as_deref());
        errors.into_result()
    }
}

impl Validate for Bulletin {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.title("title", &self.title);
        errors.into_result()
    }
}

impl Validate for GalleryPhoto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.image_url.trim().is_empty() {
            errors.push("imageUrl", Problem::Required);
        } else {
            errors.url("imageUrl", &self.image_url);
        }
        if let Some(caption) = &self.caption {
            if caption.chars().count() > TITLE_MAX_CHARS {
                errors.push(
                    "caption",
                    Problem::TooLong {
                        max: TITLE_MAX_CHARS,
                    },
                );
            }
        }
        errors.into_result()
    }
}

impl Validate for SiteSettings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.title("siteName", &self.site_name);
        if let Some(email) = self.contact_email.as_deref() {
            if !email.trim().is_empty() && !is_email(email) {
                errors.push("contactEmail", Problem::InvalidEmail);
            }
        }
        for (i, time) in self.service_times.iter().enumerate() {
            errors.required(&format!("serviceTimes[{i}]"), time);
        }
        errors.into_result()
    }
}
