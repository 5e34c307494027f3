//! URL checks for links, images and video embeds.
//!
//! Rendered content is injected into pages without further sanitizing, so a
//! `javascript:` link typed into a bulletin would run in every visitor's
//! browser. Only web, mail and phone schemes are let through; relative URLs
//! are always fine.

use std::borrow::Cow;
use url::{ParseError, Url};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Placeholder emitted in place of a rejected URL.
pub const BLOCKED_URL: &str = "#";

/// Return `raw` if it is safe to emit as an `href`/`src`, `#` otherwise.
pub fn sanitize_url(raw: &str) -> Cow<'_, str> {
    match Url::parse(raw) {
        Ok(url) if ALLOWED_SCHEMES.contains(&url.scheme()) => Cow::Borrowed(raw),
        Ok(url) => {
            tracing::warn!(scheme = url.scheme(), "blocked url with disallowed scheme");
            Cow::Borrowed(BLOCKED_URL)
        }
        Err(ParseError::RelativeUrlWithoutBase) => Cow::Borrowed(raw),
        Err(err) => {
            tracing::warn!(%err, url = raw, "blocked unparseable url");
            Cow::Borrowed(BLOCKED_URL)
        }
    }
}

/// Whether `raw` is an absolute `http`/`https` URL (used for record fields).
pub fn is_web_url(raw: &str) -> bool {
    matches!(Url::parse(raw), Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host())
}
