//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the IR and text representations.

pub mod html;
pub mod markdown;
pub mod tag;
pub mod text;

pub use html::{HtmlFormat, HtmlOptions};
pub use markdown::MarkdownFormat;
pub use tag::TagFormat;
pub use text::TextFormat;
