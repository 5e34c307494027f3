//! HTML rendering tests
//!
//! Exercise the full markup → HTML path through the public entry points.

mod export;
mod paragraphs;
mod properties;
