//! CLI-specific transforms
//!
//! The `inspect` command shows what the lexer made of a document before any
//! HTML is emitted. Each transform is a stage + format combination:
//!
//! - `ir-json`: the block/inline IR as JSON
//! - `ir-tag`: the IR as XML-like tags (default)
//! - `events`: the flat event stream the HTML serializer consumes, one event
//!   per line
//!
//! ## Extra Parameters
//!
//! - `pretty`: "true" / "false", pretty-print `ir-json` (defaults to true)
//! - `line-breaks`: "br" / "paragraphs", grouping used by `events`
//!
//! Example: `chapel inspect bulletin.md events --extra-line-breaks paragraphs`

use chapel_markup::common::to_events;
use chapel_markup::formats::markdown::parse_markdown;
use chapel_markup::formats::tag::serialize_document;
use chapel_markup::LineBreaks;
use std::collections::HashMap;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ir-json", "ir-tag", "events"];

/// Transform used when `inspect` is given none.
pub const DEFAULT_TRANSFORM: &str = "ir-tag";

/// Execute a named transform on markup source with optional extra parameters
///
/// # Examples
///
/// ```ignore
/// let params = HashMap::new();
/// let output = execute_transform("# Welcome", "ir-tag", &params)?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let doc = parse_markdown(source);

    match transform_name {
        "ir-json" => {
            let pretty = match extra_params.get("pretty") {
                Some(raw) => parse_flag("pretty", raw)?,
                None => true,
            };
            let json = if pretty {
                serde_json::to_string_pretty(&doc)
            } else {
                serde_json::to_string(&doc)
            };
            json.map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        "ir-tag" => {
            let mut output = serialize_document(&doc);
            output.push('\n');
            Ok(output)
        }
        "events" => {
            let line_breaks = match extra_params.get("line-breaks") {
                Some(raw) => raw.parse::<LineBreaks>()?,
                None => LineBreaks::default(),
            };
            Ok(to_events(&doc, line_breaks)
                .iter()
                .map(|event| format!("{event:?}\n"))
                .collect())
        }
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(format!("Invalid boolean value '{other}' for --extra-{key}")),
    }
}
