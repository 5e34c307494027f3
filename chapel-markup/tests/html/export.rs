//! Export tests for the HTML format (markup → HTML)

use crate::common::read_fixture;
use chapel_markup::format::Format;
use chapel_markup::formats::html::{HtmlFormat, HtmlOptions};
use chapel_markup::formats::markdown::parse_markdown;
use chapel_markup::{render, render_with_options, RenderOptions};
use std::collections::HashMap;

const KITCHENSINK_HTML: &str = concat!(
    "<h1>Welcome to St. Mark's</h1><br>",
    "<h2>This Sunday</h2><br>",
    "Join us for <strong>worship</strong> at <em>10:00</em> in the ",
    r#"<a href="https://example.org/visit?a=1&amp;b=2" target="_blank" rel="noopener noreferrer">main hall</a>.<br>"#,
    "<del>Choir practice</del> moved to Thursday.<br>",
    "<blockquote>The Lord is my shepherd; I shall not want.</blockquote><br>",
    "<hr><br>",
    r#"<img src="https://example.org/img/front_door.jpg" alt="Church front"><br>"#,
    r#"<figure class="chapel-video"><video src="https://example.org/media/easter_2026.mp4" controls=""></video></figure><br>"#,
    "Use <code>git pull</code> before editing.<br>",
    "<pre><code>code &lt;b&gt;raw&lt;/b&gt;</code></pre><br>",
    "<h3>Notes</h3><br>",
    "5 &lt; 6 &amp; 7 &gt; 3<br>",
);

#[test]
fn test_kitchensink() {
    let source = read_fixture("kitchensink.md");
    assert_eq!(render(&source), KITCHENSINK_HTML);
}

#[test]
fn test_format_matches_render() {
    let source = read_fixture("kitchensink.md");
    let html = HtmlFormat::default()
        .serialize(&parse_markdown(&source))
        .unwrap();
    assert_eq!(html, render(&source));
}

#[test]
fn test_nested_emphasis_inside_link() {
    assert_eq!(
        render("[**Easter** _schedule_](/easter)"),
        r#"<a href="/easter" target="_blank" rel="noopener noreferrer"><strong>Easter</strong> <em>schedule</em></a>"#
    );
}

#[test]
fn test_linked_image() {
    assert_eq!(
        render("[![logo](/logo.png)](/)"),
        r#"<a href="/" target="_blank" rel="noopener noreferrer"><img src="/logo.png" alt="logo"></a>"#
    );
}

#[test]
fn test_heading_with_inline_markup() {
    assert_eq!(
        render("## Sermon: _The Vine_"),
        "<h2>Sermon: <em>The Vine</em></h2>"
    );
}

#[test]
fn test_multiline_fence() {
    assert_eq!(
        render("```\nline 1\nline 2\n```"),
        "<pre><code>\nline 1\nline 2\n</code></pre>"
    );
}

#[test]
fn test_malformed_markup_is_literal() {
    assert_eq!(render("**open _and [broken](") , "**open _and [broken](");
    assert_eq!(render("```open"), "```open");
    assert_eq!(render("![no src]()"), "![no src]()");
}

#[test]
fn test_mailto_and_tel_links_survive() {
    let html = render("[Email](mailto:office@example.org) [Call](tel:+15551234)");
    assert!(html.contains(r#"href="mailto:office@example.org""#));
    assert!(html.contains(r#"href="tel:+15551234""#));
}

#[test]
fn test_without_sanitizing_or_target() {
    let options = RenderOptions {
        link_target_blank: false,
        sanitize_urls: false,
        ..RenderOptions::default()
    };
    assert_eq!(
        render_with_options("[x](javascript:void(0)", &options),
        r#"<a href="javascript:void(0">x</a>"#
    );
}

#[test]
fn test_standalone_page() {
    let mut options = HashMap::new();
    options.insert("standalone".to_string(), "true".to_string());
    options.insert("title".to_string(), "Advent & Christmas".to_string());

    let html = HtmlFormat::new(HtmlOptions::default())
        .serialize_with_options(&parse_markdown("# Advent"), &options)
        .unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Advent &amp; Christmas</title>"));
    assert!(html.contains("<h1>Advent</h1>"));
    assert!(html.trim_end().ends_with("</html>"));
}
