//! Paragraph-preserving rendering (`LineBreaks::Paragraphs`).

use crate::common::read_fixture;
use chapel_markup::{render_with_options, LineBreaks, RenderOptions};

fn paragraphs(source: &str) -> String {
    render_with_options(
        source,
        &RenderOptions::default().with_line_breaks(LineBreaks::Paragraphs),
    )
}

#[test]
fn test_blank_lines_split_paragraphs() {
    assert_eq!(
        paragraphs("First line\nsecond line\n\nNew paragraph\n\n\n"),
        "<p>First line<br>second line</p><p>New paragraph</p>"
    );
}

#[test]
fn test_blocks_stand_alone() {
    assert_eq!(
        paragraphs("# Title\nIntro\n> quoted\n---\n```code```\nOutro"),
        "<h1>Title</h1><p>Intro</p><blockquote>quoted</blockquote><hr><pre><code>code</code></pre><p>Outro</p>"
    );
}

#[test]
fn test_video_line_is_not_wrapped() {
    assert_eq!(
        paragraphs("Watch:\n[[video: /v.mp4]]"),
        r#"<p>Watch:</p><figure class="chapel-video"><video src="/v.mp4" controls=""></video></figure>"#
    );
}

#[test]
fn test_video_in_running_text_is_not_nested_in_a_paragraph() {
    let html = paragraphs("Sunday [[video: /v.mp4]] then coffee");
    assert_eq!(
        html,
        r#"<p>Sunday </p><figure class="chapel-video"><video src="/v.mp4" controls=""></video></figure><p> then coffee</p>"#
    );
    assert!(!html.contains("<p><figure"));
}

#[test]
fn test_mixed_line_in_br_mode_keeps_figure_at_top_level() {
    assert_eq!(
        chapel_markup::render("x [[video: /v.mp4]] y"),
        r#"x <figure class="chapel-video"><video src="/v.mp4" controls=""></video></figure> y"#
    );
}

#[test]
fn test_kitchensink_paragraphs() {
    let html = paragraphs(&read_fixture("kitchensink.md"));

    assert!(html.starts_with("<h1>Welcome to St. Mark's</h1><h2>This Sunday</h2><p>Join us"));
    assert!(html.contains("</a>.<br><del>Choir practice</del> moved to Thursday.</p><blockquote>"));
    assert!(html.contains("<hr><p><img "));
    assert!(html.contains("</p><figure class=\"chapel-video\">"));
    assert!(html.ends_with("<h3>Notes</h3><p>5 &lt; 6 &amp; 7 &gt; 3</p>"));
    assert!(!html.contains("<br><br>"));
}

#[test]
fn test_empty_source() {
    assert_eq!(paragraphs(""), "");
    assert_eq!(paragraphs("\n\n  \n"), "");
}
