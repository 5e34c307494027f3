//! The behavior page code relies on when it injects rendered HTML.

use chapel_markup::escape::escape_html;
use chapel_markup::render;
use insta::assert_snapshot;
use proptest::prelude::*;
use std::time::{Duration, Instant};

#[test]
fn test_raw_html_is_escaped() {
    assert_snapshot!(render("<script>"), @"&lt;script&gt;");
}

#[test]
fn test_rendering_is_single_pass() {
    let once = render("**Amen** & [home](/)");
    let twice = render(&once);
    assert_ne!(once, twice);
    assert!(twice.contains("&lt;strong&gt;"));
}

#[test]
fn test_image_is_not_a_link() {
    let html = render("![alt](http://x/a.png)");
    assert_snapshot!(html, @r#"<img src="http://x/a.png" alt="alt">"#);
    assert!(!html.contains("<a"));
}

#[test]
fn test_heading_three() {
    assert_snapshot!(render("### Title"), @"<h3>Title</h3>");
}

#[test]
fn test_fenced_code_is_not_substituted() {
    assert_snapshot!(render("```**bold**```"), @"<pre><code>**bold**</code></pre>");
}

#[test]
fn test_plain_text_is_unchanged() {
    assert_eq!(render("plain text, no markup"), "plain text, no markup");
}

#[test]
fn test_video_source_is_exact() {
    let html = render("[[video: http://x/v.mp4]]");
    assert!(html.starts_with(r#"<figure class="chapel-video"><video "#));
    assert!(html.contains(r#"src="http://x/v.mp4""#));
    assert!(html.ends_with("</video></figure>"));
}

#[test]
fn test_urls_are_never_corrupted() {
    let html = render("[a](http://x/a_b*c*_d) ![i](/img/a_b_c.png) `a_b_c`");
    assert!(html.contains(r#"href="http://x/a_b*c*_d""#));
    assert!(html.contains(r#"src="/img/a_b_c.png""#));
    assert!(html.contains("<code>a_b_c</code>"));
    assert!(!html.contains("<em>"));
}

#[test]
fn test_inline_code_keeps_markup_and_escapes() {
    assert_snapshot!(render("`<b>**x**</b>`"), @"<code>&lt;b&gt;**x**&lt;/b&gt;</code>");
}

#[test]
fn test_every_newline_is_a_break() {
    assert_snapshot!(render("a\n\nb\r\nc"), @"a<br><br>b<br>c");
}

#[test]
fn test_unsafe_link_is_neutralized() {
    let html = render("[click](javascript:alert(document.cookie)");
    assert!(html.starts_with(r##"<a href="#""##));
    assert!(!html.contains("javascript"));
}

#[test]
fn test_unclosed_openers_render_quickly() {
    let sources = [
        "[!".repeat(20_000),
        format!("**{}", "[![".repeat(20_000)),
        format!("_{}", "[[video:".repeat(10_000)),
    ];
    let started = Instant::now();
    for source in &sources {
        assert_eq!(render(source), *source);
    }
    let elapsed = started.elapsed();
    assert!(
        elapsed < Duration::from_secs(5),
        "rendering {} bytes of unclosed openers took {elapsed:?}",
        sources.iter().map(String::len).sum::<usize>()
    );
}

#[test]
fn test_non_breaking_space_is_written_as_entity() {
    assert_eq!(render("a\u{a0}b"), "a&nbsp;b");
    assert_eq!(render("Grüße, 日曜日"), "Grüße, 日曜日");
}

proptest! {
    #[test]
    fn render_is_total(source in "[a-z \\n#>\\-*_~`!\\[\\]():/.]{0,80}") {
        let _ = render(&source);
    }

    #[test]
    fn text_without_markup_is_only_escaped(source in "[a-zé日<&][a-z é日ß<>&]{0,40}") {
        prop_assert_eq!(render(&source), escape_html(&source));
    }

    #[test]
    fn non_breaking_spaces_become_entities(words in prop::collection::vec("[a-zé]{1,6}", 1..6)) {
        let source = words.join("\u{a0}");
        prop_assert_eq!(render(&source), words.join("&nbsp;"));
    }

    #[test]
    fn output_never_contains_raw_script_tags(
        prefix in "[a-z *_]{0,10}",
        suffix in "[a-z *_]{0,10}",
    ) {
        let source = format!("{prefix}<script>alert(1)</script>{suffix}");
        let html = render(&source);
        prop_assert!(!html.contains("<script>"));
    }
}
