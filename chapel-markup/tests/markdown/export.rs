//! Export tests for the markdown dialect (IR → markup)

use crate::common::read_fixture;
use chapel_markup::formats::markdown::parse_markdown;
use chapel_markup::FormatRegistry;
use proptest::prelude::*;

fn to_markdown(source: &str) -> String {
    let registry = FormatRegistry::with_defaults();
    let doc = registry.parse(source, "markdown").unwrap();
    registry.serialize(&doc, "markdown").unwrap()
}

#[test]
fn test_kitchensink_round_trip() {
    let source = read_fixture("kitchensink.md");
    assert_eq!(to_markdown(&source), source);
}

#[test]
fn test_crlf_becomes_lf() {
    assert_eq!(to_markdown("a\r\nb"), "a\nb");
}

#[test]
fn test_text_and_tag_formats() {
    let registry = FormatRegistry::with_defaults();
    let doc = registry.parse("## Notes\n**Bring** a [Bible](/b)", "markdown").unwrap();

    assert_eq!(
        registry.serialize(&doc, "text").unwrap(),
        "Notes\nBring a Bible"
    );
    assert!(registry
        .serialize(&doc, "tag")
        .unwrap()
        .contains("<link href=\"/b\">"));
}

proptest! {
    #[test]
    fn reparsing_serialized_output_gives_same_ir(
        source in "[a-z \\n#>\\-*_~`!\\[\\]():/.]{0,60}"
    ) {
        let first = parse_markdown(&source);
        let registry = FormatRegistry::with_defaults();
        let serialized = registry.serialize(&first, "markdown").unwrap();
        prop_assert_eq!(parse_markdown(&serialized), first);
    }
}
