//! Conversion tests through the string entry points and the registry

use insta::assert_snapshot;
use sem_babel::formats::sem;
use sem_babel::{html_to_text, parse_text, text_to_html, FormatRegistry};
use std::collections::HashMap;

#[test]
fn test_title_scenario_to_html() {
    assert_eq!(
        text_to_html("= Title =\n\nHello *world*.\n"),
        "<h1>Title</h1>\n<p>Hello <strong>world</strong>.</p>\n"
    );
}

#[test]
fn test_title_scenario_reprints() {
    let source = "= Title =\n\nHello *world*.\n";
    let text = parse_text(source, false).unwrap();
    assert_eq!(sem::serialize(&text), source);
}

#[test]
fn test_blank_input_is_returned_unchanged() {
    assert_eq!(text_to_html(""), "");
    assert_eq!(text_to_html("  \n"), "  \n");
    assert_eq!(html_to_text(" "), " ");
}

#[test]
fn test_unparsable_text_still_renders() {
    assert_eq!(text_to_html("*a /b* c/"), "<p>*a /b* c/</p>\n");
}

#[test]
fn test_html_to_text() {
    let html = "<h2>Sub</h2><p>a <b>b</b></p><ul><li>x</li><li>y</li></ul>";
    assert_eq!(html_to_text(html), "== Sub ==\n\na *b*\n\n- x\n- y\n");
}

#[test]
fn test_html_to_text_falls_back_to_visible_text() {
    assert_eq!(html_to_text("<p>see <a>here</a></p>"), "see here\n");
}

#[test]
fn test_canonical_documents_reprint_exactly() {
    let sources = [
        "Plain paragraph.\n",
        "== Section ==\n\nA `link <http://a.org>` and /italic/ text.\n",
        "- one\n- two\n  - nested\n\n3. three\n4. four\n",
        "1. first\n\n   second paragraph\n2. next\n",
    ];
    for source in sources {
        let text = parse_text(source, false).unwrap();
        assert_eq!(sem::serialize(&text), source, "reprinting {source:?}");
    }
}

#[test]
fn test_wrapped_marker_text_stays_a_paragraph() {
    for (source, printed) in [
        ("-\nfoo", "-\nfoo\n"),
        ("= a\nb =", "=\na b =\n"),
        ("1.\nx", "1.\nx\n"),
        ("- 2)\n  y", "- 2)\n  y\n"),
    ] {
        let text = parse_text(source, false).unwrap();
        assert_eq!(sem::serialize(&text), printed, "printing {source:?}");
        assert_eq!(parse_text(printed, false).unwrap(), text, "re-parsing {printed:?}");
    }
}

#[test]
fn test_html_paragraph_with_marker_text() {
    assert_eq!(html_to_text("<p>- not a list</p>"), "-\nnot a list\n");
}

#[test]
fn test_registry_tag_dump() {
    let registry = FormatRegistry::default();
    let text = registry.parse("= T =\n\n- *a*\n", "sem").unwrap();
    assert_snapshot!(registry.serialize(&text, "tag").unwrap(), @r#"
    <text>
      <heading level="1">
        <span style="plain">T</span>
      </heading>
      <list style="dotted">
        <item>
          <paragraph>
            <span style="bold">a</span>
          </paragraph>
        </item>
      </list>
    </text>
    "#);
}

#[test]
fn test_registry_synopsis_with_length() {
    let registry = FormatRegistry::default();
    let text = registry
        .parse("= Notes =\n\nFirst point here.\n", "sem")
        .unwrap();
    let mut options = HashMap::new();
    options.insert("length".to_string(), "14".to_string());
    assert_eq!(
        registry
            .serialize_with_options(&text, "synopsis", &options)
            .unwrap(),
        "Notes\nFirst po…"
    );
}
