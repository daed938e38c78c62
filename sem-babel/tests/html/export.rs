//! Export tests for HTML (AST → HTML) and the HTML round trip

use crate::common::outline;
use insta::assert_snapshot;
use sem_babel::formats::html::{HtmlFormat, HtmlOptions};
use sem_babel::{parse_html, parse_text, text_to_html, Format};

#[test]
fn test_lists_and_links() {
    let source = "- `docs <http://d.org/?a=1&b=2>`\n  3. deep\n  7. deeper\n- plain\n\n  more\n";
    assert_snapshot!(text_to_html(source), @r#"
    <ul>
    <li><a href="http://d.org/?a=1&amp;b=2">docs</a>
    <ol>
    <li value="3">deep</li>
    <li value="7">deeper</li>
    </ol>
    </li>
    <li>plain
    <p>more</p>
    </li>
    </ul>
    "#);
}

#[test]
fn test_escaping_can_be_disabled() {
    let text = parse_text("a < b\n", false).unwrap();
    let escaped = HtmlFormat::default().serialize(&text).unwrap();
    let raw = HtmlFormat::new(HtmlOptions { escape: false }, true)
        .serialize(&text)
        .unwrap();
    assert_eq!(escaped, "<p>a &lt; b</p>\n");
    assert_eq!(raw, "<p>a < b</p>\n");
}

#[test]
fn test_round_trip_keeps_text_and_styles() {
    let sources = [
        "= Title =\n\nHello *world*, /again/.\n",
        "A `link <http://a.org>` here.\n\n== Two ==\n",
        "- a\n  - b\n\n    c\n- d\n",
        "5. five\n6. six\n10. ten\n",
    ];
    for source in sources {
        let original = parse_text(source, false).unwrap();
        let html = text_to_html(source);
        let imported = parse_html(&html, false).unwrap();
        assert_eq!(outline(&imported), outline(&original), "round trip of {source:?}");
    }
}
