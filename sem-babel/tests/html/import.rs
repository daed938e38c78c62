//! Import tests for HTML (HTML → AST)

use crate::common::outline;
use sem_babel::{parse_html, HtmlError};

fn import(html: &str) -> Vec<String> {
    outline(&parse_html(html, false).expect("html should convert"))
}

#[test]
fn test_ordered_list_numbering() {
    assert_eq!(
        import("<ol><li>A</li><li value=\"5\">B</li><li>C</li></ol>"),
        vec!["ol", "  li 1", "    p A", "  li 5", "    p B", "  li 6", "    p C"]
    );
}

#[test]
fn test_explicit_values_are_kept() {
    assert_eq!(
        import("<ol><li>A</li><li value=\"1\">B</li></ol>"),
        vec!["ol", "  li 1", "    p A", "  li 1", "    p B"]
    );
    assert_eq!(
        import("<ol><li value=\"3\">A</li><li value=\"3\">B</li><li>C</li></ol>"),
        vec!["ol", "  li 3", "    p A", "  li 3", "    p B", "  li 4", "    p C"]
    );
}

#[test]
fn test_headings_and_styles() {
    assert_eq!(
        import("<h3>Sub <em>title</em></h3>\n<p>Some <strong>strong</strong> and <i>em</i> text.</p>"),
        vec!["h3 Sub [i:title]", "p Some [b:strong] and [i:em] text."]
    );
}

#[test]
fn test_whitespace_is_squashed() {
    assert_eq!(
        import("<p>\n   lots   of\n\tspace  </p>"),
        vec!["p lots of space"]
    );
}

#[test]
fn test_links() {
    assert_eq!(
        import("<p>go <a href=\" http://x.org \">  there </a> or <a href=\"http://y.org\"></a></p>"),
        vec!["p go [a:there->http://x.org] or [a:http://y.org->http://y.org]"]
    );
}

#[test]
fn test_missing_href_is_an_error_without_fallback() {
    assert_eq!(
        parse_html("<p><a name=\"x\">y</a></p>", false),
        Err(HtmlError::MissingHref { line: 1 })
    );
}

#[test]
fn test_missing_href_falls_back_to_plain_text() {
    let text = parse_html("<h1>Head</h1><p>body <a>link</a></p>", true).unwrap();
    assert_eq!(outline(&text), vec!["p Head body link"]);
}

#[test]
fn test_document_chrome_is_ignored() {
    let html = "<!DOCTYPE html><html><head><title>Page</title><style>p {}</style></head>\
                <body><p>Only <span>this</span></p><script>var x = '<p>';</script></body></html>";
    assert_eq!(import(html), vec!["p Only this"]);
}

#[test]
fn test_unknown_tags_keep_their_text() {
    assert_eq!(
        import("<p>a <code>b</code> <u>c</u></p>"),
        vec!["p a b c"]
    );
}

#[test]
fn test_bare_text_gets_a_paragraph() {
    assert_eq!(import("hello <b>world</b>"), vec!["p hello [b:world]"]);
}

#[test]
fn test_breaks_split_paragraphs() {
    assert_eq!(
        import("<p>one<br>two</p><div>three</div>"),
        vec!["p one", "p two", "p three"]
    );
}

#[test]
fn test_unclosed_tags_are_closed_by_blocks() {
    assert_eq!(
        import("<p>first <b>bold<p>second"),
        vec!["p first [b:bold]", "p second"]
    );
}

#[test]
fn test_nested_lists() {
    assert_eq!(
        import("<ul><li>a<ol><li>b</li></ol></li><li>c</li></ul>"),
        vec![
            "ul",
            "  li",
            "    p a",
            "    ol",
            "      li 1",
            "        p b",
            "  li",
            "    p c",
        ]
    );
}

#[test]
fn test_item_outside_list_is_ignored() {
    assert_eq!(import("<li>loose</li>"), vec!["p loose"]);
}

#[test]
fn test_empty_input() {
    assert!(parse_html("", false).unwrap().is_empty());
}
