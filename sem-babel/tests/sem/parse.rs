//! Parse tests for SEM text (SEM → AST)

use crate::common::outline;
use sem_babel::formats::sem::lexer::tokenize;
use sem_babel::{parse_text, ParseError};

#[test]
fn test_title_scenario() {
    let text = parse_text("= Title =\n\nHello *world*.\n", false).unwrap();
    assert_eq!(outline(&text), vec!["h1 Title", "p Hello [b:world]."]);
}

#[test]
fn test_nested_lists() {
    let source = "- a\n  1. b\n  2. c\n- d\n";
    let text = parse_text(source, false).unwrap();
    assert_eq!(
        outline(&text),
        vec![
            "ul",
            "  li",
            "    p a",
            "    ol",
            "      li 1",
            "        p b",
            "      li 2",
            "        p c",
            "  li",
            "    p d",
        ]
    );
}

#[test]
fn test_mixed_inlines_across_lines() {
    let source = "Read /the docs/ at\n`the site <https://example.com/docs>` or\nhttps://example.com/a/b.\n";
    let text = parse_text(source, false).unwrap();
    assert_eq!(
        outline(&text),
        vec![
            "p Read [i:the docs] at [a:the site->https://example.com/docs] or https://example.com/a/b."
        ]
    );
}

#[test]
fn test_span_overlap_is_a_lexical_error() {
    let err = tokenize("*a /b* c/").unwrap_err();
    assert!(
        err.message.contains("overlapped span start"),
        "unexpected message: {}",
        err.message
    );
    assert_eq!((err.line, err.column), (1, 4));
}

#[test]
fn test_unparsable_error_carries_raw_text() {
    let err = parse_text("*a /b* c/", false).unwrap_err();
    assert_eq!(outline(&err.text), vec!["p *a /b* c/"]);
    assert_eq!((err.line, err.column), (1, 4));
}

#[test]
fn test_plain_fallback() {
    let text = parse_text("*a /b* c/\n\nnext", true).unwrap();
    assert_eq!(outline(&text), vec!["p *a /b* c/", "p next"]);
}

#[test]
fn test_bad_indentation_is_reported() {
    let err = sem_babel::formats::sem::parse("- a\n b\n").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
}

#[test]
fn test_oversized_list_number_is_rejected() {
    let err = parse_text("99999999999999999999999. x\n", false).unwrap_err();
    assert!(err.message.contains("list number out of range"));
    assert_eq!((err.line, err.column), (1, 1));
}
