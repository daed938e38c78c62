//! Delta import, export and round trips

use crate::common::outline;
use sem_babel::formats::delta::{Delta, DeltaFormat};
use sem_babel::{from_delta, parse_delta_json, parse_text, to_delta, Format, InvalidNestingError};
use serde_json::json;

fn delta(value: serde_json::Value) -> Delta {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_first_item_cannot_skip_depth() {
    let ops = delta(json!({"ops": [
        {"insert": "x"},
        {"insert": "\n", "attributes": {"list": "bullet", "indent": 1}}
    ]}));
    assert_eq!(
        from_delta(&ops).unwrap_err(),
        InvalidNestingError { expected: 0, got: 1 }
    );
}

#[test]
fn test_nested_item_cannot_skip_depth() {
    let ops = delta(json!({"ops": [
        {"insert": "a"},
        {"insert": "\n", "attributes": {"list": "bullet"}},
        {"insert": "b"},
        {"insert": "\n", "attributes": {"list": "bullet", "indent": 2}}
    ]}));
    assert_eq!(
        from_delta(&ops).unwrap_err(),
        InvalidNestingError { expected: 1, got: 2 }
    );
}

#[test]
fn test_quill_document_import() {
    let ops = delta(json!({"ops": [
        {"insert": "Notes"},
        {"insert": "\n", "attributes": {"header": 1}},
        {"insert": "Some "},
        {"insert": "bold ", "attributes": {"bold": true, "color": "#f00"}},
        {"insert": "and "},
        {"insert": "linked", "attributes": {"link": "http://l.org", "underline": true}},
        {"insert": {"image": "pic.png"}},
        {"insert": " text\n\n"},
        {"insert": "todo"},
        {"insert": "\n", "attributes": {"list": "checked"}},
        {"insert": "first"},
        {"insert": "\n", "attributes": {"list": "ordered", "indent": 1}},
        {"insert": "second"},
        {"insert": "\n", "attributes": {"list": "ordered", "indent": 1}}
    ]}));
    let text = from_delta(&ops).unwrap();
    assert_eq!(
        outline(&text),
        vec![
            "h1 Notes",
            "p Some [b:bold] and [a:linked->http://l.org] text",
            "ul",
            "  li",
            "    p todo",
            "    ol",
            "      li 1",
            "        p first",
            "      li 2",
            "        p second",
        ]
    );
}

#[test]
fn test_export_title_scenario() {
    let text = parse_text("= Title =\n\nHello *world*.\n", false).unwrap();
    assert_eq!(
        serde_json::to_value(to_delta(&text)).unwrap(),
        json!({"ops": [
            {"insert": "Title"},
            {"insert": "\n", "attributes": {"header": 1}},
            {"insert": "Hello "},
            {"insert": "world", "attributes": {"bold": 1}},
            {"insert": "."},
            {"insert": "\n"}
        ]})
    );
}

#[test]
fn test_round_trip_keeps_structure() {
    let source = "= Title =\n\nHello *world*.\n\n- a\n  1. b\n  2. c\n     - deep\n- d\n\n== End ==\n\n1. x\n2. y\n";
    let original = parse_text(source, false).unwrap();
    let restored = from_delta(&to_delta(&original)).unwrap();
    assert_eq!(outline(&restored), outline(&original));
}

#[test]
fn test_round_trip_renumbers_from_one() {
    let text = parse_text("1. a\n5. b\n", false).unwrap();
    assert_eq!(outline(&text), vec!["ol", "  li 1", "    p a", "  li 5", "    p b"]);

    let imported = from_delta(&to_delta(&text)).unwrap();
    assert_eq!(outline(&imported), vec!["ol", "  li 1", "    p a", "  li 2", "    p b"]);
}

#[test]
fn test_item_paragraphs_become_items() {
    let original = parse_text("- a\n\n  more\n- b\n", false).unwrap();
    let restored = from_delta(&to_delta(&original)).unwrap();
    assert_eq!(
        outline(&restored),
        vec!["ul", "  li", "    p a", "  li", "    p more", "  li", "    p b"]
    );
}

#[test]
fn test_json_format_round_trip() {
    let format = DeltaFormat;
    let original = parse_text("Some /words/.\n\n- item\n", false).unwrap();
    let json = format.serialize(&original).unwrap();
    assert_eq!(parse_delta_json(&json).unwrap(), original);
}
