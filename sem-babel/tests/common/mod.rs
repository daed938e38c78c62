//! Helpers shared by the integration tests.

use sem_babel::ast::{Block, Inline, ListStyle, SpanStyle, Text};

/// A compact, order-preserving description of a document's structure.
pub fn outline(text: &Text) -> Vec<String> {
    let mut out = Vec::new();
    for block in text.children() {
        describe(block, 0, &mut out);
    }
    out
}

fn describe(block: &Block, depth: usize, out: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    match block {
        Block::Paragraph(paragraph) => {
            out.push(format!("{pad}p {}", inlines(paragraph.children())));
        }
        Block::Heading(heading) => {
            out.push(format!("{pad}h{} {}", heading.level(), inlines(heading.children())));
        }
        Block::List(list) => {
            let marker = match list.style() {
                ListStyle::Dotted => "ul",
                ListStyle::Numeric => "ol",
            };
            out.push(format!("{pad}{marker}"));
            for item in list.items() {
                match item.index() {
                    Some(index) => out.push(format!("{pad}  li {index}")),
                    None => out.push(format!("{pad}  li")),
                }
                for child in item.children() {
                    describe(child, depth + 2, out);
                }
            }
        }
    }
}

/// Inline content with styles made visible: `[b:bold]`, `[i:italic]`, `[a:text->address]`.
pub fn inlines(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Link(link) => format!("[a:{}->{}]", link.text(), link.address()),
            Inline::Span(span) => match span.style() {
                SpanStyle::Plain => span.text().to_string(),
                SpanStyle::Bold => format!("[b:{}]", span.text()),
                SpanStyle::Italic => format!("[i:{}]", span.text()),
            },
        })
        .collect()
}
