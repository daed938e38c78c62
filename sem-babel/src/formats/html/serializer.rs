//! HTML output
//!
//! Produces a fragment, one block per line. List items read as inline content: the first
//! paragraph of an item is written directly inside its `<li>`, further blocks follow on their
//! own lines.

use crate::ast::{
    visit, Block, Heading, Inline, Item, List, ListStyle, Node, Paragraph, SpanStyle, Text,
    Visitor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Escape `&`, `<`, `>` and `"` in text and attribute values.
    pub escape: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self { escape: true }
    }
}

pub struct HtmlSerializer {
    options: HtmlOptions,
    output: String,
}

impl HtmlSerializer {
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    pub fn serialize(mut self, text: &Text) -> String {
        visit(&mut self, Node::Text(text));
        self.output
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape {
            html_escape(text)
        } else {
            text.to_string()
        }
    }

    fn write_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            let html = match inline {
                Inline::Span(span) => {
                    let text = self.escape(span.text());
                    match span.style() {
                        SpanStyle::Plain => text,
                        SpanStyle::Bold => format!("<strong>{text}</strong>"),
                        SpanStyle::Italic => format!("<em>{text}</em>"),
                    }
                }
                Inline::Link(link) => format!(
                    "<a href=\"{}\">{}</a>",
                    self.escape(link.address()),
                    self.escape(link.text())
                ),
            };
            self.output.push_str(&html);
        }
    }
}

impl Visitor for HtmlSerializer {
    fn visit_text(&mut self, text: &Text) {
        for block in text.children() {
            visit(self, block.into());
            self.output.push('\n');
        }
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.output.push_str("<p>");
        self.write_inlines(paragraph.children());
        self.output.push_str("</p>");
    }

    fn visit_heading(&mut self, heading: &Heading) {
        let level = heading.level();
        self.output.push_str(&format!("<h{level}>"));
        self.write_inlines(heading.children());
        self.output.push_str(&format!("</h{level}>"));
    }

    fn visit_list(&mut self, list: &List) {
        let tag = match list.style() {
            ListStyle::Dotted => "ul",
            ListStyle::Numeric => "ol",
        };
        self.output.push_str(&format!("<{tag}>\n"));
        let mut expected = 1;
        for item in list.items() {
            match (list.style(), item.index()) {
                (ListStyle::Numeric, Some(index)) if index != expected => {
                    self.output.push_str(&format!("<li value=\"{index}\">"));
                    expected = index + 1;
                }
                _ => {
                    self.output.push_str("<li>");
                    expected += 1;
                }
            }
            visit(self, Node::Item(item));
            self.output.push_str("</li>\n");
        }
        self.output.push_str(&format!("</{tag}>"));
    }

    fn visit_item(&mut self, item: &Item) {
        let mut blocks = item.children();
        if let Some((Block::Paragraph(first), rest)) = blocks.split_first() {
            self.write_inlines(first.children());
            blocks = rest;
        }
        for block in blocks {
            self.output.push('\n');
            visit(self, block.into());
        }
        if !blocks.is_empty() {
            self.output.push('\n');
        }
    }
}

/// Escape HTML special characters in text
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
