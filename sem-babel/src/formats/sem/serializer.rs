//! Canonical SEM output
//!
//! Top-level blocks are separated by one blank line. Inside a list every item starts on a new
//! line with its marker; the item's blocks are indented by the marker width, separated by a
//! blank line, except that a nested list follows the previous block directly. An item whose
//! first block is itself a list writes both markers on one line (`- - x`).

use super::lexer::opens_block;
use crate::ast::{
    visit, Block, Heading, Inline, Item, List, ListStyle, Node, Paragraph, SpanStyle, Text,
    Visitor,
};

#[derive(Default)]
pub struct SemSerializer {
    output: String,
    indent: usize,
    marker: Option<String>,
}

impl SemSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(mut self, text: &Text) -> String {
        visit(&mut self, Node::Text(text));
        self.output
    }

    fn start_line(&mut self) {
        match self.marker.take() {
            Some(prefix) => self.output.push_str(&prefix),
            None => self.output.push_str(&" ".repeat(self.indent)),
        }
    }

    fn write_line(&mut self, content: &str) {
        self.start_line();
        self.output.push_str(content);
        self.output.push('\n');
    }

    fn write_blocks(&mut self, blocks: &[Block]) {
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 && !matches!(block, Block::List(_)) {
                self.output.push('\n');
            }
            visit(self, block.into());
        }
    }
}

impl Visitor for SemSerializer {
    fn visit_text(&mut self, text: &Text) {
        for (i, block) in text.children().iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            visit(self, block.into());
        }
    }

    /// A line that would read back as a list item or heading is soft-wrapped after its first
    /// word (`-\nfoo`); the parser joins the lines with one space again.
    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        let rendered = render_inlines(paragraph.children());
        let mut rest = rendered.as_str();
        while opens_block(rest) {
            let Some((head, tail)) = rest.split_once(char::is_whitespace) else {
                break;
            };
            self.write_line(head);
            rest = tail.trim_start();
        }
        self.write_line(rest);
    }

    fn visit_heading(&mut self, heading: &Heading) {
        let rule = "=".repeat(heading.level() as usize);
        let content = render_inlines(heading.children());
        self.write_line(&format!("{rule} {content} {rule}"));
    }

    fn visit_list(&mut self, list: &List) {
        for (position, item) in list.items().iter().enumerate() {
            let marker = match list.style() {
                ListStyle::Dotted => "- ".to_string(),
                ListStyle::Numeric => format!("{}. ", item.index().unwrap_or(position + 1)),
            };
            let prefix = self
                .marker
                .take()
                .unwrap_or_else(|| " ".repeat(self.indent));
            self.marker = Some(prefix + &marker);
            self.indent += marker.len();
            visit(self, Node::Item(item));
            self.indent -= marker.len();
        }
    }

    fn visit_item(&mut self, item: &Item) {
        self.write_blocks(item.children());
        if let Some(marker) = self.marker.take() {
            self.output.push_str(marker.trim_end());
            self.output.push('\n');
        }
    }
}

/// Renders inline content on a single line.
pub fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Span(span) => match span.style() {
                SpanStyle::Plain => out.push_str(span.text()),
                SpanStyle::Bold => push_marked(&mut out, span.text(), "*", "*"),
                SpanStyle::Italic => push_marked(&mut out, span.text(), "/", "/"),
            },
            Inline::Link(link) => {
                if link.text() == link.address() {
                    out.push_str(&format!("`<{}>`", link.address()));
                } else {
                    out.push_str(&format!("`{} <{}>`", link.text(), link.address()));
                }
            }
        }
    }
    out
}

/// Writes boundary whitespace outside the markers.
fn push_marked(out: &mut String, text: &str, open: &str, close: &str) {
    let core = text.trim();
    if core.is_empty() {
        out.push_str(text);
        return;
    }
    let lead = &text[..text.len() - text.trim_start().len()];
    let trail = &text[text.trim_end().len()..];
    out.push_str(lead);
    out.push_str(open);
    out.push_str(core);
    out.push_str(close);
    out.push_str(trail);
}
