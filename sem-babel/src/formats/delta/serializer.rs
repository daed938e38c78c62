//! AST to delta
//!
//! Inline nodes become text inserts; every block ends with a `"\n"` insert carrying the block
//! attributes. Paragraphs inside lists are tagged with the innermost list kind and, below the
//! top level, its `indent`.
//!
//! Deltas cannot express an item holding several paragraphs, so every paragraph of an item is
//! written as an item line of its own.

use super::ops::{Attributes, Delta, Op};
use crate::ast::{
    visit, Block, Heading, Inline, Item, List, ListStyle, Node, Paragraph, SpanStyle, Text,
    Visitor,
};
use serde_json::Value;

#[derive(Default)]
pub struct DeltaSerializer {
    ops: Vec<Op>,
    lists: Vec<ListStyle>,
}

impl DeltaSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(mut self, text: &Text) -> Delta {
        visit(&mut self, Node::Text(text));
        Delta::new(self.ops)
    }

    fn push_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            if inline.text().is_empty() {
                continue;
            }
            let mut attributes = Attributes::default();
            match inline {
                Inline::Span(span) => match span.style() {
                    SpanStyle::Plain => {}
                    SpanStyle::Bold => attributes.bold = Some(Value::from(1)),
                    SpanStyle::Italic => attributes.italic = Some(Value::from(1)),
                },
                Inline::Link(link) => attributes.link = Some(link.address().to_string()),
            }
            self.ops.push(Op::with_attributes(inline.text(), attributes));
        }
    }

    fn line_attributes(&self) -> Attributes {
        let Some(style) = self.lists.last() else {
            return Attributes::default();
        };
        let depth = self.lists.len() - 1;
        Attributes {
            list: Some(
                match style {
                    ListStyle::Dotted => "bullet",
                    ListStyle::Numeric => "ordered",
                }
                .to_string(),
            ),
            indent: (depth > 0).then_some(depth),
            ..Default::default()
        }
    }
}

impl Visitor for DeltaSerializer {
    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.push_inlines(paragraph.children());
        let attributes = self.line_attributes();
        self.ops.push(Op::with_attributes("\n", attributes));
    }

    fn visit_heading(&mut self, heading: &Heading) {
        self.push_inlines(heading.children());
        let attributes = Attributes {
            header: Some(heading.level()),
            ..Default::default()
        };
        self.ops.push(Op::with_attributes("\n", attributes));
    }

    fn visit_list(&mut self, list: &List) {
        self.lists.push(list.style());
        for item in list.items() {
            visit(self, Node::Item(item));
        }
        self.lists.pop();
    }

    fn visit_item(&mut self, item: &Item) {
        // An item that opens with a nested list still needs a line of its own.
        if !matches!(item.children().first(), Some(Block::Paragraph(_))) {
            let attributes = self.line_attributes();
            self.ops.push(Op::with_attributes("\n", attributes));
        }
        for block in item.children() {
            visit(self, block.into());
        }
    }
}
