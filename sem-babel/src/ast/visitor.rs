//! Double-dispatch traversal over the document tree.
//!
//! A [`Node`] is a borrowed handle on any of the seven node variants. [`visit`] first asks the
//! visitor whether the node should be entered at all ([`Visitor::should_descend`]); a `false`
//! answer skips the node together with its subtree. Otherwise the per-variant `visit_*` method
//! runs. Default implementations recurse through [`visit_children`], so a visitor only
//! overrides the variants it cares about.
//!
//! # Example
//!
//! ```ignore
//! struct LinkCollector(Vec<String>);
//!
//! impl Visitor for LinkCollector {
//!     fn visit_link(&mut self, link: &Link) {
//!         self.0.push(link.address().to_string());
//!     }
//! }
//!
//! let mut collector = LinkCollector(vec![]);
//! visit(&mut collector, Node::Text(&text));
//! ```

use super::nodes::{Block, Heading, Inline, Item, Link, List, Paragraph, Span, Text};

/// Borrowed handle on a node of any variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Text(&'a Text),
    Paragraph(&'a Paragraph),
    Heading(&'a Heading),
    Span(&'a Span),
    Link(&'a Link),
    List(&'a List),
    Item(&'a Item),
}

impl<'a> Node<'a> {
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::Span(_) => "span",
            Node::Link(_) => "link",
            Node::List(_) => "list",
            Node::Item(_) => "item",
        }
    }
}

impl<'a> From<&'a Block> for Node<'a> {
    fn from(block: &'a Block) -> Self {
        match block {
            Block::Paragraph(paragraph) => Node::Paragraph(paragraph),
            Block::Heading(heading) => Node::Heading(heading),
            Block::List(list) => Node::List(list),
        }
    }
}

impl<'a> From<&'a Inline> for Node<'a> {
    fn from(inline: &'a Inline) -> Self {
        match inline {
            Inline::Span(span) => Node::Span(span),
            Inline::Link(link) => Node::Link(link),
        }
    }
}

/// Per-variant hooks. Every method defaults to plain recursion.
pub trait Visitor {
    /// Gate consulted before any node is visited; `false` skips the node and its subtree.
    fn should_descend(&mut self, _node: Node<'_>) -> bool {
        true
    }

    fn visit_text(&mut self, text: &Text) {
        visit_children(self, Node::Text(text));
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        visit_children(self, Node::Paragraph(paragraph));
    }

    fn visit_heading(&mut self, heading: &Heading) {
        visit_children(self, Node::Heading(heading));
    }

    fn visit_list(&mut self, list: &List) {
        visit_children(self, Node::List(list));
    }

    fn visit_item(&mut self, item: &Item) {
        visit_children(self, Node::Item(item));
    }

    fn visit_span(&mut self, _span: &Span) {}

    fn visit_link(&mut self, _link: &Link) {}
}

/// Dispatches `node` to the matching `visit_*` method unless the visitor declines it.
pub fn visit<V: Visitor + ?Sized>(visitor: &mut V, node: Node<'_>) {
    if !visitor.should_descend(node) {
        return;
    }
    match node {
        Node::Text(text) => visitor.visit_text(text),
        Node::Paragraph(paragraph) => visitor.visit_paragraph(paragraph),
        Node::Heading(heading) => visitor.visit_heading(heading),
        Node::Span(span) => visitor.visit_span(span),
        Node::Link(link) => visitor.visit_link(link),
        Node::List(list) => visitor.visit_list(list),
        Node::Item(item) => visitor.visit_item(item),
    }
}

/// Visits every direct child of `node` in order.
pub fn visit_children<V: Visitor + ?Sized>(visitor: &mut V, node: Node<'_>) {
    match node {
        Node::Text(text) => visit_blocks(visitor, text.children()),
        Node::Item(item) => visit_blocks(visitor, item.children()),
        Node::Paragraph(paragraph) => visit_inlines(visitor, paragraph.children()),
        Node::Heading(heading) => visit_inlines(visitor, heading.children()),
        Node::List(list) => {
            for item in list.items() {
                visit(visitor, Node::Item(item));
            }
        }
        Node::Span(_) | Node::Link(_) => {}
    }
}

fn visit_blocks<V: Visitor + ?Sized>(visitor: &mut V, blocks: &[Block]) {
    for block in blocks {
        visit(visitor, block.into());
    }
}

fn visit_inlines<V: Visitor + ?Sized>(visitor: &mut V, inlines: &[Inline]) {
    for inline in inlines {
        visit(visitor, inline.into());
    }
}
