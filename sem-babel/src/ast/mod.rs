//! The document tree shared by every parser and printer.
//!
//! Nodes live in [`nodes`]; [`visitor`] provides the traversal used by the printers.

pub mod nodes;
pub mod visitor;

pub use nodes::{Block, Heading, Inline, Item, Link, List, ListStyle, Paragraph, Span, SpanStyle, Text};
pub use visitor::{visit, visit_children, Node, Visitor};
