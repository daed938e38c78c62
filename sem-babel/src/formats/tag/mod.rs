//! XML-like AST tag serialization
//!
//! A debug dump of the tree, one tag per node:
//!
//! ```text
//! <text>
//!   <heading level="1">
//!     <span style="plain">Title</span>
//!   </heading>
//!   <list style="numeric">
//!     <item index="1">
//!       <paragraph>
//!         <link address="http://example.com">example</link>
//!       </paragraph>
//!     </item>
//!   </list>
//! </text>
//! ```

use crate::ast::{visit, visit_children, Heading, Item, Link, List, Node, Paragraph, Span, Text, Visitor};
use crate::error::FormatError;
use crate::format::Format;

#[derive(Default)]
pub struct TagPrinter {
    output: String,
    depth: usize,
}

impl TagPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(mut self, text: &Text) -> String {
        visit(&mut self, Node::Text(text));
        self.output
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }

    fn container(&mut self, node: Node<'_>, tag: &str, attributes: &str) {
        let indent = self.indent();
        self.output.push_str(&format!("{indent}<{tag}{attributes}>\n"));
        self.depth += 1;
        visit_children(self, node);
        self.depth -= 1;
        self.output.push_str(&format!("{indent}</{tag}>"));
        if self.depth > 0 {
            self.output.push('\n');
        }
    }

    fn leaf(&mut self, tag: &str, attributes: &str, content: &str) {
        let indent = self.indent();
        self.output.push_str(&format!(
            "{indent}<{tag}{attributes}>{}</{tag}>\n",
            escape_xml(content)
        ));
    }
}

impl Visitor for TagPrinter {
    fn visit_text(&mut self, text: &Text) {
        self.container(Node::Text(text), "text", "");
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.container(Node::Paragraph(paragraph), "paragraph", "");
    }

    fn visit_heading(&mut self, heading: &Heading) {
        let attributes = format!(" level=\"{}\"", heading.level());
        self.container(Node::Heading(heading), "heading", &attributes);
    }

    fn visit_list(&mut self, list: &List) {
        let attributes = format!(" style=\"{}\"", list.style().as_str());
        self.container(Node::List(list), "list", &attributes);
    }

    fn visit_item(&mut self, item: &Item) {
        let attributes = item
            .index()
            .map(|index| format!(" index=\"{index}\""))
            .unwrap_or_default();
        self.container(Node::Item(item), "item", &attributes);
    }

    fn visit_span(&mut self, span: &Span) {
        let attributes = format!(" style=\"{}\"", span.style().as_str());
        self.leaf("span", &attributes, span.text());
    }

    fn visit_link(&mut self, link: &Link) {
        let attributes = format!(" address=\"{}\"", escape_xml(link.address()));
        self.leaf("link", &attributes, link.text());
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

/// Serialize a document to AST tag format
pub fn serialize_text(text: &Text) -> String {
    TagPrinter::new().print(text)
}

/// Format implementation for XML-like tag format
pub struct TagFormat;

impl Format for TagFormat {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like dump of the document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tag", "xml"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, text: &Text) -> Result<String, FormatError> {
        Ok(serialize_text(text))
    }
}
