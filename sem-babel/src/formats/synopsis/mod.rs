//! Plain-text synopsis
//!
//! Renders the document as unmarked text, one block per line, for previews and summaries.
//! Output stops at a character budget: the text is cut, right-trimmed and closed with `…`,
//! and the traversal is abandoned through [`Visitor::should_descend`].

use crate::ast::{visit, Heading, Item, List, ListStyle, Node, Paragraph, Text, Visitor};
use crate::error::FormatError;
use crate::format::{check_options, Format};
use std::collections::HashMap;

pub const DEFAULT_LENGTH: usize = 200;
const ELLIPSIS: char = '…';

pub struct SynopsisPrinter {
    limit: usize,
    output: String,
    used: usize,
    truncated: bool,
    depth: usize,
    marker: Option<String>,
}

impl SynopsisPrinter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            output: String::new(),
            used: 0,
            truncated: false,
            depth: 0,
            marker: None,
        }
    }

    pub fn print(mut self, text: &Text) -> String {
        visit(&mut self, Node::Text(text));
        self.output
    }

    fn push(&mut self, text: &str) {
        if self.truncated {
            return;
        }
        let len = text.chars().count();
        if self.used + len <= self.limit {
            self.output.push_str(text);
            self.used += len;
            return;
        }
        let room = self.limit - self.used;
        self.output.extend(text.chars().take(room));
        let kept = self.output.trim_end().len();
        self.output.truncate(kept);
        self.output.push(ELLIPSIS);
        self.truncated = true;
    }

    fn line(&mut self, content: &str) {
        if !self.output.is_empty() {
            self.push("\n");
        }
        let prefix = match self.marker.take() {
            Some(marker) => marker,
            None => "  ".repeat(self.depth),
        };
        self.push(&format!("{prefix}{content}"));
    }
}

impl Visitor for SynopsisPrinter {
    fn should_descend(&mut self, _node: Node<'_>) -> bool {
        !self.truncated
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.line(&paragraph.plain_text());
    }

    fn visit_heading(&mut self, heading: &Heading) {
        self.line(&heading.plain_text());
    }

    fn visit_list(&mut self, list: &List) {
        for (position, item) in list.items().iter().enumerate() {
            let marker = match list.style() {
                ListStyle::Dotted => "- ".to_string(),
                ListStyle::Numeric => format!("{}. ", item.index().unwrap_or(position + 1)),
            };
            self.marker = Some(format!("{}{marker}", "  ".repeat(self.depth)));
            self.depth += 1;
            visit(self, Node::Item(item));
            self.depth -= 1;
        }
    }

    fn visit_item(&mut self, item: &Item) {
        for block in item.children() {
            visit(self, block.into());
        }
        self.marker = None;
    }
}

/// Format implementation for plain-text synopses
pub struct SynopsisFormat {
    length: usize,
}

impl Default for SynopsisFormat {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl SynopsisFormat {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Format for SynopsisFormat {
    fn name(&self) -> &str {
        "synopsis"
    }

    fn description(&self) -> &str {
        "Plain-text preview cut to a character budget"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, text: &Text) -> Result<String, FormatError> {
        Ok(SynopsisPrinter::new(self.length).print(text))
    }

    fn serialize_with_options(
        &self,
        text: &Text,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_options(self.name(), options, &["length"])?;
        let length = match options.get("length") {
            Some(value) => value.trim().parse().map_err(|_| {
                FormatError::SerializationError(format!("invalid synopsis length '{value}'"))
            })?,
            None => self.length,
        };
        Ok(SynopsisPrinter::new(length).print(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::sem;

    fn synopsis(source: &str, limit: usize) -> String {
        SynopsisPrinter::new(limit).print(&sem::parse(source).unwrap())
    }

    #[test]
    fn test_blocks_and_items() {
        let source = "= Title =\n\nSome *bold* text.\n\n- one\n  3. two\n  4. three\n";
        assert_eq!(
            synopsis(source, 200),
            "Title\nSome bold text.\n- one\n  3. two\n  4. three"
        );
    }

    #[test]
    fn test_truncation() {
        assert_eq!(synopsis("Hello world, again", 12), "Hello world,…");
        assert_eq!(synopsis("Hello world again", 6), "Hello…");
    }

    #[test]
    fn test_traversal_stops_after_truncation() {
        assert_eq!(synopsis("abcdef\n\nsecond", 3), "abc…");
    }

    #[test]
    fn test_length_option() {
        let text = sem::parse("abcdef").unwrap();
        let mut options = HashMap::new();
        options.insert("length".to_string(), "2".to_string());
        let format = SynopsisFormat::default();
        assert_eq!(format.serialize_with_options(&text, &options).unwrap(), "ab…");

        options.insert("length".to_string(), "many".to_string());
        assert!(format.serialize_with_options(&text, &options).is_err());
    }
}
