//! Builder frames for the HTML bridge
//!
//! Every open tag the bridge cares about becomes a [`Frame`] on an explicit stack. Text and
//! child nodes accumulate in the top frame; when a frame is closed it is finalized into an
//! AST node and handed to the frame below it.
//!
//! Paragraphs can also be opened implicitly: inline content that reaches the root or a list
//! item gets a paragraph frame without a tag, closed by the next block boundary.

use crate::ast::{
    Block, Heading, Inline, Item, Link, List, ListStyle, Paragraph, Span, SpanStyle, Text,
};
use crate::common::text::{collapse_inlines, squash_whitespace};

#[derive(Debug, Clone, PartialEq)]
pub enum FrameKind {
    Root,
    /// `level` is set for headings.
    Paragraph { level: Option<u8> },
    Style(SpanStyle),
    Link { href: String },
    List(ListStyle),
    Item { value: Option<usize> },
}

impl FrameKind {
    fn is_inline(&self) -> bool {
        matches!(
            self,
            FrameKind::Paragraph { .. } | FrameKind::Style(_) | FrameKind::Link { .. }
        )
    }

    fn holds_blocks(&self) -> bool {
        matches!(self, FrameKind::Root | FrameKind::Item { .. })
    }
}

#[derive(Debug)]
pub struct Frame {
    /// Tag that opened the frame; `None` for implicit paragraphs and the root.
    pub tag: Option<String>,
    pub kind: FrameKind,
    blocks: Vec<Block>,
    items: Vec<Item>,
    inlines: Vec<Inline>,
}

impl Frame {
    fn new(tag: Option<&str>, kind: FrameKind) -> Self {
        Self {
            tag: tag.map(str::to_string),
            kind,
            blocks: Vec::new(),
            items: Vec::new(),
            inlines: Vec::new(),
        }
    }
}

/// What a start tag wants to install.
#[derive(Debug, Clone, PartialEq)]
pub enum Install {
    Block(FrameKind),
    Item(Option<usize>),
    Inline(FrameKind),
}

/// Stack of open frames, rooted at a document frame that is never popped.
#[derive(Debug)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl Default for FrameStack {
    fn default() -> Self {
        Self {
            frames: vec![Frame::new(None, FrameKind::Root)],
        }
    }
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn top(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Installs a frame for `tag`, closing whatever cannot contain it.
    ///
    /// Returns false when the tag has nowhere to go (an `li` outside any list).
    pub fn open(&mut self, tag: &str, install: Install) -> bool {
        match install {
            Install::Block(kind) => {
                while !self.top().kind.holds_blocks() {
                    self.pop();
                }
                self.frames.push(Frame::new(Some(tag), kind));
            }
            Install::Item(value) => {
                if !self
                    .frames
                    .iter()
                    .any(|frame| matches!(frame.kind, FrameKind::List(_)))
                {
                    return false;
                }
                while !matches!(self.top().kind, FrameKind::List(_)) {
                    self.pop();
                }
                let value = match self.top().kind {
                    FrameKind::List(ListStyle::Numeric) => value,
                    _ => None,
                };
                self.frames
                    .push(Frame::new(Some(tag), FrameKind::Item { value }));
            }
            Install::Inline(kind) => {
                let nested_link = matches!(kind, FrameKind::Link { .. });
                loop {
                    let top = &self.top().kind;
                    let accepts = match top {
                        FrameKind::Link { .. } => !nested_link,
                        other => other.is_inline(),
                    };
                    if accepts || top.holds_blocks() {
                        break;
                    }
                    self.pop();
                }
                self.ensure_inline_context();
                self.frames.push(Frame::new(Some(tag), kind));
            }
        }
        true
    }

    /// Appends squashed text to the open inline frame.
    ///
    /// Whitespace-only text only survives as a single space between existing content.
    pub fn text(&mut self, raw: &str) {
        let text = squash_whitespace(raw);
        if text.is_empty() {
            return;
        }
        if text == " " {
            if self.inline_chain_has_content() {
                self.push_span(text);
            }
            return;
        }
        if matches!(self.top().kind, FrameKind::List(_)) {
            tracing::debug!(text = %text, "dropping text directly inside a list");
            return;
        }
        self.ensure_inline_context();
        self.push_span(text);
    }

    /// Closes frames down to and including the innermost one opened by `tag`.
    ///
    /// Returns false when no such frame is open.
    pub fn close(&mut self, tag: &str) -> bool {
        let Some(position) = self
            .frames
            .iter()
            .rposition(|frame| frame.tag.as_deref() == Some(tag))
        else {
            return false;
        };
        while self.frames.len() > position {
            self.pop();
        }
        true
    }

    /// Forces a paragraph break by closing the innermost paragraph frame.
    pub fn break_paragraph(&mut self) {
        if let Some(position) = self
            .frames
            .iter()
            .rposition(|frame| matches!(frame.kind, FrameKind::Paragraph { .. }))
        {
            while self.frames.len() > position {
                self.pop();
            }
        }
    }

    /// Closes every open frame and returns the finished document.
    pub fn finish(mut self) -> Text {
        while self.frames.len() > 1 {
            self.pop();
        }
        let root = self.frames.pop().map(|frame| frame.blocks).unwrap_or_default();
        Text::new(root)
    }

    fn ensure_inline_context(&mut self) {
        if self.top().kind.holds_blocks() {
            self.frames
                .push(Frame::new(None, FrameKind::Paragraph { level: None }));
        }
    }

    fn inline_chain_has_content(&self) -> bool {
        self.frames
            .iter()
            .rev()
            .take_while(|frame| frame.kind.is_inline())
            .any(|frame| !frame.inlines.is_empty())
    }

    fn push_span(&mut self, text: String) {
        let style = self
            .frames
            .iter()
            .rev()
            .take_while(|frame| frame.kind.is_inline())
            .find_map(|frame| match frame.kind {
                FrameKind::Style(style) => Some(style),
                _ => None,
            })
            .unwrap_or(SpanStyle::Plain);
        let top = self.top_mut();
        if top.kind.is_inline() {
            top.inlines.push(Span::new(text, style).into());
        }
    }

    /// Finalizes the top frame into its parent. The root is never popped.
    fn pop(&mut self) {
        if self.frames.len() <= 1 {
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let parent = self.top_mut();
        match frame.kind {
            FrameKind::Root => {}
            FrameKind::Paragraph { level } => {
                let inlines = collapse_inlines(frame.inlines);
                if inlines.is_empty() {
                    return;
                }
                let block: Block = match level {
                    Some(level) => Heading::new(level, inlines).into(),
                    None => Paragraph::new(inlines).into(),
                };
                parent.blocks.push(block);
            }
            FrameKind::Style(_) => parent.inlines.extend(frame.inlines),
            FrameKind::Link { href } => {
                let display: String = collapse_inlines(frame.inlines)
                    .iter()
                    .map(Inline::text)
                    .collect();
                parent
                    .inlines
                    .push(Link::new(display.trim(), href).into());
            }
            FrameKind::List(style) => {
                if !frame.items.is_empty() {
                    parent
                        .blocks
                        .push(List::with_explicit_indices(style, frame.items).into());
                }
            }
            FrameKind::Item { value } => parent.items.push(Item::new(value, frame.blocks)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_texts(text: &Text) -> Vec<String> {
        text.children()
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(p.plain_text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn implicit_paragraph_for_bare_text() {
        let mut stack = FrameStack::new();
        stack.text("  hello   world ");
        assert_eq!(stack.depth(), 2);
        assert_eq!(paragraph_texts(&stack.finish()), vec!["hello world"]);
    }

    #[test]
    fn whitespace_between_blocks_is_dropped() {
        let mut stack = FrameStack::new();
        stack.text("\n  ");
        assert_eq!(stack.depth(), 1);
        assert!(stack.finish().is_empty());
    }

    #[test]
    fn block_tag_closes_open_paragraph() {
        let mut stack = FrameStack::new();
        stack.text("one");
        stack.open("p", Install::Block(FrameKind::Paragraph { level: None }));
        stack.text("two");
        assert_eq!(paragraph_texts(&stack.finish()), vec!["one", "two"]);
    }

    #[test]
    fn stray_close_is_reported() {
        let mut stack = FrameStack::new();
        assert!(!stack.close("b"));
        assert!(!stack.open("li", Install::Item(None)));
    }

    #[test]
    fn nested_link_closes_outer_link() {
        let mut stack = FrameStack::new();
        stack.open(
            "a",
            Install::Inline(FrameKind::Link {
                href: "http://a".into(),
            }),
        );
        stack.text("a");
        stack.open(
            "a",
            Install::Inline(FrameKind::Link {
                href: "http://b".into(),
            }),
        );
        stack.text("b");
        let text = stack.finish();
        let Block::Paragraph(paragraph) = &text.children()[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(paragraph.children().len(), 2);
    }
}
