//! Streaming stages from delta ops to block events
//!
//! ```text
//! ops ─simplify─▶ Piece ─minimize_spans─▶ Styled ─itemize─▶ Structure ─reduce_paragraphs─▶ Reduced
//! ```
//!
//! Each stage is a lazy iterator adapter; nothing is buffered beyond the paragraph being
//! accumulated by [`reduce_paragraphs`].

use super::ops::{Attributes, Op};
use crate::ast::{Inline, Link, ListStyle, Paragraph, Span, SpanStyle};
use serde_json::Value;

/// Attribute keys that have no meaning in the document tree and are dropped silently.
const IGNORED_ATTRIBUTES: &[&str] = &[
    "align",
    "background",
    "code-block",
    "color",
    "font",
    "script",
    "size",
];

/// A string insert split at its line breaks.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Text(String, Attributes),
    /// The `\n` ending a line, with the line's block attributes.
    BlockEnd(Attributes),
}

/// Text resolved to inline nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Styled {
    Inline(Inline),
    BlockEnd(Attributes),
}

/// Line ends classified by their block attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Inline(Inline),
    Newline,
    Header(u8),
    ListItem { style: ListStyle, depth: usize },
}

/// Paragraphs with the structural event that closed them.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduced {
    Paragraph(Paragraph),
    Header(u8),
    ListItem { style: ListStyle, depth: usize },
}

/// Splits string inserts on `\n`; embeds are skipped.
pub fn simplify<'a>(ops: impl IntoIterator<Item = &'a Op>) -> impl Iterator<Item = Piece> {
    ops.into_iter().flat_map(split_op)
}

fn split_op(op: &Op) -> Vec<Piece> {
    let Value::String(insert) = &op.insert else {
        tracing::warn!(insert = %op.insert, "skipping non-text insert");
        return Vec::new();
    };

    let attributes = op.attributes.clone().unwrap_or_default();
    let inline = attributes.inline();
    let block = attributes.block();
    let mut pieces = Vec::new();
    let mut lines = insert.split('\n').peekable();
    while let Some(line) = lines.next() {
        if !line.is_empty() {
            pieces.push(Piece::Text(line.to_string(), inline.clone()));
        }
        if lines.peek().is_some() {
            pieces.push(Piece::BlockEnd(block.clone()));
        }
    }
    pieces
}

/// Turns text pieces into spans and links.
///
/// Styled text sheds its boundary whitespace into plain spans, so `" bold "` becomes plain
/// `" "`, bold `"bold"`, plain `" "`. When several inline attributes are present, link wins
/// over bold, bold over italic.
pub fn minimize_spans(pieces: impl Iterator<Item = Piece>) -> impl Iterator<Item = Styled> {
    pieces.flat_map(|piece| match piece {
        Piece::BlockEnd(attributes) => vec![Styled::BlockEnd(attributes)],
        Piece::Text(text, attributes) => {
            for key in attributes.extra.keys() {
                if !IGNORED_ATTRIBUTES.contains(&key.as_str()) {
                    tracing::warn!(attribute = %key, "dropping unknown delta attribute");
                }
            }

            if let Some(address) = &attributes.link {
                return shed_whitespace(&text, |core| Link::new(core, address.as_str()).into());
            }
            let style = if attributes.is_bold() {
                SpanStyle::Bold
            } else if attributes.is_italic() {
                SpanStyle::Italic
            } else {
                SpanStyle::Plain
            };
            match style {
                SpanStyle::Plain => vec![Styled::Inline(Span::plain(text).into())],
                style => shed_whitespace(&text, |core| Span::new(core, style).into()),
            }
        }
    })
}

fn shed_whitespace(text: &str, styled: impl Fn(&str) -> Inline) -> Vec<Styled> {
    let core = text.trim();
    if core.is_empty() {
        return vec![Styled::Inline(Span::plain(text).into())];
    }
    let lead = &text[..text.len() - text.trim_start().len()];
    let trail = &text[text.trim_end().len()..];

    let mut out = Vec::with_capacity(3);
    if !lead.is_empty() {
        out.push(Styled::Inline(Span::plain(lead).into()));
    }
    out.push(Styled::Inline(styled(core)));
    if !trail.is_empty() {
        out.push(Styled::Inline(Span::plain(trail).into()));
    }
    out
}

/// Classifies every line end by its block attributes.
///
/// `list: "ordered"` is numeric, any other list value (`bullet`, `checked`, ...) is dotted.
pub fn itemize(events: impl Iterator<Item = Styled>) -> impl Iterator<Item = Structure> {
    events.map(|event| match event {
        Styled::Inline(inline) => Structure::Inline(inline),
        Styled::BlockEnd(attributes) => match (&attributes.list, attributes.header) {
            (Some(kind), _) => Structure::ListItem {
                style: if kind == "ordered" {
                    ListStyle::Numeric
                } else {
                    ListStyle::Dotted
                },
                depth: attributes.indent.unwrap_or(0),
            },
            (None, Some(level)) => Structure::Header(level),
            (None, None) => Structure::Newline,
        },
    })
}

/// Accumulates inlines into paragraphs.
///
/// A `Newline` closes the current paragraph, which may be empty. A structural event first
/// closes the paragraph it applies to and is then passed on. Trailing inlines without a final
/// line end still form a paragraph.
pub fn reduce_paragraphs<I>(events: I) -> ReduceParagraphs<I>
where
    I: Iterator<Item = Structure>,
{
    ReduceParagraphs {
        events,
        inlines: Vec::new(),
        pending: None,
    }
}

pub struct ReduceParagraphs<I> {
    events: I,
    inlines: Vec<Inline>,
    pending: Option<Reduced>,
}

impl<I> ReduceParagraphs<I> {
    fn flush(&mut self) -> Reduced {
        Reduced::Paragraph(Paragraph::new(std::mem::take(&mut self.inlines)))
    }
}

impl<I> Iterator for ReduceParagraphs<I>
where
    I: Iterator<Item = Structure>,
{
    type Item = Reduced;

    fn next(&mut self) -> Option<Reduced> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        loop {
            match self.events.next() {
                Some(Structure::Inline(inline)) => self.inlines.push(inline),
                Some(Structure::Newline) => return Some(self.flush()),
                Some(Structure::Header(level)) => {
                    self.pending = Some(Reduced::Header(level));
                    return Some(self.flush());
                }
                Some(Structure::ListItem { style, depth }) => {
                    self.pending = Some(Reduced::ListItem { style, depth });
                    return Some(self.flush());
                }
                None if !self.inlines.is_empty() => return Some(self.flush()),
                None => return None,
            }
        }
    }
}
