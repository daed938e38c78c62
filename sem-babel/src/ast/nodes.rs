//! Core node types of the SEM document tree.
//!
//! Every producer (the SEM parser, the HTML bridge and the delta bridge) builds these nodes
//! bottom-up and never touches them again. Fields are private: the constructors are the only
//! place where the structural invariants are established.
//!
//! # Invariants
//!
//! - A [`Paragraph`] (and therefore a [`Heading`]) always has at least one inline child. Its
//!   first inline carries no leading whitespace and its last inline no trailing whitespace.
//! - A [`List`] only contains [`Item`]s, and an [`Item`] only contains [`Block`]s.
//! - Items of a [`ListStyle::Numeric`] list always carry an index once the list is built.

use serde::Serialize;

/// Visual style of a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    Plain,
    Bold,
    Italic,
}

impl SpanStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanStyle::Plain => "plain",
            SpanStyle::Bold => "bold",
            SpanStyle::Italic => "italic",
        }
    }
}

/// Marker style of a [`List`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Dotted,
    Numeric,
}

impl ListStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListStyle::Dotted => "dotted",
            ListStyle::Numeric => "numeric",
        }
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    text: String,
    style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Italic)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> SpanStyle {
        self.style
    }
}

/// A hyperlink. Always rendered in plain style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    text: String,
    address: String,
}

impl Link {
    /// Creates a link, falling back to the address when the display text is blank.
    pub fn new(text: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        let text = text.into();
        let text = if text.trim().is_empty() {
            address.clone()
        } else {
            text
        };
        Self { text, address }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    Span(Span),
    Link(Link),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Span(span) => span.text(),
            Inline::Link(link) => link.text(),
        }
    }

    pub fn style(&self) -> SpanStyle {
        match self {
            Inline::Span(span) => span.style(),
            Inline::Link(_) => SpanStyle::Plain,
        }
    }

    fn text_mut(&mut self) -> &mut String {
        match self {
            Inline::Span(span) => &mut span.text,
            Inline::Link(link) => &mut link.text,
        }
    }
}

impl From<Span> for Inline {
    fn from(span: Span) -> Self {
        Inline::Span(span)
    }
}

impl From<Link> for Inline {
    fn from(link: Link) -> Self {
        Inline::Link(link)
    }
}

/// A block of inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    children: Vec<Inline>,
}

impl Paragraph {
    /// Builds a paragraph, trimming the outer whitespace of its inline content.
    pub fn new(children: Vec<Inline>) -> Self {
        Self {
            children: trim_inlines(children),
        }
    }

    pub fn children(&self) -> &[Inline] {
        &self.children
    }

    /// Concatenated text of every inline.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(Inline::text).collect()
    }

    /// True when the paragraph holds nothing but an empty span.
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(|inline| inline.text().is_empty())
    }
}

/// A titled paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    level: u8,
    children: Vec<Inline>,
}

impl Heading {
    pub const MAX_LEVEL: u8 = 6;

    pub fn new(level: u8, children: Vec<Inline>) -> Self {
        Self {
            level: level.clamp(1, Self::MAX_LEVEL),
            children: trim_inlines(children),
        }
    }

    /// Re-wraps an existing paragraph as a heading.
    pub fn from_paragraph(level: u8, paragraph: Paragraph) -> Self {
        Self::new(level, paragraph.children)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn children(&self) -> &[Inline] {
        &self.children
    }

    pub fn plain_text(&self) -> String {
        self.children.iter().map(Inline::text).collect()
    }
}

/// An entry of a [`List`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    index: Option<usize>,
    children: Vec<Block>,
}

impl Item {
    pub fn new(index: Option<usize>, children: Vec<Block>) -> Self {
        Self { index, children }
    }

    /// An auto-numbered item.
    pub fn auto(children: Vec<Block>) -> Self {
        Self::new(None, children)
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn children(&self) -> &[Block] {
        &self.children
    }
}

/// A dotted or numbered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    style: ListStyle,
    items: Vec<Item>,
}

impl List {
    /// Builds a list. Numeric lists get their running ordinals assigned here.
    pub fn new(style: ListStyle, items: Vec<Item>) -> Self {
        let items = match style {
            ListStyle::Dotted => items,
            ListStyle::Numeric => number_items(items),
        };
        Self { style, items }
    }

    /// Builds a list whose literal indices are kept as written. Items without one continue
    /// from the previous item, as `<li>` does after `<li value>`.
    pub fn with_explicit_indices(style: ListStyle, items: Vec<Item>) -> Self {
        let items = match style {
            ListStyle::Dotted => items,
            ListStyle::Numeric => continue_numbering(items),
        };
        Self { style, items }
    }

    pub fn style(&self) -> ListStyle {
        self.style
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// Block-level content of a [`Text`] or an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    List(List),
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Heading> for Block {
    fn from(heading: Heading) -> Self {
        Block::Heading(heading)
    }
}

impl From<List> for Block {
    fn from(list: List) -> Self {
        Block::List(list)
    }
}

/// The root of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Text {
    children: Vec<Block>,
}

impl Text {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }

    /// A document made of one plain paragraph holding `raw` verbatim.
    pub fn plain(raw: &str) -> Self {
        Self::new(vec![Block::Paragraph(Paragraph::new(vec![
            Span::plain(raw).into()
        ]))])
    }

    pub fn children(&self) -> &[Block] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

fn trim_inlines(mut children: Vec<Inline>) -> Vec<Inline> {
    if children.is_empty() {
        return vec![Span::plain("").into()];
    }

    let first = children[0].text_mut();
    let trimmed = first.trim_start();
    if trimmed.len() != first.len() {
        *first = trimmed.to_string();
    }

    loop {
        let count = children.len();
        let Some(last) = children.last_mut() else {
            break;
        };
        let text = last.text_mut();
        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);
        if text.is_empty() && count > 1 {
            children.pop();
            continue;
        }
        break;
    }

    children
}

/// A literal sets the running count unless it repeats the previous literal or the current
/// count, so `1. 1. 2.` reads as 1, 2, 3 and printed lists number the same way again.
fn number_items(items: Vec<Item>) -> Vec<Item> {
    let mut counter = 0;
    let mut previous: Option<usize> = None;
    items
        .into_iter()
        .map(|item| {
            match item.index {
                Some(literal) if Some(literal) != previous && literal != counter => {
                    counter = literal
                }
                _ => counter += 1,
            }
            previous = item.index;
            Item {
                index: Some(counter),
                children: item.children,
            }
        })
        .collect()
}

fn continue_numbering(items: Vec<Item>) -> Vec<Item> {
    let mut last = 0;
    items
        .into_iter()
        .map(|item| {
            last = item.index.unwrap_or(last + 1);
            Item {
                index: Some(last),
                children: item.children,
            }
        })
        .collect()
}
