//! HTML to AST bridge
//!
//! The html5ever tokenizer streams start tags, end tags and character data into an
//! [`HtmlSink`], which maps every tag through a fixed registry and drives the builder
//! [`FrameStack`]. No DOM is built; malformed markup is tolerated the same way the stack
//! tolerates it (unclosed tags are closed by the next tag that cannot nest inside them, stray
//! end tags are ignored).
//!
//! Tag registry:
//!
//! | Tags                                  | Effect                                   |
//! |---------------------------------------|------------------------------------------|
//! | `p`, `h1`..`h6`                       | paragraph / heading                      |
//! | `b`, `strong` / `i`, `em`             | bold / italic span                       |
//! | `a`                                   | link, `href` required                    |
//! | `ul` / `ol`, `li`                     | dotted / numeric list, item (`value`)    |
//! | `br`, `div`, `tr`                     | paragraph break                          |
//! | `script`, `style`, `title`            | content discarded                        |
//! | `img`, `iframe`, `td`                 | ignored                                  |
//! | `html`, `body`, `pre`, `span`, tables | transparent                              |
//!
//! Anything else is logged at debug level and ignored; its text still flows.

use super::builders::{FrameKind, FrameStack, Install};
use crate::ast::{ListStyle, SpanStyle, Text};
use crate::common::text::squash_whitespace;
use crate::error::HtmlError;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::cell::RefCell;

/// What the registry says about a tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagRole {
    Paragraph,
    Heading(u8),
    Style(SpanStyle),
    Anchor,
    List(ListStyle),
    Item,
    Break,
    Raw(RawKind),
    Void,
    Transparent,
}

fn tag_role(name: &str) -> Option<TagRole> {
    let role = match name {
        "p" => TagRole::Paragraph,
        "h1" => TagRole::Heading(1),
        "h2" => TagRole::Heading(2),
        "h3" => TagRole::Heading(3),
        "h4" => TagRole::Heading(4),
        "h5" => TagRole::Heading(5),
        "h6" => TagRole::Heading(6),
        "b" | "strong" => TagRole::Style(SpanStyle::Bold),
        "i" | "em" => TagRole::Style(SpanStyle::Italic),
        "a" => TagRole::Anchor,
        "ul" => TagRole::List(ListStyle::Dotted),
        "ol" => TagRole::List(ListStyle::Numeric),
        "li" => TagRole::Item,
        "br" | "div" | "tr" => TagRole::Break,
        "script" => TagRole::Raw(RawKind::ScriptData),
        "style" => TagRole::Raw(RawKind::Rawtext),
        "title" => TagRole::Raw(RawKind::Rcdata),
        "img" | "iframe" | "td" => TagRole::Void,
        "html" | "head" | "body" | "pre" | "span" | "table" | "tbody" | "thead" => {
            TagRole::Transparent
        }
        _ => return None,
    };
    Some(role)
}

fn attribute<'t>(tag: &'t Tag, name: &str) -> Option<&'t str> {
    tag.attrs
        .iter()
        .find(|attr| &*attr.name.local == name)
        .map(|attr| &*attr.value)
}

#[derive(Default)]
struct SinkState {
    stack: FrameStack,
    /// Name of the raw-text element whose content is being discarded.
    raw: Option<String>,
    error: Option<HtmlError>,
}

/// Token sink driving the builder stack.
#[derive(Default)]
pub struct HtmlSink {
    state: RefCell<SinkState>,
}

impl HtmlSink {
    fn start_tag(state: &mut SinkState, tag: &Tag, line: u64) -> TokenSinkResult<()> {
        let name = &*tag.name;
        let Some(role) = tag_role(name) else {
            tracing::debug!(tag = name, line, "ignoring unknown tag");
            return TokenSinkResult::Continue;
        };

        let install = match role {
            TagRole::Paragraph => Install::Block(FrameKind::Paragraph { level: None }),
            TagRole::Heading(level) => Install::Block(FrameKind::Paragraph { level: Some(level) }),
            TagRole::List(style) => Install::Block(FrameKind::List(style)),
            TagRole::Style(style) => Install::Inline(FrameKind::Style(style)),
            TagRole::Anchor => match attribute(tag, "href").map(str::trim) {
                Some(href) if !href.is_empty() => Install::Inline(FrameKind::Link {
                    href: href.to_string(),
                }),
                _ => {
                    state.error = Some(HtmlError::MissingHref { line });
                    return TokenSinkResult::Continue;
                }
            },
            TagRole::Item => Install::Item(
                attribute(tag, "value").and_then(|value| value.trim().parse().ok()),
            ),
            TagRole::Break => {
                state.stack.break_paragraph();
                return TokenSinkResult::Continue;
            }
            TagRole::Raw(kind) => {
                if tag.self_closing {
                    return TokenSinkResult::Continue;
                }
                state.raw = Some(name.to_string());
                return TokenSinkResult::RawData(kind);
            }
            TagRole::Void | TagRole::Transparent => return TokenSinkResult::Continue,
        };

        if tag.self_closing {
            return TokenSinkResult::Continue;
        }
        if !state.stack.open(name, install) {
            tracing::debug!(tag = name, line, "ignoring list item outside of a list");
        }
        TokenSinkResult::Continue
    }

    fn end_tag(state: &mut SinkState, tag: &Tag, line: u64) {
        let name = &*tag.name;
        if state.raw.as_deref() == Some(name) {
            state.raw = None;
            return;
        }
        match tag_role(name) {
            Some(TagRole::Break) => state.stack.break_paragraph(),
            Some(
                TagRole::Paragraph
                | TagRole::Heading(_)
                | TagRole::Style(_)
                | TagRole::Anchor
                | TagRole::List(_)
                | TagRole::Item,
            ) => {
                if !state.stack.close(name) {
                    tracing::debug!(tag = name, line, "ignoring stray end tag");
                }
            }
            _ => {}
        }
    }

    fn into_result(self) -> Result<Text, HtmlError> {
        let state = self.state.into_inner();
        match state.error {
            Some(err) => Err(err),
            None => Ok(state.stack.finish()),
        }
    }
}

impl TokenSink for HtmlSink {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        if state.error.is_some() {
            return TokenSinkResult::Continue;
        }
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return Self::start_tag(&mut state, &tag, line_number),
                TagKind::EndTag => Self::end_tag(&mut state, &tag, line_number),
            },
            Token::CharacterTokens(text) => {
                if state.raw.is_none() {
                    state.stack.text(&text);
                }
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Collects the visible text of a document, one space per block boundary.
#[derive(Default)]
pub struct TextCollector {
    text: RefCell<String>,
    raw: RefCell<Option<String>>,
}

impl TextCollector {
    pub fn into_text(self) -> String {
        squash_whitespace(self.text.into_inner().trim())
    }
}

impl TokenSink for TextCollector {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut raw = self.raw.borrow_mut();
        match token {
            Token::TagToken(tag) => {
                let name = &*tag.name;
                if tag.kind == TagKind::EndTag && raw.as_deref() == Some(name) {
                    *raw = None;
                    return TokenSinkResult::Continue;
                }
                match tag_role(name) {
                    Some(TagRole::Raw(kind)) if tag.kind == TagKind::StartTag && !tag.self_closing => {
                        *raw = Some(name.to_string());
                        return TokenSinkResult::RawData(kind);
                    }
                    Some(
                        TagRole::Paragraph
                        | TagRole::Heading(_)
                        | TagRole::List(_)
                        | TagRole::Item
                        | TagRole::Break,
                    ) => self.text.borrow_mut().push(' '),
                    _ => {}
                }
            }
            Token::CharacterTokens(text) if raw.is_none() => self.text.borrow_mut().push_str(&text),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

fn tokenize<S: TokenSink<Handle = ()>>(html: &str, sink: S) -> S {
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from(html));
    let _ = tokenizer.feed(&queue);
    tokenizer.end();
    tokenizer.sink
}

/// Strict conversion of an HTML fragment or document.
pub fn parse(html: &str) -> Result<Text, HtmlError> {
    tokenize(html, HtmlSink::default()).into_result()
}

/// The squashed visible text of `html` as a single plain paragraph.
pub fn parse_plain(html: &str) -> Text {
    let text = tokenize(html, TextCollector::default()).into_text();
    if text.is_empty() {
        Text::default()
    } else {
        Text::plain(&text)
    }
}
