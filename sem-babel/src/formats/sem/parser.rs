//! Recursive descent parser for SEM tokens
//!
//! Grammar, one rule per method:
//!
//! ```text
//! Text        = Element*
//! Element     = (Heading | Paragraph) SEPARATOR | List
//! Heading     = HEADING_START Span+ HEADING_STOP
//! Paragraph   = Span (NEWLINE? Span)*
//! Span        = BOLD_START String BOLD_STOP | ITALIC_START String ITALIC_STOP
//!             | LINK_START String LINK_STOP | String
//! String      = TEXT (NEWLINE TEXT)*
//! List        = (DOT_ITEM SubElements)+ | (NUM_ITEM SubElements)+
//! SubElements = INDENT Element* DEDENT
//! ```
//!
//! The parser holds one token of lookahead and consumes the lexer exactly once. Lexer errors
//! surface as [`ParseError::Lex`] the moment the parser asks for the offending token.

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::ast::{Block, Heading, Inline, Item, Link, List, ListStyle, Paragraph, Span, Text};
use crate::error::{ParseError, SemError};

pub struct Parser<I> {
    tokens: I,
    lookahead: Option<Token>,
    position: (usize, usize),
}

impl<'a> Parser<Lexer<'a>> {
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Lexer::new(source))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, SemError>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens,
            lookahead: None,
            position: (1, 1),
        }
    }

    /// Parses the whole token stream into a document.
    pub fn parse(mut self) -> Result<Text, ParseError> {
        let blocks = self.parse_elements(false)?;
        Ok(Text::new(blocks))
    }

    fn parse_elements(&mut self, nested: bool) -> Result<Vec<Block>, ParseError> {
        let mut blocks = Vec::new();
        loop {
            let Some(kind) = self.peek_kind()? else {
                if nested {
                    return Err(self.unexpected("DEDENT"));
                }
                break;
            };
            match kind {
                TokenKind::Dedent if nested => {
                    self.advance()?;
                    break;
                }
                TokenKind::DotItem | TokenKind::NumItem(_) => {
                    blocks.push(self.parse_list()?.into());
                }
                TokenKind::HeadingStart(_) => {
                    blocks.push(self.parse_heading()?.into());
                    self.expect(TokenKind::Separator)?;
                }
                TokenKind::Text(_)
                | TokenKind::BoldStart
                | TokenKind::ItalicStart
                | TokenKind::LinkStart => {
                    blocks.push(Paragraph::new(self.parse_inlines()?).into());
                    self.expect(TokenKind::Separator)?;
                }
                _ => return Err(self.unexpected("a paragraph, heading or list item")),
            }
        }
        Ok(blocks)
    }

    fn parse_heading(&mut self) -> Result<Heading, ParseError> {
        let level = match self.advance()? {
            Some(Token {
                kind: TokenKind::HeadingStart(level),
                ..
            }) => level,
            _ => return Err(self.unexpected("HEADING_START")),
        };
        let inlines = self.parse_inlines()?;
        self.expect(TokenKind::HeadingStop(level))?;
        Ok(Heading::new(level, inlines))
    }

    fn parse_list(&mut self) -> Result<List, ParseError> {
        let style = match self.peek_kind()? {
            Some(TokenKind::NumItem(_)) => ListStyle::Numeric,
            _ => ListStyle::Dotted,
        };

        let mut items = Vec::new();
        loop {
            let index = match (style, self.peek_kind()?) {
                (ListStyle::Dotted, Some(TokenKind::DotItem)) => None,
                (ListStyle::Numeric, Some(TokenKind::NumItem(n))) => Some(n),
                _ => break,
            };
            self.advance()?;
            self.expect(TokenKind::Indent)?;
            let children = self.parse_elements(true)?;
            items.push(Item::new(index, children));
        }

        Ok(List::new(style, items))
    }

    /// Collects the spans of one paragraph or heading.
    ///
    /// A `NEWLINE` turns into a single space: appended to a preceding plain run, otherwise
    /// prepended to the next plain run, otherwise a span of its own.
    fn parse_inlines(&mut self) -> Result<Vec<Inline>, ParseError> {
        let mut inlines: Vec<Inline> = Vec::new();
        let mut plain = String::new();
        let mut pending_space = false;

        loop {
            match self.peek_kind()? {
                Some(TokenKind::Text(_)) => {
                    let text = self.parse_text_token()?;
                    if pending_space {
                        plain.push(' ');
                        pending_space = false;
                    }
                    plain.push_str(&text);
                }
                Some(TokenKind::Newline) => {
                    self.advance()?;
                    if plain.is_empty() {
                        pending_space = true;
                    } else {
                        plain.push(' ');
                    }
                }
                Some(TokenKind::BoldStart) => {
                    flush_plain(&mut inlines, &mut plain, &mut pending_space);
                    let text = self.parse_marked(TokenKind::BoldStart, TokenKind::BoldStop)?;
                    inlines.push(Span::bold(text).into());
                }
                Some(TokenKind::ItalicStart) => {
                    flush_plain(&mut inlines, &mut plain, &mut pending_space);
                    let text = self.parse_marked(TokenKind::ItalicStart, TokenKind::ItalicStop)?;
                    inlines.push(Span::italic(text).into());
                }
                Some(TokenKind::LinkStart) => {
                    flush_plain(&mut inlines, &mut plain, &mut pending_space);
                    let (line, column) = self.next_position();
                    let text = self.parse_marked(TokenKind::LinkStart, TokenKind::LinkStop)?;
                    inlines.push(parse_link(&text, line, column)?.into());
                }
                _ => break,
            }
        }

        if !plain.is_empty() {
            inlines.push(Span::plain(plain).into());
        }
        if inlines.is_empty() {
            return Err(self.unexpected("text"));
        }
        Ok(inlines)
    }

    fn parse_marked(&mut self, start: TokenKind, stop: TokenKind) -> Result<String, ParseError> {
        self.expect(start)?;
        let text = self.parse_string()?;
        self.expect(stop)?;
        Ok(text)
    }

    /// `TEXT (NEWLINE TEXT)*`, joined with single spaces.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let mut text = self.parse_text_token()?;
        while let Some(TokenKind::Newline) = self.peek_kind()? {
            self.advance()?;
            text.push(' ');
            text.push_str(&self.parse_text_token()?);
        }
        Ok(text)
    }

    fn parse_text_token(&mut self) -> Result<String, ParseError> {
        match self.peek_kind()? {
            Some(TokenKind::Text(_)) => match self.advance()? {
                Some(Token {
                    kind: TokenKind::Text(text),
                    ..
                }) => Ok(text),
                _ => Err(self.unexpected("TEXT")),
            },
            _ => Err(self.unexpected("TEXT")),
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        match self.peek_kind()? {
            Some(kind) if kind == expected => match self.advance()? {
                Some(token) => Ok(token),
                None => Err(self.unexpected(expected.name())),
            },
            _ => Err(self.unexpected(&expected.to_string())),
        }
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParseError> {
        self.fill()?;
        Ok(self.lookahead.as_ref().map(|token| token.kind.clone()))
    }

    fn advance(&mut self) -> Result<Option<Token>, ParseError> {
        self.fill()?;
        let token = self.lookahead.take();
        if let Some(token) = &token {
            self.position = (token.line, token.column);
        }
        Ok(token)
    }

    fn fill(&mut self) -> Result<(), ParseError> {
        if self.lookahead.is_none() {
            if let Some(next) = self.tokens.next() {
                self.lookahead = Some(next?);
            }
        }
        Ok(())
    }

    fn next_position(&self) -> (usize, usize) {
        self.lookahead
            .as_ref()
            .map_or(self.position, |token| (token.line, token.column))
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.lookahead {
            Some(token) => ParseError::Unexpected {
                expected: expected.to_string(),
                found: token.kind.to_string(),
                line: token.line,
                column: token.column,
            },
            None => ParseError::Unexpected {
                expected: expected.to_string(),
                found: "end of input".to_string(),
                line: self.position.0,
                column: self.position.1,
            },
        }
    }
}

fn flush_plain(inlines: &mut Vec<Inline>, plain: &mut String, pending_space: &mut bool) {
    if *pending_space {
        inlines.push(Span::plain(" ").into());
        *pending_space = false;
    }
    if !plain.is_empty() {
        inlines.push(Span::plain(std::mem::take(plain)).into());
    }
}

/// Splits `display <address>` at the first `<`.
fn parse_link(raw: &str, line: usize, column: usize) -> Result<Link, ParseError> {
    let malformed = |message: &str| ParseError::Malformed {
        message: format!("{message} in link `{raw}`"),
        line,
        column,
    };

    let (display, rest) = raw.split_once('<').ok_or_else(|| malformed("missing address"))?;
    let address = rest
        .strip_suffix('>')
        .ok_or_else(|| malformed("unterminated address"))?;
    if address.contains(['<', '>']) {
        return Err(malformed("stray angle bracket"));
    }
    let address = address.trim();
    if address.is_empty() {
        return Err(malformed("empty address"));
    }
    Ok(Link::new(display.trim(), address))
}
