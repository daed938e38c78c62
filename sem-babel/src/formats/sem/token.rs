//! Token definitions for SEM text.

use serde::Serialize;
use std::fmt;

/// Kind of a lexed token, carrying its value where it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Text(String),
    /// Single line break inside a block
    Newline,
    /// Block boundary
    Separator,
    Indent,
    Dedent,
    DotItem,
    NumItem(usize),
    HeadingStart(u8),
    HeadingStop(u8),
    BoldStart,
    BoldStop,
    ItalicStart,
    ItalicStop,
    LinkStart,
    LinkStop,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Text(_) => "TEXT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::DotItem => "DOT_ITEM",
            TokenKind::NumItem(_) => "NUM_ITEM",
            TokenKind::HeadingStart(_) => "HEADING_START",
            TokenKind::HeadingStop(_) => "HEADING_STOP",
            TokenKind::BoldStart => "BOLD_START",
            TokenKind::BoldStop => "BOLD_STOP",
            TokenKind::ItalicStart => "ITALIC_START",
            TokenKind::ItalicStop => "ITALIC_STOP",
            TokenKind::LinkStart => "LINK_START",
            TokenKind::LinkStop => "LINK_STOP",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Text(text) => write!(f, "TEXT({text:?})"),
            TokenKind::NumItem(n) => write!(f, "NUM_ITEM({n})"),
            TokenKind::HeadingStart(level) => write!(f, "HEADING_START({level})"),
            TokenKind::HeadingStop(level) => write!(f, "HEADING_STOP({level})"),
            other => f.write_str(other.name()),
        }
    }
}

/// A token with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

/// Inline span kinds; at most one may be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Bold,
    Italic,
    Link,
}

impl Marker {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(Marker::Bold),
            '/' => Some(Marker::Italic),
            '`' => Some(Marker::Link),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Marker::Bold => '*',
            Marker::Italic => '/',
            Marker::Link => '`',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Marker::Bold => "bold",
            Marker::Italic => "italic",
            Marker::Link => "link",
        }
    }

    pub fn start(&self) -> TokenKind {
        match self {
            Marker::Bold => TokenKind::BoldStart,
            Marker::Italic => TokenKind::ItalicStart,
            Marker::Link => TokenKind::LinkStart,
        }
    }

    pub fn stop(&self) -> TokenKind {
        match self {
            Marker::Bold => TokenKind::BoldStop,
            Marker::Italic => TokenKind::ItalicStop,
            Marker::Link => TokenKind::LinkStop,
        }
    }
}
