//! SEM format implementation
//!
//! SEM is the native markup of this crate:
//!
//! ```text
//! = Title =
//!
//! Hello *world*, this is /italic/ and a `link <http://example.com>`.
//!
//! - dotted item
//!   1. nested numbered item
//! ```
//!
//! Parsing runs [`lexer::Lexer`] into [`parser::Parser`]; serialization goes through
//! [`serializer::SemSerializer`].

use crate::ast::{Paragraph, Span, Text};
use crate::error::{FormatError, ParseError, UnparsableError};
use crate::format::Format;

pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod token;

use parser::Parser;
use serializer::SemSerializer;

/// Options for [`parse_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Return one plain paragraph per blank-line separated chunk instead of failing.
    pub plain_fallback: bool,
}

/// Strict parse of SEM source.
pub fn parse(source: &str) -> Result<Text, ParseError> {
    Parser::from_source(source).parse()
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Text, UnparsableError> {
    match parse(source) {
        Ok(text) => Ok(text),
        Err(err) if options.plain_fallback => {
            tracing::trace!(error = %err, "SEM parse failed, falling back to plain paragraphs");
            Ok(plain_paragraphs(source))
        }
        Err(err) => Err(UnparsableError::new(&err, source)),
    }
}

/// Splits raw text on blank lines into plain paragraphs, one line each.
pub fn plain_paragraphs(source: &str) -> Text {
    let mut blocks = Vec::new();
    let mut chunk: Vec<&str> = Vec::new();
    for line in source.lines().chain(std::iter::once("")) {
        let line = line.trim();
        if !line.is_empty() {
            chunk.push(line);
            continue;
        }
        if !chunk.is_empty() {
            let joined = chunk.join(" ");
            blocks.push(Paragraph::new(vec![Span::plain(joined).into()]).into());
            chunk.clear();
        }
    }
    Text::new(blocks)
}

pub fn serialize(text: &Text) -> String {
    SemSerializer::new().serialize(text)
}

/// Format implementation for SEM text.
#[derive(Default)]
pub struct SemFormat {
    options: ParseOptions,
}

impl SemFormat {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Format for SemFormat {
    fn name(&self) -> &str {
        "sem"
    }

    fn description(&self) -> &str {
        "SEM lightweight markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["sem", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Text, FormatError> {
        Ok(parse_with_options(source, self.options)?)
    }

    fn serialize(&self, text: &Text) -> Result<String, FormatError> {
        Ok(serialize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Block;

    #[test]
    fn test_sem_format_name() {
        let format = SemFormat::default();
        assert_eq!(format.name(), "sem");
        assert!(format.supports_parsing());
        assert!(format.supports_serialization());
    }

    #[test]
    fn test_strict_failure_carries_plain_text() {
        let err = parse_with_options("*a /b* c/", ParseOptions::default()).unwrap_err();
        assert_eq!((err.line, err.column), (1, 4));
        assert_eq!(err.text, Text::plain("*a /b* c/"));
    }

    #[test]
    fn test_plain_fallback_splits_on_blank_lines() {
        let options = ParseOptions {
            plain_fallback: true,
        };
        let text = parse_with_options("*a /b\nc/\n\n  d  \n", options).unwrap();
        let paragraphs: Vec<_> = text
            .children()
            .iter()
            .map(|block| match block {
                Block::Paragraph(p) => p.plain_text(),
                _ => panic!("expected paragraphs"),
            })
            .collect();
        assert_eq!(paragraphs, vec!["*a /b c/", "d"]);
    }

    #[test]
    fn test_format_roundtrip() {
        let format = SemFormat::default();
        let source = "= Title =\n\nHello *world*.\n";
        let text = format.parse(source).unwrap();
        assert_eq!(format.serialize(&text).unwrap(), source);
    }
}
