//! Error types for parsing and format operations

use crate::ast::Text;
use thiserror::Error;

/// Lexical error raised while tokenizing SEM text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct SemError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SemError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Grammar violation found by the SEM parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] SemError),
    #[error("expected {expected}, found {found} at line {line}, column {column}")]
    Unexpected {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    #[error("{message} at line {line}, column {column}")]
    Malformed {
        message: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Position of the first offending token.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Lex(err) => (err.line, err.column),
            ParseError::Unexpected { line, column, .. }
            | ParseError::Malformed { line, column, .. } => (*line, *column),
        }
    }
}

/// Raised by `parse_text` when the input cannot be parsed.
///
/// Carries the whole original input wrapped as a single plain paragraph so callers can still
/// render something.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable text: {message} (line {line}, column {column})")]
pub struct UnparsableError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub text: Text,
}

impl UnparsableError {
    pub fn new(error: &ParseError, source: &str) -> Self {
        let (line, column) = error.position();
        Self {
            message: error.to_string(),
            line,
            column,
            text: Text::plain(source),
        }
    }
}

/// A delta list item skipped more than one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid list nesting: expected depth {expected}, got {got}")]
pub struct InvalidNestingError {
    pub expected: usize,
    pub got: usize,
}

/// Failures of the HTML bridge. Recoverable through the plain-text fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtmlError {
    #[error("anchor without href at line {line}")]
    MissingHref { line: u64 },
}

/// Failures of the JSON delta entry points.
#[derive(Debug, Error)]
pub enum DeltaError {
    #[error("invalid delta JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Nesting(#[from] InvalidNestingError),
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl From<UnparsableError> for FormatError {
    fn from(err: UnparsableError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}

impl From<HtmlError> for FormatError {
    fn from(err: HtmlError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}

impl From<DeltaError> for FormatError {
    fn from(err: DeltaError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}
