//! Conversion engine for SEM markup
//!
//!     SEM is a small indentation-sensitive markup: headings, paragraphs with bold, italic and
//!     link spans, and nested dotted or numbered lists. This crate parses it into a document
//!     tree and converts that tree to and from HTML and Quill rich-text deltas.
//!
//!     This is a pure lib: no file system, network or process state is touched. The sem-cli
//!     crate is the shell around it.
//!
//! Architecture
//!
//!     Everything meets at the tree in ./ast. Parsers produce it, printers walk it with the
//!     visitor in ./ast/visitor.rs.
//!
//!     .
//!     ├── ast                     # Nodes and the visitor
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── common                  # Code shared by the bridges
//!     └── formats
//!         ├── sem                 # Lexer, parser, serializer
//!         ├── html                # Streaming tag bridge, serializer
//!         ├── delta               # Op transforms, serializer
//!         ├── synopsis            # Plain-text preview
//!         └── tag                 # XML-like debug dump
//!
//! Testing
//!
//!     tests
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Subdirectories are registered as modules from tests/lib.rs.
//!
//! Core Algorithms
//!
//!     - SEM text: the lexer turns indentation into INDENT/DEDENT tokens and pairs span
//!       markers; the parser is a recursive descent over that token stream.
//!     - HTML: tokenizer events drive an explicit stack of builder frames
//!       (./formats/html/builders.rs). No DOM is built.
//!     - Deltas are flat. Nesting is rebuilt from line attributes in
//!       ./common/flat_to_nested.rs.
//!
//! Lossy Conversions
//!
//!     SEM is the most restricted of the representations, so converting into it drops what it
//!     cannot say. Round trips are exact only for documents that started as SEM.

pub mod ast;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use ast::Text;
pub use error::{
    DeltaError, FormatError, HtmlError, InvalidNestingError, ParseError, SemError,
    UnparsableError,
};
pub use format::Format;
pub use formats::delta::{from_delta, parse_delta_json, to_delta, to_delta_json, Delta};
pub use registry::FormatRegistry;

use formats::html::HtmlOptions;
use formats::sem::ParseOptions;

/// Parses SEM text.
///
/// With `plain_fallback`, unparsable input becomes one plain paragraph per blank-line separated
/// chunk instead of an error.
pub fn parse_text(text: &str, plain_fallback: bool) -> Result<Text, UnparsableError> {
    formats::sem::parse_with_options(text, ParseOptions { plain_fallback })
}

/// Converts HTML into a document, falling back to its visible text when asked to.
pub fn parse_html(html: &str, fallback_to_plain_text: bool) -> Result<Text, HtmlError> {
    formats::html::parse(html, fallback_to_plain_text)
}

/// Renders SEM text as an HTML fragment.
///
/// Blank input is returned unchanged. Unparsable input is rendered from its plain paragraphs.
pub fn text_to_html(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    let document = match parse_text(text, false) {
        Ok(document) => document,
        Err(err) => {
            tracing::trace!(error = %err, "rendering unparsable text as plain paragraphs");
            formats::sem::plain_paragraphs(text)
        }
    };
    formats::html::serialize(&document, HtmlOptions::default())
}

/// Converts HTML to SEM text. Blank input is returned unchanged.
pub fn html_to_text(html: &str) -> String {
    if html.trim().is_empty() {
        return html.to_string();
    }
    let document = match parse_html(html, false) {
        Ok(document) => document,
        Err(err) => {
            tracing::trace!(error = %err, "converting HTML through its visible text");
            formats::html::parser::parse_plain(html)
        }
    };
    formats::sem::serialize(&document)
}
