//! HTML format tests
//!
//! Tests for bidirectional HTML ↔ AST conversion.

mod export;
mod import;
