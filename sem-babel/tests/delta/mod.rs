//! Quill delta tests
//!
//! Tests for bidirectional delta ↔ AST conversion.

mod convert;
