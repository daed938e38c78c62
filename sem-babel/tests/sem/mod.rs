//! SEM text tests
//!
//! Parsing, printing and the string entry points of the library.

mod convert;
mod parse;
