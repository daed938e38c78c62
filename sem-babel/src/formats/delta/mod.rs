//! Quill delta format implementation
//!
//! Import runs the op list through the stages in [`transforms`] and rebuilds list nesting
//! with [`crate::common::flat_to_nested`]. Export is the [`serializer::DeltaSerializer`]
//! visitor.
//!
//! # Lossy Conversions
//!
//! - Embeds (non-text inserts) and formatting without an AST counterpart are dropped
//! - Explicit list indices are not represented; imported numeric lists count from 1
//! - Every paragraph of a multi-paragraph item becomes an item of its own

pub mod ops;
pub mod serializer;
pub mod transforms;

use crate::ast::Text;
use crate::common::flat_to_nested::events_to_text;
use crate::error::{DeltaError, FormatError, InvalidNestingError};
use crate::format::Format;

pub use ops::{Attributes, Delta, Op};
pub use serializer::DeltaSerializer;

/// Rebuilds a document from a delta.
pub fn from_delta(delta: &Delta) -> Result<Text, InvalidNestingError> {
    let pieces = transforms::simplify(&delta.ops);
    let styled = transforms::minimize_spans(pieces);
    let structure = transforms::itemize(styled);
    events_to_text(transforms::reduce_paragraphs(structure))
}

pub fn to_delta(text: &Text) -> Delta {
    DeltaSerializer::new().serialize(text)
}

/// Parses a JSON delta, either `{"ops": [...]}` or a bare op array.
pub fn parse_delta_json(json: &str) -> Result<Text, DeltaError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let delta: Delta = match value {
        serde_json::Value::Array(_) => Delta::new(serde_json::from_value(value)?),
        other => serde_json::from_value(other)?,
    };
    Ok(from_delta(&delta)?)
}

pub fn to_delta_json(text: &Text) -> Result<String, DeltaError> {
    Ok(serde_json::to_string_pretty(&to_delta(text))?)
}

/// Format implementation for JSON deltas
#[derive(Debug, Default, Clone, Copy)]
pub struct DeltaFormat;

impl Format for DeltaFormat {
    fn name(&self) -> &str {
        "delta"
    }

    fn description(&self) -> &str {
        "Quill rich-text delta (JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "delta"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Text, FormatError> {
        Ok(parse_delta_json(source)?)
    }

    fn serialize(&self, text: &Text) -> Result<String, FormatError> {
        to_delta_json(text).map_err(|err| FormatError::SerializationError(err.to_string()))
    }
}
