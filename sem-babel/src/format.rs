//! Format trait definition
//!
//! Every format the crate knows about implements [`Format`], giving a uniform way to turn source
//! text into a [`Text`] tree and back.

use crate::ast::Text;
use crate::error::FormatError;
use std::collections::HashMap;

/// Trait for document formats
///
/// Implementors provide conversion between a string representation and the [`Text`] tree.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, text: &Text) -> Result<String, FormatError> {
///         Ok(SynopsisPrinter::new(usize::MAX).print(text).to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "sem", "html", "delta")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Text)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Text → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a document tree
    fn parse(&self, _source: &str) -> Result<Text, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a document tree into source text
    fn serialize(&self, _text: &Text) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize with extra `key=value` parameters.
    ///
    /// The default accepts no parameters and delegates to [`Format::serialize`].
    fn serialize_with_options(
        &self,
        text: &Text,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(text)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Reads a boolean option, accepting `true`/`false`/`1`/`0`/`yes`/`no`.
pub(crate) fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    match options.get(key).map(|value| value.to_ascii_lowercase()) {
        None => Ok(default),
        Some(value) => match value.as_str() {
            "" | "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(FormatError::SerializationError(format!(
                "invalid value '{other}' for option '{key}'"
            ))),
        },
    }
}

/// Rejects option keys a format does not understand.
pub(crate) fn check_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    match options.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(FormatError::NotSupported(format!(
            "Format '{format}' does not support option '{key}'"
        ))),
        None => Ok(()),
    }
}
