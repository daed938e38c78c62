//! HTML format implementation
//!
//! Both directions go through the shared AST:
//!
//! - Import streams html5ever tokenizer events into builder frames (see [`parser`] and
//!   [`builders`]). Only the semantic subset maps onto the AST: paragraphs, headings, bold and
//!   italic, links and lists. Everything else is flattened into text or dropped.
//! - Export ([`serializer`]) writes an HTML fragment with `<p>`, `<hN>`, `<strong>`, `<em>`,
//!   `<a>`, `<ul>`/`<ol>` and `<li>`.
//!
//! # Lossy Conversions
//!
//! - Attributes other than `href` and `li value` are dropped
//! - Inline whitespace is squashed to single spaces
//! - `<br>` always splits the paragraph it appears in

pub mod builders;
pub mod parser;
pub mod serializer;

use crate::ast::Text;
use crate::error::{FormatError, HtmlError};
use crate::format::{bool_option, check_options, Format};
use std::collections::HashMap;

pub use serializer::{HtmlOptions, HtmlSerializer};

/// Converts HTML into a document.
///
/// With `fallback_to_plain_text`, a failure of the structured conversion degrades to the
/// visible text of the input as a single plain paragraph.
pub fn parse(html: &str, fallback_to_plain_text: bool) -> Result<Text, HtmlError> {
    match parser::parse(html) {
        Err(err) if fallback_to_plain_text => {
            tracing::trace!(error = %err, "HTML conversion failed, falling back to plain text");
            Ok(parser::parse_plain(html))
        }
        result => result,
    }
}

pub fn serialize(text: &Text, options: HtmlOptions) -> String {
    HtmlSerializer::new(options).serialize(text)
}

/// Format implementation for HTML fragments
#[derive(Debug, Clone, Copy)]
pub struct HtmlFormat {
    options: HtmlOptions,
    fallback_to_plain_text: bool,
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(HtmlOptions::default(), true)
    }
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions, fallback_to_plain_text: bool) -> Self {
        Self {
            options,
            fallback_to_plain_text,
        }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Text, FormatError> {
        Ok(parse(source, self.fallback_to_plain_text)?)
    }

    fn serialize(&self, text: &Text) -> Result<String, FormatError> {
        Ok(serialize(text, self.options))
    }

    fn serialize_with_options(
        &self,
        text: &Text,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_options(self.name(), options, &["escape"])?;
        let html_options = HtmlOptions {
            escape: bool_option(options, "escape", self.options.escape)?,
        };
        Ok(serialize(text, html_options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_plain_text() {
        let html = "<p>see <a>here</a></p>";
        assert!(parse(html, false).is_err());
        assert_eq!(parse(html, true).unwrap(), Text::plain("see here"));
    }

    #[test]
    fn test_format_options() {
        let format = HtmlFormat::default();
        let text = Text::plain("a & b");

        let mut options = HashMap::new();
        options.insert("escape".to_string(), "false".to_string());
        assert_eq!(
            format.serialize_with_options(&text, &options).unwrap(),
            "<p>a & b</p>\n"
        );

        options.insert("theme".to_string(), "dark".to_string());
        assert!(format.serialize_with_options(&text, &options).is_err());
    }
}
