//! Whitespace squashing and inline collapsing shared by the HTML and delta bridges.

use crate::ast::{Inline, Span, SpanStyle};

/// Collapses every run of whitespace into a single space.
pub fn squash_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Normalizes the inlines of a block that is about to be finalized.
///
/// Whitespace-only styled spans become plain, neighbouring spans of one style merge, empty
/// spans go away and whitespace-only spans at either end are removed. Links pass through.
pub fn collapse_inlines(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut merged: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        let span = match inline {
            Inline::Span(span) => span,
            link @ Inline::Link(_) => {
                merged.push(link);
                continue;
            }
        };
        let style = if span.text().trim().is_empty() {
            SpanStyle::Plain
        } else {
            span.style()
        };
        if span.text().is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(Inline::Span(previous)) if previous.style() == style => {
                let joined = squash_whitespace(&format!("{}{}", previous.text(), span.text()));
                *previous = Span::new(joined, style);
            }
            _ => merged.push(Span::new(span.text(), style).into()),
        }
    }

    let is_blank = |inline: &Inline| matches!(inline, Inline::Span(span) if span.text().trim().is_empty());
    while merged.first().is_some_and(is_blank) {
        merged.remove(0);
    }
    while merged.last().is_some_and(is_blank) {
        merged.pop();
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squashes_runs() {
        assert_eq!(squash_whitespace("a \n\t b  "), "a b ");
        assert_eq!(squash_whitespace(""), "");
    }

    #[test]
    fn collapse_merges_and_trims() {
        let collapsed = collapse_inlines(vec![
            Span::bold(" ").into(),
            Span::plain("a ").into(),
            Span::plain(" b").into(),
            Span::bold("").into(),
            Span::bold("c").into(),
            Span::italic(" ").into(),
        ]);
        assert_eq!(
            collapsed,
            vec![Inline::Span(Span::plain(" a b")), Inline::Span(Span::bold("c"))]
        );
    }

    #[test]
    fn collapse_of_whitespace_is_empty() {
        assert!(collapse_inlines(vec![Span::plain("  ").into()]).is_empty());
        assert!(collapse_inlines(vec![]).is_empty());
    }
}
