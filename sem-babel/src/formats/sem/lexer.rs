//! SEM lexer
//!
//!     Turns raw SEM text into a stream of [`Token`]s. The lexer is line based: every physical
//!     line is classified (blank, list item, heading, paragraph text) and then its inline content
//!     is scanned for span markers.
//!
//!     The lexer is a stateful, single-consumption iterator. It tracks the stack of open
//!     indentation columns and the currently open span marker across lines, so it is moved into
//!     the parser and never cloned or replayed. After the first error it yields nothing else.
//!
//! Line Breaks
//!
//!     Blank lines are not tokens of their own. The break between two content lines is emitted
//!     when the second line is reached: `SEPARATOR` when at least one blank line lies between
//!     them, the indentation changes, the new line opens a list item, or either line is a
//!     heading. Any other break is a soft `NEWLINE` inside the current block.
//!
//! Indentation
//!
//!     The stack starts at column 0. A wider line pushes its width and emits `INDENT`; a
//!     narrower one pops (one `DEDENT` per pop) until the widths match, otherwise the line is
//!     badly indented. List markers push an extra level for their own width, so the body of an
//!     item sits exactly one `INDENT` deeper than its marker.
//!
//! Inline Spans
//!
//!     `*bold*`, `/italic/` and `` `link <address>` `` are recognised by the characters around
//!     the marker: a start marker follows whitespace (or the line start) and precedes
//!     non-whitespace, a stop marker follows non-whitespace and precedes a non-word character
//!     (or the line end). URLs are skipped so their slashes never open a span. Spans do not
//!     nest.

use super::token::{Marker, Token, TokenKind};
use crate::error::SemError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*] |(\d+)[.)] )").expect("list marker pattern"));

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s<>`]+").expect("url pattern"));

const TAB_WIDTH: usize = 4;
const MAX_HEADING_LEVEL: usize = 6;

/// Tokenizes SEM text lazily, one physical line at a time.
pub struct Lexer<'a> {
    lines: std::iter::Enumerate<std::str::Split<'a, char>>,
    pending: VecDeque<Token>,
    indents: Vec<usize>,
    open_span: Option<(Marker, usize, usize)>,
    blank_run: usize,
    seen_content: bool,
    previous_heading: bool,
    last_line: usize,
    done: bool,
}

/// What a line holds once its indentation is removed.
struct LineShape<'s> {
    markers: Vec<(TokenKind, usize, usize)>,
    remainder: &'s str,
    remainder_offset: usize,
    heading: Option<(u8, usize, usize)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.split('\n').enumerate(),
            pending: VecDeque::new(),
            indents: vec![0],
            open_span: None,
            blank_run: 0,
            seen_content: false,
            previous_heading: false,
            last_line: 1,
            done: false,
        }
    }

    fn lex_line(&mut self, number: usize, raw: &str) -> Result<(), SemError> {
        let line = raw.strip_suffix('\r').unwrap_or(raw).trim_end();
        if line.is_empty() {
            self.blank_run += 1;
            return Ok(());
        }

        let (width, start) = measure_indent(line);
        let content = &line[start..];
        let base_column = line[..start].chars().count() + 1;
        let shape = shape_line(content, number, base_column)?;

        if self.seen_content {
            let top = self.current_indent();
            let separator = self.blank_run > 0
                || width != top
                || !shape.markers.is_empty()
                || shape.heading.is_some()
                || self.previous_heading;
            if separator {
                self.ensure_no_open_span()?;
                self.push(TokenKind::Separator, number, 1);
            } else {
                self.push(TokenKind::Newline, number, 1);
            }
        }
        self.blank_run = 0;

        self.apply_indent(width, number, base_column)?;

        let mut marker_width = width;
        for (kind, offset, len) in shape.markers {
            marker_width += len;
            self.push(kind, number, base_column + offset);
            self.indents.push(marker_width);
            self.push(TokenKind::Indent, number, base_column + offset + len);
        }

        let column = base_column + shape.remainder_offset;
        match shape.heading {
            Some((level, inner_start, inner_end)) => {
                self.push(TokenKind::HeadingStart(level), number, column);
                let inner = &shape.remainder[inner_start..inner_end];
                self.lex_inline(inner, number, column + inner_start)?;
                self.ensure_no_open_span()?;
                self.push(TokenKind::HeadingStop(level), number, column + inner_end);
                self.previous_heading = true;
            }
            None => {
                self.lex_inline(shape.remainder, number, column)?;
                self.previous_heading = false;
            }
        }

        self.seen_content = true;
        Ok(())
    }

    fn current_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    fn apply_indent(&mut self, width: usize, line: usize, column: usize) -> Result<(), SemError> {
        let top = self.current_indent();
        if width > top {
            self.indents.push(width);
            self.push(TokenKind::Indent, line, 1);
            return Ok(());
        }
        while width < self.current_indent() && self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, line, 1);
        }
        if width != self.current_indent() {
            return Err(SemError::new(
                format!(
                    "mismatched indentation: width {width} does not match any open level (innermost is {})",
                    self.current_indent()
                ),
                line,
                column,
            ));
        }
        Ok(())
    }

    fn lex_inline(&mut self, text: &str, line: usize, column: usize) -> Result<(), SemError> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut run_start = 0;
        let mut run_column = column;
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];

            if c == 'h' {
                if let Some(url) = URL.find(&text[offset..]) {
                    let end = offset + url.end();
                    while i < chars.len() && chars[i].0 < end {
                        i += 1;
                    }
                    continue;
                }
            }

            let Some(marker) = Marker::from_char(c) else {
                i += 1;
                continue;
            };

            let before = if i > 0 { Some(chars[i - 1].1) } else { None };
            let after = chars.get(i + 1).map(|&(_, c)| c);
            let opens = before.map_or(true, char::is_whitespace)
                && after.is_some_and(|c| !c.is_whitespace());
            let closes = before.is_some_and(|c| !c.is_whitespace()) && after.map_or(true, |c| !is_word(c));
            let marker_column = column + i;

            if opens {
                if let Some((open, open_line, open_column)) = self.open_span {
                    return Err(SemError::new(
                        format!(
                            "overlapped span start: cannot open {} span while the {} span opened at line {open_line}, column {open_column} is still open",
                            marker.name(),
                            open.name()
                        ),
                        line,
                        marker_column,
                    ));
                }
                self.flush_text(&text[run_start..offset], line, run_column);
                self.push(marker.start(), line, marker_column);
                self.open_span = Some((marker, line, marker_column));
            } else if closes {
                match self.open_span {
                    Some((open, _, _)) if open == marker => {}
                    Some((open, open_line, open_column)) => {
                        return Err(SemError::new(
                            format!(
                                "unpaired span stop: {} marker closes the {} span opened at line {open_line}, column {open_column}",
                                marker.name(),
                                open.name()
                            ),
                            line,
                            marker_column,
                        ));
                    }
                    None => {
                        return Err(SemError::new(
                            format!("unpaired span stop: no {} span is open", marker.name()),
                            line,
                            marker_column,
                        ));
                    }
                }
                self.flush_text(&text[run_start..offset], line, run_column);
                self.push(marker.stop(), line, marker_column);
                self.open_span = None;
            } else {
                i += 1;
                continue;
            }

            run_start = offset + c.len_utf8();
            run_column = marker_column + 1;
            i += 1;
        }

        self.flush_text(&text[run_start..], line, run_column);
        Ok(())
    }

    fn flush_text(&mut self, text: &str, line: usize, column: usize) {
        if !text.is_empty() {
            self.push(TokenKind::Text(text.to_string()), line, column);
        }
    }

    fn ensure_no_open_span(&mut self) -> Result<(), SemError> {
        match self.open_span {
            Some((open, line, column)) => Err(SemError::new(
                format!("unclosed span: {} span is never closed", open.name()),
                line,
                column,
            )),
            None => Ok(()),
        }
    }

    fn finish(&mut self) -> Result<(), SemError> {
        self.ensure_no_open_span()?;
        let line = self.last_line;
        if self.seen_content {
            self.push(TokenKind::Separator, line, 1);
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, line, 1);
        }
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, line: usize, column: usize) {
        self.pending.push_back(Token::new(kind, line, column));
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, SemError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            let step = match self.lines.next() {
                Some((index, raw)) => {
                    self.last_line = index + 1;
                    self.lex_line(index + 1, raw)
                }
                None => {
                    self.done = true;
                    self.finish()
                }
            };
            if let Err(err) = step {
                self.done = true;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Collects every token, stopping at the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SemError> {
    Lexer::new(source).collect()
}

fn measure_indent(line: &str) -> (usize, usize) {
    let mut width = 0;
    for (offset, c) in line.char_indices() {
        match c {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => return (width, offset),
        }
    }
    (width, line.len())
}

fn shape_line(content: &str, line: usize, base_column: usize) -> Result<LineShape<'_>, SemError> {
    let mut markers = Vec::new();
    let mut offset = 0;
    while let Some(found) = LIST_MARKER.captures(&content[offset..]) {
        let len = found.get(0).map_or(0, |m| m.end());
        let kind = match found.get(1) {
            Some(digits) => {
                let n = digits.as_str().parse().map_err(|_| {
                    SemError::new(
                        format!("list number out of range: {}", digits.as_str()),
                        line,
                        base_column + offset,
                    )
                })?;
                TokenKind::NumItem(n)
            }
            None => TokenKind::DotItem,
        };
        markers.push((kind, offset, len));
        offset += len;
    }

    let remainder = &content[offset..];
    Ok(LineShape {
        markers,
        remainder,
        remainder_offset: content[..offset].chars().count(),
        heading: match_heading(remainder),
    })
}

/// True when `line`, written at the start of a block line, would be read as a list marker or a
/// heading instead of paragraph text.
pub(crate) fn opens_block(line: &str) -> bool {
    LIST_MARKER.is_match(line) || match_heading(line).is_some()
}

/// Matches `= Title =` with the same run of `=` on both ends.
///
/// Returns the level and the byte range of the text between the runs.
fn match_heading(text: &str) -> Option<(u8, usize, usize)> {
    let lead = text.bytes().take_while(|&b| b == b'=').count();
    let trail = text.bytes().rev().take_while(|&b| b == b'=').count();
    if lead == 0 || lead > MAX_HEADING_LEVEL || lead != trail || lead + trail >= text.len() {
        return None;
    }
    let inner = &text[lead..text.len() - trail];
    let padded = inner.starts_with(char::is_whitespace) && inner.ends_with(char::is_whitespace);
    if !padded || inner.trim().is_empty() {
        return None;
    }
    Some((lead as u8, lead, text.len() - trail))
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source to tokenize")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn text(value: &str) -> TokenKind {
        TokenKind::Text(value.to_string())
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            kinds("= Title =\n\nHello *world*.\n"),
            vec![
                TokenKind::HeadingStart(1),
                text(" Title "),
                TokenKind::HeadingStop(1),
                TokenKind::Separator,
                text("Hello "),
                TokenKind::BoldStart,
                text("world"),
                TokenKind::BoldStop,
                text("."),
                TokenKind::Separator,
            ]
        );
    }

    #[test]
    fn test_soft_wrap_is_newline() {
        assert_eq!(
            kinds("one\ntwo"),
            vec![text("one"), TokenKind::Newline, text("two"), TokenKind::Separator]
        );
    }

    #[test]
    fn test_nested_list_tokens() {
        assert_eq!(
            kinds("- a\n  1. b\n- c"),
            vec![
                TokenKind::DotItem,
                TokenKind::Indent,
                text("a"),
                TokenKind::Separator,
                TokenKind::NumItem(1),
                TokenKind::Indent,
                text("b"),
                TokenKind::Separator,
                TokenKind::Dedent,
                TokenKind::Dedent,
                TokenKind::DotItem,
                TokenKind::Indent,
                text("c"),
                TokenKind::Separator,
                TokenKind::Dedent,
            ]
        );
    }

    #[test]
    fn test_mismatched_indent() {
        let err = tokenize("- a\n    - b\n - c").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("mismatched indentation"));
    }

    #[test]
    fn test_oversized_list_number() {
        let err = tokenize("ok\n  - 99999999999999999999999. x").unwrap_err();
        assert!(err.message.contains("list number out of range"));
        assert_eq!((err.line, err.column), (2, 5));
    }

    #[test]
    fn test_overlapped_span() {
        let err = tokenize("*a /b* c/").unwrap_err();
        assert!(err.message.contains("overlapped span start"));
        assert!(err.message.contains("line 1, column 1"));
        assert_eq!((err.line, err.column), (1, 4));
    }

    #[test]
    fn test_unpaired_stop() {
        let err = tokenize("either/ or").unwrap_err();
        assert!(err.message.contains("unpaired span stop"));
        assert_eq!(err.column, 7);
    }

    #[test]
    fn test_urls_are_not_markers() {
        assert_eq!(
            kinds("see http://example.com/a/b and more"),
            vec![text("see http://example.com/a/b and more"), TokenKind::Separator]
        );
    }

    #[test]
    fn test_link_span() {
        assert_eq!(
            kinds("`home <https://example.com/>`"),
            vec![
                TokenKind::LinkStart,
                text("home <https://example.com/>"),
                TokenKind::LinkStop,
                TokenKind::Separator,
            ]
        );
    }

    #[test]
    fn test_heading_requires_matching_runs() {
        assert_eq!(kinds("== a =")[0], text("== a ="));
        assert_eq!(kinds("======= a =======")[0], text("======= a ======="));
        assert_eq!(kinds("=== a ===")[0], TokenKind::HeadingStart(3));
    }

    #[test]
    fn test_span_across_lines() {
        assert_eq!(
            kinds("*one\ntwo*"),
            vec![
                TokenKind::BoldStart,
                text("one"),
                TokenKind::Newline,
                text("two"),
                TokenKind::BoldStop,
                TokenKind::Separator,
            ]
        );
    }

    #[test]
    fn test_unclosed_span_at_block_end() {
        let err = tokenize("*one\n\ntwo").unwrap_err();
        assert!(err.message.contains("unclosed span"));
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_empty_source() {
        assert!(kinds("").is_empty());
        assert!(kinds("\n\n  \n").is_empty());
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("ab\n  - *c*").unwrap();
        let bold = tokens
            .iter()
            .find(|token| token.kind == TokenKind::BoldStart)
            .unwrap();
        assert_eq!((bold.line, bold.column), (2, 5));
    }
}
