//! Byte-offset scanning over the original source text.
//!
//! Every operation takes an offset and returns the new offset; nothing here holds a cursor.
//! Offsets always land on ASCII delimiters or node boundaries, so slicing the text at them is
//! safe for any UTF-8 input.

use unicode_width::UnicodeWidthChar;

use crate::diagnostics::{to_error_source, ErrorContext, PositionDescription, SourceArc, TranslateError};
use crate::output::OutputSink;
use crate::ast::Span;

/// Immutable text of one input file with precomputed line starts and comment spans.
#[derive(Debug, Clone)]
pub struct SourceText {
    name: String,
    text: String,
    line_starts: Vec<usize>,
    /// Every `//` and `/* */` comment, in source order. A line comment ends at its newline.
    comments: Vec<Span>,
    line_terminator: &'static str,
}

/// Finds the comments of `text` in one pass, skipping over string and character literals.
fn comment_spans(text: &str) -> Vec<Span> {
    let bytes = text.as_bytes();
    let mut comments = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let start = i;
                i += 2;
                while i < bytes.len() && !is_newline(bytes[i]) {
                    i += 1;
                }
                comments.push(Span::new(start, i));
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let start = i;
                i = match text[i + 2..].find("*/") {
                    Some(rel) => i + 2 + rel + 2,
                    None => bytes.len(),
                };
                comments.push(Span::new(start, i));
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() {
                    match bytes[i] {
                        b'\\' => i += 2,
                        b if b == quote => {
                            i += 1;
                            break;
                        }
                        b if is_newline(b) => break,
                        _ => i += 1,
                    }
                }
            }
            _ => i += 1,
        }
    }
    comments
}

/// The first line terminator of `text`, or `\n` if it has none.
fn detect_line_terminator(text: &str) -> &'static str {
    match text.find(|c: char| c == '\n' || c == '\r') {
        Some(i) if text[i..].starts_with("\r\n") => "\r\n",
        Some(i) if text[i..].starts_with('\r') => "\r",
        _ => "\n",
    }
}

impl SourceText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(i + 1),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => line_starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        Self {
            name: name.into(),
            comments: comment_spans(&text),
            line_terminator: detect_line_terminator(&text),
            text,
            line_starts,
        }
    }

    /// Line terminator generated lines should use, matching the source's first one.
    pub fn line_terminator(&self) -> &'static str {
        self.line_terminator
    }

    /// Start of the comment ending exactly at `end`, if there is one.
    fn comment_ending_at(&self, end: usize) -> Option<usize> {
        self.comments
            .binary_search_by_key(&end, |c| c.end)
            .ok()
            .map(|i| self.comments[i].start)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.start..span.end]
    }

    /// 0-based index of the line containing `offset`.
    fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        }
    }

    pub fn line_start(&self, offset: usize) -> usize {
        self.line_starts[self.line_index(offset)]
    }

    /// Offset of the line terminator (or end of text) of the line containing `offset`.
    pub fn line_end(&self, offset: usize) -> usize {
        let bytes = self.text.as_bytes();
        let mut i = offset.min(bytes.len());
        while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
            i += 1;
        }
        i
    }

    pub fn named_source(&self) -> SourceArc {
        to_error_source(&self.name, &self.text)
    }
}

/// Pure scanning operations bound to one [`SourceText`].
#[derive(Debug, Clone, Copy)]
pub struct TextScanner<'s> {
    source: &'s SourceText,
    tab_stop: usize,
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0c')
}

fn is_newline(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

impl<'s> TextScanner<'s> {
    pub fn new(source: &'s SourceText, tab_stop: usize) -> Self {
        Self {
            source,
            tab_stop: tab_stop.max(1),
        }
    }

    pub fn source(&self) -> &'s SourceText {
        self.source
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    fn bytes(&self) -> &'s [u8] {
        self.source.text.as_bytes()
    }

    // ------------------------------------------------------------------------
    // Forward skipping
    // ------------------------------------------------------------------------

    /// Skips whitespace, `//` and `/* */` comments. With `stop_at_end_of_line`, stops at the
    /// first newline outside a block comment.
    pub fn skip_space_and_comments(&self, from: usize, stop_at_end_of_line: bool) -> usize {
        let bytes = self.bytes();
        let mut i = from;
        while i < bytes.len() {
            let b = bytes[i];
            if is_newline(b) {
                if stop_at_end_of_line {
                    break;
                }
                i += 1;
            } else if is_space(b) {
                i += 1;
            } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
                i += 2;
                while i < bytes.len() && !is_newline(bytes[i]) {
                    i += 1;
                }
            } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
                i = match self.source.text[i + 2..].find("*/") {
                    Some(rel) => i + 2 + rel + 2,
                    None => bytes.len(),
                };
            } else {
                break;
            }
        }
        i
    }

    /// Skips one `\n`, `\r\n` or `\r`, if present.
    pub fn skip_newline(&self, from: usize) -> usize {
        let bytes = self.bytes();
        match bytes.get(from) {
            Some(b'\r') if bytes.get(from + 1) == Some(&b'\n') => from + 2,
            Some(b'\n') | Some(b'\r') => from + 1,
            _ => from,
        }
    }

    pub fn skip_spaces_and_tabs(&self, from: usize) -> usize {
        let bytes = self.bytes();
        let mut i = from;
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        i
    }

    /// Skips whole lines containing only spaces and tabs. Returns the start of the first
    /// non-blank line, or `from` if its line has content.
    pub fn skip_blank_lines(&self, from: usize) -> usize {
        let bytes = self.bytes();
        let mut i = from;
        loop {
            let after_spaces = self.skip_spaces_and_tabs(i);
            if after_spaces < bytes.len() && is_newline(bytes[after_spaces]) {
                i = self.skip_newline(after_spaces);
            } else {
                return i;
            }
        }
    }

    // ------------------------------------------------------------------------
    // Backward skipping
    // ------------------------------------------------------------------------

    /// Mirror of [`skip_space_and_comments`](Self::skip_space_and_comments), scanning toward
    /// the start of the text. Comments are recognised from the whole-text comment table, so a
    /// `//` inside a block comment or a string is never mistaken for a line comment.
    pub fn skip_space_and_comments_backward(&self, from: usize) -> usize {
        let bytes = self.bytes();
        let mut i = from.min(bytes.len());
        while i > 0 {
            if let Some(start) = self.source.comment_ending_at(i) {
                i = start;
                continue;
            }
            if is_space(bytes[i - 1]) || is_newline(bytes[i - 1]) {
                i -= 1;
                continue;
            }
            break;
        }
        i
    }

    pub fn skip_spaces_and_tabs_backward(&self, from: usize) -> usize {
        let bytes = self.bytes();
        let mut i = from.min(bytes.len());
        while i > 0 && is_space(bytes[i - 1]) {
            i -= 1;
        }
        i
    }

    // ------------------------------------------------------------------------
    // Copying and matching
    // ------------------------------------------------------------------------

    /// Like [`skip_space_and_comments`](Self::skip_space_and_comments), appending the consumed
    /// text verbatim to `sink`.
    pub fn copy_space_and_comments(
        &self,
        from: usize,
        stop_at_end_of_line: bool,
        sink: &mut dyn OutputSink,
    ) -> usize {
        let end = self.skip_space_and_comments(from, stop_at_end_of_line);
        if end > from {
            sink.write_str(&self.source.text[from..end]);
        }
        end
    }

    /// Requires the text at `from` to begin with `expected` exactly.
    ///
    /// No token-boundary check is made: `final` matches the start of `finalX`.
    pub fn match_text(&self, from: usize, expected: &str) -> Result<usize, TranslateError> {
        let text = &self.source.text;
        if from <= text.len() && text[from..].starts_with(expected) {
            return Ok(from + expected.len());
        }
        let found: String = text
            .get(from..)
            .unwrap_or("")
            .chars()
            .take(expected.chars().count().max(1))
            .collect();
        let position = self.position_description(from);
        Err(TranslateError::InternalInvariant {
            message: format!("expected `{}` but found `{}`", expected, found),
            ctx: ErrorContext::with_source_and_span(
                self.source.named_source(),
                Span::new(from, from),
            )
            .with_help(position.excerpt()),
            position,
        })
    }

    // ------------------------------------------------------------------------
    // Line and column
    // ------------------------------------------------------------------------

    /// 1-based line number of `offset`.
    pub fn line_number(&self, offset: usize) -> usize {
        self.source.line_index(offset) + 1
    }

    /// 0-based column of `offset`, with tabs expanded to the scanner's tab stop.
    pub fn logical_column(&self, offset: usize) -> usize {
        let start = self.source.line_start(offset);
        let end = offset.min(self.source.text.len());
        let mut column = 0;
        for c in self.source.text[start..end].chars() {
            if c == '\t' {
                column = (column / self.tab_stop + 1) * self.tab_stop;
            } else {
                column += c.width().unwrap_or(0);
            }
        }
        column
    }

    pub fn position_description(&self, offset: usize) -> PositionDescription {
        let offset = offset.min(self.source.text.len());
        let start = self.source.line_start(offset);
        let end = self.source.line_end(offset);
        let caret: String = self.source.text[start..offset]
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .chain(std::iter::once('^'))
            .collect();
        PositionDescription {
            source_name: self.source.name.clone(),
            offset,
            line: self.line_number(offset),
            column: self.logical_column(offset),
            line_text: self.source.text[start..end].to_string(),
            caret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputBuffer;

    fn src(text: &str) -> SourceText {
        SourceText::new("Test.java", text)
    }

    #[test]
    fn skips_space_and_both_comment_styles() {
        let s = src("  // one\n  /* two\n */  x");
        let scanner = TextScanner::new(&s, 4);
        assert_eq!(scanner.skip_space_and_comments(0, false), s.len() - 1);
    }

    #[test]
    fn stops_at_end_of_line_but_consumes_block_comment_whole() {
        let s = src("x; /* a\n b */ // c\ny");
        let scanner = TextScanner::new(&s, 4);
        let end = scanner.skip_space_and_comments(2, true);
        assert_eq!(&s.text()[end..end + 1], "\n");
        assert_eq!(&s.text()[2..end], " /* a\n b */ // c");
    }

    #[test]
    fn backward_skip_finds_line_and_block_comments() {
        let s = src("int a; // note\n/* doc */\n  int b;");
        let scanner = TextScanner::new(&s, 4);
        let b = s.text().find("int b").unwrap();
        assert_eq!(scanner.skip_space_and_comments_backward(b), "int a;".len());
    }

    #[test]
    fn backward_skip_ignores_slashes_inside_strings() {
        let s = src("String u = \"http://x\";\n  y");
        let scanner = TextScanner::new(&s, 4);
        let y = s.text().find('y').unwrap();
        assert_eq!(scanner.skip_space_and_comments_backward(y), s.text().find('\n').unwrap());
    }

    #[test]
    fn backward_skip_ignores_slashes_inside_block_comments() {
        let s = src("class A {\n    /* see\n       http://x */ int n;\n}\n");
        let scanner = TextScanner::new(&s, 4);
        let n = s.text().find("int n").unwrap();
        assert_eq!(scanner.skip_space_and_comments_backward(n), "class A {".len());
        let end = s.text().find(';').unwrap() + 1;
        assert_eq!(scanner.skip_space_and_comments_backward(end), end);
    }

    #[test]
    fn backward_skip_treats_nested_opener_as_comment_text() {
        let s = src("a /* x /* y */ b");
        let scanner = TextScanner::new(&s, 4);
        let b = s.text().find('b').unwrap();
        assert_eq!(scanner.skip_space_and_comments_backward(b), 1);
    }

    #[test]
    fn line_terminator_follows_the_source() {
        assert_eq!(src("a\r\nb\n").line_terminator(), "\r\n");
        assert_eq!(src("a\nb").line_terminator(), "\n");
        assert_eq!(src("a").line_terminator(), "\n");
    }

    #[test]
    fn newline_variants() {
        let s = src("a\r\nb\rc\nd");
        let scanner = TextScanner::new(&s, 4);
        assert_eq!(scanner.skip_newline(1), 3);
        assert_eq!(scanner.skip_newline(4), 5);
        assert_eq!(scanner.skip_newline(6), 7);
        assert_eq!(scanner.skip_newline(0), 0);
        assert_eq!(scanner.line_number(8), 4);
    }

    #[test]
    fn blank_lines_are_skipped_whole() {
        let s = src("  \n\t\n  x");
        let scanner = TextScanner::new(&s, 4);
        assert_eq!(scanner.skip_blank_lines(0), 5);
    }

    #[test]
    fn match_text_has_no_token_boundary() {
        let s = src("finalX final ");
        let scanner = TextScanner::new(&s, 4);
        assert_eq!(scanner.match_text(0, "final").unwrap(), 5);
        assert_eq!(scanner.match_text(7, "final").unwrap(), 12);
        let err = scanner.match_text(6, "final").unwrap_err();
        assert!(err.to_string().contains("expected `final`"));
    }

    #[test]
    fn logical_column_expands_tabs() {
        let s = src("\tx\n  \ty");
        let scanner = TextScanner::new(&s, 4);
        assert_eq!(scanner.logical_column(1), 4);
        let y = s.text().find('y').unwrap();
        assert_eq!(scanner.logical_column(y), 4);
        assert_eq!(scanner.line_number(y), 2);
    }

    #[test]
    fn position_description_points_at_offset() {
        let s = src("class A {\n  goto x;\n}");
        let scanner = TextScanner::new(&s, 4);
        let at = s.text().find("goto").unwrap();
        let pos = scanner.position_description(at);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.line_text, "  goto x;");
        assert_eq!(pos.caret, "  ^");
        assert_eq!(pos.to_string(), "Test.java:2:3");
    }

    #[test]
    fn copy_appends_verbatim() {
        let s = src("a /* c */ b");
        let scanner = TextScanner::new(&s, 4);
        let mut out = OutputBuffer::new();
        let end = scanner.copy_space_and_comments(1, false, &mut out);
        assert_eq!(end, 10);
        assert_eq!(out.as_str(), " /* c */ ");
    }
}
