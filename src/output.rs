//! Output sinks for generated target text.

use unicode_width::UnicodeWidthChar;

/// Append-only destination for generated text that knows its current column.
pub trait OutputSink {
    fn write_str(&mut self, text: &str);

    /// 0-based column the next character will land in.
    fn column(&self) -> usize;

    fn write_spaces(&mut self, count: usize) {
        if count > 0 {
            self.write_str(&" ".repeat(count));
        }
    }

    /// Pads with spaces up to `column`; a no-op if already at or past it.
    fn write_spaces_until_column(&mut self, column: usize) {
        let current = self.column();
        if column > current {
            self.write_spaces(column - current);
        }
    }
}

/// Collects output into a `String`.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    buffer: String,
    column: usize,
    tab_width: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::with_tab_width(4)
    }

    /// `tab_width` is the column a tab advances to a multiple of.
    pub fn with_tab_width(tab_width: usize) -> Self {
        Self {
            buffer: String::new(),
            column: 0,
            tab_width: tab_width.max(1),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for OutputBuffer {
    fn write_str(&mut self, text: &str) {
        for c in text.chars() {
            self.column = match c {
                '\n' | '\r' => 0,
                '\t' => (self.column / self.tab_width + 1) * self.tab_width,
                _ => self.column + c.width().unwrap_or(0),
            };
        }
        self.buffer.push_str(text);
    }

    fn column(&self) -> usize {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_column_across_lines() {
        let mut out = OutputBuffer::new();
        out.write_str("abc");
        assert_eq!(out.column(), 3);
        out.write_str("\n  x");
        assert_eq!(out.column(), 3);
        out.write_str("\r\n");
        assert_eq!(out.column(), 0);
    }

    #[test]
    fn tabs_advance_to_next_stop() {
        let mut out = OutputBuffer::with_tab_width(4);
        out.write_str("a\t");
        assert_eq!(out.column(), 4);
        out.write_str("\t");
        assert_eq!(out.column(), 8);
    }

    #[test]
    fn pads_until_column() {
        let mut out = OutputBuffer::new();
        out.write_str("int x;");
        out.write_spaces_until_column(10);
        out.write_str("//");
        assert_eq!(out.as_str(), "int x;    //");
        out.write_spaces_until_column(2);
        assert_eq!(out.column(), 12);
    }
}
