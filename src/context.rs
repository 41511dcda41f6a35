//! The translation context: one source cursor, one output sink.
//!
//! Writers never touch the [`TextScanner`] or the [`OutputSink`] directly. Everything they read
//! from the source and everything they emit goes through a [`TranslationContext`], which keeps
//! the cursor and the output in step.

use std::borrow::Cow;

use crate::ast::{ExtendedModifier, Span, TypeDeclaration};
use crate::diagnostics::{ErrorContext, PositionDescription, TranslateError};
use crate::output::OutputSink;
use crate::profile::TargetProfile;
use crate::scanner::{SourceText, TextScanner};

// ============================================================================
// OUTPUT TYPE
// ============================================================================

/// Which half of a C++ translation is being written.
///
/// The header carries the class with member declarations only; the source file carries the
/// method bodies as out-of-class definitions (`Type::method(...) { ... }`). C# output is
/// always written as [`OutputType::Header`], where bodies stay inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    #[default]
    Header,
    Source,
}

// ============================================================================
// WRITER ENVIRONMENT
// ============================================================================

/// Flags a parent writer passes down to the writers of its subtree.
///
/// Immutable: a writer that needs a different environment for a child builds a modified copy
/// with one of the `with_*` methods and passes that down.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriterEnv<'a> {
    pub writing_method_implementation: bool,
    pub writing_variable_declaration_needing_pointer_marker: bool,
    pub enclosing_type_declaration: Option<&'a TypeDeclaration>,
}

impl<'a> WriterEnv<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method_implementation(self, value: bool) -> Self {
        Self {
            writing_method_implementation: value,
            ..self
        }
    }

    pub fn with_pointer_marker(self, value: bool) -> Self {
        Self {
            writing_variable_declaration_needing_pointer_marker: value,
            ..self
        }
    }

    pub fn with_type_declaration(self, type_declaration: &'a TypeDeclaration) -> Self {
        Self {
            enclosing_type_declaration: Some(type_declaration),
            ..self
        }
    }
}

// ============================================================================
// TRANSLATION CONTEXT
// ============================================================================

pub struct TranslationContext<'s> {
    scanner: TextScanner<'s>,
    sink: &'s mut dyn OutputSink,
    profile: &'s TargetProfile,
    position: usize,
    knowingly_processed_trailing_space_and_comments: bool,
    boundaries: Option<Vec<usize>>,
    output_type: OutputType,
    /// `Outer::Inner` prefix for method definitions in a C++ source file.
    definition_qualifier: String,
    /// Columns of indentation removed from every line of copied space and comments.
    dedent: usize,
}

impl<'s> TranslationContext<'s> {
    pub fn new(
        source: &'s SourceText,
        profile: &'s TargetProfile,
        sink: &'s mut dyn OutputSink,
    ) -> Self {
        Self {
            scanner: TextScanner::new(source, profile.source_tab_stop),
            sink,
            profile,
            position: 0,
            knowingly_processed_trailing_space_and_comments: false,
            boundaries: None,
            output_type: OutputType::Header,
            definition_qualifier: String::new(),
            dedent: 0,
        }
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    pub fn set_output_type(&mut self, output_type: OutputType) {
        self.output_type = output_type;
    }

    pub fn definition_qualifier(&self) -> &str {
        &self.definition_qualifier
    }

    pub fn set_definition_qualifier(&mut self, qualifier: impl Into<String>) {
        self.definition_qualifier = qualifier.into();
    }

    /// Removes up to `columns` of leading indentation from each line of copied space and
    /// comments, for code that moves out of its enclosing class.
    pub fn set_dedent(&mut self, columns: usize) {
        self.dedent = columns;
    }

    pub fn profile(&self) -> &'s TargetProfile {
        self.profile
    }

    pub fn source(&self) -> &'s SourceText {
        self.scanner.source()
    }

    pub fn scanner(&self) -> &TextScanner<'s> {
        &self.scanner
    }

    // ------------------------------------------------------------------------
    // Dispatch boundary log
    // ------------------------------------------------------------------------

    /// Starts recording the cursor at every writer dispatch boundary.
    pub fn record_dispatch_boundaries(&mut self) {
        self.boundaries = Some(Vec::new());
    }

    pub fn dispatch_boundaries(&self) -> &[usize] {
        self.boundaries.as_deref().unwrap_or(&[])
    }

    pub(crate) fn note_dispatch_boundary(&mut self) {
        if let Some(boundaries) = self.boundaries.as_mut() {
            boundaries.push(self.position);
        }
    }

    // ------------------------------------------------------------------------
    // Positioning
    // ------------------------------------------------------------------------

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Cursor to the first token of the node.
    pub fn position_to_start_of_node(&mut self, span: Span) {
        self.position = self.scanner.skip_space_and_comments(span.start, false);
    }

    /// Where the space and comments attributed to a node begin.
    ///
    /// Space/comments before a node belong to it, except those on the line where the previous
    /// node ends: scan back from the node over space/comments, forward again to the end of that
    /// line, then past the newline.
    pub fn attributed_start(&self, span: Span) -> usize {
        let previous_end = self.scanner.skip_space_and_comments_backward(span.start);
        let end_of_line = self.scanner.skip_space_and_comments(previous_end, true);
        self.scanner.skip_newline(end_of_line).min(span.start)
    }

    pub fn position_to_start_of_node_including_space_and_comments(&mut self, span: Span) {
        self.position = self.attributed_start(span);
    }

    pub fn position_to_end_of_node(&mut self, span: Span) {
        self.position = span.end;
    }

    /// Cursor past the node and the space/comments that follow it on the same line.
    pub fn position_to_end_of_node_including_trailing_space_and_comments(&mut self, span: Span) {
        self.position = self.scanner.skip_space_and_comments(span.end, true);
    }

    pub fn assert_position_is(&self, expected: usize) -> Result<(), TranslateError> {
        if self.position != expected {
            return self.fail_internal_invariant(format!(
                "cursor at {} but expected {} ({})",
                self.position,
                expected,
                self.scanner.position_description(expected)
            ));
        }
        Ok(())
    }

    pub fn assert_position_is_at_least(&self, minimum: usize) -> Result<(), TranslateError> {
        if self.position < minimum {
            return self.fail_internal_invariant(format!(
                "cursor at {} but expected at least {} ({})",
                self.position,
                minimum,
                self.scanner.position_description(minimum)
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Matching and writing
    // ------------------------------------------------------------------------

    /// Consumes `expected` from the source, emitting nothing.
    pub fn match_text(&mut self, expected: &str) -> Result<(), TranslateError> {
        self.position = self.scanner.match_text(self.position, expected)?;
        Ok(())
    }

    /// True if the source at the cursor begins with `text`.
    pub fn looking_at(&self, text: &str) -> bool {
        self.source()
            .text()
            .get(self.position..)
            .map_or(false, |rest| rest.starts_with(text))
    }

    pub fn write(&mut self, text: &str) {
        if !text.is_empty() {
            self.sink.write_str(text);
        }
    }

    /// Writes `text` and the source's line terminator.
    pub fn writeln(&mut self, text: &str) {
        self.write(text);
        self.write_newline();
    }

    pub fn write_newline(&mut self) {
        let terminator = self.source().line_terminator();
        self.write(terminator);
    }

    pub fn match_and_write(&mut self, expected: &str, emitted: &str) -> Result<(), TranslateError> {
        self.match_text(expected)?;
        self.write(emitted);
        Ok(())
    }

    pub fn match_and_write_same(&mut self, text: &str) -> Result<(), TranslateError> {
        self.match_and_write(text, text)
    }

    pub fn write_spaces(&mut self, count: usize) {
        if count > 0 {
            self.sink.write_spaces(count);
        }
    }

    pub fn write_spaces_until_column(&mut self, column: usize) {
        let current = self.sink.column();
        if column > current {
            self.write_spaces(column - current);
        }
    }

    /// Writes source whitespace/comments, dedenting and expanding tabs as configured.
    fn write_source_space(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = self.dedented(text);
        let text = text.as_ref();
        if !self.profile.expand_tabs {
            self.write(text);
            return;
        }
        let indent = self.profile.preferred_indent.max(1);
        let mut chunks = text.split('\t');
        if let Some(first) = chunks.next() {
            self.write(first);
        }
        for chunk in chunks {
            let column = self.sink.column();
            self.write_spaces(indent - column % indent);
            self.write(chunk);
        }
    }

    /// `text` with the first `dedent` columns of indentation cut from every line that starts
    /// inside it (and from its first line when the output is at the start of a line).
    fn dedented<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.dedent == 0 {
            return Cow::Borrowed(text);
        }
        let tab_stop = self.scanner.tab_stop();
        let mut out = String::with_capacity(text.len());
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            } else if self.sink.column() != 0 {
                out.push_str(line);
                continue;
            }
            let mut column = 0;
            let mut cut = 0;
            for b in line.bytes() {
                if column >= self.dedent {
                    break;
                }
                match b {
                    b' ' => column += 1,
                    b'\t' => column = (column / tab_stop + 1) * tab_stop,
                    _ => break,
                }
                cut += 1;
            }
            out.push_str(&line[cut..]);
        }
        Cow::Owned(out)
    }

    // ------------------------------------------------------------------------
    // Copying
    // ------------------------------------------------------------------------

    /// Copies whitespace and comments at the cursor. Returns whether anything was copied.
    pub fn copy_space_and_comments(&mut self) -> bool {
        let start = self.position;
        let end = self.scanner.skip_space_and_comments(start, false);
        let text = &self.source().text()[start..end];
        self.write_source_space(text);
        self.position = end;
        end != start
    }

    /// Like [`copy_space_and_comments`](Self::copy_space_and_comments), writing a single space
    /// if the source had none.
    pub fn copy_space_and_comments_ensuring_delimiter(&mut self) {
        if !self.copy_space_and_comments() {
            self.write(" ");
        }
    }

    pub fn copy_space_and_comments_until_end_of_line(&mut self) {
        let start = self.position;
        let end = self.scanner.skip_space_and_comments(start, true);
        let text = &self.source().text()[start..end];
        self.write_source_space(text);
        self.position = end;
    }

    /// Copies the comments in the space at the cursor, without the whitespace ahead of the
    /// first one. Returns false, leaving the cursor alone, when the space holds no comment.
    pub fn copy_comments_in_space(&mut self) -> bool {
        let start = self.position;
        let end = self.scanner.skip_space_and_comments(start, false);
        let bytes = self.source().text().as_bytes();
        let mut first = start;
        while first < end && bytes[first].is_ascii_whitespace() {
            first += 1;
        }
        if first == end {
            return false;
        }
        let text = &self.source().text()[first..end];
        self.write_source_space(text);
        self.position = end;
        true
    }

    /// Copies a newline at the cursor, if there is one.
    pub fn copy_newline(&mut self) -> bool {
        let start = self.position;
        let end = self.scanner.skip_newline(start);
        let text = &self.source().text()[start..end];
        self.write(text);
        self.position = end;
        end != start
    }

    // ------------------------------------------------------------------------
    // Skipping
    // ------------------------------------------------------------------------

    pub fn skip_space_and_comments(&mut self) {
        self.position = self.scanner.skip_space_and_comments(self.position, false);
    }

    pub fn skip_space_and_comments_until_end_of_line(&mut self) {
        self.position = self.scanner.skip_space_and_comments(self.position, true);
    }

    pub fn skip_space_and_comments_backward(&mut self) {
        self.position = self.scanner.skip_space_and_comments_backward(self.position);
    }

    pub fn skip_spaces_and_tabs(&mut self) {
        self.position = self.scanner.skip_spaces_and_tabs(self.position);
    }

    pub fn skip_spaces_and_tabs_backward(&mut self) {
        self.position = self.scanner.skip_spaces_and_tabs_backward(self.position);
    }

    pub fn skip_blank_lines(&mut self) {
        self.position = self.scanner.skip_blank_lines(self.position);
    }

    pub fn skip_newline(&mut self) {
        self.position = self.scanner.skip_newline(self.position);
    }

    /// Cursor to the end of the last modifier. No-op on an empty list.
    pub fn skip_modifiers(&mut self, modifiers: &[ExtendedModifier]) {
        if let Some(last) = modifiers.last() {
            self.position_to_end_of_node(last.span());
        }
    }

    // ------------------------------------------------------------------------
    // Trailing space/comments flag
    // ------------------------------------------------------------------------

    pub fn knowingly_processed_trailing_space_and_comments(&self) -> bool {
        self.knowingly_processed_trailing_space_and_comments
    }

    pub fn set_knowingly_processed_trailing_space_and_comments(&mut self, value: bool) {
        self.knowingly_processed_trailing_space_and_comments = value;
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    pub fn position_description(&self) -> PositionDescription {
        self.scanner.position_description(self.position)
    }

    pub fn source_line_number(&self) -> usize {
        self.scanner.line_number(self.position)
    }

    pub fn source_line_number_at(&self, offset: usize) -> usize {
        self.scanner.line_number(offset)
    }

    pub fn source_logical_column(&self) -> usize {
        self.scanner.logical_column(self.position)
    }

    pub fn source_logical_column_at(&self, offset: usize) -> usize {
        self.scanner.logical_column(offset)
    }

    pub fn target_column(&self) -> usize {
        self.sink.column()
    }

    /// True if the node starts on the line the cursor is on.
    pub fn starts_on_same_line(&self, span: Span) -> bool {
        self.source_line_number() == self.source_line_number_at(span.start)
    }

    fn error_context(&self) -> ErrorContext {
        ErrorContext::with_source_and_span(
            self.source().named_source(),
            Span::new(self.position, self.position),
        )
    }

    pub fn fail_unsupported_construct<T>(
        &self,
        message: impl Into<String>,
    ) -> Result<T, TranslateError> {
        let position = self.position_description();
        Err(TranslateError::UnsupportedConstruct {
            message: message.into(),
            ctx: self.error_context().with_help(position.excerpt()),
            position,
        })
    }

    pub fn fail_internal_invariant<T>(
        &self,
        message: impl Into<String>,
    ) -> Result<T, TranslateError> {
        let position = self.position_description();
        Err(TranslateError::InternalInvariant {
            message: message.into(),
            ctx: self.error_context().with_help(position.excerpt()),
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Modifier, ModifierKeyword};
    use crate::diagnostics::ErrorType;
    use crate::output::OutputBuffer;

    fn with_context<R>(
        text: &str,
        profile: &TargetProfile,
        f: impl FnOnce(&mut TranslationContext<'_>) -> R,
    ) -> (R, String) {
        let source = SourceText::new("T.java", text);
        let mut out = OutputBuffer::new();
        let result = {
            let mut ctx = TranslationContext::new(&source, profile, &mut out);
            f(&mut ctx)
        };
        (result, out.into_string())
    }

    #[test]
    fn attribution_gives_same_line_comment_to_previous_node() {
        let text = "int a; // about a\n// about b\nint b;";
        let b = text.find("int b").unwrap();
        let (start, _) = with_context(text, &TargetProfile::cpp(), |ctx| {
            ctx.attributed_start(Span::new(b, b + 6))
        });
        assert_eq!(&text[start..b], "// about b\n");
    }

    #[test]
    fn attribution_on_same_line_keeps_nothing() {
        let text = "int a; /* x */ int b;";
        let b = text.find("int b").unwrap();
        let (start, _) = with_context(text, &TargetProfile::cpp(), |ctx| {
            ctx.attributed_start(Span::new(b, b + 6))
        });
        assert_eq!(start, b);
    }

    #[test]
    fn match_and_write_substitutes() {
        let (res, out) = with_context("final int", &TargetProfile::cpp(), |ctx| {
            ctx.match_and_write("final", "const")?;
            ctx.copy_space_and_comments_ensuring_delimiter();
            ctx.match_and_write_same("int")?;
            Ok::<_, TranslateError>(ctx.position())
        });
        assert_eq!(res.unwrap(), 9);
        assert_eq!(out, "const int");
    }

    #[test]
    fn ensuring_delimiter_adds_space_when_source_has_none() {
        let (_, out) = with_context("a", &TargetProfile::cpp(), |ctx| {
            ctx.copy_space_and_comments_ensuring_delimiter();
        });
        assert_eq!(out, " ");
    }

    #[test]
    fn position_assertions_are_internal_errors() {
        let (res, _) = with_context("abc", &TargetProfile::cpp(), |ctx| {
            ctx.set_position(1);
            ctx.assert_position_is_at_least(1)?;
            ctx.assert_position_is(2)
        });
        assert_eq!(res.unwrap_err().error_type(), ErrorType::Internal);
    }

    #[test]
    fn unsupported_construct_carries_position() {
        let (res, _) = with_context("a\n  goto x;", &TargetProfile::cpp(), |ctx| {
            ctx.set_position(4);
            ctx.fail_unsupported_construct::<()>("goto")
        });
        let err = res.unwrap_err();
        let position = err.position().unwrap();
        assert_eq!(position.line, 2);
        assert_eq!(position.column, 2);
    }

    #[test]
    fn tabs_expand_to_preferred_indent_when_enabled() {
        let mut profile = TargetProfile::csharp();
        profile.expand_tabs = true;
        profile.preferred_indent = 4;
        let (_, out) = with_context("x\n\t\ty", &profile, |ctx| {
            ctx.set_position(1);
            ctx.copy_space_and_comments();
        });
        assert_eq!(out, "\n        ");
    }

    #[test]
    fn skip_modifiers_moves_to_end_of_last() {
        let source = SourceText::new("T.java", "public static int x;");
        let modifiers = vec![
            ExtendedModifier::Modifier(Modifier {
                span: Span::new(0, 6),
                keyword: ModifierKeyword::Public,
            }),
            ExtendedModifier::Modifier(Modifier {
                span: Span::new(7, 13),
                keyword: ModifierKeyword::Static,
            }),
        ];
        let profile = TargetProfile::cpp();
        let mut out = OutputBuffer::new();
        let mut ctx = TranslationContext::new(&source, &profile, &mut out);
        ctx.skip_modifiers(&[]);
        assert_eq!(ctx.position(), 0);
        ctx.skip_modifiers(&modifiers);
        assert_eq!(ctx.position(), 13);
    }

    #[test]
    fn comments_in_space_are_copied_without_leading_space() {
        let (copied, out) = with_context("@A\n  // c\n  public", &TargetProfile::cpp(), |ctx| {
            ctx.set_position(2);
            ctx.copy_comments_in_space()
        });
        assert!(copied);
        assert_eq!(out, "// c\n  ");

        let (copied, out) = with_context("public  static", &TargetProfile::cpp(), |ctx| {
            ctx.set_position(6);
            let copied = ctx.copy_comments_in_space();
            assert_eq!(ctx.position(), 6);
            copied
        });
        assert!(!copied);
        assert_eq!(out, "");
    }

    #[test]
    fn dedent_cuts_indentation_of_copied_lines() {
        let (_, out) = with_context("{\n        /* a\n         * b */\n        x", &TargetProfile::cpp(), |ctx| {
            ctx.set_dedent(4);
            ctx.set_position(1);
            ctx.copy_space_and_comments();
        });
        assert_eq!(out, "\n    /* a\n     * b */\n    ");
    }

    #[test]
    fn writeln_uses_the_source_line_terminator() {
        let (_, out) = with_context("a\r\nb", &TargetProfile::cpp(), |ctx| {
            ctx.writeln("public:");
        });
        assert_eq!(out, "public:\r\n");
    }

    #[test]
    fn writer_env_extends_by_copy() {
        let base = WriterEnv::new();
        let child = base.with_method_implementation(true).with_pointer_marker(true);
        assert!(!base.writing_method_implementation);
        assert!(child.writing_method_implementation);
        assert!(child.writing_variable_declaration_needing_pointer_marker);
    }
}
