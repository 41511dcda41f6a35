//! Unified, `miette`-based diagnostics for translation.
//!
//! Every failure the engine, the reference front-end or the driver can produce is a
//! [`TranslateError`]. Two kinds are fatal to a file's translation and carry a
//! [`PositionDescription`] of the source cursor at the point of failure:
//!
//! - **Unsupported construct**: the input uses something the target cannot express. User-facing.
//! - **Internal invariant**: the engine's own bookkeeping went wrong (cursor mismatch, literal
//!   mismatch). Maintainer-facing.
//!
//! Use `err_msg!` for message-only errors and `err_ctx!` when a source and span are at hand:
//!
//! - `err_msg!(Config, "unknown pointer style `{}`", style)`
//! - `err_ctx!(Parse, "expected `;`", src, span)`

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::ast::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// Type-safe error classification, mirroring the [`TranslateError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    Unsupported,
    Internal,
    Parse,
    Io,
    Config,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Unsupported => "Unsupported",
            ErrorType::Internal => "Internal",
            ErrorType::Parse => "Parse",
            ErrorType::Io => "Io",
            ErrorType::Config => "Config",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// POSITION DESCRIPTION
// ============================================================================

/// Where in the source a fatal error happened: file, line, column, and the offending line with
/// a caret under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionDescription {
    pub source_name: String,
    pub offset: usize,
    /// 1-based.
    pub line: usize,
    /// 0-based, tabs expanded.
    pub column: usize,
    pub line_text: String,
    /// Whitespace up to the cursor followed by `^`. Tabs are kept so the caret lines up.
    pub caret: String,
}

impl PositionDescription {
    /// The excerpt and caret, two lines.
    pub fn excerpt(&self) -> String {
        format!("{}\n{}", self.line_text, self.caret)
    }
}

impl fmt::Display for PositionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source_name, self.line, self.column + 1)
    }
}

// ============================================================================
// ERROR CONTEXT
// ============================================================================

/// Source, span and help attached to an error for graphical reporting.
#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

// ============================================================================
// TRANSLATE ERROR
// ============================================================================

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Unsupported construct: {message} at {position}")]
    UnsupportedConstruct {
        message: String,
        position: PositionDescription,
        ctx: ErrorContext,
    },
    #[error("Internal invariant violated: {message} at {position}")]
    InternalInvariant {
        message: String,
        position: PositionDescription,
        ctx: ErrorContext,
    },
    #[error("Parse error: {message}")]
    Parse { message: String, ctx: ErrorContext },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration error: {message}")]
    Config { message: String, ctx: ErrorContext },
}

impl TranslateError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            TranslateError::UnsupportedConstruct { .. } => ErrorType::Unsupported,
            TranslateError::InternalInvariant { .. } => ErrorType::Internal,
            TranslateError::Parse { .. } => ErrorType::Parse,
            TranslateError::Io { .. } => ErrorType::Io,
            TranslateError::Config { .. } => ErrorType::Config,
        }
    }

    /// The bare message, without the kind prefix or location.
    pub fn message(&self) -> &str {
        match self {
            TranslateError::UnsupportedConstruct { message, .. }
            | TranslateError::InternalInvariant { message, .. }
            | TranslateError::Parse { message, .. }
            | TranslateError::Io { message, .. }
            | TranslateError::Config { message, .. } => message,
        }
    }

    pub fn position(&self) -> Option<&PositionDescription> {
        match self {
            TranslateError::UnsupportedConstruct { position, .. }
            | TranslateError::InternalInvariant { position, .. } => Some(position),
            _ => None,
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        TranslateError::Io {
            message: message.into(),
            source,
        }
    }

    fn get_ctx(&self) -> Option<&ErrorContext> {
        match self {
            TranslateError::UnsupportedConstruct { ctx, .. }
            | TranslateError::InternalInvariant { ctx, .. }
            | TranslateError::Parse { ctx, .. }
            | TranslateError::Config { ctx, .. } => Some(ctx),
            TranslateError::Io { .. } => None,
        }
    }
}

impl Diagnostic for TranslateError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.error_type() {
            ErrorType::Unsupported => "crosswalk::unsupported",
            ErrorType::Internal => "crosswalk::internal",
            ErrorType::Parse => "crosswalk::parse",
            ErrorType::Io => "crosswalk::io",
            ErrorType::Config => "crosswalk::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.get_ctx()?
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()?
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.get_ctx()?.span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(self.message().to_string()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wraps a file name and its text for use in an [`ErrorContext`].
pub fn to_error_source(name: &str, text: &str) -> SourceArc {
    Arc::new(NamedSource::new(name, text.to_string()))
}

/// Constructs a message-only `TranslateError` (`Parse` or `Config`).
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $($fmt:tt)+) => {
        $crate::diagnostics::TranslateError::$variant {
            message: format!($($fmt)+),
            ctx: $crate::diagnostics::ErrorContext::none(),
        }
    };
}

/// Constructs a `Parse` or `Config` error labelled on `span` within `src`.
#[macro_export]
macro_rules! err_ctx {
    ($variant:ident, $msg:expr, $src:expr, $span:expr, $help:expr) => {
        $crate::diagnostics::TranslateError::$variant {
            message: $msg.to_string(),
            ctx: $crate::diagnostics::ErrorContext::with_source_and_span(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
            )
            .with_help(format!("{}", $help)),
        }
    };
    ($variant:ident, $msg:expr, $src:expr, $span:expr) => {
        $crate::diagnostics::TranslateError::$variant {
            message: $msg.to_string(),
            ctx: $crate::diagnostics::ErrorContext::with_source_and_span(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
            ),
        }
    };
}
