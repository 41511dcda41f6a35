pub use crate::diagnostics::{ErrorContext, ErrorType, PositionDescription, TranslateError};
pub use crate::profile::{PointerStyle, TargetLanguage, TargetProfile};
pub use crate::syntax::{parse, ParsedFile};
pub use crate::translator::{BatchOutcome, SourceInput, TranslatedFile, Translator};

pub mod ast;
pub mod cli;
pub mod context;
pub mod diagnostics;
pub mod logging;
pub mod output;
pub mod profile;
pub mod scanner;
pub mod syntax;
pub mod translator;
pub mod writers;
