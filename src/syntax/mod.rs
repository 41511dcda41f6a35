//! Reference front-end for a Java subset.
//!
//! The translation engine only consumes the AST types in [`crate::ast`] and a
//! [`SourceText`](crate::scanner::SourceText); this module is one way to produce them.

pub mod parser;

pub use parser::{parse, ParsedFile};
