//! The translation driver.
//!
//! A [`Translator`] turns a parsed source file into outputs per top-level type declaration: one
//! for C#, a header and a source file for C++. Each output gets a fresh [`TranslationContext`]
//! and output buffer, so nothing leaks from one output into the next, and a failure anywhere in
//! a file means no file of it is written.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::ast::{BodyDeclaration, MethodDeclaration, NodeKind, NodeRef, TypeDeclaration};
use crate::context::{OutputType, TranslationContext, WriterEnv};
use crate::diagnostics::TranslateError;
use crate::output::OutputBuffer;
use crate::profile::{TargetLanguage, TargetProfile};
use crate::syntax::{self, ParsedFile};
use crate::writers::{self, declarations};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One generated file, still in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedFile {
    /// `<TypeName>.<extension>`, without a directory.
    pub file_name: String,
    pub contents: String,
}

/// A source file handed to [`Translator::translate_batch`].
#[derive(Debug, Clone)]
pub struct SourceInput {
    pub name: String,
    pub text: String,
}

impl SourceInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, TranslateError> {
        let text = fs::read_to_string(path)
            .map_err(|e| TranslateError::io(format!("cannot read {}", path.display()), e))?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub result: Result<Vec<TranslatedFile>, TranslateError>,
}

// ============================================================================
// TRANSLATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct Translator {
    profile: TargetProfile,
}

impl Translator {
    pub fn new(profile: TargetProfile) -> Self {
        Self { profile }
    }

    pub fn for_language(language: TargetLanguage) -> Self {
        Self::new(TargetProfile::for_language(language))
    }

    pub fn cpp() -> Self {
        Self::for_language(TargetLanguage::Cpp)
    }

    pub fn csharp() -> Self {
        Self::for_language(TargetLanguage::CSharp)
    }

    pub fn profile(&self) -> &TargetProfile {
        &self.profile
    }

    /// Translates every top-level type of the file into its own outputs.
    pub fn translate_file(&self, parsed: &ParsedFile) -> Result<Vec<TranslatedFile>, TranslateError> {
        debug!(
            file = parsed.source.name(),
            types = parsed.unit.types.len(),
            target = %self.profile.language,
            "translating file"
        );
        let mut outputs = Vec::new();
        for (index, type_declaration) in parsed.unit.types.iter().enumerate() {
            outputs.push(self.translate_type(parsed, index, type_declaration)?);
            if let Some(extension) = self.profile.language.source_extension() {
                outputs.push(self.translate_definitions(parsed, type_declaration, extension)?);
            }
        }
        debug!(file = parsed.source.name(), outputs = outputs.len(), "translated file");
        Ok(outputs)
    }

    fn translate_type(
        &self,
        parsed: &ParsedFile,
        index: usize,
        type_declaration: &TypeDeclaration,
    ) -> Result<TranslatedFile, TranslateError> {
        let type_name = &type_declaration.name.identifier;
        debug!(type_name = %type_name, "translating type");

        let unit = &parsed.unit;
        let mut out = OutputBuffer::with_tab_width(self.profile.preferred_indent);
        {
            let mut ctx = TranslationContext::new(&parsed.source, &self.profile, &mut out);
            let env = WriterEnv::new();

            declarations::write_file_prologue(&mut ctx, env, unit)?;
            let has_prologue = unit.package.is_some() || !unit.imports.is_empty();
            if index == 0 && !has_prologue {
                // Nothing precedes the first type: its leading comments start the file.
                ctx.set_position(0);
            } else {
                ctx.position_to_start_of_node_including_space_and_comments(type_declaration.span);
            }
            ctx.copy_space_and_comments();

            writers::write(&mut ctx, env, type_declaration)?;
            if !ctx.knowingly_processed_trailing_space_and_comments() {
                ctx.copy_space_and_comments_until_end_of_line();
            }
            declarations::write_file_epilogue(&mut ctx, unit);
        }

        debug!(type_name = %type_name, bytes = out.as_str().len(), "translated type");
        Ok(TranslatedFile {
            file_name: format!("{}.{}", type_name, self.profile.language.extension()),
            contents: out.into_string(),
        })
    }

    /// Writes the C++ source file of a type: an include of its header, then every method body
    /// of the type and its nested types as an out-of-class definition, inside the package's
    /// namespace.
    fn translate_definitions(
        &self,
        parsed: &ParsedFile,
        type_declaration: &TypeDeclaration,
        extension: &str,
    ) -> Result<TranslatedFile, TranslateError> {
        let type_name = &type_declaration.name.identifier;
        let unit = &parsed.unit;
        let mut methods = Vec::new();
        collect_definitions(type_declaration, type_name.clone(), &mut methods);
        debug!(type_name = %type_name, methods = methods.len(), "writing definitions");

        let mut out = OutputBuffer::with_tab_width(self.profile.preferred_indent);
        {
            let mut ctx = TranslationContext::new(&parsed.source, &self.profile, &mut out);
            ctx.set_output_type(OutputType::Source);
            ctx.writeln(&format!("#include \"{}.{}\"", type_name, self.profile.language.extension()));
            if let Some(package) = &unit.package {
                ctx.write_newline();
                ctx.writeln(&format!("namespace {} {{", package.name.joined("::")));
            }

            for (owner, qualifier, method) in methods {
                ctx.write_newline();
                ctx.set_position(ctx.attributed_start(method.span));
                ctx.skip_blank_lines();
                ctx.set_dedent(ctx.source_logical_column_at(method.span.start));
                ctx.set_definition_qualifier(qualifier);
                ctx.copy_space_and_comments();

                let env = WriterEnv::new().with_type_declaration(owner);
                writers::write(&mut ctx, env, method)?;
                if !ctx.knowingly_processed_trailing_space_and_comments() {
                    ctx.copy_space_and_comments_until_end_of_line();
                }
                ctx.set_dedent(0);
                ctx.write_newline();
            }

            if unit.package.is_some() {
                ctx.write_newline();
                ctx.writeln("}");
            }
        }

        Ok(TranslatedFile {
            file_name: format!("{}.{}", type_name, extension),
            contents: out.into_string(),
        })
    }

    /// Translates the file and writes every output into `out_dir`.
    ///
    /// Nothing is written unless every type translated.
    pub fn write_files(
        &self,
        parsed: &ParsedFile,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, TranslateError> {
        let outputs = self.translate_file(parsed)?;
        write_outputs(out_dir, &outputs)
    }

    /// Translates a single node into a detached string.
    ///
    /// The enclosing type is taken to be the file's first top-level type. The result includes
    /// the space and comments attributed to the node and those trailing it on its last line.
    pub fn translate_node<'a>(
        &self,
        parsed: &'a ParsedFile,
        node: NodeRef<'a>,
    ) -> Result<String, TranslateError> {
        let mut out = OutputBuffer::with_tab_width(self.profile.preferred_indent);
        {
            let mut ctx = TranslationContext::new(&parsed.source, &self.profile, &mut out);
            let mut env = WriterEnv::new();
            if let Some(first) = parsed.unit.first_type_declaration() {
                env = env.with_type_declaration(first);
            }
            if is_statement(node.kind()) {
                env = env.with_method_implementation(true);
            }

            ctx.position_to_start_of_node_including_space_and_comments(node.span());
            ctx.copy_space_and_comments();
            writers::write_node(&mut ctx, env, node)?;
            if !ctx.knowingly_processed_trailing_space_and_comments() {
                ctx.copy_space_and_comments_until_end_of_line();
            }
        }
        Ok(out.into_string())
    }

    /// Parses and translates independent source files in parallel.
    ///
    /// Results come back in input order; a failing file never affects the others.
    pub fn translate_batch(&self, sources: &[SourceInput]) -> Vec<BatchOutcome> {
        sources
            .par_iter()
            .map(|source| BatchOutcome {
                name: source.name.clone(),
                result: syntax::parse(&source.name, &source.text)
                    .and_then(|parsed| self.translate_file(&parsed)),
            })
            .collect()
    }
}

/// Writes already-translated outputs into `out_dir`, creating it if needed.
pub fn write_outputs(
    out_dir: &Path,
    outputs: &[TranslatedFile],
) -> Result<Vec<PathBuf>, TranslateError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| TranslateError::io(format!("cannot create {}", out_dir.display()), e))?;
    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = out_dir.join(&output.file_name);
        fs::write(&path, &output.contents)
            .map_err(|e| TranslateError::io(format!("cannot write {}", path.display()), e))?;
        written.push(path);
    }
    Ok(written)
}

/// Methods with a body, depth first, each with its declaring type and `Outer::Inner` qualifier.
fn collect_definitions<'a>(
    owner: &'a TypeDeclaration,
    qualifier: String,
    methods: &mut Vec<(&'a TypeDeclaration, String, &'a MethodDeclaration)>,
) {
    for member in &owner.body {
        match member {
            BodyDeclaration::Method(method) if method.body.is_some() => {
                methods.push((owner, qualifier.clone(), method));
            }
            BodyDeclaration::Type(nested) => {
                let nested_qualifier = format!("{}::{}", qualifier, nested.name.identifier);
                collect_definitions(nested, nested_qualifier, methods);
            }
            _ => {}
        }
    }
}

fn is_statement(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Block
            | NodeKind::VariableDeclarationStatement
            | NodeKind::ExpressionStatement
            | NodeKind::IfStatement
            | NodeKind::WhileStatement
            | NodeKind::DoStatement
            | NodeKind::ForStatement
            | NodeKind::EnhancedForStatement
            | NodeKind::ReturnStatement
            | NodeKind::BreakStatement
            | NodeKind::ContinueStatement
            | NodeKind::ThrowStatement
            | NodeKind::EmptyStatement
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> ParsedFile {
        syntax::parse("Test.java", text).unwrap()
    }

    #[test]
    fn one_output_per_top_level_type() {
        let file = parsed("class A {}\nclass B {}\n");
        let outputs = Translator::csharp().translate_file(&file).unwrap();
        let names: Vec<_> = outputs.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, vec!["A.cs", "B.cs"]);
        assert_eq!(outputs[1].contents, "class B {}\n");
    }

    #[test]
    fn cpp_writes_header_and_source_per_type() {
        let file = parsed("class A {}\nclass B {}\n");
        let outputs = Translator::cpp().translate_file(&file).unwrap();
        let names: Vec<_> = outputs.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, vec!["A.h", "A.cpp", "B.h", "B.cpp"]);
        assert_eq!(outputs[3].contents, "#include \"B.h\"\n");
    }

    #[test]
    fn nested_type_methods_are_qualified_with_every_enclosing_type() {
        let file = parsed("class A {\n    static class B {\n        void f() {}\n    }\n}\n");
        let outputs = Translator::cpp().translate_file(&file).unwrap();
        assert_eq!(outputs[1].contents, "#include \"A.h\"\n\nvoid A::B::f() {}\n");
    }

    #[test]
    fn translate_node_includes_attributed_comments() {
        let file = parsed("class A {\n    // counter\n    int n; // trailing\n}\n");
        let field = match &file.unit.types[0].body[0] {
            crate::ast::BodyDeclaration::Field(f) => f,
            other => panic!("expected field, got {:?}", other),
        };
        let text = Translator::cpp()
            .translate_node(&file, NodeRef::from(field))
            .unwrap();
        assert_eq!(text, "    // counter\n    int n; // trailing");
    }
}
