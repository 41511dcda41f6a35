//! Shared helpers for the integration tests.
#![allow(dead_code)]

use crosswalk::ast::{BodyDeclaration, MethodDeclaration, NodeRef, Statement};
use crosswalk::{parse, ParsedFile, TargetLanguage, TranslateError, Translator};

pub fn parse_ok(text: &str) -> ParsedFile {
    match parse("Test.java", text) {
        Ok(parsed) => parsed,
        Err(e) => panic!("parse failed: {}", e),
    }
}

/// Translates a file that declares exactly one top-level type and returns the declaration
/// output: the `.cs` file, or the `.h` file for C++.
pub fn translate_single(translator: &Translator, text: &str) -> Result<String, TranslateError> {
    let parsed = parse_ok(text);
    let mut outputs = translator.translate_file(&parsed)?;
    let expected = if translator.profile().language == TargetLanguage::Cpp { 2 } else { 1 };
    assert_eq!(outputs.len(), expected, "expected the outputs of a single type");
    Ok(outputs.remove(0).contents)
}

/// The C++ source file (`.cpp`) of a file that declares exactly one top-level type.
pub fn translate_definitions(text: &str) -> Result<String, TranslateError> {
    let parsed = parse_ok(text);
    let mut outputs = Translator::cpp().translate_file(&parsed)?;
    assert_eq!(outputs.len(), 2, "expected a header and a source file");
    Ok(outputs.remove(1).contents)
}

pub fn first_method(parsed: &ParsedFile) -> &MethodDeclaration {
    parsed.unit.types[0]
        .body
        .iter()
        .find_map(|member| match member {
            BodyDeclaration::Method(m) => Some(m),
            _ => None,
        })
        .expect("no method in the first type")
}

/// Wraps `statement` in a method and translates just that statement.
pub fn translate_statement(
    translator: &Translator,
    statement: &str,
) -> Result<String, TranslateError> {
    let text = format!(
        "class T {{\n    void f() {{\n        {}\n    }}\n}}\n",
        statement
    );
    let parsed = parse_ok(&text);
    let body = first_method(&parsed).body.as_ref().expect("method has a body");
    let first: &Statement = &body.statements[0];
    let translated = translator.translate_node(&parsed, NodeRef::from(first))?;
    Ok(translated.trim_start().to_string())
}
