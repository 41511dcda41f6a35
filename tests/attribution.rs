//! Which space and comments travel with a node when it is translated on its own.

mod common;

use crosswalk::ast::{BodyDeclaration, NodeRef};
use crosswalk::context::TranslationContext;
use crosswalk::output::OutputBuffer;
use crosswalk::{ErrorType, TargetProfile, Translator};
use pretty_assertions::assert_eq;

fn member(parsed: &crosswalk::ParsedFile, index: usize) -> NodeRef<'_> {
    NodeRef::from(&parsed.unit.types[0].body[index])
}

#[test]
fn doc_comment_belongs_to_the_following_member() {
    let parsed = common::parse_ok("class A {\n    /** Does f. */\n    void f() {}\n}\n");
    let text = Translator::csharp()
        .translate_node(&parsed, member(&parsed, 0))
        .unwrap();
    assert_eq!(text, "    /** Does f. */\n    void f() {}");
}

#[test]
fn trailing_comment_stays_with_the_previous_member() {
    let parsed = common::parse_ok("class A {\n    int a; // about a\n    int b;\n}\n");
    let translator = Translator::csharp();
    assert_eq!(
        translator.translate_node(&parsed, member(&parsed, 0)).unwrap(),
        "    int a; // about a"
    );
    assert_eq!(
        translator.translate_node(&parsed, member(&parsed, 1)).unwrap(),
        "    int b;"
    );
}

#[test]
fn blank_lines_and_comments_above_are_attributed() {
    let parsed = common::parse_ok("class A {\n    int a;\n\n    // b\n    int b;\n}\n");
    let text = Translator::csharp()
        .translate_node(&parsed, member(&parsed, 1))
        .unwrap();
    assert_eq!(text, "\n    // b\n    int b;");
}

#[test]
fn url_inside_block_comment_is_not_a_line_comment() {
    let parsed = common::parse_ok("class A {\n    int m; /* see\n       http://x */ int n;\n}\n");
    let translator = Translator::csharp();
    assert_eq!(
        translator.translate_node(&parsed, member(&parsed, 1)).unwrap(),
        "int n;"
    );
    let whole = translator.translate_file(&parsed).unwrap();
    assert_eq!(whole[0].contents, "class A {\n    int m; /* see\n       http://x */ int n;\n}\n");
}

#[test]
fn attributed_start_never_passes_the_node() {
    let parsed = common::parse_ok("class A { int a; }\n");
    let profile = TargetProfile::csharp();
    let mut out = OutputBuffer::new();
    let ctx = TranslationContext::new(&parsed.source, &profile, &mut out);
    let span = match &parsed.unit.types[0].body[0] {
        BodyDeclaration::Field(f) => f.span,
        other => panic!("expected a field, got {:?}", other),
    };
    assert_eq!(ctx.attributed_start(span), span.start);
}

#[test]
fn literal_match_is_not_token_aware() {
    let parsed = common::parse_ok("class finalX { }\n");
    let profile = TargetProfile::csharp();
    let mut out = OutputBuffer::new();
    let mut ctx = TranslationContext::new(&parsed.source, &profile, &mut out);

    ctx.set_position("class ".len());
    ctx.match_text("final").unwrap();
    assert_eq!(ctx.position(), "class final".len());

    let err = ctx.match_text("final").unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Internal);
    assert_eq!(ctx.position(), "class final".len());
}
