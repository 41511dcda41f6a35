//! Statements.
//!
//! Both targets share Java's statement syntax closely enough that most writers copy the
//! source, token by token, with the space and comments between tokens preserved.

use crate::ast::{
    Block, BreakStatement, ContinueStatement, DoStatement, EmptyStatement, EnhancedForStatement,
    ExpressionStatement, ForStatement, IfStatement, ReturnStatement, ThrowStatement,
    WhileStatement,
};
use crate::context::{TranslationContext, WriterEnv};

use super::{copy_and_match, is_cpp, write, write_comma_list, WriteResult};

pub fn write_block<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a Block,
) -> WriteResult {
    if !env.writing_method_implementation {
        return ctx.fail_internal_invariant("block written outside a method implementation");
    }
    ctx.match_and_write_same("{")?;
    for statement in &node.statements {
        ctx.copy_space_and_comments();
        write(ctx, env, statement)?;
    }
    copy_and_match(ctx, "}")
}

pub fn write_expression_statement<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ExpressionStatement,
) -> WriteResult {
    write(ctx, env, &node.expression)?;
    copy_and_match(ctx, ";")
}

pub fn write_if<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a IfStatement,
) -> WriteResult {
    ctx.match_and_write_same("if")?;
    copy_and_match(ctx, "(")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &node.condition)?;
    copy_and_match(ctx, ")")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.then_statement)?;

    if let Some(else_statement) = &node.else_statement {
        copy_and_match(ctx, "else")?;
        ctx.copy_space_and_comments();
        write(ctx, env, &**else_statement)?;
    }
    Ok(())
}

pub fn write_while<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a WhileStatement,
) -> WriteResult {
    ctx.match_and_write_same("while")?;
    copy_and_match(ctx, "(")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &node.condition)?;
    copy_and_match(ctx, ")")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.body)
}

pub fn write_do<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a DoStatement,
) -> WriteResult {
    ctx.match_and_write_same("do")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.body)?;
    copy_and_match(ctx, "while")?;
    copy_and_match(ctx, "(")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &node.condition)?;
    copy_and_match(ctx, ")")?;
    copy_and_match(ctx, ";")
}

pub fn write_for<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ForStatement,
) -> WriteResult {
    ctx.match_and_write_same("for")?;
    copy_and_match(ctx, "(")?;
    write_comma_list(ctx, env, &node.initializers)?;
    copy_and_match(ctx, ";")?;
    if let Some(condition) = &node.condition {
        ctx.copy_space_and_comments();
        write(ctx, env, condition)?;
    }
    copy_and_match(ctx, ";")?;
    write_comma_list(ctx, env, &node.updaters)?;
    copy_and_match(ctx, ")")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.body)
}

/// C# spells the loop `foreach (T x in xs)`; C++ keeps the range-for syntax.
pub fn write_enhanced_for<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a EnhancedForStatement,
) -> WriteResult {
    let cpp = is_cpp(ctx);
    ctx.match_and_write("for", if cpp { "for" } else { "foreach" })?;
    copy_and_match(ctx, "(")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &node.parameter)?;
    if cpp {
        copy_and_match(ctx, ":")?;
        ctx.copy_space_and_comments();
    } else {
        ctx.copy_space_and_comments_ensuring_delimiter();
        ctx.match_and_write(":", "in")?;
        ctx.copy_space_and_comments_ensuring_delimiter();
    }
    write(ctx, env, &node.expression)?;
    copy_and_match(ctx, ")")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.body)
}

pub fn write_return<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ReturnStatement,
) -> WriteResult {
    ctx.match_and_write_same("return")?;
    if let Some(expression) = &node.expression {
        ctx.copy_space_and_comments();
        write(ctx, env, expression)?;
    }
    copy_and_match(ctx, ";")
}

pub fn write_break(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &BreakStatement,
) -> WriteResult {
    if node.label.is_some() {
        return ctx.fail_unsupported_construct("labeled break");
    }
    ctx.match_and_write_same("break")?;
    copy_and_match(ctx, ";")
}

pub fn write_continue(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &ContinueStatement,
) -> WriteResult {
    if node.label.is_some() {
        return ctx.fail_unsupported_construct("labeled continue");
    }
    ctx.match_and_write_same("continue")?;
    copy_and_match(ctx, ";")
}

pub fn write_throw<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ThrowStatement,
) -> WriteResult {
    ctx.match_and_write_same("throw")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &node.expression)?;
    copy_and_match(ctx, ";")
}

pub fn write_empty(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    _node: &EmptyStatement,
) -> WriteResult {
    ctx.match_and_write_same(";")
}
