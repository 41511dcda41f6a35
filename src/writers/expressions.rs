//! Expressions.

use crate::ast::{
    ArrayAccess, ArrayCreation, ArrayInitializer, Assignment, AssignmentOperator, CastExpression,
    ClassInstanceCreation, ConditionalExpression, Expression, FieldAccess, InfixExpression,
    InfixOperator, InstanceofExpression, Literal, LiteralKind, MethodInvocation,
    ParenthesizedExpression, PostfixExpression, PrefixExpression, SimpleName, ThisExpression,
};
use crate::context::{TranslationContext, WriterEnv};

use super::types::write_type_with_marker;
use super::{copy_and_match, is_cpp, write, write_comma_list, WriteResult};

pub fn write_literal(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &Literal,
) -> WriteResult {
    if node.kind == LiteralKind::Null && is_cpp(ctx) {
        return ctx.match_and_write("null", "nullptr");
    }
    ctx.match_and_write_same(&node.token)
}

pub fn write_simple_name(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &SimpleName,
) -> WriteResult {
    ctx.match_and_write_same(&node.identifier)
}

pub fn write_this(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    _node: &ThisExpression,
) -> WriteResult {
    ctx.match_and_write_same("this")
}

/// Member selector for `receiver.`: C++ uses `::` when the receiver names a type and `->`
/// otherwise. A receiver names a type when it is the enclosing type's name or is capitalized.
fn member_separator(env: WriterEnv<'_>, receiver: &Expression, cpp: bool) -> &'static str {
    if !cpp {
        return ".";
    }
    let names_type = match receiver {
        Expression::Name(name) => {
            let enclosing = env
                .enclosing_type_declaration
                .map_or(false, |t| t.name.identifier == name.identifier);
            enclosing || name.identifier.starts_with(|c: char| c.is_ascii_uppercase())
        }
        _ => false,
    };
    if names_type {
        "::"
    } else {
        "->"
    }
}

fn write_member_selector<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    receiver: &'a Expression,
) -> WriteResult {
    write(ctx, env, receiver)?;
    ctx.copy_space_and_comments();
    let separator = member_separator(env, receiver, is_cpp(ctx));
    ctx.match_and_write(".", separator)?;
    ctx.copy_space_and_comments();
    Ok(())
}

pub fn write_field_access<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a FieldAccess,
) -> WriteResult {
    write_member_selector(ctx, env, &node.expression)?;
    write(ctx, env, &node.name)
}

fn write_arguments<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    arguments: &'a [Expression],
) -> WriteResult {
    copy_and_match(ctx, "(")?;
    write_comma_list(ctx, env, arguments)?;
    copy_and_match(ctx, ")")
}

pub fn write_method_invocation<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a MethodInvocation,
) -> WriteResult {
    if let Some(receiver) = &node.expression {
        write_member_selector(ctx, env, receiver)?;
    }
    write(ctx, env, &node.name)?;
    write_arguments(ctx, env, &node.arguments)
}

pub fn write_class_instance_creation<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ClassInstanceCreation,
) -> WriteResult {
    ctx.match_and_write_same("new")?;
    ctx.copy_space_and_comments_ensuring_delimiter();
    write(ctx, env, &node.class_type)?;
    write_arguments(ctx, env, &node.arguments)
}

pub fn write_array_creation<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ArrayCreation,
) -> WriteResult {
    if is_cpp(ctx) {
        return write_cpp_array_creation(ctx, env, node);
    }

    ctx.match_and_write_same("new")?;
    ctx.copy_space_and_comments_ensuring_delimiter();
    write(ctx, env, &node.element_type)?;
    for dimension in &node.dimensions {
        copy_and_match(ctx, "[")?;
        ctx.copy_space_and_comments();
        write(ctx, env, dimension)?;
        copy_and_match(ctx, "]")?;
    }
    for _ in 0..node.extra_dimensions {
        copy_and_match(ctx, "[")?;
        copy_and_match(ctx, "]")?;
    }
    if let Some(initializer) = &node.initializer {
        ctx.copy_space_and_comments();
        write(ctx, env, initializer)?;
    }
    Ok(())
}

/// `new T[n]` becomes `new Array<T>(n)` and `new T[] { ... }` becomes `new Array<T>({ ... })`.
fn write_cpp_array_creation<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ArrayCreation,
) -> WriteResult {
    if node.dimensions.len() + node.extra_dimensions > 1 {
        return ctx.fail_unsupported_construct("multi-dimensional array creation");
    }

    ctx.match_and_write_same("new")?;
    ctx.copy_space_and_comments_ensuring_delimiter();
    ctx.write("Array<");
    write_type_with_marker(ctx, env, &node.element_type)?;
    ctx.write(">");

    ctx.skip_space_and_comments();
    ctx.match_and_write("[", "(")?;
    if let Some(length) = node.dimensions.first() {
        ctx.copy_space_and_comments();
        write(ctx, env, length)?;
        ctx.copy_space_and_comments();
        ctx.match_and_write("]", ")")?;
        return Ok(());
    }

    ctx.skip_space_and_comments();
    ctx.match_text("]")?;
    if let Some(initializer) = &node.initializer {
        ctx.skip_space_and_comments();
        write(ctx, env, initializer)?;
    }
    ctx.write(")");
    Ok(())
}

pub fn write_array_initializer<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ArrayInitializer,
) -> WriteResult {
    ctx.match_and_write_same("{")?;
    write_comma_list(ctx, env, &node.expressions)?;
    ctx.copy_space_and_comments();
    if ctx.looking_at(",") {
        ctx.match_and_write_same(",")?;
    }
    copy_and_match(ctx, "}")
}

pub fn write_array_access<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ArrayAccess,
) -> WriteResult {
    write(ctx, env, &*node.array)?;
    copy_and_match(ctx, "[")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.index)?;
    copy_and_match(ctx, "]")
}

pub fn write_assignment<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a Assignment,
) -> WriteResult {
    write(ctx, env, &*node.left)?;
    ctx.copy_space_and_comments();
    if node.operator == AssignmentOperator::RightShiftUnsignedAssign && is_cpp(ctx) {
        return ctx.fail_unsupported_construct("`>>>=` has no C++ equivalent");
    }
    ctx.match_and_write_same(node.operator.as_str())?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.right)
}

pub fn write_infix<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a InfixExpression,
) -> WriteResult {
    write(ctx, env, &*node.left)?;
    ctx.copy_space_and_comments();
    if node.operator == InfixOperator::RightShiftUnsigned && is_cpp(ctx) {
        return ctx.fail_unsupported_construct("`>>>` has no C++ equivalent");
    }
    ctx.match_and_write_same(node.operator.as_str())?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.right)
}

pub fn write_instanceof<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a InstanceofExpression,
) -> WriteResult {
    if is_cpp(ctx) {
        return ctx.fail_unsupported_construct("`instanceof`");
    }
    write(ctx, env, &*node.expression)?;
    ctx.copy_space_and_comments();
    ctx.match_and_write("instanceof", "is")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &node.right_type)
}

pub fn write_prefix<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a PrefixExpression,
) -> WriteResult {
    ctx.match_and_write_same(node.operator.as_str())?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.operand)
}

pub fn write_postfix<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a PostfixExpression,
) -> WriteResult {
    write(ctx, env, &*node.operand)?;
    copy_and_match(ctx, node.operator.as_str())
}

pub fn write_conditional<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ConditionalExpression,
) -> WriteResult {
    write(ctx, env, &*node.condition)?;
    copy_and_match(ctx, "?")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.then_expression)?;
    copy_and_match(ctx, ":")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.else_expression)
}

pub fn write_parenthesized<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ParenthesizedExpression,
) -> WriteResult {
    ctx.match_and_write_same("(")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.expression)?;
    copy_and_match(ctx, ")")
}

pub fn write_cast<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a CastExpression,
) -> WriteResult {
    ctx.match_and_write_same("(")?;
    ctx.copy_space_and_comments();
    write_type_with_marker(ctx, env, &node.cast_type)?;
    copy_and_match(ctx, ")")?;
    ctx.copy_space_and_comments();
    write(ctx, env, &*node.expression)
}
