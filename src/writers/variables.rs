//! Variable declarations: parameters, fragments and local declarations.
//!
//! The type is written once per declaration, but in C++ the pointer marker binds to each
//! declarator, so the declaration sets
//! [`WriterEnv::writing_variable_declaration_needing_pointer_marker`] and every fragment
//! writes the marker in front of its own name.

use crate::ast::{
    contains_final, Expression, ExtendedModifier, ModifierKeyword, SingleVariableDeclaration,
    Type, VariableDeclarationExpression, VariableDeclarationFragment,
    VariableDeclarationStatement,
};
use crate::context::{TranslationContext, WriterEnv};

use super::modifiers::{mapped_keywords, replace_modifiers};
use super::{copy_and_match, is_cpp, write, write_comma_list, WriteResult};

pub fn write_single_variable<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a SingleVariableDeclaration,
) -> WriteResult {
    let cpp = is_cpp(ctx);
    let keywords = mapped_keywords(&node.modifiers, |k| match k {
        ModifierKeyword::Final if cpp => Some("const"),
        _ => None,
    });
    replace_modifiers(ctx, &node.modifiers, &keywords);

    write(ctx, env, &node.var_type)?;
    ctx.copy_space_and_comments();
    if cpp && node.var_type.is_reference() {
        let marker = ctx.profile().pointer_marker();
        ctx.write(marker);
    }
    write(ctx, env, &node.name)?;
    if node.extra_dimensions > 0 {
        return ctx.fail_unsupported_construct("array dimensions after a parameter name");
    }
    Ok(())
}

pub fn write_fragment<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a VariableDeclarationFragment,
) -> WriteResult {
    if env.writing_variable_declaration_needing_pointer_marker {
        let marker = ctx.profile().pointer_marker();
        ctx.write(marker);
    }
    write(ctx, env, &node.name)?;
    if node.extra_dimensions > 0 {
        return ctx.fail_unsupported_construct("array dimensions after a variable name");
    }

    if let Some(initializer) = &node.initializer {
        copy_and_match(ctx, "=")?;
        ctx.copy_space_and_comments();
        if is_cpp(ctx) && matches!(initializer, Expression::ArrayInitializer(_)) {
            return ctx.fail_unsupported_construct(
                "array initializer without `new`; write `new T[] { ... }` instead",
            );
        }
        write(ctx, env.with_pointer_marker(false), initializer)?;
    }
    Ok(())
}

/// Modifiers, type and fragments shared by the statement and expression forms.
///
/// `final` is replaced by `const` for both targets; every other local modifier is dropped.
fn write_local_declaration<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    modifiers: &'a [ExtendedModifier],
    var_type: &'a Type,
    fragments: &'a [VariableDeclarationFragment],
) -> WriteResult {
    let keywords: &[&str] = if contains_final(modifiers) { &["const"] } else { &[] };
    replace_modifiers(ctx, modifiers, keywords);

    write(ctx, env, var_type)?;
    let needs_marker = is_cpp(ctx) && var_type.is_reference();
    write_comma_list(ctx, env.with_pointer_marker(needs_marker), fragments)
}

pub fn write_variable_statement<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a VariableDeclarationStatement,
) -> WriteResult {
    write_local_declaration(ctx, env, &node.modifiers, &node.var_type, &node.fragments)?;
    copy_and_match(ctx, ";")
}

pub fn write_variable_expression<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a VariableDeclarationExpression,
) -> WriteResult {
    write_local_declaration(ctx, env, &node.modifiers, &node.var_type, &node.fragments)
}

/// Field form: the caller picks the modifier replacement.
pub(crate) fn write_declarators<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    var_type: &'a Type,
    fragments: &'a [VariableDeclarationFragment],
) -> WriteResult {
    write(ctx, env, var_type)?;
    let needs_marker = is_cpp(ctx) && var_type.is_reference();
    write_comma_list(ctx, env.with_pointer_marker(needs_marker), fragments)?;
    copy_and_match(ctx, ";")
}
