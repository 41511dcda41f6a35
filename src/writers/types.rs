//! Type references.
//!
//! C++ has no built-in managed array, so Java arrays become the runtime's `Array<T>` template,
//! with element types that are themselves references carrying the pointer marker.

use crate::ast::{ArrayType, ParameterizedType, PrimitiveType, SimpleType, Type, TypeParameter};
use crate::context::{TranslationContext, WriterEnv};

use super::{consume_name, copy_and_match, is_cpp, write, WriteResult};

pub fn write_primitive_type(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &PrimitiveType,
) -> WriteResult {
    let keyword = node.kind.as_str();
    let target = ctx.profile().primitive_type(keyword).to_string();
    ctx.match_and_write(keyword, &target)
}

/// Target spelling of a class name: the profile's rename, or the qualified name in the
/// target's separator.
fn target_type_name(ctx: &TranslationContext<'_>, node: &SimpleType) -> String {
    let dotted = node.name.joined(".");
    if let Some(renamed) = ctx.profile().renamed_type(&dotted) {
        return renamed.to_string();
    }
    if is_cpp(ctx) {
        node.name.joined("::")
    } else {
        dotted
    }
}

pub fn write_simple_type(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &SimpleType,
) -> WriteResult {
    let target = target_type_name(ctx, node);
    consume_name(ctx, &node.name)?;
    ctx.write(&target);
    Ok(())
}

pub fn write_array_type<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ArrayType,
) -> WriteResult {
    if !is_cpp(ctx) {
        write(ctx, env, &*node.element_type)?;
        for _ in 0..node.dimensions {
            copy_and_match(ctx, "[")?;
            copy_and_match(ctx, "]")?;
        }
        return Ok(());
    }

    let marker = ctx.profile().pointer_marker();
    for _ in 0..node.dimensions {
        ctx.write("Array<");
    }
    write(ctx, env, &*node.element_type)?;
    if node.element_type.is_reference() {
        ctx.write(marker);
    }
    for dimension in 0..node.dimensions {
        ctx.skip_space_and_comments();
        ctx.match_text("[")?;
        ctx.skip_space_and_comments();
        ctx.match_text("]")?;
        ctx.write(">");
        if dimension + 1 < node.dimensions {
            ctx.write(marker);
        }
    }
    Ok(())
}

pub fn write_parameterized_type<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a ParameterizedType,
) -> WriteResult {
    write(ctx, env, &node.base)?;
    copy_and_match(ctx, "<")?;
    let marker = if is_cpp(ctx) {
        ctx.profile().pointer_marker()
    } else {
        ""
    };
    for (i, argument) in node.arguments.iter().enumerate() {
        ctx.copy_space_and_comments();
        if i > 0 {
            ctx.match_and_write_same(",")?;
            ctx.copy_space_and_comments();
        }
        write(ctx, env, argument)?;
        if argument.is_reference() {
            ctx.write(marker);
        }
    }
    copy_and_match(ctx, ">")
}

pub fn write_type_parameter<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a TypeParameter,
) -> WriteResult {
    write(ctx, env, &node.name)
}

/// Writes a type followed by the C++ pointer marker when it is a reference type.
pub(crate) fn write_type_with_marker<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a Type,
) -> WriteResult {
    write(ctx, env, node)?;
    if is_cpp(ctx) && node.is_reference() {
        let marker = ctx.profile().pointer_marker();
        ctx.write(marker);
    }
    Ok(())
}
