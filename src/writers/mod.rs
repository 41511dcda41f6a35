//! # Node Writer Registry
//!
//! One writer per AST node kind, grouped by domain:
//!
//! - **`declarations`**: compilation unit, package, imports, types, fields, methods
//! - **`variables`**: parameters, fragments, local variable declarations
//! - **`statements`**: blocks and control flow
//! - **`expressions`**: everything in expression position
//! - **`types`**: primitive, simple, array and parameterized types
//! - **`modifiers`**: modifier keywords and annotations
//!
//! Every writer is entered through [`write_node`], which checks the position contract on the
//! way in and on the way out: the cursor must sit on the node's first token before the writer
//! runs, and on its end afterwards (or past it, if the writer says it knowingly consumed the
//! trailing space and comments).

use tracing::trace;

use crate::ast::{Name, NodeRef};
use crate::context::{TranslationContext, WriterEnv};
use crate::diagnostics::TranslateError;

pub mod declarations;
pub mod expressions;
pub mod modifiers;
pub mod statements;
pub mod types;
pub mod variables;

pub type WriteResult = Result<(), TranslateError>;

// ============================================================================
// DISPATCH
// ============================================================================

/// Writes `node` through the writer registered for its kind.
pub fn write_node<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: NodeRef<'a>,
) -> WriteResult {
    let span = node.span();
    trace!(
        kind = %node.kind(),
        start = span.start,
        end = span.end,
        cursor = ctx.position(),
        "dispatch"
    );
    ctx.assert_position_is(span.start)?;
    ctx.note_dispatch_boundary();
    ctx.set_knowingly_processed_trailing_space_and_comments(false);

    dispatch(ctx, env, node)?;

    if ctx.knowingly_processed_trailing_space_and_comments() {
        ctx.assert_position_is_at_least(span.end)?;
    } else {
        ctx.assert_position_is(span.end)?;
    }
    ctx.note_dispatch_boundary();
    Ok(())
}

/// Shorthand for [`write_node`] on anything convertible to a [`NodeRef`].
pub fn write<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: impl Into<NodeRef<'a>>,
) -> WriteResult {
    write_node(ctx, env, node.into())
}

fn dispatch<'a>(ctx: &mut TranslationContext<'_>, env: WriterEnv<'a>, node: NodeRef<'a>) -> WriteResult {
    use declarations as d;
    use expressions as e;
    use statements as s;
    use types as t;
    use variables as v;

    match node {
        NodeRef::CompilationUnit(n) => d::write_compilation_unit(ctx, env, n),
        NodeRef::PackageDeclaration(n) => d::write_package(ctx, env, n),
        NodeRef::ImportDeclaration(n) => d::write_import(ctx, env, n),
        NodeRef::TypeDeclaration(n) => d::write_type_declaration(ctx, env, n),
        NodeRef::FieldDeclaration(n) => d::write_field(ctx, env, n),
        NodeRef::MethodDeclaration(n) => d::write_method(ctx, env, n),
        NodeRef::SingleVariableDeclaration(n) => v::write_single_variable(ctx, env, n),
        NodeRef::VariableDeclarationFragment(n) => v::write_fragment(ctx, env, n),
        NodeRef::Modifier(n) => modifiers::write_modifier(ctx, env, n),
        NodeRef::Annotation(n) => modifiers::write_annotation(ctx, env, n),
        NodeRef::PrimitiveType(n) => t::write_primitive_type(ctx, env, n),
        NodeRef::SimpleType(n) => t::write_simple_type(ctx, env, n),
        NodeRef::ArrayType(n) => t::write_array_type(ctx, env, n),
        NodeRef::ParameterizedType(n) => t::write_parameterized_type(ctx, env, n),
        NodeRef::TypeParameter(n) => t::write_type_parameter(ctx, env, n),
        NodeRef::Block(n) => s::write_block(ctx, env, n),
        NodeRef::VariableDeclarationStatement(n) => v::write_variable_statement(ctx, env, n),
        NodeRef::ExpressionStatement(n) => s::write_expression_statement(ctx, env, n),
        NodeRef::IfStatement(n) => s::write_if(ctx, env, n),
        NodeRef::WhileStatement(n) => s::write_while(ctx, env, n),
        NodeRef::DoStatement(n) => s::write_do(ctx, env, n),
        NodeRef::ForStatement(n) => s::write_for(ctx, env, n),
        NodeRef::EnhancedForStatement(n) => s::write_enhanced_for(ctx, env, n),
        NodeRef::ReturnStatement(n) => s::write_return(ctx, env, n),
        NodeRef::BreakStatement(n) => s::write_break(ctx, env, n),
        NodeRef::ContinueStatement(n) => s::write_continue(ctx, env, n),
        NodeRef::ThrowStatement(n) => s::write_throw(ctx, env, n),
        NodeRef::EmptyStatement(n) => s::write_empty(ctx, env, n),
        NodeRef::Literal(n) => e::write_literal(ctx, env, n),
        NodeRef::SimpleName(n) => e::write_simple_name(ctx, env, n),
        NodeRef::ThisExpression(n) => e::write_this(ctx, env, n),
        NodeRef::FieldAccess(n) => e::write_field_access(ctx, env, n),
        NodeRef::MethodInvocation(n) => e::write_method_invocation(ctx, env, n),
        NodeRef::ClassInstanceCreation(n) => e::write_class_instance_creation(ctx, env, n),
        NodeRef::ArrayCreation(n) => e::write_array_creation(ctx, env, n),
        NodeRef::ArrayInitializer(n) => e::write_array_initializer(ctx, env, n),
        NodeRef::ArrayAccess(n) => e::write_array_access(ctx, env, n),
        NodeRef::Assignment(n) => e::write_assignment(ctx, env, n),
        NodeRef::InfixExpression(n) => e::write_infix(ctx, env, n),
        NodeRef::InstanceofExpression(n) => e::write_instanceof(ctx, env, n),
        NodeRef::PrefixExpression(n) => e::write_prefix(ctx, env, n),
        NodeRef::PostfixExpression(n) => e::write_postfix(ctx, env, n),
        NodeRef::ConditionalExpression(n) => e::write_conditional(ctx, env, n),
        NodeRef::ParenthesizedExpression(n) => e::write_parenthesized(ctx, env, n),
        NodeRef::CastExpression(n) => e::write_cast(ctx, env, n),
        NodeRef::VariableDeclarationExpression(n) => v::write_variable_expression(ctx, env, n),
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Writes a comma-separated list: for each item, copy the space before it, match and emit the
/// `,` for all but the first, copy the space after the comma, then write the item.
pub(crate) fn write_comma_list<'a, T: 'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    items: &'a [T],
) -> WriteResult
where
    &'a T: Into<NodeRef<'a>>,
{
    for (i, item) in items.iter().enumerate() {
        ctx.copy_space_and_comments();
        if i > 0 {
            ctx.match_and_write_same(",")?;
            ctx.copy_space_and_comments();
        }
        write(ctx, env, item)?;
    }
    Ok(())
}

/// Consumes the tokens of a dotted name without emitting anything.
pub(crate) fn consume_name(ctx: &mut TranslationContext<'_>, name: &Name) -> WriteResult {
    for (i, segment) in name.segments.iter().enumerate() {
        if i > 0 {
            ctx.skip_space_and_comments();
            ctx.match_text(".")?;
            ctx.skip_space_and_comments();
        }
        ctx.match_text(&segment.identifier)?;
    }
    Ok(())
}

/// Copies space, then matches `token`, emitting it as-is.
pub(crate) fn copy_and_match(ctx: &mut TranslationContext<'_>, token: &str) -> WriteResult {
    ctx.copy_space_and_comments();
    ctx.match_and_write_same(token)
}

pub(crate) fn is_cpp(ctx: &TranslationContext<'_>) -> bool {
    ctx.profile().language == crate::profile::TargetLanguage::Cpp
}
