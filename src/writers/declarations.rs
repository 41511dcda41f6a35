//! Compilation units and declarations.
//!
//! The file prologue (package and imports) and epilogue are written here too, since both the
//! compilation unit writer and the per-type file driver in the translator need them.

use crate::ast::{
    access_modifier, has_modifier, BodyDeclaration, CompilationUnit, FieldDeclaration,
    ImportDeclaration, MethodDeclaration, ModifierKeyword, PackageDeclaration, Span,
    TypeDeclaration,
};
use crate::context::{OutputType, TranslationContext, WriterEnv};

use super::modifiers::{mapped_keywords, replace_modifiers};
use super::types::write_type_with_marker;
use super::variables::write_declarators;
use super::{consume_name, copy_and_match, is_cpp, write, write_comma_list, WriteResult};

// ============================================================================
// FILE PROLOGUE AND EPILOGUE
// ============================================================================

/// Writes everything before the first type declaration: the package and the imports.
///
/// C++ needs its `#include` lines ahead of the namespace, so the package line is dropped where
/// it stands and the namespace is opened after the last import.
pub(crate) fn write_file_prologue<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    unit: &'a CompilationUnit,
) -> WriteResult {
    let cpp = is_cpp(ctx);
    // Whether the cursor sits on a line whose declaration was written out.
    let mut line_open = false;
    if let Some(package) = &unit.package {
        ctx.copy_space_and_comments();
        write(ctx, env, package)?;
        if cpp {
            drop_rest_of_line(ctx);
            ctx.skip_blank_lines();
        } else {
            line_open = true;
        }
    }
    for import in &unit.imports {
        ctx.copy_space_and_comments();
        write(ctx, env, import)?;
        // On-demand imports have no C++ counterpart; take their line out entirely.
        if cpp && import.on_demand {
            drop_rest_of_line(ctx);
            line_open = false;
        } else {
            line_open = true;
        }
    }

    if line_open {
        ctx.copy_space_and_comments_until_end_of_line();
    }
    match (&unit.package, cpp) {
        (Some(package), true) => {
            if ctx.target_column() != 0 {
                ctx.write_newline();
                ctx.write_newline();
            }
            ctx.writeln(&format!("namespace {} {{", package.name.joined("::")));
        }
        _ if line_open => {
            ctx.copy_newline();
        }
        _ => {}
    }
    Ok(())
}

fn drop_rest_of_line(ctx: &mut TranslationContext<'_>) {
    ctx.skip_space_and_comments_until_end_of_line();
    ctx.skip_newline();
}

/// Ends the output with a newline and closes the C++ namespace.
pub(crate) fn write_file_epilogue(ctx: &mut TranslationContext<'_>, unit: &CompilationUnit) {
    if ctx.target_column() != 0 {
        ctx.write_newline();
    }
    if is_cpp(ctx) && unit.package.is_some() {
        ctx.writeln("}");
    }
}

pub fn write_compilation_unit<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a CompilationUnit,
) -> WriteResult {
    write_file_prologue(ctx, env, node)?;
    for type_declaration in &node.types {
        ctx.copy_space_and_comments();
        write(ctx, env, type_declaration)?;
    }
    let past_end = ctx.position() > node.span.end;
    write_file_epilogue(ctx, node);
    ctx.set_knowingly_processed_trailing_space_and_comments(past_end);
    Ok(())
}

// ============================================================================
// PACKAGE AND IMPORTS
// ============================================================================

pub fn write_package(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &PackageDeclaration,
) -> WriteResult {
    if is_cpp(ctx) {
        ctx.match_text("package")?;
        ctx.skip_space_and_comments();
        consume_name(ctx, &node.name)?;
        ctx.skip_space_and_comments();
        return ctx.match_text(";");
    }

    ctx.match_and_write("package", "namespace")?;
    ctx.copy_space_and_comments_ensuring_delimiter();
    consume_name(ctx, &node.name)?;
    ctx.write(&node.name.joined("."));
    copy_and_match(ctx, ";")
}

pub fn write_import(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &ImportDeclaration,
) -> WriteResult {
    if node.is_static {
        return ctx.fail_unsupported_construct("static import");
    }
    ctx.match_text("import")?;
    ctx.position_to_end_of_node(node.span);

    if is_cpp(ctx) {
        if !node.on_demand {
            ctx.write(&format!("#include \"{}.h\"", node.name.last().identifier));
        }
        return Ok(());
    }

    let namespace = if node.on_demand {
        Some(node.name.joined("."))
    } else {
        node.name.qualifier(".")
    };
    if let Some(namespace) = namespace {
        ctx.write(&format!("using {};", namespace));
    }
    Ok(())
}

// ============================================================================
// TYPE DECLARATIONS
// ============================================================================

fn is_top_level(env: WriterEnv<'_>, node: &TypeDeclaration) -> bool {
    env.enclosing_type_declaration
        .map_or(true, |enclosing| std::ptr::eq(enclosing, node))
}

pub fn write_type_declaration<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a TypeDeclaration,
) -> WriteResult {
    let cpp = is_cpp(ctx);
    let keywords = if cpp {
        Vec::new()
    } else {
        mapped_keywords(&node.modifiers, |k| match k {
            ModifierKeyword::Final => Some("sealed"),
            ModifierKeyword::Static | ModifierKeyword::Strictfp => None,
            other => Some(other.as_str()),
        })
    };
    replace_modifiers(ctx, &node.modifiers, &keywords);

    let keyword = if node.is_interface { "interface" } else { "class" };
    ctx.match_and_write(keyword, if cpp { "class" } else { keyword })?;
    ctx.copy_space_and_comments();
    write(ctx, env, &node.name)?;

    if !node.type_parameters.is_empty() {
        if cpp {
            return ctx.fail_unsupported_construct("generic type declaration");
        }
        copy_and_match(ctx, "<")?;
        write_comma_list(ctx, env, &node.type_parameters)?;
        copy_and_match(ctx, ">")?;
    }

    write_supertypes(ctx, env, node)?;
    write_type_body(ctx, env, node)?;

    if cpp && is_top_level(env, node) {
        ctx.copy_space_and_comments_until_end_of_line();
        ctx.set_knowingly_processed_trailing_space_and_comments(true);
    }
    Ok(())
}

/// `extends B implements I, J` becomes `: public B, public I, public J` in C++ and
/// `: B, I, J` in C#.
fn write_supertypes<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a TypeDeclaration,
) -> WriteResult {
    let inheritance = if is_cpp(ctx) { "public " } else { "" };
    let mut first_clause = true;
    for (keyword, supertypes) in [("extends", &node.extends), ("implements", &node.implements)] {
        if supertypes.is_empty() {
            continue;
        }
        if first_clause {
            ctx.copy_space_and_comments();
            ctx.match_and_write(keyword, ":")?;
        } else {
            ctx.skip_space_and_comments();
            ctx.match_and_write(keyword, ",")?;
        }
        first_clause = false;

        for (i, supertype) in supertypes.iter().enumerate() {
            ctx.copy_space_and_comments();
            if i > 0 {
                ctx.match_and_write_same(",")?;
                ctx.copy_space_and_comments();
            }
            ctx.write(inheritance);
            write(ctx, env, supertype)?;
        }
    }
    Ok(())
}

/// Effective access of a member in the C++ class: interface members and package-private
/// members are public.
fn member_access(owner: &TypeDeclaration, member: &BodyDeclaration) -> ModifierKeyword {
    if owner.is_interface {
        return ModifierKeyword::Public;
    }
    access_modifier(member.modifiers()).map_or(ModifierKeyword::Public, |m| m.keyword)
}

/// Writes `public:` (or another access label) ahead of a member.
///
/// A member on the cursor's line gets an inline label; otherwise the current line is finished
/// and the label gets a line of its own, aligned with the class keyword.
fn write_access_label(
    ctx: &mut TranslationContext<'_>,
    access: ModifierKeyword,
    member: Span,
    column: usize,
) {
    let label = format!("{}:", access.as_str());
    if ctx.starts_on_same_line(member) {
        ctx.copy_space_and_comments();
        ctx.write(&label);
        ctx.write(" ");
        return;
    }
    ctx.copy_space_and_comments_until_end_of_line();
    ctx.copy_newline();
    ctx.write_spaces_until_column(column);
    ctx.writeln(&label);
}

fn write_type_body<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a TypeDeclaration,
) -> WriteResult {
    let cpp = is_cpp(ctx);
    copy_and_match(ctx, "{")?;

    let member_env = env.with_type_declaration(node);
    let label_column = ctx.source_logical_column_at(node.span.start);
    // A C++ class starts out private.
    let mut current_access = ModifierKeyword::Private;
    for member in &node.body {
        if cpp {
            let access = member_access(node, member);
            if access != current_access {
                write_access_label(ctx, access, member.span(), label_column);
                current_access = access;
            }
        }
        ctx.copy_space_and_comments();
        write(ctx, member_env, member)?;
    }

    ctx.copy_space_and_comments();
    ctx.match_and_write("}", if cpp { "};" } else { "}" })
}

// ============================================================================
// MEMBERS
// ============================================================================

pub fn write_field<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a FieldDeclaration,
) -> WriteResult {
    let in_interface = env
        .enclosing_type_declaration
        .map_or(false, |owner| owner.is_interface);
    let keywords = if is_cpp(ctx) && in_interface {
        // Interface fields are implicitly static and final.
        vec!["static", "const"]
    } else if is_cpp(ctx) {
        mapped_keywords(&node.modifiers, |k| match k {
            ModifierKeyword::Static => Some("static"),
            ModifierKeyword::Final => Some("const"),
            _ => None,
        })
    } else {
        mapped_keywords(&node.modifiers, |k| match k {
            ModifierKeyword::Final => Some("readonly"),
            ModifierKeyword::Public
            | ModifierKeyword::Protected
            | ModifierKeyword::Private
            | ModifierKeyword::Static
            | ModifierKeyword::Volatile => Some(k.as_str()),
            _ => None,
        })
    };
    replace_modifiers(ctx, &node.modifiers, &keywords);
    write_declarators(ctx, env, &node.field_type, &node.fragments)
}

/// Writes a method.
///
/// A C++ header gets the declaration alone, with `;` in place of the body. The C++ source file
/// gets the out-of-class definition: no modifiers, and the name qualified with the enclosing
/// classes.
pub fn write_method<'a>(
    ctx: &mut TranslationContext<'_>,
    env: WriterEnv<'a>,
    node: &'a MethodDeclaration,
) -> WriteResult {
    let cpp = is_cpp(ctx);
    let definition = cpp && ctx.output_type() == OutputType::Source;
    let in_interface = env
        .enclosing_type_declaration
        .map_or(false, |owner| owner.is_interface);
    let pure_virtual = cpp
        && node.body.is_none()
        && (in_interface || has_modifier(&node.modifiers, ModifierKeyword::Abstract));

    let keywords = if definition {
        Vec::new()
    } else if cpp {
        let mut keywords = mapped_keywords(&node.modifiers, |k| match k {
            ModifierKeyword::Static => Some("static"),
            _ => None,
        });
        if pure_virtual {
            keywords.insert(0, "virtual");
        }
        keywords
    } else {
        mapped_keywords(&node.modifiers, |k| match k {
            ModifierKeyword::Final
            | ModifierKeyword::Native
            | ModifierKeyword::Synchronized
            | ModifierKeyword::Strictfp => None,
            other => Some(other.as_str()),
        })
    };
    replace_modifiers(ctx, &node.modifiers, &keywords);

    if let Some(return_type) = &node.return_type {
        write_type_with_marker(ctx, env, return_type)?;
        ctx.copy_space_and_comments_ensuring_delimiter();
    }
    if definition {
        let qualifier = format!("{}::", ctx.definition_qualifier());
        ctx.write(&qualifier);
    }
    write(ctx, env, &node.name)?;
    copy_and_match(ctx, "(")?;
    write_comma_list(ctx, env, &node.parameters)?;
    copy_and_match(ctx, ")")?;

    // Neither target declares checked exceptions.
    if let Some(last) = node.thrown_exceptions.last() {
        ctx.skip_space_and_comments();
        ctx.match_text("throws")?;
        ctx.position_to_end_of_node(last.span());
    }

    match &node.body {
        Some(body) if cpp && !definition => {
            ctx.write(";");
            ctx.position_to_end_of_node(body.span);
            Ok(())
        }
        Some(body) => {
            ctx.copy_space_and_comments();
            write(ctx, env.with_method_implementation(true), body)
        }
        None => {
            ctx.copy_space_and_comments();
            if pure_virtual {
                ctx.write(" = 0");
            }
            ctx.match_and_write_same(";")
        }
    }
}
