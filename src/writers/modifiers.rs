//! Modifier lists and annotations.
//!
//! Declaration writers rarely copy a modifier list as it stands: each target keeps some
//! keywords, renames others and drops the rest, and annotations never survive. The writers
//! compute the replacement keywords from the declaration's role and hand them to
//! [`replace_modifiers`].

use crate::ast::{Annotation, ExtendedModifier, Modifier, ModifierKeyword};
use crate::context::{TranslationContext, WriterEnv};
use crate::profile::TargetLanguage;

use super::WriteResult;

/// Emits `replacement` (space-separated) in place of the whole modifier list.
///
/// The cursor moves past the list and the space after it. Comments between the modifiers are
/// kept ahead of the replacement. The space after the list is copied when something was written
/// and dropped otherwise, so an emptied list leaves no gap.
pub(crate) fn replace_modifiers(
    ctx: &mut TranslationContext<'_>,
    modifiers: &[ExtendedModifier],
    replacement: &[&str],
) {
    let text = replacement.join(" ");
    if modifiers.is_empty() {
        if !text.is_empty() {
            ctx.write(&text);
            ctx.write(" ");
        }
        return;
    }
    for pair in modifiers.windows(2) {
        ctx.skip_modifiers(&pair[..1]);
        ctx.copy_comments_in_space();
    }
    ctx.skip_modifiers(modifiers);
    if !text.is_empty() {
        ctx.write(&text);
        ctx.copy_space_and_comments_ensuring_delimiter();
    } else if !ctx.copy_comments_in_space() {
        ctx.skip_space_and_comments();
    }
}

/// Maps every keyword of the list through `map`, keeping source order and dropping
/// annotations.
pub(crate) fn mapped_keywords(
    modifiers: &[ExtendedModifier],
    map: impl Fn(ModifierKeyword) -> Option<&'static str>,
) -> Vec<&'static str> {
    modifiers.iter().filter_map(|m| m.keyword()).filter_map(map).collect()
}

/// Mapping for a modifier seen without its declaration.
fn role_free(language: TargetLanguage, keyword: ModifierKeyword) -> Option<&'static str> {
    match (language, keyword) {
        (TargetLanguage::Cpp, ModifierKeyword::Final) => Some("const"),
        (TargetLanguage::Cpp, ModifierKeyword::Abstract) => Some("virtual"),
        (TargetLanguage::Cpp, ModifierKeyword::Static) => Some("static"),
        (TargetLanguage::Cpp, _) => None,
        (TargetLanguage::CSharp, ModifierKeyword::Final) => Some("readonly"),
        (TargetLanguage::CSharp, k) => Some(k.as_str()),
    }
}

pub fn write_modifier(ctx: &mut TranslationContext<'_>, _env: WriterEnv<'_>, node: &Modifier) -> WriteResult {
    let language = ctx.profile().language;
    match role_free(language, node.keyword) {
        Some(target) => ctx.match_and_write(node.keyword.as_str(), target),
        None => ctx.match_text(node.keyword.as_str()),
    }
}

pub fn write_annotation(
    ctx: &mut TranslationContext<'_>,
    _env: WriterEnv<'_>,
    node: &Annotation,
) -> WriteResult {
    ctx.match_text("@")?;
    ctx.position_to_end_of_node(node.span);
    Ok(())
}
