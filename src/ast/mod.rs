//! AST module for the Java source language
//!
//! This module provides the Abstract Syntax Tree types consumed by the translation engine.
//! Every node carries a [`Span`] of exact byte offsets into the original source text; the
//! engine relies on those offsets to walk the AST and the raw text in lockstep.
//!
//! The node set is closed: [`NodeRef`] enumerates a borrowed reference to every node kind and
//! is what the writer registry dispatches on.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

pub mod node;
pub mod operators;

pub use node::{NodeKind, NodeRef};
pub use operators::{AssignmentOperator, InfixOperator, PostfixOperator, PrefixOperator};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code.
///
/// `start` is the offset of the first byte of the node's first token, `end` is the offset just
/// past its last token. Leading and trailing whitespace/comments are never included.
///
/// # Examples
///
/// ```rust
/// use crosswalk::ast::Span;
/// let span = Span::new(3, 8);
/// assert_eq!(span.len(), 5);
/// assert_eq!(span.to(Span::new(10, 12)), Span::new(3, 12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Span covering `self` through `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

/// A single identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleName {
    pub span: Span,
    pub identifier: String,
}

/// A dotted name such as `java.util.List`. Used for package, import and type names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Name {
    pub span: Span,
    pub segments: Vec<SimpleName>,
}

impl Name {
    /// The last segment (`List` in `java.util.List`).
    pub fn last(&self) -> &SimpleName {
        // The parser never builds an empty name.
        &self.segments[self.segments.len() - 1]
    }

    /// Every segment but the last, joined with `separator`.
    pub fn qualifier(&self, separator: &str) -> Option<String> {
        if self.segments.len() < 2 {
            return None;
        }
        let parts: Vec<&str> = self.segments[..self.segments.len() - 1]
            .iter()
            .map(|s| s.identifier.as_str())
            .collect();
        Some(parts.join(separator))
    }

    /// Full name joined with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        self.segments
            .iter()
            .map(|s| s.identifier.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModifierKeyword {
    Public,
    Protected,
    Private,
    Static,
    Abstract,
    Final,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
}

impl ModifierKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKeyword::Public => "public",
            ModifierKeyword::Protected => "protected",
            ModifierKeyword::Private => "private",
            ModifierKeyword::Static => "static",
            ModifierKeyword::Abstract => "abstract",
            ModifierKeyword::Final => "final",
            ModifierKeyword::Native => "native",
            ModifierKeyword::Synchronized => "synchronized",
            ModifierKeyword::Transient => "transient",
            ModifierKeyword::Volatile => "volatile",
            ModifierKeyword::Strictfp => "strictfp",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "public" => ModifierKeyword::Public,
            "protected" => ModifierKeyword::Protected,
            "private" => ModifierKeyword::Private,
            "static" => ModifierKeyword::Static,
            "abstract" => ModifierKeyword::Abstract,
            "final" => ModifierKeyword::Final,
            "native" => ModifierKeyword::Native,
            "synchronized" => ModifierKeyword::Synchronized,
            "transient" => ModifierKeyword::Transient,
            "volatile" => ModifierKeyword::Volatile,
            "strictfp" => ModifierKeyword::Strictfp,
            _ => return None,
        })
    }

    pub fn is_access(&self) -> bool {
        matches!(
            self,
            ModifierKeyword::Public | ModifierKeyword::Protected | ModifierKeyword::Private
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modifier {
    pub span: Span,
    pub keyword: ModifierKeyword,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub span: Span,
    pub name: Name,
}

/// A modifier keyword or an annotation, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExtendedModifier {
    Modifier(Modifier),
    Annotation(Annotation),
}

impl ExtendedModifier {
    pub fn span(&self) -> Span {
        match self {
            ExtendedModifier::Modifier(m) => m.span,
            ExtendedModifier::Annotation(a) => a.span,
        }
    }

    pub fn keyword(&self) -> Option<ModifierKeyword> {
        match self {
            ExtendedModifier::Modifier(m) => Some(m.keyword),
            ExtendedModifier::Annotation(_) => None,
        }
    }
}

/// True if the modifier list contains `keyword`.
pub fn has_modifier(modifiers: &[ExtendedModifier], keyword: ModifierKeyword) -> bool {
    modifiers.iter().any(|m| m.keyword() == Some(keyword))
}

/// True if the modifier list contains `final`.
pub fn contains_final(modifiers: &[ExtendedModifier]) -> bool {
    has_modifier(modifiers, ModifierKeyword::Final)
}

/// The access keyword of a modifier list, if any.
pub fn access_modifier(modifiers: &[ExtendedModifier]) -> Option<&Modifier> {
    modifiers.iter().find_map(|m| match m {
        ExtendedModifier::Modifier(m) if m.keyword.is_access() => Some(m),
        _ => None,
    })
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Void => "void",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "boolean" => PrimitiveKind::Boolean,
            "byte" => PrimitiveKind::Byte,
            "char" => PrimitiveKind::Char,
            "short" => PrimitiveKind::Short,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            "void" => PrimitiveKind::Void,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimitiveType {
    pub span: Span,
    pub kind: PrimitiveKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleType {
    pub span: Span,
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayType {
    pub span: Span,
    pub element_type: Box<Type>,
    pub dimensions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterizedType {
    pub span: Span,
    pub base: SimpleType,
    pub arguments: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Simple(SimpleType),
    Array(ArrayType),
    Parameterized(ParameterizedType),
}

impl Type {
    pub fn span(&self) -> Span {
        match self {
            Type::Primitive(t) => t.span,
            Type::Simple(t) => t.span,
            Type::Array(t) => t.span,
            Type::Parameterized(t) => t.span,
        }
    }

    /// Primitive types (including `void`) are value types; everything else is a reference.
    pub fn is_reference(&self) -> bool {
        !matches!(self, Type::Primitive(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParameter {
    pub span: Span,
    pub name: SimpleName,
}

// ============================================================================
// DECLARATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilationUnit {
    pub span: Span,
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<ImportDeclaration>,
    pub types: Vec<TypeDeclaration>,
}

impl CompilationUnit {
    pub fn first_type_declaration(&self) -> Option<&TypeDeclaration> {
        self.types.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDeclaration {
    pub span: Span,
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDeclaration {
    pub span: Span,
    pub is_static: bool,
    pub name: Name,
    pub on_demand: bool,
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDeclaration {
    pub span: Span,
    pub modifiers: Vec<ExtendedModifier>,
    pub is_interface: bool,
    pub name: SimpleName,
    pub type_parameters: Vec<TypeParameter>,
    pub extends: Vec<Type>,
    pub implements: Vec<Type>,
    /// Span of the `{ ... }` body, braces included.
    pub body_span: Span,
    pub body: Vec<BodyDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BodyDeclaration {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    Type(TypeDeclaration),
}

impl BodyDeclaration {
    pub fn span(&self) -> Span {
        match self {
            BodyDeclaration::Field(f) => f.span,
            BodyDeclaration::Method(m) => m.span,
            BodyDeclaration::Type(t) => t.span,
        }
    }

    pub fn modifiers(&self) -> &[ExtendedModifier] {
        match self {
            BodyDeclaration::Field(f) => &f.modifiers,
            BodyDeclaration::Method(m) => &m.modifiers,
            BodyDeclaration::Type(t) => &t.modifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDeclaration {
    pub span: Span,
    pub modifiers: Vec<ExtendedModifier>,
    pub field_type: Type,
    pub fragments: Vec<VariableDeclarationFragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDeclaration {
    pub span: Span,
    pub modifiers: Vec<ExtendedModifier>,
    /// `None` for constructors.
    pub return_type: Option<Type>,
    pub name: SimpleName,
    pub parameters: Vec<SingleVariableDeclaration>,
    pub thrown_exceptions: Vec<Type>,
    pub body: Option<Block>,
}

impl MethodDeclaration {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }
}

/// A formal parameter, or the variable of an enhanced `for`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleVariableDeclaration {
    pub span: Span,
    pub modifiers: Vec<ExtendedModifier>,
    pub var_type: Type,
    pub name: SimpleName,
    pub extra_dimensions: usize,
}

/// One declarator of a field or local variable declaration: `x`, `y = 2`, `z[] = {}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarationFragment {
    pub span: Span,
    pub name: SimpleName,
    pub extra_dimensions: usize,
    pub initializer: Option<Expression>,
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub span: Span,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarationStatement {
    pub span: Span,
    pub modifiers: Vec<ExtendedModifier>,
    pub var_type: Type,
    pub fragments: Vec<VariableDeclarationFragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub span: Span,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub span: Span,
    pub condition: Expression,
    pub then_statement: Box<Statement>,
    pub else_statement: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    pub span: Span,
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoStatement {
    pub span: Span,
    pub body: Box<Statement>,
    pub condition: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    pub span: Span,
    pub initializers: Vec<Expression>,
    pub condition: Option<Expression>,
    pub updaters: Vec<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedForStatement {
    pub span: Span,
    pub parameter: SingleVariableDeclaration,
    pub expression: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub span: Span,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStatement {
    pub span: Span,
    pub label: Option<SimpleName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStatement {
    pub span: Span,
    pub label: Option<SimpleName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement {
    pub span: Span,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyStatement {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    Block(Block),
    VariableDeclaration(VariableDeclarationStatement),
    Expression(ExpressionStatement),
    If(IfStatement),
    While(WhileStatement),
    Do(DoStatement),
    For(ForStatement),
    EnhancedFor(EnhancedForStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Throw(ThrowStatement),
    Empty(EmptyStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralKind {
    Integer,
    Float,
    Character,
    String,
    Boolean,
    Null,
}

/// A literal, kept as its exact source token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub span: Span,
    pub kind: LiteralKind,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThisExpression {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAccess {
    pub span: Span,
    pub expression: Box<Expression>,
    pub name: SimpleName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInvocation {
    pub span: Span,
    pub expression: Option<Box<Expression>>,
    pub name: SimpleName,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInstanceCreation {
    pub span: Span,
    pub class_type: Type,
    pub arguments: Vec<Expression>,
}

/// `new int[n][]` or `new int[] { 1, 2 }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayCreation {
    pub span: Span,
    pub element_type: Type,
    pub dimensions: Vec<Expression>,
    pub extra_dimensions: usize,
    pub initializer: Option<ArrayInitializer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayInitializer {
    pub span: Span,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayAccess {
    pub span: Span,
    pub array: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub span: Span,
    pub left: Box<Expression>,
    pub operator: AssignmentOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfixExpression {
    pub span: Span,
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceofExpression {
    pub span: Span,
    pub expression: Box<Expression>,
    pub right_type: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixExpression {
    pub span: Span,
    pub operator: PrefixOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostfixExpression {
    pub span: Span,
    pub operand: Box<Expression>,
    pub operator: PostfixOperator,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    pub span: Span,
    pub condition: Box<Expression>,
    pub then_expression: Box<Expression>,
    pub else_expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedExpression {
    pub span: Span,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastExpression {
    pub span: Span,
    pub cast_type: Type,
    pub expression: Box<Expression>,
}

/// A local variable declaration in expression position (the init part of a `for`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarationExpression {
    pub span: Span,
    pub modifiers: Vec<ExtendedModifier>,
    pub var_type: Type,
    pub fragments: Vec<VariableDeclarationFragment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    Literal(Literal),
    Name(SimpleName),
    This(ThisExpression),
    FieldAccess(FieldAccess),
    MethodInvocation(MethodInvocation),
    ClassInstanceCreation(ClassInstanceCreation),
    ArrayCreation(ArrayCreation),
    ArrayInitializer(ArrayInitializer),
    ArrayAccess(ArrayAccess),
    Assignment(Assignment),
    Infix(InfixExpression),
    Instanceof(InstanceofExpression),
    Prefix(PrefixExpression),
    Postfix(PostfixExpression),
    Conditional(ConditionalExpression),
    Parenthesized(ParenthesizedExpression),
    Cast(CastExpression),
    VariableDeclaration(VariableDeclarationExpression),
}

impl Expression {
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }
}
