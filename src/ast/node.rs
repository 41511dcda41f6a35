//! Closed set of node kinds and a borrowed reference to any node.
//!
//! [`NodeRef`] is the unit of dispatch for the writer registry. Adding a node type to the AST
//! means adding a variant here, and the registry's exhaustive `match` then refuses to compile
//! until a writer exists for it.

use std::fmt;

use super::*;

/// Tag for every node kind the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    TypeDeclaration,
    FieldDeclaration,
    MethodDeclaration,
    SingleVariableDeclaration,
    VariableDeclarationFragment,
    Modifier,
    Annotation,
    PrimitiveType,
    SimpleType,
    ArrayType,
    ParameterizedType,
    TypeParameter,
    Block,
    VariableDeclarationStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    EnhancedForStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    EmptyStatement,
    Literal,
    SimpleName,
    ThisExpression,
    FieldAccess,
    MethodInvocation,
    ClassInstanceCreation,
    ArrayCreation,
    ArrayInitializer,
    ArrayAccess,
    Assignment,
    InfixExpression,
    InstanceofExpression,
    PrefixExpression,
    PostfixExpression,
    ConditionalExpression,
    ParenthesizedExpression,
    CastExpression,
    VariableDeclarationExpression,
}

impl NodeKind {
    pub const ALL: [NodeKind; 46] = [
        NodeKind::CompilationUnit,
        NodeKind::PackageDeclaration,
        NodeKind::ImportDeclaration,
        NodeKind::TypeDeclaration,
        NodeKind::FieldDeclaration,
        NodeKind::MethodDeclaration,
        NodeKind::SingleVariableDeclaration,
        NodeKind::VariableDeclarationFragment,
        NodeKind::Modifier,
        NodeKind::Annotation,
        NodeKind::PrimitiveType,
        NodeKind::SimpleType,
        NodeKind::ArrayType,
        NodeKind::ParameterizedType,
        NodeKind::TypeParameter,
        NodeKind::Block,
        NodeKind::VariableDeclarationStatement,
        NodeKind::ExpressionStatement,
        NodeKind::IfStatement,
        NodeKind::WhileStatement,
        NodeKind::DoStatement,
        NodeKind::ForStatement,
        NodeKind::EnhancedForStatement,
        NodeKind::ReturnStatement,
        NodeKind::BreakStatement,
        NodeKind::ContinueStatement,
        NodeKind::ThrowStatement,
        NodeKind::EmptyStatement,
        NodeKind::Literal,
        NodeKind::SimpleName,
        NodeKind::ThisExpression,
        NodeKind::FieldAccess,
        NodeKind::MethodInvocation,
        NodeKind::ClassInstanceCreation,
        NodeKind::ArrayCreation,
        NodeKind::ArrayInitializer,
        NodeKind::ArrayAccess,
        NodeKind::Assignment,
        NodeKind::InfixExpression,
        NodeKind::InstanceofExpression,
        NodeKind::PrefixExpression,
        NodeKind::PostfixExpression,
        NodeKind::ConditionalExpression,
        NodeKind::ParenthesizedExpression,
        NodeKind::CastExpression,
        NodeKind::VariableDeclarationExpression,
    ];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A borrowed reference to any AST node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    CompilationUnit(&'a CompilationUnit),
    PackageDeclaration(&'a PackageDeclaration),
    ImportDeclaration(&'a ImportDeclaration),
    TypeDeclaration(&'a TypeDeclaration),
    FieldDeclaration(&'a FieldDeclaration),
    MethodDeclaration(&'a MethodDeclaration),
    SingleVariableDeclaration(&'a SingleVariableDeclaration),
    VariableDeclarationFragment(&'a VariableDeclarationFragment),
    Modifier(&'a Modifier),
    Annotation(&'a Annotation),
    PrimitiveType(&'a PrimitiveType),
    SimpleType(&'a SimpleType),
    ArrayType(&'a ArrayType),
    ParameterizedType(&'a ParameterizedType),
    TypeParameter(&'a TypeParameter),
    Block(&'a Block),
    VariableDeclarationStatement(&'a VariableDeclarationStatement),
    ExpressionStatement(&'a ExpressionStatement),
    IfStatement(&'a IfStatement),
    WhileStatement(&'a WhileStatement),
    DoStatement(&'a DoStatement),
    ForStatement(&'a ForStatement),
    EnhancedForStatement(&'a EnhancedForStatement),
    ReturnStatement(&'a ReturnStatement),
    BreakStatement(&'a BreakStatement),
    ContinueStatement(&'a ContinueStatement),
    ThrowStatement(&'a ThrowStatement),
    EmptyStatement(&'a EmptyStatement),
    Literal(&'a Literal),
    SimpleName(&'a SimpleName),
    ThisExpression(&'a ThisExpression),
    FieldAccess(&'a FieldAccess),
    MethodInvocation(&'a MethodInvocation),
    ClassInstanceCreation(&'a ClassInstanceCreation),
    ArrayCreation(&'a ArrayCreation),
    ArrayInitializer(&'a ArrayInitializer),
    ArrayAccess(&'a ArrayAccess),
    Assignment(&'a Assignment),
    InfixExpression(&'a InfixExpression),
    InstanceofExpression(&'a InstanceofExpression),
    PrefixExpression(&'a PrefixExpression),
    PostfixExpression(&'a PostfixExpression),
    ConditionalExpression(&'a ConditionalExpression),
    ParenthesizedExpression(&'a ParenthesizedExpression),
    CastExpression(&'a CastExpression),
    VariableDeclarationExpression(&'a VariableDeclarationExpression),
}

impl<'a> NodeRef<'a> {
    pub fn span(&self) -> Span {
        match self {
            NodeRef::CompilationUnit(n) => n.span,
            NodeRef::PackageDeclaration(n) => n.span,
            NodeRef::ImportDeclaration(n) => n.span,
            NodeRef::TypeDeclaration(n) => n.span,
            NodeRef::FieldDeclaration(n) => n.span,
            NodeRef::MethodDeclaration(n) => n.span,
            NodeRef::SingleVariableDeclaration(n) => n.span,
            NodeRef::VariableDeclarationFragment(n) => n.span,
            NodeRef::Modifier(n) => n.span,
            NodeRef::Annotation(n) => n.span,
            NodeRef::PrimitiveType(n) => n.span,
            NodeRef::SimpleType(n) => n.span,
            NodeRef::ArrayType(n) => n.span,
            NodeRef::ParameterizedType(n) => n.span,
            NodeRef::TypeParameter(n) => n.span,
            NodeRef::Block(n) => n.span,
            NodeRef::VariableDeclarationStatement(n) => n.span,
            NodeRef::ExpressionStatement(n) => n.span,
            NodeRef::IfStatement(n) => n.span,
            NodeRef::WhileStatement(n) => n.span,
            NodeRef::DoStatement(n) => n.span,
            NodeRef::ForStatement(n) => n.span,
            NodeRef::EnhancedForStatement(n) => n.span,
            NodeRef::ReturnStatement(n) => n.span,
            NodeRef::BreakStatement(n) => n.span,
            NodeRef::ContinueStatement(n) => n.span,
            NodeRef::ThrowStatement(n) => n.span,
            NodeRef::EmptyStatement(n) => n.span,
            NodeRef::Literal(n) => n.span,
            NodeRef::SimpleName(n) => n.span,
            NodeRef::ThisExpression(n) => n.span,
            NodeRef::FieldAccess(n) => n.span,
            NodeRef::MethodInvocation(n) => n.span,
            NodeRef::ClassInstanceCreation(n) => n.span,
            NodeRef::ArrayCreation(n) => n.span,
            NodeRef::ArrayInitializer(n) => n.span,
            NodeRef::ArrayAccess(n) => n.span,
            NodeRef::Assignment(n) => n.span,
            NodeRef::InfixExpression(n) => n.span,
            NodeRef::InstanceofExpression(n) => n.span,
            NodeRef::PrefixExpression(n) => n.span,
            NodeRef::PostfixExpression(n) => n.span,
            NodeRef::ConditionalExpression(n) => n.span,
            NodeRef::ParenthesizedExpression(n) => n.span,
            NodeRef::CastExpression(n) => n.span,
            NodeRef::VariableDeclarationExpression(n) => n.span,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::CompilationUnit(_) => NodeKind::CompilationUnit,
            NodeRef::PackageDeclaration(_) => NodeKind::PackageDeclaration,
            NodeRef::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            NodeRef::TypeDeclaration(_) => NodeKind::TypeDeclaration,
            NodeRef::FieldDeclaration(_) => NodeKind::FieldDeclaration,
            NodeRef::MethodDeclaration(_) => NodeKind::MethodDeclaration,
            NodeRef::SingleVariableDeclaration(_) => NodeKind::SingleVariableDeclaration,
            NodeRef::VariableDeclarationFragment(_) => NodeKind::VariableDeclarationFragment,
            NodeRef::Modifier(_) => NodeKind::Modifier,
            NodeRef::Annotation(_) => NodeKind::Annotation,
            NodeRef::PrimitiveType(_) => NodeKind::PrimitiveType,
            NodeRef::SimpleType(_) => NodeKind::SimpleType,
            NodeRef::ArrayType(_) => NodeKind::ArrayType,
            NodeRef::ParameterizedType(_) => NodeKind::ParameterizedType,
            NodeRef::TypeParameter(_) => NodeKind::TypeParameter,
            NodeRef::Block(_) => NodeKind::Block,
            NodeRef::VariableDeclarationStatement(_) => NodeKind::VariableDeclarationStatement,
            NodeRef::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeRef::IfStatement(_) => NodeKind::IfStatement,
            NodeRef::WhileStatement(_) => NodeKind::WhileStatement,
            NodeRef::DoStatement(_) => NodeKind::DoStatement,
            NodeRef::ForStatement(_) => NodeKind::ForStatement,
            NodeRef::EnhancedForStatement(_) => NodeKind::EnhancedForStatement,
            NodeRef::ReturnStatement(_) => NodeKind::ReturnStatement,
            NodeRef::BreakStatement(_) => NodeKind::BreakStatement,
            NodeRef::ContinueStatement(_) => NodeKind::ContinueStatement,
            NodeRef::ThrowStatement(_) => NodeKind::ThrowStatement,
            NodeRef::EmptyStatement(_) => NodeKind::EmptyStatement,
            NodeRef::Literal(_) => NodeKind::Literal,
            NodeRef::SimpleName(_) => NodeKind::SimpleName,
            NodeRef::ThisExpression(_) => NodeKind::ThisExpression,
            NodeRef::FieldAccess(_) => NodeKind::FieldAccess,
            NodeRef::MethodInvocation(_) => NodeKind::MethodInvocation,
            NodeRef::ClassInstanceCreation(_) => NodeKind::ClassInstanceCreation,
            NodeRef::ArrayCreation(_) => NodeKind::ArrayCreation,
            NodeRef::ArrayInitializer(_) => NodeKind::ArrayInitializer,
            NodeRef::ArrayAccess(_) => NodeKind::ArrayAccess,
            NodeRef::Assignment(_) => NodeKind::Assignment,
            NodeRef::InfixExpression(_) => NodeKind::InfixExpression,
            NodeRef::InstanceofExpression(_) => NodeKind::InstanceofExpression,
            NodeRef::PrefixExpression(_) => NodeKind::PrefixExpression,
            NodeRef::PostfixExpression(_) => NodeKind::PostfixExpression,
            NodeRef::ConditionalExpression(_) => NodeKind::ConditionalExpression,
            NodeRef::ParenthesizedExpression(_) => NodeKind::ParenthesizedExpression,
            NodeRef::CastExpression(_) => NodeKind::CastExpression,
            NodeRef::VariableDeclarationExpression(_) => NodeKind::VariableDeclarationExpression,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out: Vec<NodeRef<'a>> = Vec::new();
        match *self {
            NodeRef::CompilationUnit(n) => {
                if let Some(package) = &n.package {
                    out.push(package.into());
                }
                out.extend(n.imports.iter().map(NodeRef::from));
                out.extend(n.types.iter().map(NodeRef::from));
            }
            NodeRef::PackageDeclaration(_) | NodeRef::ImportDeclaration(_) => {}
            NodeRef::TypeDeclaration(n) => {
                out.extend(n.modifiers.iter().map(NodeRef::from));
                out.push((&n.name).into());
                out.extend(n.type_parameters.iter().map(NodeRef::from));
                out.extend(n.extends.iter().map(NodeRef::from));
                out.extend(n.implements.iter().map(NodeRef::from));
                out.extend(n.body.iter().map(NodeRef::from));
            }
            NodeRef::FieldDeclaration(n) => {
                out.extend(n.modifiers.iter().map(NodeRef::from));
                out.push((&n.field_type).into());
                out.extend(n.fragments.iter().map(NodeRef::from));
            }
            NodeRef::MethodDeclaration(n) => {
                out.extend(n.modifiers.iter().map(NodeRef::from));
                if let Some(return_type) = &n.return_type {
                    out.push(return_type.into());
                }
                out.push((&n.name).into());
                out.extend(n.parameters.iter().map(NodeRef::from));
                out.extend(n.thrown_exceptions.iter().map(NodeRef::from));
                if let Some(body) = &n.body {
                    out.push(body.into());
                }
            }
            NodeRef::SingleVariableDeclaration(n) => {
                out.extend(n.modifiers.iter().map(NodeRef::from));
                out.push((&n.var_type).into());
                out.push((&n.name).into());
            }
            NodeRef::VariableDeclarationFragment(n) => {
                out.push((&n.name).into());
                if let Some(init) = &n.initializer {
                    out.push(init.into());
                }
            }
            NodeRef::Modifier(_) | NodeRef::Annotation(_) | NodeRef::PrimitiveType(_) => {}
            NodeRef::SimpleType(_) => {}
            NodeRef::ArrayType(n) => out.push((&*n.element_type).into()),
            NodeRef::ParameterizedType(n) => {
                out.push((&n.base).into());
                out.extend(n.arguments.iter().map(NodeRef::from));
            }
            NodeRef::TypeParameter(n) => out.push((&n.name).into()),
            NodeRef::Block(n) => out.extend(n.statements.iter().map(NodeRef::from)),
            NodeRef::VariableDeclarationStatement(n) => {
                out.extend(n.modifiers.iter().map(NodeRef::from));
                out.push((&n.var_type).into());
                out.extend(n.fragments.iter().map(NodeRef::from));
            }
            NodeRef::ExpressionStatement(n) => out.push((&n.expression).into()),
            NodeRef::IfStatement(n) => {
                out.push((&n.condition).into());
                out.push((&*n.then_statement).into());
                if let Some(else_statement) = &n.else_statement {
                    out.push((&**else_statement).into());
                }
            }
            NodeRef::WhileStatement(n) => {
                out.push((&n.condition).into());
                out.push((&*n.body).into());
            }
            NodeRef::DoStatement(n) => {
                out.push((&*n.body).into());
                out.push((&n.condition).into());
            }
            NodeRef::ForStatement(n) => {
                out.extend(n.initializers.iter().map(NodeRef::from));
                if let Some(condition) = &n.condition {
                    out.push(condition.into());
                }
                out.extend(n.updaters.iter().map(NodeRef::from));
                out.push((&*n.body).into());
            }
            NodeRef::EnhancedForStatement(n) => {
                out.push((&n.parameter).into());
                out.push((&n.expression).into());
                out.push((&*n.body).into());
            }
            NodeRef::ReturnStatement(n) => {
                if let Some(expression) = &n.expression {
                    out.push(expression.into());
                }
            }
            NodeRef::BreakStatement(n) => {
                if let Some(label) = &n.label {
                    out.push(label.into());
                }
            }
            NodeRef::ContinueStatement(n) => {
                if let Some(label) = &n.label {
                    out.push(label.into());
                }
            }
            NodeRef::ThrowStatement(n) => out.push((&n.expression).into()),
            NodeRef::EmptyStatement(_)
            | NodeRef::Literal(_)
            | NodeRef::SimpleName(_)
            | NodeRef::ThisExpression(_) => {}
            NodeRef::FieldAccess(n) => {
                out.push((&*n.expression).into());
                out.push((&n.name).into());
            }
            NodeRef::MethodInvocation(n) => {
                if let Some(expression) = &n.expression {
                    out.push((&**expression).into());
                }
                out.push((&n.name).into());
                out.extend(n.arguments.iter().map(NodeRef::from));
            }
            NodeRef::ClassInstanceCreation(n) => {
                out.push((&n.class_type).into());
                out.extend(n.arguments.iter().map(NodeRef::from));
            }
            NodeRef::ArrayCreation(n) => {
                out.push((&n.element_type).into());
                out.extend(n.dimensions.iter().map(NodeRef::from));
                if let Some(init) = &n.initializer {
                    out.push(init.into());
                }
            }
            NodeRef::ArrayInitializer(n) => out.extend(n.expressions.iter().map(NodeRef::from)),
            NodeRef::ArrayAccess(n) => {
                out.push((&*n.array).into());
                out.push((&*n.index).into());
            }
            NodeRef::Assignment(n) => {
                out.push((&*n.left).into());
                out.push((&*n.right).into());
            }
            NodeRef::InfixExpression(n) => {
                out.push((&*n.left).into());
                out.push((&*n.right).into());
            }
            NodeRef::InstanceofExpression(n) => {
                out.push((&*n.expression).into());
                out.push((&n.right_type).into());
            }
            NodeRef::PrefixExpression(n) => out.push((&*n.operand).into()),
            NodeRef::PostfixExpression(n) => out.push((&*n.operand).into()),
            NodeRef::ConditionalExpression(n) => {
                out.push((&*n.condition).into());
                out.push((&*n.then_expression).into());
                out.push((&*n.else_expression).into());
            }
            NodeRef::ParenthesizedExpression(n) => out.push((&*n.expression).into()),
            NodeRef::CastExpression(n) => {
                out.push((&n.cast_type).into());
                out.push((&*n.expression).into());
            }
            NodeRef::VariableDeclarationExpression(n) => {
                out.extend(n.modifiers.iter().map(NodeRef::from));
                out.push((&n.var_type).into());
                out.extend(n.fragments.iter().map(NodeRef::from));
            }
        }
        out
    }

    /// This node and all of its descendants, depth first, in source order.
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut out = vec![*self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! node_ref_from {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    NodeRef::$ty(node)
                }
            }
        )*
    };
}

node_ref_from!(
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    TypeDeclaration,
    FieldDeclaration,
    MethodDeclaration,
    SingleVariableDeclaration,
    VariableDeclarationFragment,
    Modifier,
    Annotation,
    PrimitiveType,
    SimpleType,
    ArrayType,
    ParameterizedType,
    TypeParameter,
    Block,
    VariableDeclarationStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    EnhancedForStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    EmptyStatement,
    Literal,
    SimpleName,
    ThisExpression,
    FieldAccess,
    MethodInvocation,
    ClassInstanceCreation,
    ArrayCreation,
    ArrayInitializer,
    ArrayAccess,
    Assignment,
    InfixExpression,
    InstanceofExpression,
    PrefixExpression,
    PostfixExpression,
    ConditionalExpression,
    ParenthesizedExpression,
    CastExpression,
    VariableDeclarationExpression,
);

impl<'a> From<&'a Type> for NodeRef<'a> {
    fn from(node: &'a Type) -> Self {
        match node {
            Type::Primitive(t) => NodeRef::PrimitiveType(t),
            Type::Simple(t) => NodeRef::SimpleType(t),
            Type::Array(t) => NodeRef::ArrayType(t),
            Type::Parameterized(t) => NodeRef::ParameterizedType(t),
        }
    }
}

impl<'a> From<&'a ExtendedModifier> for NodeRef<'a> {
    fn from(node: &'a ExtendedModifier) -> Self {
        match node {
            ExtendedModifier::Modifier(m) => NodeRef::Modifier(m),
            ExtendedModifier::Annotation(a) => NodeRef::Annotation(a),
        }
    }
}

impl<'a> From<&'a BodyDeclaration> for NodeRef<'a> {
    fn from(node: &'a BodyDeclaration) -> Self {
        match node {
            BodyDeclaration::Field(f) => NodeRef::FieldDeclaration(f),
            BodyDeclaration::Method(m) => NodeRef::MethodDeclaration(m),
            BodyDeclaration::Type(t) => NodeRef::TypeDeclaration(t),
        }
    }
}

impl<'a> From<&'a Statement> for NodeRef<'a> {
    fn from(node: &'a Statement) -> Self {
        match node {
            Statement::Block(s) => NodeRef::Block(s),
            Statement::VariableDeclaration(s) => NodeRef::VariableDeclarationStatement(s),
            Statement::Expression(s) => NodeRef::ExpressionStatement(s),
            Statement::If(s) => NodeRef::IfStatement(s),
            Statement::While(s) => NodeRef::WhileStatement(s),
            Statement::Do(s) => NodeRef::DoStatement(s),
            Statement::For(s) => NodeRef::ForStatement(s),
            Statement::EnhancedFor(s) => NodeRef::EnhancedForStatement(s),
            Statement::Return(s) => NodeRef::ReturnStatement(s),
            Statement::Break(s) => NodeRef::BreakStatement(s),
            Statement::Continue(s) => NodeRef::ContinueStatement(s),
            Statement::Throw(s) => NodeRef::ThrowStatement(s),
            Statement::Empty(s) => NodeRef::EmptyStatement(s),
        }
    }
}

impl<'a> From<&'a Expression> for NodeRef<'a> {
    fn from(node: &'a Expression) -> Self {
        match node {
            Expression::Literal(e) => NodeRef::Literal(e),
            Expression::Name(e) => NodeRef::SimpleName(e),
            Expression::This(e) => NodeRef::ThisExpression(e),
            Expression::FieldAccess(e) => NodeRef::FieldAccess(e),
            Expression::MethodInvocation(e) => NodeRef::MethodInvocation(e),
            Expression::ClassInstanceCreation(e) => NodeRef::ClassInstanceCreation(e),
            Expression::ArrayCreation(e) => NodeRef::ArrayCreation(e),
            Expression::ArrayInitializer(e) => NodeRef::ArrayInitializer(e),
            Expression::ArrayAccess(e) => NodeRef::ArrayAccess(e),
            Expression::Assignment(e) => NodeRef::Assignment(e),
            Expression::Infix(e) => NodeRef::InfixExpression(e),
            Expression::Instanceof(e) => NodeRef::InstanceofExpression(e),
            Expression::Prefix(e) => NodeRef::PrefixExpression(e),
            Expression::Postfix(e) => NodeRef::PostfixExpression(e),
            Expression::Conditional(e) => NodeRef::ConditionalExpression(e),
            Expression::Parenthesized(e) => NodeRef::ParenthesizedExpression(e),
            Expression::Cast(e) => NodeRef::CastExpression(e),
            Expression::VariableDeclaration(e) => NodeRef::VariableDeclarationExpression(e),
        }
    }
}
