//! Reference front-end: Java subset source to [`CompilationUnit`].
//!
//! Spans are tightened to the node's first and last token. Pest folds implicit whitespace into
//! a rule when its tail is optional or repeated, so every span is trimmed with the text scanner
//! rather than taken from the pair directly.

use once_cell::sync::Lazy;
use pest::error::{Error, InputLocation};
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;
use tracing::debug;

use crate::ast::*;
use crate::diagnostics::TranslateError;
use crate::err_ctx;
use crate::scanner::{SourceText, TextScanner};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct JavaParser;

/// Binary operators from loosest to tightest binding.
static PRATT: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::op_cond_or, Assoc::Left))
        .op(Op::infix(Rule::op_cond_and, Assoc::Left))
        .op(Op::infix(Rule::op_or, Assoc::Left))
        .op(Op::infix(Rule::op_xor, Assoc::Left))
        .op(Op::infix(Rule::op_and, Assoc::Left))
        .op(Op::infix(Rule::op_eq, Assoc::Left) | Op::infix(Rule::op_ne, Assoc::Left))
        .op(Op::infix(Rule::op_lt, Assoc::Left)
            | Op::infix(Rule::op_gt, Assoc::Left)
            | Op::infix(Rule::op_le, Assoc::Left)
            | Op::infix(Rule::op_ge, Assoc::Left)
            | Op::postfix(Rule::instanceof_suffix))
        .op(Op::infix(Rule::op_shl, Assoc::Left)
            | Op::infix(Rule::op_shr, Assoc::Left)
            | Op::infix(Rule::op_ushr, Assoc::Left))
        .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_sub, Assoc::Left))
        .op(Op::infix(Rule::op_mul, Assoc::Left)
            | Op::infix(Rule::op_div, Assoc::Left)
            | Op::infix(Rule::op_rem, Assoc::Left))
});

/// A parsed source file: the text and its AST.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub source: SourceText,
    pub unit: CompilationUnit,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses Java source text into a compilation unit.
pub fn parse(name: &str, text: &str) -> Result<ParsedFile, TranslateError> {
    let source = SourceText::new(name, text);
    let unit = {
        let mut pairs = JavaParser::parse(Rule::compilation_unit, text)
            .map_err(|e| convert_parse_error(e, &source))?;
        let builder = Builder {
            scanner: TextScanner::new(&source, 4),
            source: &source,
        };
        let unit_pair = builder.next(&mut pairs, "compilation unit")?;
        builder.compilation_unit(unit_pair)?
    };
    debug!(file = name, types = unit.types.len(), "parsed");
    Ok(ParsedFile { source, unit })
}

fn convert_parse_error(error: Error<Rule>, source: &SourceText) -> TranslateError {
    let span = match &error.location {
        InputLocation::Pos(pos) => Span::new(*pos, *pos),
        InputLocation::Span((start, end)) => Span::new(*start, *end),
    };
    let error = error.renamed_rules(|rule| rule_description(*rule).to_string());
    err_ctx!(Parse, error.variant.message(), &source.named_source(), span)
}

fn rule_description(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::identifier => "identifier",
        Rule::expression => "expression",
        Rule::java_type | Rule::class_type | Rule::primitive_type => "type",
        Rule::type_declaration => "class or interface declaration",
        Rule::import_declaration => "import",
        Rule::package_declaration => "package declaration",
        Rule::method_declaration | Rule::field_declaration => "member declaration",
        Rule::block => "block",
        Rule::modifier => "modifier",
        Rule::annotation => "annotation",
        Rule::assignment_operator => "assignment operator",
        Rule::formal_parameter => "parameter",
        Rule::variable_declarator => "variable declarator",
        Rule::local_variable_declaration_statement
        | Rule::if_statement
        | Rule::while_statement
        | Rule::do_statement
        | Rule::for_statement
        | Rule::enhanced_for_statement
        | Rule::return_statement
        | Rule::break_statement
        | Rule::continue_statement
        | Rule::throw_statement
        | Rule::empty_statement
        | Rule::expression_statement => "statement",
        _ => "token",
    }
}

/// Keyword tokens carry no information once matched, except the ones that select a variant.
fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_package
            | Rule::kw_import
            | Rule::kw_extends
            | Rule::kw_implements
            | Rule::kw_throws
            | Rule::kw_if
            | Rule::kw_else
            | Rule::kw_while
            | Rule::kw_do
            | Rule::kw_for
            | Rule::kw_return
            | Rule::kw_break
            | Rule::kw_continue
            | Rule::kw_throw
            | Rule::kw_new
            | Rule::kw_instanceof
    )
}

fn inner(pair: Pair<'_, Rule>) -> impl Iterator<Item = Pair<'_, Rule>> {
    pair.into_inner().filter(|p| !is_keyword(p.as_rule()))
}

fn dimension_count(pair: &Pair<'_, Rule>) -> usize {
    pair.as_str().matches('[').count()
}

// ============================================================================
// AST BUILDERS
// ============================================================================

struct Builder<'s> {
    scanner: TextScanner<'s>,
    source: &'s SourceText,
}

type BuildResult<T> = Result<T, TranslateError>;

impl<'s> Builder<'s> {
    fn span(&self, pair: &Pair<'_, Rule>) -> Span {
        let raw = pair.as_span();
        let start = self
            .scanner
            .skip_space_and_comments(raw.start(), false)
            .min(raw.end());
        let end = self
            .scanner
            .skip_space_and_comments_backward(raw.end())
            .max(start);
        Span::new(start, end)
    }

    fn malformed(&self, what: &str, span: Span) -> TranslateError {
        let source = self.source.named_source();
        err_ctx!(Parse, format!("malformed parse tree: expected {}", what), &source, span)
    }

    fn unexpected(&self, pair: &Pair<'_, Rule>) -> TranslateError {
        self.malformed(&format!("not {:?}", pair.as_rule()), self.span(pair))
    }

    fn next<'i>(
        &self,
        pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
        what: &str,
    ) -> BuildResult<Pair<'i, Rule>> {
        pairs
            .next()
            .ok_or_else(|| self.malformed(what, Span::new(self.source.len(), self.source.len())))
    }

    // ------------------------------------------------------------------------
    // Names and modifiers
    // ------------------------------------------------------------------------

    fn simple_name(&self, pair: Pair<'_, Rule>) -> SimpleName {
        SimpleName {
            span: self.span(&pair),
            identifier: pair.as_str().to_string(),
        }
    }

    fn name(&self, pair: Pair<'_, Rule>) -> Name {
        let span = self.span(&pair);
        let segments = inner(pair).map(|p| self.simple_name(p)).collect();
        Name { span, segments }
    }

    fn extended_modifier(&self, pair: Pair<'_, Rule>) -> BuildResult<ExtendedModifier> {
        let span = self.span(&pair);
        match pair.as_rule() {
            Rule::modifier => {
                let keyword = ModifierKeyword::from_keyword(pair.as_str())
                    .ok_or_else(|| self.malformed("modifier keyword", span))?;
                Ok(ExtendedModifier::Modifier(Modifier { span, keyword }))
            }
            Rule::annotation => {
                let mut parts = inner(pair);
                let name = self.name(self.next(&mut parts, "annotation name")?);
                Ok(ExtendedModifier::Annotation(Annotation { span, name }))
            }
            _ => Err(self.unexpected(&pair)),
        }
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    fn primitive_type(&self, pair: Pair<'_, Rule>) -> BuildResult<Type> {
        let span = self.span(&pair);
        let kind = PrimitiveKind::from_keyword(pair.as_str())
            .ok_or_else(|| self.malformed("primitive type", span))?;
        Ok(Type::Primitive(PrimitiveType { span, kind }))
    }

    fn class_type(&self, pair: Pair<'_, Rule>) -> BuildResult<Type> {
        let span = self.span(&pair);
        let mut parts = inner(pair);
        let name = self.name(self.next(&mut parts, "type name")?);
        let base = SimpleType {
            span: name.span,
            name,
        };
        match parts.next() {
            Some(arguments) => {
                let arguments = inner(arguments)
                    .map(|p| self.java_type(p))
                    .collect::<BuildResult<Vec<_>>>()?;
                Ok(Type::Parameterized(ParameterizedType {
                    span,
                    base,
                    arguments,
                }))
            }
            None => Ok(Type::Simple(base)),
        }
    }

    fn element_type(&self, pair: Pair<'_, Rule>) -> BuildResult<Type> {
        match pair.as_rule() {
            Rule::primitive_type | Rule::void_type => self.primitive_type(pair),
            Rule::class_type => self.class_type(pair),
            Rule::java_type => self.java_type(pair),
            _ => Err(self.unexpected(&pair)),
        }
    }

    fn java_type(&self, pair: Pair<'_, Rule>) -> BuildResult<Type> {
        let span = self.span(&pair);
        let mut parts = inner(pair);
        let element = self.element_type(self.next(&mut parts, "type")?)?;
        match parts.next() {
            Some(dims) => Ok(Type::Array(ArrayType {
                span,
                element_type: Box::new(element),
                dimensions: dimension_count(&dims),
            })),
            None => Ok(element),
        }
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    fn compilation_unit(&self, pair: Pair<'_, Rule>) -> BuildResult<CompilationUnit> {
        let mut unit = CompilationUnit {
            span: self.span(&pair),
            package: None,
            imports: Vec::new(),
            types: Vec::new(),
        };
        for p in inner(pair) {
            match p.as_rule() {
                Rule::package_declaration => {
                    let span = self.span(&p);
                    let mut parts = inner(p);
                    let name = self.name(self.next(&mut parts, "package name")?);
                    unit.package = Some(PackageDeclaration { span, name });
                }
                Rule::import_declaration => unit.imports.push(self.import(p)?),
                Rule::type_declaration => unit.types.push(self.type_declaration(p)?),
                Rule::EOI => {}
                _ => return Err(self.unexpected(&p)),
            }
        }
        Ok(unit)
    }

    fn import(&self, pair: Pair<'_, Rule>) -> BuildResult<ImportDeclaration> {
        let span = self.span(&pair);
        let mut is_static = false;
        let mut on_demand = false;
        let mut name = None;
        for p in inner(pair) {
            match p.as_rule() {
                Rule::import_static => is_static = true,
                Rule::qualified_name => name = Some(self.name(p)),
                Rule::import_on_demand => on_demand = true,
                _ => return Err(self.unexpected(&p)),
            }
        }
        let name = name.ok_or_else(|| self.malformed("import name", span))?;
        Ok(ImportDeclaration {
            span,
            is_static,
            name,
            on_demand,
        })
    }

    fn type_declaration(&self, pair: Pair<'_, Rule>) -> BuildResult<TypeDeclaration> {
        let span = self.span(&pair);
        let mut modifiers = Vec::new();
        let mut is_interface = false;
        let mut name = None;
        let mut type_parameters = Vec::new();
        let mut extends = Vec::new();
        let mut implements = Vec::new();
        let mut body_span = None;
        let mut body = Vec::new();

        for p in inner(pair) {
            match p.as_rule() {
                Rule::modifier | Rule::annotation => modifiers.push(self.extended_modifier(p)?),
                Rule::kw_class => is_interface = false,
                Rule::kw_interface => is_interface = true,
                Rule::identifier => name = Some(self.simple_name(p)),
                Rule::type_parameters => {
                    for tp in inner(p) {
                        let tp_span = self.span(&tp);
                        let mut parts = inner(tp);
                        let tp_name = self.simple_name(self.next(&mut parts, "type parameter")?);
                        type_parameters.push(TypeParameter {
                            span: tp_span,
                            name: tp_name,
                        });
                    }
                }
                Rule::extends_clause => {
                    for t in inner(p) {
                        extends.push(self.class_type(t)?);
                    }
                }
                Rule::implements_clause => {
                    for t in inner(p) {
                        implements.push(self.class_type(t)?);
                    }
                }
                Rule::class_body => {
                    body_span = Some(self.span(&p));
                    for member in inner(p) {
                        body.push(self.body_declaration(member)?);
                    }
                }
                _ => return Err(self.unexpected(&p)),
            }
        }

        Ok(TypeDeclaration {
            span,
            modifiers,
            is_interface,
            name: name.ok_or_else(|| self.malformed("type name", span))?,
            type_parameters,
            extends,
            implements,
            body_span: body_span.ok_or_else(|| self.malformed("class body", span))?,
            body,
        })
    }

    fn body_declaration(&self, pair: Pair<'_, Rule>) -> BuildResult<BodyDeclaration> {
        match pair.as_rule() {
            Rule::type_declaration => Ok(BodyDeclaration::Type(self.type_declaration(pair)?)),
            Rule::method_declaration => Ok(BodyDeclaration::Method(self.method(pair)?)),
            Rule::field_declaration => {
                let span = self.span(&pair);
                let (modifiers, field_type, fragments) = self.variable_parts(pair)?;
                Ok(BodyDeclaration::Field(FieldDeclaration {
                    span,
                    modifiers,
                    field_type,
                    fragments,
                }))
            }
            _ => Err(self.unexpected(&pair)),
        }
    }

    fn method(&self, pair: Pair<'_, Rule>) -> BuildResult<MethodDeclaration> {
        let span = self.span(&pair);
        let mut modifiers = Vec::new();
        let mut return_type = None;
        let mut name = None;
        let mut parameters = Vec::new();
        let mut thrown_exceptions = Vec::new();
        let mut body = None;

        for p in inner(pair) {
            match p.as_rule() {
                Rule::modifier | Rule::annotation => modifiers.push(self.extended_modifier(p)?),
                Rule::void_type | Rule::java_type => return_type = Some(self.element_type(p)?),
                Rule::identifier => name = Some(self.simple_name(p)),
                Rule::formal_parameters => {
                    for param in inner(p) {
                        parameters.push(self.parameter(param)?);
                    }
                }
                Rule::throws_clause => {
                    for t in inner(p) {
                        thrown_exceptions.push(self.class_type(t)?);
                    }
                }
                Rule::block => body = Some(self.block(p)?),
                _ => return Err(self.unexpected(&p)),
            }
        }

        Ok(MethodDeclaration {
            span,
            modifiers,
            return_type,
            name: name.ok_or_else(|| self.malformed("method name", span))?,
            parameters,
            thrown_exceptions,
            body,
        })
    }

    fn parameter(&self, pair: Pair<'_, Rule>) -> BuildResult<SingleVariableDeclaration> {
        let span = self.span(&pair);
        let mut modifiers = Vec::new();
        let mut var_type = None;
        let mut name = None;
        let mut extra_dimensions = 0;
        for p in inner(pair) {
            match p.as_rule() {
                Rule::modifier | Rule::annotation => modifiers.push(self.extended_modifier(p)?),
                Rule::java_type => var_type = Some(self.java_type(p)?),
                Rule::identifier => name = Some(self.simple_name(p)),
                Rule::dims => extra_dimensions = dimension_count(&p),
                _ => return Err(self.unexpected(&p)),
            }
        }
        Ok(SingleVariableDeclaration {
            span,
            modifiers,
            var_type: var_type.ok_or_else(|| self.malformed("parameter type", span))?,
            name: name.ok_or_else(|| self.malformed("parameter name", span))?,
            extra_dimensions,
        })
    }

    /// Modifiers, type and declarators of a field or local variable declaration.
    fn variable_parts(
        &self,
        pair: Pair<'_, Rule>,
    ) -> BuildResult<(Vec<ExtendedModifier>, Type, Vec<VariableDeclarationFragment>)> {
        let span = self.span(&pair);
        let mut modifiers = Vec::new();
        let mut var_type = None;
        let mut fragments = Vec::new();
        for p in inner(pair) {
            match p.as_rule() {
                Rule::modifier | Rule::annotation => modifiers.push(self.extended_modifier(p)?),
                Rule::java_type => var_type = Some(self.java_type(p)?),
                Rule::variable_declarator => fragments.push(self.fragment(p)?),
                _ => return Err(self.unexpected(&p)),
            }
        }
        let var_type = var_type.ok_or_else(|| self.malformed("variable type", span))?;
        Ok((modifiers, var_type, fragments))
    }

    fn fragment(&self, pair: Pair<'_, Rule>) -> BuildResult<VariableDeclarationFragment> {
        let span = self.span(&pair);
        let mut name = None;
        let mut extra_dimensions = 0;
        let mut initializer = None;
        for p in inner(pair) {
            match p.as_rule() {
                Rule::identifier => name = Some(self.simple_name(p)),
                Rule::dims => extra_dimensions = dimension_count(&p),
                _ => initializer = Some(self.expression(p)?),
            }
        }
        Ok(VariableDeclarationFragment {
            span,
            name: name.ok_or_else(|| self.malformed("variable name", span))?,
            extra_dimensions,
            initializer,
        })
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn block(&self, pair: Pair<'_, Rule>) -> BuildResult<Block> {
        let span = self.span(&pair);
        let statements = inner(pair)
            .map(|p| self.statement(p))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Block { span, statements })
    }

    fn boxed_statement<'i>(
        &self,
        parts: &mut impl Iterator<Item = Pair<'i, Rule>>,
    ) -> BuildResult<Box<Statement>> {
        Ok(Box::new(self.statement(self.next(parts, "statement")?)?))
    }

    fn statement(&self, pair: Pair<'_, Rule>) -> BuildResult<Statement> {
        let span = self.span(&pair);
        let rule = pair.as_rule();
        let statement = match rule {
            Rule::block => Statement::Block(self.block(pair)?),
            Rule::local_variable_declaration_statement => {
                let mut parts = inner(pair);
                let declaration = self.next(&mut parts, "local variable declaration")?;
                let (modifiers, var_type, fragments) = self.variable_parts(declaration)?;
                Statement::VariableDeclaration(VariableDeclarationStatement {
                    span,
                    modifiers,
                    var_type,
                    fragments,
                })
            }
            Rule::expression_statement => {
                let mut parts = inner(pair);
                let expression = self.expression(self.next(&mut parts, "expression")?)?;
                Statement::Expression(ExpressionStatement { span, expression })
            }
            Rule::if_statement => {
                let mut parts = inner(pair);
                let condition = self.expression(self.next(&mut parts, "condition")?)?;
                let then_statement = self.boxed_statement(&mut parts)?;
                let else_statement = match parts.next() {
                    Some(p) => Some(Box::new(self.statement(p)?)),
                    None => None,
                };
                Statement::If(IfStatement {
                    span,
                    condition,
                    then_statement,
                    else_statement,
                })
            }
            Rule::while_statement => {
                let mut parts = inner(pair);
                let condition = self.expression(self.next(&mut parts, "condition")?)?;
                let body = self.boxed_statement(&mut parts)?;
                Statement::While(WhileStatement {
                    span,
                    condition,
                    body,
                })
            }
            Rule::do_statement => {
                let mut parts = inner(pair);
                let body = self.boxed_statement(&mut parts)?;
                let condition = self.expression(self.next(&mut parts, "condition")?)?;
                Statement::Do(DoStatement {
                    span,
                    body,
                    condition,
                })
            }
            Rule::for_statement => self.for_statement(pair)?,
            Rule::enhanced_for_statement => {
                let mut parts = inner(pair);
                let parameter = self.parameter(self.next(&mut parts, "loop variable")?)?;
                let expression = self.expression(self.next(&mut parts, "iterable")?)?;
                let body = self.boxed_statement(&mut parts)?;
                Statement::EnhancedFor(EnhancedForStatement {
                    span,
                    parameter,
                    expression,
                    body,
                })
            }
            Rule::return_statement => {
                let expression = match inner(pair).next() {
                    Some(p) => Some(self.expression(p)?),
                    None => None,
                };
                Statement::Return(ReturnStatement { span, expression })
            }
            Rule::break_statement => Statement::Break(BreakStatement {
                span,
                label: inner(pair).next().map(|p| self.simple_name(p)),
            }),
            Rule::continue_statement => Statement::Continue(ContinueStatement {
                span,
                label: inner(pair).next().map(|p| self.simple_name(p)),
            }),
            Rule::throw_statement => {
                let mut parts = inner(pair);
                let expression = self.expression(self.next(&mut parts, "exception")?)?;
                Statement::Throw(ThrowStatement { span, expression })
            }
            Rule::empty_statement => Statement::Empty(EmptyStatement { span }),
            _ => return Err(self.unexpected(&pair)),
        };
        Ok(statement)
    }

    fn for_statement(&self, pair: Pair<'_, Rule>) -> BuildResult<Statement> {
        let span = self.span(&pair);
        let mut initializers = Vec::new();
        let mut condition = None;
        let mut updaters = Vec::new();
        let mut body = None;
        for p in inner(pair) {
            match p.as_rule() {
                Rule::for_init => {
                    for init in inner(p) {
                        if init.as_rule() == Rule::local_variable_declaration {
                            let init_span = self.span(&init);
                            let (modifiers, var_type, fragments) = self.variable_parts(init)?;
                            initializers.push(Expression::VariableDeclaration(
                                VariableDeclarationExpression {
                                    span: init_span,
                                    modifiers,
                                    var_type,
                                    fragments,
                                },
                            ));
                        } else {
                            initializers.push(self.expression(init)?);
                        }
                    }
                }
                Rule::expression => condition = Some(self.expression(p)?),
                Rule::for_update => {
                    for update in inner(p) {
                        updaters.push(self.expression(update)?);
                    }
                }
                _ => body = Some(Box::new(self.statement(p)?)),
            }
        }
        Ok(Statement::For(ForStatement {
            span,
            initializers,
            condition,
            updaters,
            body: body.ok_or_else(|| self.malformed("loop body", span))?,
        }))
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn boxed_expression<'i>(
        &self,
        parts: &mut impl Iterator<Item = Pair<'i, Rule>>,
        what: &str,
    ) -> BuildResult<Box<Expression>> {
        Ok(Box::new(self.expression(self.next(parts, what)?)?))
    }

    fn arguments(&self, pair: Pair<'_, Rule>) -> BuildResult<Vec<Expression>> {
        inner(pair).map(|p| self.expression(p)).collect()
    }

    fn expression(&self, pair: Pair<'_, Rule>) -> BuildResult<Expression> {
        let span = self.span(&pair);
        let expression = match pair.as_rule() {
            Rule::expression | Rule::unary_expression if pair.clone().into_inner().count() == 1 => {
                let mut parts = inner(pair);
                return self.expression(self.next(&mut parts, "expression")?);
            }
            Rule::unary_expression => {
                let mut parts = inner(pair);
                let op = self.next(&mut parts, "prefix operator")?;
                let operator = PrefixOperator::from_token(op.as_str())
                    .ok_or_else(|| self.malformed("prefix operator", span))?;
                Expression::Prefix(PrefixExpression {
                    span,
                    operator,
                    operand: self.boxed_expression(&mut parts, "operand")?,
                })
            }
            Rule::assignment => {
                let mut parts = inner(pair);
                let left = self.boxed_expression(&mut parts, "assignment target")?;
                let op = self.next(&mut parts, "assignment operator")?;
                let operator = AssignmentOperator::from_token(op.as_str())
                    .ok_or_else(|| self.malformed("assignment operator", span))?;
                let right = self.boxed_expression(&mut parts, "assigned value")?;
                Expression::Assignment(Assignment {
                    span,
                    left,
                    operator,
                    right,
                })
            }
            Rule::conditional_expression => {
                let mut parts = inner(pair);
                let condition = self.next(&mut parts, "expression")?;
                match parts.next() {
                    None => return self.expression(condition),
                    Some(then_pair) => Expression::Conditional(ConditionalExpression {
                        span,
                        condition: Box::new(self.expression(condition)?),
                        then_expression: Box::new(self.expression(then_pair)?),
                        else_expression: self.boxed_expression(&mut parts, "else branch")?,
                    }),
                }
            }
            Rule::binary_expression => return self.binary(pair.into_inner()),
            Rule::cast_expression => {
                let mut parts = inner(pair);
                let cast_type = self.java_type(self.next(&mut parts, "cast type")?)?;
                Expression::Cast(CastExpression {
                    span,
                    cast_type,
                    expression: self.boxed_expression(&mut parts, "cast operand")?,
                })
            }
            Rule::postfix_expression => return self.postfix(pair),
            Rule::parenthesized => {
                let mut parts = inner(pair);
                Expression::Parenthesized(ParenthesizedExpression {
                    span,
                    expression: self.boxed_expression(&mut parts, "expression")?,
                })
            }
            Rule::this_expression => Expression::This(ThisExpression { span }),
            Rule::identifier => Expression::Name(self.simple_name(pair)),
            Rule::unqualified_call => {
                let mut parts = inner(pair);
                let name = self.simple_name(self.next(&mut parts, "method name")?);
                let arguments = self.arguments(self.next(&mut parts, "arguments")?)?;
                Expression::MethodInvocation(MethodInvocation {
                    span,
                    expression: None,
                    name,
                    arguments,
                })
            }
            Rule::class_instance_creation => {
                let mut parts = inner(pair);
                let class_type = self.class_type(self.next(&mut parts, "class type")?)?;
                let arguments = self.arguments(self.next(&mut parts, "arguments")?)?;
                Expression::ClassInstanceCreation(ClassInstanceCreation {
                    span,
                    class_type,
                    arguments,
                })
            }
            Rule::array_creation => self.array_creation(pair)?,
            Rule::array_initializer => Expression::ArrayInitializer(self.array_initializer(pair)?),
            Rule::integer_literal => self.literal(pair, LiteralKind::Integer),
            Rule::float_literal => self.literal(pair, LiteralKind::Float),
            Rule::char_literal => self.literal(pair, LiteralKind::Character),
            Rule::string_literal => self.literal(pair, LiteralKind::String),
            Rule::boolean_literal => self.literal(pair, LiteralKind::Boolean),
            Rule::null_literal => self.literal(pair, LiteralKind::Null),
            _ => return Err(self.unexpected(&pair)),
        };
        Ok(expression)
    }

    fn literal(&self, pair: Pair<'_, Rule>, kind: LiteralKind) -> Expression {
        Expression::Literal(Literal {
            span: self.span(&pair),
            kind,
            token: pair.as_str().to_string(),
        })
    }

    fn binary(&self, pairs: Pairs<'_, Rule>) -> BuildResult<Expression> {
        PRATT
            .map_primary(|primary| self.expression(primary))
            .map_infix(|lhs, op, rhs| {
                let (left, right) = (lhs?, rhs?);
                let span = left.span().to(right.span());
                let operator = InfixOperator::from_token(op.as_str())
                    .ok_or_else(|| self.malformed("binary operator", span))?;
                Ok(Expression::Infix(InfixExpression {
                    span,
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                }))
            })
            .map_postfix(|lhs, op| {
                let expression = lhs?;
                let op_span = self.span(&op);
                let mut parts = inner(op);
                let right_type = self.java_type(self.next(&mut parts, "type")?)?;
                Ok(Expression::Instanceof(InstanceofExpression {
                    span: expression.span().to(op_span),
                    expression: Box::new(expression),
                    right_type,
                }))
            })
            .parse(pairs)
    }

    fn postfix(&self, pair: Pair<'_, Rule>) -> BuildResult<Expression> {
        let mut parts = inner(pair);
        let mut expression = self.expression(self.next(&mut parts, "primary expression")?)?;
        for p in parts {
            let span = expression.span().to(self.span(&p));
            expression = match p.as_rule() {
                Rule::method_selector => {
                    let mut selector = inner(p);
                    let name = self.simple_name(self.next(&mut selector, "method name")?);
                    let arguments = self.arguments(self.next(&mut selector, "arguments")?)?;
                    Expression::MethodInvocation(MethodInvocation {
                        span,
                        expression: Some(Box::new(expression)),
                        name,
                        arguments,
                    })
                }
                Rule::field_selector => {
                    let mut selector = inner(p);
                    let name = self.simple_name(self.next(&mut selector, "field name")?);
                    Expression::FieldAccess(FieldAccess {
                        span,
                        expression: Box::new(expression),
                        name,
                    })
                }
                Rule::index_selector => {
                    let mut selector = inner(p);
                    Expression::ArrayAccess(ArrayAccess {
                        span,
                        array: Box::new(expression),
                        index: self.boxed_expression(&mut selector, "index")?,
                    })
                }
                Rule::postfix_operator => {
                    let operator = PostfixOperator::from_token(p.as_str())
                        .ok_or_else(|| self.malformed("postfix operator", span))?;
                    Expression::Postfix(PostfixExpression {
                        span,
                        operand: Box::new(expression),
                        operator,
                    })
                }
                _ => return Err(self.unexpected(&p)),
            };
        }
        Ok(expression)
    }

    fn array_creation(&self, pair: Pair<'_, Rule>) -> BuildResult<Expression> {
        let span = self.span(&pair);
        let mut parts = inner(pair);
        let element_type = self.element_type(self.next(&mut parts, "element type")?)?;
        let mut dimensions = Vec::new();
        let mut extra_dimensions = 0;
        let mut initializer = None;
        for p in parts {
            match p.as_rule() {
                Rule::dim_expr => {
                    let mut dim = inner(p);
                    dimensions.push(self.expression(self.next(&mut dim, "dimension")?)?);
                }
                Rule::dims => extra_dimensions = dimension_count(&p),
                Rule::array_initializer => initializer = Some(self.array_initializer(p)?),
                _ => return Err(self.unexpected(&p)),
            }
        }
        Ok(Expression::ArrayCreation(ArrayCreation {
            span,
            element_type,
            dimensions,
            extra_dimensions,
            initializer,
        }))
    }

    fn array_initializer(&self, pair: Pair<'_, Rule>) -> BuildResult<ArrayInitializer> {
        let span = self.span(&pair);
        let expressions = inner(pair)
            .map(|p| self.expression(p))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(ArrayInitializer { span, expressions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    fn unit(text: &str) -> CompilationUnit {
        parse("Test.java", text).expect("parse").unit
    }

    fn first_method(unit: &CompilationUnit) -> &MethodDeclaration {
        unit.types[0]
            .body
            .iter()
            .find_map(|b| match b {
                BodyDeclaration::Method(m) => Some(m),
                _ => None,
            })
            .expect("method")
    }

    #[test]
    fn spans_exclude_surrounding_comments() {
        let text = "package a.b;\n\n/** doc */\npublic class Foo { int x; } // tail\n";
        let unit = unit(text);
        let ty = &unit.types[0];
        assert_eq!(&text[ty.span.start..ty.span.end], "public class Foo { int x; }");
        assert_eq!(unit.span.start, 0);
        assert_eq!(unit.span.end, ty.span.end);
        let package = unit.package.as_ref().unwrap();
        assert_eq!(package.name.joined("."), "a.b");
    }

    #[test]
    fn imports_record_static_and_on_demand() {
        let unit = unit("import java.util.*;\nimport static a.B.c;\nimport x.Y;\nclass A {}");
        assert!(unit.imports[0].on_demand);
        assert!(!unit.imports[0].is_static);
        assert!(unit.imports[1].is_static);
        assert_eq!(unit.imports[2].name.last().identifier, "Y");
    }

    #[test]
    fn constructor_and_method_headers() {
        let unit = unit("class A { A(int x) {} public void run() throws E {} abstract int f(); }");
        let methods: Vec<_> = unit.types[0]
            .body
            .iter()
            .filter_map(|b| match b {
                BodyDeclaration::Method(m) => Some(m),
                _ => None,
            })
            .collect();
        assert!(methods[0].is_constructor());
        assert_eq!(methods[1].thrown_exceptions.len(), 1);
        assert!(methods[2].body.is_none());
    }

    #[test]
    fn binary_precedence_is_java() {
        let text = "class A { void f() { x = a + b * c == d || e; } }";
        let unit = unit(text);
        let body = first_method(&unit).body.as_ref().unwrap();
        let Statement::Expression(stmt) = &body.statements[0] else {
            panic!("expression statement")
        };
        let Expression::Assignment(assign) = &stmt.expression else {
            panic!("assignment")
        };
        let Expression::Infix(or) = assign.right.as_ref() else {
            panic!("infix")
        };
        assert_eq!(or.operator, InfixOperator::ConditionalOr);
        let Expression::Infix(eq) = or.left.as_ref() else {
            panic!("infix")
        };
        assert_eq!(eq.operator, InfixOperator::Equals);
        assert_eq!(&text[eq.span.start..eq.span.end], "a + b * c == d");
    }

    #[test]
    fn keywords_need_identifier_boundary() {
        let unit = unit("class A { int interfaceCount; int returned() { return 1; } }");
        assert_eq!(unit.types[0].body.len(), 2);
    }

    #[test]
    fn local_declaration_versus_expression_statement() {
        let unit = unit("class A { void f() { int a, b = 2; a = b; List<String> l = null; } }");
        let stmts = &first_method(&unit).body.as_ref().unwrap().statements;
        assert!(matches!(stmts[0], Statement::VariableDeclaration(ref d) if d.fragments.len() == 2));
        assert!(matches!(stmts[1], Statement::Expression(_)));
        assert!(matches!(stmts[2], Statement::VariableDeclaration(_)));
    }

    #[test]
    fn selectors_fold_left() {
        let text = "class A { void f() { System.out.println(x[0]); } }";
        let unit = unit(text);
        let stmts = &first_method(&unit).body.as_ref().unwrap().statements;
        let Statement::Expression(stmt) = &stmts[0] else {
            panic!("expression statement")
        };
        let Expression::MethodInvocation(call) = &stmt.expression else {
            panic!("call")
        };
        assert_eq!(call.name.identifier, "println");
        assert!(matches!(call.expression.as_deref(), Some(Expression::FieldAccess(_))));
        assert!(matches!(call.arguments[0], Expression::ArrayAccess(_)));
    }

    #[test]
    fn casts_and_parentheses() {
        let text = "class A { void f() { y = (int) x; z = (a) - b; w = (String) o; } }";
        let unit = unit(text);
        let stmts = &first_method(&unit).body.as_ref().unwrap().statements;
        let rhs = |i: usize| match &stmts[i] {
            Statement::Expression(ExpressionStatement {
                expression: Expression::Assignment(a),
                ..
            }) => a.right.as_ref().clone(),
            _ => panic!("assignment"),
        };
        assert!(matches!(rhs(0), Expression::Cast(_)));
        assert!(matches!(rhs(1), Expression::Infix(_)));
        assert!(matches!(rhs(2), Expression::Cast(_)));
    }

    #[test]
    fn syntax_error_is_parse_error_with_label() {
        let err = parse("Bad.java", "class A { int x = ; }").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Parse);
        assert!(miette::Diagnostic::labels(&err).is_some());
    }

    #[test]
    fn malformed_tree_error_points_into_the_source() {
        let source = SourceText::new("Odd.java", "class A {}");
        let builder = Builder {
            scanner: TextScanner::new(&source, 4),
            source: &source,
        };
        let err = builder.malformed("type body", Span::new(8, 10));
        assert_eq!(err.error_type(), ErrorType::Parse);
        assert!(err.to_string().contains("expected type body"));
        assert!(miette::Diagnostic::source_code(&err).is_some());
        let label = miette::Diagnostic::labels(&err).unwrap().next().unwrap();
        assert_eq!(label.offset(), 8);
        assert_eq!(label.len(), 2);
    }
}
