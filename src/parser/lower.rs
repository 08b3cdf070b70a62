//! Lowering of the `mago_syntax` tree into [`crate::syntax`].

use std::fmt::Display;

use mago_span::HasSpan;
use mago_syntax::ast as php;
use smol_str::SmolStr;
use text_size::TextSize;

use super::ParseOptions;
use super::clauses::{self, ClassHeader};
use super::comments::leading_comments;
use super::error::{ParseError, ParseErrorKind};
use crate::base::{LineIndex, Position, Span};
use crate::syntax::{
    Assign, Block, Catch, ClassConstant, ClassLike, ClassLikeKind, ClassMember, Comment, Compound,
    ExpressionStatement, Function, Item, Method, Namespace, Parameter, ParsedUnit, Property,
    Statement, TraitUse, Try, UseGroup, VariableList, Visibility,
};

/// Maps one parsed program onto the completion tree.
pub(super) struct Lowering<'s> {
    source: &'s str,
    line_index: LineIndex,
    options: ParseOptions,
}

impl<'s> Lowering<'s> {
    pub(super) fn new(source: &'s str, options: &ParseOptions) -> Self {
        Self {
            source,
            line_index: LineIndex::new(source),
            options: *options,
        }
    }

    pub(super) fn unit<'a>(
        &self,
        statements: impl Iterator<Item = &'a php::Statement<'a>>,
    ) -> ParsedUnit {
        ParsedUnit {
            items: statements.filter_map(|stmt| self.item(stmt)).collect(),
            span: self.offsets(0, self.source.len() as u32),
        }
    }

    /// First syntax error of the program, positioned in this source.
    pub(super) fn error(&self, error: &(impl HasSpan + Display)) -> ParseError {
        let offset = error.span().start.offset;
        let kind = if offset as usize >= self.source.trim_end().len() {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::UnexpectedToken
        };
        ParseError::new(kind, error.to_string(), self.position(offset))
    }

    // ------------------------------------------------------------------
    // Positions
    // ------------------------------------------------------------------

    fn position(&self, offset: u32) -> Position {
        self.line_index.position(self.source, TextSize::new(offset))
    }

    fn offsets(&self, start: u32, end: u32) -> Span {
        if !self.options.with_positions {
            return Span::default();
        }
        Span::new(self.position(start), self.position(end))
    }

    fn span(&self, span: mago_span::Span) -> Span {
        self.offsets(span.start.offset, span.end.offset)
    }

    fn text(&self, span: mago_span::Span) -> &'s str {
        self.source
            .get(span.start.offset as usize..span.end.offset as usize)
            .unwrap_or_default()
    }

    fn comments(&self, span: mago_span::Span) -> Vec<Comment> {
        if !self.options.extract_doc {
            return Vec::new();
        }
        leading_comments(self.source, span.start.offset as usize)
            .into_iter()
            .map(|(kind, range)| Comment {
                kind,
                text: self.source[range.clone()].to_string(),
                span: self.offsets(range.start as u32, range.end as u32),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    fn item(&self, statement: &php::Statement) -> Option<Item> {
        match statement {
            php::Statement::Namespace(namespace) => {
                Some(Item::Namespace(self.namespace(namespace)))
            }
            php::Statement::Use(import) => {
                let span = import.span();
                let (kind, items) = clauses::use_clause(self.text(span))?;
                Some(Item::Use(UseGroup {
                    kind,
                    items,
                    span: self.span(span),
                }))
            }
            other => self.statement(other).map(|stmt| match stmt {
                Statement::ClassLike(class) => Item::ClassLike(class),
                Statement::Function(function) => Item::Function(function),
                stmt => Item::Statement(stmt),
            }),
        }
    }

    fn namespace(&self, namespace: &php::Namespace) -> Namespace {
        let span = namespace.span();
        let (name, braced) = clauses::namespace_header(self.text(span));
        Namespace {
            name,
            items: namespace
                .statements()
                .iter()
                .filter_map(|stmt| self.item(stmt))
                .collect(),
            braced,
            span: self.span(span),
        }
    }

    // ------------------------------------------------------------------
    // Class-likes
    // ------------------------------------------------------------------

    fn class_like<'a>(
        &self,
        kind: ClassLikeKind,
        name: SmolStr,
        span: mago_span::Span,
        body_start: u32,
        members: impl Iterator<Item = &'a php::ClassLikeMember<'a>>,
    ) -> ClassLike {
        let header = self
            .source
            .get(span.start.offset as usize..body_start as usize)
            .unwrap_or_default();
        let header = ClassHeader::parse(header);
        ClassLike {
            kind,
            name,
            extends: header.extends,
            implements: header.implements,
            is_abstract: header.is_abstract,
            is_final: header.is_final,
            members: self.members(members),
            leading_comments: self.comments(span),
            span: self.span(span),
        }
    }

    fn members<'a>(
        &self,
        members: impl Iterator<Item = &'a php::ClassLikeMember<'a>>,
    ) -> Vec<ClassMember> {
        let mut lowered = Vec::new();
        for member in members {
            match member {
                php::ClassLikeMember::Method(method) => {
                    lowered.push(ClassMember::Method(self.method(method)));
                }
                php::ClassLikeMember::Property(property) => self.property(property, &mut lowered),
                php::ClassLikeMember::Constant(constant) => {
                    let mut modifiers = Modifiers::default();
                    for modifier in constant.modifiers.iter() {
                        modifiers.add(modifier);
                    }
                    let span = constant.span();
                    let comments = self.comments(span);
                    for item in constant.items.iter() {
                        lowered.push(ClassMember::Constant(ClassConstant {
                            name: name_of(&item.name.value),
                            visibility: modifiers.visibility,
                            value_raw: self.text(item.value.span()).trim().to_string(),
                            leading_comments: comments.clone(),
                            span: self.span(span),
                        }));
                    }
                }
                php::ClassLikeMember::EnumCase(case) => {
                    let span = case.span();
                    if let Some((name, value_raw)) = clauses::enum_case(self.text(span)) {
                        lowered.push(ClassMember::Constant(ClassConstant {
                            name,
                            visibility: Visibility::Public,
                            value_raw,
                            leading_comments: self.comments(span),
                            span: self.span(span),
                        }));
                    }
                }
                php::ClassLikeMember::TraitUse(trait_use) => {
                    let span = trait_use.span();
                    lowered.push(ClassMember::TraitUse(TraitUse {
                        names: clauses::trait_names(self.text(span)),
                        span: self.span(span),
                    }));
                }
            }
        }
        lowered
    }

    fn method(&self, method: &php::Method) -> Method {
        let mut modifiers = Modifiers::default();
        for modifier in method.modifiers.iter() {
            modifiers.add(modifier);
        }
        let span = method.span();
        Method {
            name: name_of(&method.name.value),
            visibility: modifiers.visibility,
            is_static: modifiers.is_static,
            is_abstract: modifiers.is_abstract,
            params: self.params(&method.parameter_list),
            return_type: method
                .return_type_hint
                .as_ref()
                .map(|hint| SmolStr::new(self.text(hint.hint.span()))),
            body: match &method.body {
                php::MethodBody::Concrete(block) => Some(self.block(block)),
                _ => None,
            },
            leading_comments: self.comments(span),
            span: self.span(span),
        }
    }

    /// One [`Property`] per variable of a declaration.
    fn property(&self, property: &php::Property, lowered: &mut Vec<ClassMember>) {
        let mut modifiers = Modifiers::default();
        for modifier in property.modifiers().iter() {
            modifiers.add(modifier);
        }
        let span = property.span();
        let is_var = clauses::first_keyword(self.text(span)).eq_ignore_ascii_case("var");
        let type_hint = property
            .hint()
            .map(|hint| SmolStr::new(self.text(hint.span())));
        let comments = self.comments(span);
        for variable in property.variables().iter() {
            lowered.push(ClassMember::Property(Property {
                name: bare_variable(&variable.name),
                visibility: modifiers.visibility,
                is_static: modifiers.is_static,
                is_var,
                type_hint: type_hint.clone(),
                leading_comments: comments.clone(),
                span: self.span(span),
            }));
        }
    }

    fn params(&self, list: &php::FunctionLikeParameterList) -> Vec<Parameter> {
        list.parameters
            .iter()
            .map(|param| {
                let mut modifiers = Modifiers::default();
                for modifier in param.modifiers.iter() {
                    modifiers.add(modifier);
                }
                Parameter {
                    name: bare_variable(&param.variable.name),
                    type_hint: param
                        .hint
                        .as_ref()
                        .map(|hint| SmolStr::new(self.text(hint.span()))),
                    default: param.default_value.as_ref().map(|default| {
                        self.text(default.span())
                            .trim_start_matches('=')
                            .trim()
                            .to_string()
                    }),
                    by_ref: param.ampersand.is_some(),
                    variadic: param.ellipsis.is_some(),
                    promoted: modifiers.seen.then_some(modifiers.visibility),
                    span: self.span(param.span()),
                }
            })
            .collect()
    }

    fn function(&self, function: &php::Function) -> Function {
        let span = function.span();
        Function {
            name: name_of(&function.name.value),
            params: self.params(&function.parameter_list),
            return_type: function
                .return_type_hint
                .as_ref()
                .map(|hint| SmolStr::new(self.text(hint.hint.span()))),
            body: self.block(&function.body),
            leading_comments: self.comments(span),
            span: self.span(span),
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn block(&self, block: &php::Block) -> Block {
        Block {
            statements: block
                .statements
                .iter()
                .filter_map(|stmt| self.statement(stmt))
                .collect(),
            span: self.span(block.span()),
        }
    }

    /// Statements between two offsets, for bodies without braces.
    fn block_between<'a>(
        &self,
        statements: impl Iterator<Item = &'a php::Statement<'a>>,
        start: u32,
        end: u32,
    ) -> Block {
        Block {
            statements: statements.filter_map(|stmt| self.statement(stmt)).collect(),
            span: self.offsets(start, end),
        }
    }

    /// Body of a control structure: a block, or a single statement.
    fn body(&self, statement: &php::Statement) -> Block {
        match statement {
            php::Statement::Block(block) => self.block(block),
            other => Block {
                statements: self.statement(other).into_iter().collect(),
                span: self.span(other.span()),
            },
        }
    }

    fn statement(&self, statement: &php::Statement) -> Option<Statement> {
        let span = statement.span();
        if is_markup(self.text(span)) {
            return None;
        }
        let lowered = match statement {
            php::Statement::Class(class) => Statement::ClassLike(self.class_like(
                ClassLikeKind::Class,
                name_of(&class.name.value),
                class.span(),
                class.left_brace.start.offset,
                class.members.iter(),
            )),
            php::Statement::Interface(interface) => Statement::ClassLike(self.class_like(
                ClassLikeKind::Interface,
                name_of(&interface.name.value),
                interface.span(),
                interface.left_brace.start.offset,
                interface.members.iter(),
            )),
            php::Statement::Trait(trait_decl) => Statement::ClassLike(self.class_like(
                ClassLikeKind::Trait,
                name_of(&trait_decl.name.value),
                trait_decl.span(),
                trait_decl.left_brace.start.offset,
                trait_decl.members.iter(),
            )),
            php::Statement::Enum(enum_decl) => Statement::ClassLike(self.class_like(
                ClassLikeKind::Enum,
                name_of(&enum_decl.name.value),
                enum_decl.span(),
                enum_decl.left_brace.start.offset,
                enum_decl.members.iter(),
            )),
            php::Statement::Function(function) => Statement::Function(self.function(function)),
            php::Statement::Expression(expression) => {
                self.expression_statement(expression.expression, span)
            }
            php::Statement::Block(block) => Statement::Block(self.block(block)),
            php::Statement::Try(try_stmt) => Statement::Try(self.try_statement(try_stmt)),
            php::Statement::If(if_stmt) => {
                self.compound("if", Vec::new(), self.if_bodies(if_stmt), span)
            }
            php::Statement::Foreach(foreach) => {
                let mut bindings = Vec::new();
                if let Some(key) = foreach.target.key() {
                    bind_variables(key, &mut bindings);
                }
                bind_variables(foreach.target.value(), &mut bindings);
                let body = foreach.body.span();
                let bodies = vec![self.block_between(
                    foreach.body.statements().iter(),
                    body.start.offset,
                    body.end.offset,
                )];
                self.compound("foreach", bindings, bodies, span)
            }
            php::Statement::For(for_stmt) => {
                let mut bindings = Vec::new();
                for init in for_stmt.initializations.iter() {
                    if let php::Expression::Assignment(assignment) = init {
                        bind_variables(assignment.lhs, &mut bindings);
                    }
                }
                let body = match &for_stmt.body {
                    php::ForBody::Statement(inner) => self.body(inner),
                    php::ForBody::ColonDelimited(body) => {
                        let body_span = body.span();
                        self.block_between(
                            body.statements.iter(),
                            body_span.start.offset,
                            body_span.end.offset,
                        )
                    }
                };
                self.compound("for", bindings, vec![body], span)
            }
            php::Statement::While(while_stmt) => {
                let body = match &while_stmt.body {
                    php::WhileBody::Statement(inner) => self.body(inner),
                    php::WhileBody::ColonDelimited(body) => {
                        let body_span = body.span();
                        self.block_between(
                            body.statements.iter(),
                            body_span.start.offset,
                            body_span.end.offset,
                        )
                    }
                };
                self.compound("while", Vec::new(), vec![body], span)
            }
            php::Statement::DoWhile(do_while) => {
                let body = self.body(do_while.statement);
                self.compound("do", Vec::new(), vec![body], span)
            }
            php::Statement::Switch(switch) => {
                let mut statements = Vec::new();
                match &switch.body {
                    php::SwitchBody::BraceDelimited(body) => {
                        for case in body.cases.iter() {
                            statements.extend(
                                case.statements().iter().filter_map(|s| self.statement(s)),
                            );
                        }
                    }
                    php::SwitchBody::ColonDelimited(body) => {
                        for case in body.cases.iter() {
                            statements.extend(
                                case.statements().iter().filter_map(|s| self.statement(s)),
                            );
                        }
                    }
                }
                let body = Block {
                    statements,
                    span: self.span(switch.body.span()),
                };
                self.compound("switch", Vec::new(), vec![body], span)
            }
            php::Statement::Global(global) => Statement::Global(VariableList {
                names: global
                    .variables
                    .iter()
                    .filter_map(|variable| match variable {
                        php::Variable::Direct(direct) => Some(bare_variable(&direct.name)),
                        _ => None,
                    })
                    .collect(),
                span: self.span(span),
            }),
            php::Statement::Static(static_stmt) => Statement::Static(VariableList {
                names: static_stmt
                    .items
                    .iter()
                    .map(|item| bare_variable(&item.variable().name))
                    .collect(),
                span: self.span(span),
            }),
            php::Statement::Namespace(_) | php::Statement::Use(_) => return None,
            _ => Statement::Expression(ExpressionStatement {
                variable: None,
                span: self.span(span),
            }),
        };
        Some(lowered)
    }

    fn compound(
        &self,
        keyword: &str,
        header_bindings: Vec<SmolStr>,
        bodies: Vec<Block>,
        span: mago_span::Span,
    ) -> Statement {
        Statement::Compound(Compound {
            keyword: SmolStr::new(keyword),
            header_bindings,
            bodies,
            span: self.span(span),
        })
    }

    /// `then`, `elseif` and `else` bodies in source order.
    fn if_bodies(&self, if_stmt: &php::If) -> Vec<Block> {
        let mut bodies = Vec::new();
        match &if_stmt.body {
            php::IfBody::Statement(body) => {
                bodies.push(self.body(body.statement));
                for clause in body.else_if_clauses.iter() {
                    bodies.push(self.body(clause.statement));
                }
                if let Some(clause) = &body.else_clause {
                    bodies.push(self.body(clause.statement));
                }
            }
            php::IfBody::ColonDelimited(body) => {
                let body_span = body.span();
                let then_end = body
                    .else_if_clauses
                    .iter()
                    .next()
                    .map(|clause| clause.span().start.offset)
                    .or_else(|| body.else_clause.as_ref().map(|c| c.span().start.offset))
                    .unwrap_or(body_span.end.offset);
                bodies.push(self.block_between(
                    body.statements.iter(),
                    body_span.start.offset,
                    then_end,
                ));
                for clause in body.else_if_clauses.iter() {
                    let clause_span = clause.span();
                    bodies.push(self.block_between(
                        clause.statements.iter(),
                        clause_span.start.offset,
                        clause_span.end.offset,
                    ));
                }
                if let Some(clause) = &body.else_clause {
                    let clause_span = clause.span();
                    bodies.push(self.block_between(
                        clause.statements.iter(),
                        clause_span.start.offset,
                        clause_span.end.offset,
                    ));
                }
            }
        }
        bodies
    }

    fn try_statement(&self, try_stmt: &php::Try) -> Try {
        Try {
            body: self.block(&try_stmt.block),
            catches: try_stmt
                .catch_clauses
                .iter()
                .map(|catch| {
                    let span = catch.span();
                    Catch {
                        types: clauses::catch_types(self.text(span)),
                        variable: catch
                            .variable
                            .as_ref()
                            .map(|variable| bare_variable(&variable.name)),
                        body: self.block(&catch.block),
                        span: self.span(span),
                    }
                })
                .collect(),
            finally: try_stmt
                .finally_clause
                .as_ref()
                .map(|finally| self.block(&finally.block)),
            span: self.span(try_stmt.span()),
        }
    }

    fn expression_statement(
        &self,
        expression: &php::Expression,
        span: mago_span::Span,
    ) -> Statement {
        match expression {
            php::Expression::Assignment(assignment) => {
                if let php::Expression::Variable(php::Variable::Direct(variable)) = assignment.lhs {
                    let lhs_end = assignment.lhs.span().end.offset;
                    let rhs = assignment.rhs.span();
                    let operator = self
                        .source
                        .get(lhs_end as usize..rhs.start.offset as usize)
                        .unwrap_or_default()
                        .trim();
                    let value_raw = self.text(rhs);
                    return Statement::Assign(Assign {
                        target: bare_variable(&variable.name),
                        operator: SmolStr::new(operator),
                        value_raw: value_raw.to_string(),
                        value_type: clauses::instantiated_class(value_raw),
                        span: self.span(span),
                    });
                }
            }
            php::Expression::Variable(php::Variable::Direct(variable)) => {
                return Statement::Expression(ExpressionStatement {
                    variable: Some(bare_variable(&variable.name)),
                    span: self.span(span),
                });
            }
            _ => {}
        }
        Statement::Expression(ExpressionStatement {
            variable: None,
            span: self.span(span),
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

#[derive(Default)]
struct Modifiers {
    seen: bool,
    visibility: Visibility,
    is_static: bool,
    is_abstract: bool,
}

impl Modifiers {
    fn add(&mut self, modifier: &php::Modifier) {
        self.seen = true;
        match modifier {
            php::Modifier::Public(_) => self.visibility = Visibility::Public,
            php::Modifier::Protected(_) => self.visibility = Visibility::Protected,
            php::Modifier::Private(_) => self.visibility = Visibility::Private,
            php::Modifier::Static(_) => self.is_static = true,
            php::Modifier::Abstract(_) => self.is_abstract = true,
            _ => {}
        }
    }
}

/// Open and close tags, `?>` and `;` carry no bindings.
fn is_markup(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == ";" || text.starts_with("<?") || text.starts_with("?>")
}

fn name_of(value: &impl Display) -> SmolStr {
    SmolStr::new(value.to_string())
}

/// Variable name without the sigil.
fn bare_variable(name: &impl Display) -> SmolStr {
    let name = name.to_string();
    SmolStr::new(name.strip_prefix('$').unwrap_or(&name))
}

/// Variables bound by a loop header target, destructuring included.
fn bind_variables(target: &php::Expression, bindings: &mut Vec<SmolStr>) {
    match target {
        php::Expression::Variable(php::Variable::Direct(variable)) => {
            bindings.push(bare_variable(&variable.name));
        }
        php::Expression::List(list) => {
            for element in list.elements.iter() {
                bind_element(element, bindings);
            }
        }
        php::Expression::Array(array) => {
            for element in array.elements.iter() {
                bind_element(element, bindings);
            }
        }
        _ => {}
    }
}

fn bind_element(element: &php::ArrayElement, bindings: &mut Vec<SmolStr>) {
    match element {
        php::ArrayElement::KeyValue(pair) => bind_variables(pair.value, bindings),
        php::ArrayElement::Value(value) => bind_variables(value.value, bindings),
        _ => {}
    }
}
