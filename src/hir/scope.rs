//! Lexical scope walking for variable completion.
//!
//! The walker finds the innermost block enclosing the cursor line and
//! collects the bindings introduced in it before that line. A block encloses
//! a line only when the line lies strictly between its first and last lines.

use smol_str::SmolStr;
use tracing::trace;

use crate::base::{Position, Span};
use crate::syntax::{
    Block, ClassLike, Function, Item, Method, Namespace, Parameter, ParsedUnit, Statement, Try,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Parameter,
    Local,
    Global,
    Static,
    CatchVariable,
    LoopVariable,
    Predefined,
}

/// A variable visible at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Name without the sigil.
    pub name: SmolStr,
    pub type_hint: Option<SmolStr>,
    pub kind: BindingKind,
}

impl Binding {
    fn new(name: &SmolStr, kind: BindingKind) -> Self {
        Self {
            name: name.clone(),
            type_hint: None,
            kind,
        }
    }

    /// Name as written in source, with the sigil.
    pub fn display_name(&self) -> String {
        format!("${}", self.name)
    }
}

/// Bindings visible at a program point, tagged with the enclosing block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFrame {
    pub span: Span,
    pub bindings: Vec<Binding>,
}

impl ScopeFrame {
    pub fn contains(&self, display_name: &str) -> bool {
        self.bindings.iter().any(|b| b.display_name() == display_name)
    }

    fn push_unique(&mut self, binding: Binding) {
        if !self.bindings.iter().any(|b| b.name == binding.name) {
            self.bindings.push(binding);
        }
    }
}

/// Walks a parsed file for the bindings visible at a cursor.
pub struct ScopeWalker<'a> {
    predefined: &'a [String],
}

impl<'a> ScopeWalker<'a> {
    /// `predefined` names (without sigil) are appended to every frame.
    pub fn new(predefined: &'a [String]) -> Self {
        Self { predefined }
    }

    pub fn walk(&self, unit: &ParsedUnit, cursor: Position) -> ScopeFrame {
        let line = cursor.line;
        let mut frame = find_in_items(&unit.items, line).unwrap_or_else(|| {
            match owning_namespace(&unit.items, line) {
                Some(ns) => script_frame(&ns.items, ns.span, line),
                None => script_frame(&unit.items, unit.span, line),
            }
        });
        trace!(
            line,
            bindings = frame.bindings.len(),
            "collected lexical bindings"
        );

        for name in self.predefined {
            frame.push_unique(Binding::new(&SmolStr::new(name), BindingKind::Predefined));
        }
        frame
    }
}

/// First class-like declaration (top-level or in a namespace) enclosing `line`.
pub fn enclosing_class(unit: &ParsedUnit, line: usize) -> Option<(Option<&str>, &ClassLike)> {
    unit.class_likes()
        .into_iter()
        .find(|(_, class)| class.span.strictly_contains_line(line))
}

// ============================================================================
// DECLARATIONS
// ============================================================================

fn find_in_items(items: &[Item], line: usize) -> Option<ScopeFrame> {
    for item in items {
        match item {
            Item::Namespace(ns) => {
                if let Some(frame) = find_in_items(&ns.items, line) {
                    return Some(frame);
                }
            }
            Item::ClassLike(class) => {
                if let Some(frame) = class_frame(class, line) {
                    return Some(frame);
                }
            }
            Item::Function(func) => {
                if let Some(frame) = function_frame(func, line) {
                    return Some(frame);
                }
            }
            Item::Statement(stmt) => {
                if let Some(frame) = declaration_frame(stmt, line) {
                    return Some(frame);
                }
            }
            Item::Use(_) => {}
        }
    }
    None
}

/// Namespace whose script code surrounds `line`. An unbraced namespace
/// owns every line up to the next namespace declaration.
fn owning_namespace(items: &[Item], line: usize) -> Option<&Namespace> {
    items
        .iter()
        .filter_map(|item| match item {
            Item::Namespace(ns) => Some(ns),
            _ => None,
        })
        .filter(|ns| {
            if ns.braced {
                ns.span.strictly_contains_line(line)
            } else {
                ns.span.starts_before_line(line)
            }
        })
        .last()
}

fn declaration_frame(stmt: &Statement, line: usize) -> Option<ScopeFrame> {
    match stmt {
        Statement::ClassLike(class) => class_frame(class, line),
        Statement::Function(func) => function_frame(func, line),
        _ => None,
    }
}

/// Frame of the first method enclosing `line`; an empty frame when the
/// cursor is in the class body but outside every method.
fn class_frame(class: &ClassLike, line: usize) -> Option<ScopeFrame> {
    if !class.span.strictly_contains_line(line) {
        return None;
    }
    let frame = class
        .methods()
        .find(|method| method.body.is_some() && method.span.strictly_contains_line(line))
        .map(|method| method_frame(method, line))
        .unwrap_or_else(|| ScopeFrame {
            span: class.span,
            bindings: Vec::new(),
        });
    Some(frame)
}

fn method_frame(method: &Method, line: usize) -> ScopeFrame {
    let mut frame = ScopeFrame {
        span: method.span,
        bindings: Vec::new(),
    };
    add_params(&mut frame, &method.params);
    if let Some(body) = &method.body {
        collect_statements(&body.statements, line, &mut frame);
    }
    frame
}

fn function_frame(func: &Function, line: usize) -> Option<ScopeFrame> {
    if !func.span.strictly_contains_line(line) {
        return None;
    }
    let mut frame = ScopeFrame {
        span: func.span,
        bindings: Vec::new(),
    };
    add_params(&mut frame, &func.params);
    collect_statements(&func.body.statements, line, &mut frame);
    Some(frame)
}

fn add_params(frame: &mut ScopeFrame, params: &[Parameter]) {
    for param in params {
        frame.push_unique(Binding {
            name: param.name.clone(),
            type_hint: param.type_hint.clone(),
            kind: BindingKind::Parameter,
        });
    }
}

/// Top-level script code of a file or namespace.
fn script_frame(items: &[Item], span: Span, line: usize) -> ScopeFrame {
    let mut frame = ScopeFrame {
        span,
        bindings: Vec::new(),
    };
    for item in items {
        if !item.span().starts_before_line(line) {
            break;
        }
        if let Item::Statement(stmt) = item {
            collect_statement(stmt, line, &mut frame);
        }
    }
    frame
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// Bindings from direct children starting before `line`, descending into
/// the one block that encloses it.
fn collect_statements(statements: &[Statement], line: usize, frame: &mut ScopeFrame) {
    for stmt in statements {
        if !stmt.span().starts_before_line(line) {
            break;
        }
        collect_statement(stmt, line, frame);
    }
}

fn collect_statement(stmt: &Statement, line: usize, frame: &mut ScopeFrame) {
    let encloses = stmt.span().strictly_contains_line(line);
    match stmt {
        Statement::Assign(assign) => frame.push_unique(Binding {
            name: assign.target.clone(),
            type_hint: assign.value_type.clone(),
            kind: BindingKind::Local,
        }),
        Statement::Global(list) => {
            for name in &list.names {
                frame.push_unique(Binding::new(name, BindingKind::Global));
            }
        }
        Statement::Static(list) => {
            for name in &list.names {
                frame.push_unique(Binding::new(name, BindingKind::Static));
            }
        }
        Statement::Expression(expr) => {
            if let Some(name) = &expr.variable {
                frame.push_unique(Binding::new(name, BindingKind::Local));
            }
        }
        Statement::Try(try_stmt) if encloses => collect_try(try_stmt, line, frame),
        Statement::Block(block) if encloses => collect_statements(&block.statements, line, frame),
        Statement::Compound(compound) if encloses => {
            for name in &compound.header_bindings {
                frame.push_unique(Binding::new(name, BindingKind::LoopVariable));
            }
            if let Some(body) = enclosing_block(&compound.bodies, line) {
                collect_statements(&body.statements, line, frame);
            }
        }
        Statement::Try(_)
        | Statement::Block(_)
        | Statement::Compound(_)
        | Statement::Function(_)
        | Statement::ClassLike(_) => {}
    }
}

fn collect_try(try_stmt: &Try, line: usize, frame: &mut ScopeFrame) {
    if try_stmt.body.span.strictly_contains_line(line) {
        collect_statements(&try_stmt.body.statements, line, frame);
        return;
    }
    if let Some(catch) = try_stmt
        .catches
        .iter()
        .find(|catch| catch.span.strictly_contains_line(line))
    {
        if let Some(name) = &catch.variable {
            frame.push_unique(Binding::new(name, BindingKind::CatchVariable));
        }
        collect_statements(&catch.body.statements, line, frame);
        return;
    }
    if let Some(finally) = try_stmt
        .finally
        .as_ref()
        .filter(|block| block.span.strictly_contains_line(line))
    {
        collect_statements(&finally.statements, line, frame);
    }
}

fn enclosing_block(blocks: &[Block], line: usize) -> Option<&Block> {
    blocks
        .iter()
        .find(|block| block.span.strictly_contains_line(line))
}
