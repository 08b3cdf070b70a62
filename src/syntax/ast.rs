//! Typed syntax tree produced by the parser.
//!
//! Every node kind is a closed variant, so consumers (the scope walker, the
//! symbol extractor) match exhaustively instead of probing for fields.
//!
//! ## Shape
//!
//! ```text
//! ParsedUnit
//!   └── Item*            namespace | use | class-like | function | statement
//!         ClassLike
//!           └── ClassMember*   method | property | constant | trait use
//!         Function / Method
//!           └── Parameter*, Block
//!                 └── Statement*   assign | try | block | compound | global | static | ...
//! ```

use smol_str::SmolStr;

use crate::base::Span;

// ============================================================================
// ROOT
// ============================================================================

/// The tree for one file: its top-level items in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUnit {
    pub items: Vec<Item>,
    pub span: Span,
}

impl ParsedUnit {
    /// Iterate over every class-like declaration reachable from the top level,
    /// descending into namespaces. Yields the enclosing namespace name along
    /// with each declaration.
    pub fn class_likes(&self) -> Vec<(Option<&str>, &ClassLike)> {
        let mut out = Vec::new();
        for item in &self.items {
            match item {
                Item::Namespace(ns) => {
                    for inner in &ns.items {
                        if let Item::ClassLike(class) = inner {
                            out.push((ns.name.as_deref(), class));
                        }
                    }
                }
                Item::ClassLike(class) => out.push((None, class)),
                Item::Use(_) | Item::Function(_) | Item::Statement(_) => {}
            }
        }
        out
    }
}

/// A top-level (or namespace-level) item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Namespace(Namespace),
    Use(UseGroup),
    ClassLike(ClassLike),
    Function(Function),
    Statement(Statement),
}

impl Item {
    pub fn span(&self) -> Span {
        match self {
            Item::Namespace(ns) => ns.span,
            Item::Use(group) => group.span,
            Item::ClassLike(class) => class.span,
            Item::Function(func) => func.span,
            Item::Statement(stmt) => stmt.span(),
        }
    }
}

/// `namespace A\B;` or `namespace A\B { ... }`.
///
/// The unbraced form owns every item up to the next namespace declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: Option<SmolStr>,
    pub items: Vec<Item>,
    pub braced: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseKind {
    Class,
    Function,
    Const,
}

/// `use A\B, C\D as E;` or `use A\{B, C as D};`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseGroup {
    pub kind: UseKind,
    pub items: Vec<UseItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseItem {
    /// Fully-qualified name without the leading backslash.
    pub name: SmolStr,
    pub alias: Option<SmolStr>,
}

impl UseItem {
    /// The name this import binds in the file: the alias, or the last segment.
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.name.rsplit('\\').next().unwrap_or(&self.name),
        }
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassLikeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

impl ClassLikeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLikeKind::Class => "class",
            ClassLikeKind::Interface => "interface",
            ClassLikeKind::Trait => "trait",
            ClassLikeKind::Enum => "enum",
        }
    }
}

/// Declared visibility of a member.
///
/// `Unknown` is recorded when no modifier was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Public,
    Protected,
    Private,
    #[default]
    Unknown,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Unknown => "unknown",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("public") {
            Some(Visibility::Public)
        } else if keyword.eq_ignore_ascii_case("protected") {
            Some(Visibility::Protected)
        } else if keyword.eq_ignore_ascii_case("private") {
            Some(Visibility::Private)
        } else {
            None
        }
    }
}

/// A class, interface, trait or enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLike {
    pub kind: ClassLikeKind,
    pub name: SmolStr,
    /// Parent class for classes; parent interfaces for interfaces.
    pub extends: Vec<SmolStr>,
    pub implements: Vec<SmolStr>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub members: Vec<ClassMember>,
    pub leading_comments: Vec<Comment>,
    pub span: Span,
}

impl ClassLike {
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Method(method) => Some(method),
            ClassMember::Property(_) | ClassMember::Constant(_) | ClassMember::TraitUse(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    Method(Method),
    Property(Property),
    Constant(ClassConstant),
    TraitUse(TraitUse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: SmolStr,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub params: Vec<Parameter>,
    pub return_type: Option<SmolStr>,
    /// `None` for abstract and interface methods.
    pub body: Option<Block>,
    pub leading_comments: Vec<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: SmolStr,
    pub params: Vec<Parameter>,
    pub return_type: Option<SmolStr>,
    pub body: Block,
    pub leading_comments: Vec<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Name without the sigil.
    pub name: SmolStr,
    pub type_hint: Option<SmolStr>,
    pub default: Option<String>,
    pub by_ref: bool,
    pub variadic: bool,
    /// Set for constructor-promoted parameters.
    pub promoted: Option<Visibility>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Name without the sigil.
    pub name: SmolStr,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Declared with the legacy `var` keyword.
    pub is_var: bool,
    pub type_hint: Option<SmolStr>,
    pub leading_comments: Vec<Comment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassConstant {
    pub name: SmolStr,
    pub visibility: Visibility,
    /// Raw source text of the value expression.
    pub value_raw: String,
    pub leading_comments: Vec<Comment>,
    pub span: Span,
}

/// `use TraitA, TraitB;` inside a class body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitUse {
    pub names: Vec<SmolStr>,
    pub span: Span,
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Assign(Assign),
    Try(Try),
    Block(Block),
    Compound(Compound),
    Global(VariableList),
    Static(VariableList),
    Expression(ExpressionStatement),
    Function(Function),
    ClassLike(ClassLike),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Assign(assign) => assign.span,
            Statement::Try(try_stmt) => try_stmt.span,
            Statement::Block(block) => block.span,
            Statement::Compound(compound) => compound.span,
            Statement::Global(list) | Statement::Static(list) => list.span,
            Statement::Expression(expr) => expr.span,
            Statement::Function(func) => func.span,
            Statement::ClassLike(class) => class.span,
        }
    }
}

/// `$target = value;` (also compound operators such as `.=`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign {
    /// Target variable name without the sigil.
    pub target: SmolStr,
    pub operator: SmolStr,
    pub value_raw: String,
    /// Class name when the value is a `new Name(...)` expression.
    pub value_type: Option<SmolStr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Try {
    pub body: Block,
    pub catches: Vec<Catch>,
    pub finally: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catch {
    pub types: Vec<SmolStr>,
    /// Caught variable without the sigil (optional since PHP 8).
    pub variable: Option<SmolStr>,
    pub body: Block,
    pub span: Span,
}

/// Control-flow statement with one or more bodies (`if`/`elseif`/`else`,
/// loops, `switch`, `declare`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub keyword: SmolStr,
    /// Variables bound by the header (`foreach ... as $k => $v`, `for ($i = 0; ...)`).
    pub header_bindings: Vec<SmolStr>,
    pub bodies: Vec<Block>,
    pub span: Span,
}

/// `global $a, $b;` / `static $a = 1, $b;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableList {
    pub names: Vec<SmolStr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    /// Set when the whole statement is a single variable (`$x;`).
    pub variable: Option<SmolStr>,
    pub span: Span,
}

// ============================================================================
// COMMENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
    Doc,
}

/// A comment attached to the declaration that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Raw comment text including delimiters.
    pub text: String,
    pub span: Span,
}

impl Comment {
    pub fn is_doc(&self) -> bool {
        self.kind == CommentKind::Doc
    }
}
