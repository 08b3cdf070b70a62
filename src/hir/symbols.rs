//! Class and member symbols extracted from a parsed file.
//!
//! Extraction resolves every class name a declaration mentions (parent,
//! interfaces, used traits) to a fully-qualified name using the namespace
//! and `use` imports in effect where the class is declared.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{FileId, Span};
use crate::syntax::{
    ClassLike, ClassLikeKind, ClassMember, Comment, Item, ParsedUnit, UseKind, Visibility,
};

// ============================================================================
// SYMBOL TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MemberKind {
    Method,
    Property,
    ClassConstant,
    /// Property declared with the legacy `var` keyword.
    Variable,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Property => "property",
            MemberKind::ClassConstant => "classconstant",
            MemberKind::Variable => "variable",
        }
    }
}

/// A member declared directly on a class-like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSymbol {
    pub name: SmolStr,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Parameter names without the sigil, for methods.
    pub params: Vec<SmolStr>,
    /// Return type for methods, declared type for properties.
    pub type_hint: Option<SmolStr>,
    /// Raw value text for constants.
    pub value_raw: Option<String>,
    /// Text of the comment attached to the declaration.
    pub doc: Option<String>,
    /// Fully-qualified name of the declaring class-like.
    pub declaring_class: Arc<str>,
    pub span: Span,
}

/// Reference to another class-like as written and as resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub written: SmolStr,
    /// Fully-qualified name without the leading backslash.
    pub fqn: Arc<str>,
}

impl ClassRef {
    /// Last segment of the resolved name.
    pub fn short_name(&self) -> &str {
        self.fqn.rsplit('\\').next().unwrap_or(&self.fqn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    pub name: SmolStr,
    /// Fully-qualified name without the leading backslash.
    pub fqn: Arc<str>,
    /// Owning namespace; empty for the global namespace.
    pub namespace: SmolStr,
    pub kind: ClassLikeKind,
    pub parent: Option<ClassRef>,
    pub interfaces: Vec<ClassRef>,
    pub traits: Vec<ClassRef>,
    pub members: Vec<MemberSymbol>,
    pub is_abstract: bool,
    pub file: FileId,
    pub span: Span,
    pub doc: Option<String>,
}

impl ClassSymbol {
    /// Lower-cased fully-qualified name; class names are case-insensitive.
    pub fn key(&self) -> String {
        self.fqn.to_lowercase()
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == ClassLikeKind::Class && !self.is_abstract
    }
}

// ============================================================================
// NAME RESOLUTION
// ============================================================================

/// Namespace and class imports in effect at a declaration.
#[derive(Debug, Clone, Default)]
pub struct NameContext {
    namespace: Option<SmolStr>,
    /// Lower-cased local name → fully-qualified name.
    imports: FxHashMap<String, SmolStr>,
}

impl NameContext {
    pub fn new(namespace: Option<SmolStr>) -> Self {
        Self {
            namespace,
            imports: FxHashMap::default(),
        }
    }

    /// Record the class imports of every `use` statement in `items`.
    pub fn with_imports(mut self, items: &[Item]) -> Self {
        for item in items {
            if let Item::Use(group) = item {
                if group.kind != UseKind::Class {
                    continue;
                }
                for import in &group.items {
                    self.imports
                        .insert(import.local_name().to_lowercase(), import.name.clone());
                }
            }
        }
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Resolve a class name as written to its fully-qualified form.
    pub fn resolve(&self, written: &str) -> String {
        if let Some(absolute) = written.strip_prefix('\\') {
            return absolute.to_string();
        }

        let (first, rest) = match written.split_once('\\') {
            Some((first, rest)) => (first, Some(rest)),
            None => (written, None),
        };
        let first_lower = first.to_lowercase();

        if first_lower == "namespace" {
            let rest = rest.unwrap_or_default();
            return self.qualify(rest);
        }
        if rest.is_none() && matches!(first_lower.as_str(), "self" | "static" | "parent") {
            return written.to_string();
        }
        if let Some(imported) = self.imports.get(&first_lower) {
            return match rest {
                Some(rest) => format!("{imported}\\{rest}"),
                None => imported.to_string(),
            };
        }
        self.qualify(written)
    }

    fn qualify(&self, name: &str) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{ns}\\{name}"),
            _ => name.to_string(),
        }
    }

    fn class_ref(&self, written: &SmolStr) -> ClassRef {
        ClassRef {
            written: written.clone(),
            fqn: Arc::from(self.resolve(written)),
        }
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Extract every top-level or namespace-level class-like in `unit`.
pub fn extract_classes(file: FileId, unit: &ParsedUnit) -> Vec<ClassSymbol> {
    let mut classes = Vec::new();
    let file_context = NameContext::new(None).with_imports(&unit.items);

    for item in &unit.items {
        match item {
            Item::Namespace(ns) => {
                let context = NameContext::new(ns.name.clone()).with_imports(&ns.items);
                for inner in &ns.items {
                    if let Item::ClassLike(class) = inner {
                        classes.push(extract_class(file, class, &context));
                    }
                }
            }
            Item::ClassLike(class) => classes.push(extract_class(file, class, &file_context)),
            Item::Use(_) | Item::Function(_) | Item::Statement(_) => {}
        }
    }

    classes
}

/// Build the symbol for one class-like declaration.
pub fn extract_class(file: FileId, class: &ClassLike, context: &NameContext) -> ClassSymbol {
    let fqn: Arc<str> = Arc::from(context.qualify(&class.name));

    // Interfaces list their parents under `extends`
    let (parent, interfaces) = match class.kind {
        ClassLikeKind::Interface => (None, &class.extends),
        _ => (class.extends.first(), &class.implements),
    };

    let mut traits = Vec::new();
    let mut members = Vec::new();
    for member in &class.members {
        match member {
            ClassMember::Method(method) => {
                members.push(MemberSymbol {
                    name: method.name.clone(),
                    kind: MemberKind::Method,
                    visibility: effective_visibility(method.visibility),
                    is_static: method.is_static,
                    params: method.params.iter().map(|p| p.name.clone()).collect(),
                    type_hint: method.return_type.clone(),
                    value_raw: None,
                    doc: last_comment(&method.leading_comments),
                    declaring_class: fqn.clone(),
                    span: method.span,
                });
                // Constructor promotion declares properties
                for param in &method.params {
                    if let Some(visibility) = param.promoted {
                        members.push(MemberSymbol {
                            name: param.name.clone(),
                            kind: MemberKind::Property,
                            visibility: effective_visibility(visibility),
                            is_static: false,
                            params: Vec::new(),
                            type_hint: param.type_hint.clone(),
                            value_raw: None,
                            doc: None,
                            declaring_class: fqn.clone(),
                            span: param.span,
                        });
                    }
                }
            }
            ClassMember::Property(property) => members.push(MemberSymbol {
                name: property.name.clone(),
                kind: if property.is_var {
                    MemberKind::Variable
                } else {
                    MemberKind::Property
                },
                visibility: effective_visibility(property.visibility),
                is_static: property.is_static,
                params: Vec::new(),
                type_hint: property.type_hint.clone(),
                value_raw: None,
                doc: last_comment(&property.leading_comments),
                declaring_class: fqn.clone(),
                span: property.span,
            }),
            ClassMember::Constant(constant) => members.push(MemberSymbol {
                name: constant.name.clone(),
                kind: MemberKind::ClassConstant,
                visibility: effective_visibility(constant.visibility),
                is_static: true,
                params: Vec::new(),
                type_hint: None,
                value_raw: Some(constant.value_raw.clone()),
                doc: last_comment(&constant.leading_comments),
                declaring_class: fqn.clone(),
                span: constant.span,
            }),
            ClassMember::TraitUse(uses) => {
                traits.extend(uses.names.iter().map(|name| context.class_ref(name)));
            }
        }
    }

    ClassSymbol {
        name: class.name.clone(),
        fqn,
        namespace: context.namespace.clone().unwrap_or_default(),
        kind: class.kind,
        parent: parent.map(|name| context.class_ref(name)),
        interfaces: interfaces.iter().map(|name| context.class_ref(name)).collect(),
        traits,
        members,
        is_abstract: class.is_abstract,
        file,
        span: class.span,
        doc: last_comment(&class.leading_comments),
    }
}

/// Members without a modifier are public.
fn effective_visibility(visibility: Visibility) -> Visibility {
    match visibility {
        Visibility::Unknown => Visibility::Public,
        other => other,
    }
}

/// The comment closest to the declaration wins.
fn last_comment(comments: &[Comment]) -> Option<String> {
    comments.last().map(|comment| comment.text.clone())
}
