// Syntax tree for PHP sources
pub mod ast;

pub use ast::{
    Assign, Block, Catch, ClassConstant, ClassLike, ClassLikeKind, ClassMember, Comment,
    CommentKind, Compound, ExpressionStatement, Function, Item, Method, Namespace, Parameter,
    ParsedUnit, Property, Statement, TraitUse, Try, UseGroup, UseItem, UseKind, VariableList,
    Visibility,
};

// Re-export Position and Span from base so tree consumers need one import
pub use crate::base::{Position, Span};
