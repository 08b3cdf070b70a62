//! High-level IR (HIR): the symbol model the completion engine queries.
//!
//! ## Key Types
//!
//! - [`SourceIndex`]: Known files, their cached trees, and the class table
//! - [`ClassSymbol`] / [`MemberSymbol`]: Structured view of class-likes
//! - [`resolve_members`]: Own and inherited members of a class
//! - [`ScopeWalker`]: Variables visible at a cursor
//!
//! ## Layers
//!
//! ```text
//! SourceFile text (live buffer or disk)
//!     │
//!     ▼
//! get_parsed / refresh      ← parse, stale-but-usable cache
//!     │
//!     ▼
//! extract_classes           ← per-file class symbols
//!     │
//!     ▼
//! ClassTable                ← keyed by fully-qualified name
//!     │
//!     ▼
//! resolve_members           ← extends / use-trait walk
//! ```

mod index;
mod inherit;
mod scope;
mod symbols;

pub use index::{ClassTable, SourceFile, SourceIndex};
pub use inherit::{ResolvedMember, VisibilityMask, lookup_class, resolve_members};
pub use scope::{Binding, BindingKind, ScopeFrame, ScopeWalker, enclosing_class};
pub use symbols::{
    ClassRef, ClassSymbol, MemberKind, MemberSymbol, NameContext, extract_class, extract_classes,
};
