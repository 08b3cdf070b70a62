//! # thizer-base
//!
//! Cursor-context-aware code completion for PHP: project-wide symbol
//! indexing, cursor-context classification, lexical scope walking and
//! cross-file inheritance resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Directory enumeration, asynchronous file reads
//!   ↓
//! ide       → Classifier, candidates, insertion, AnalysisHost, provider
//!   ↓
//! hir       → Source index, class table, inheritance, scope walking
//!   ↓
//! syntax    → Tree types (ParsedUnit, ClassLike, Statement, ...)
//!   ↓
//! parser    → mago_syntax front end lowered into the syntax tree
//!   ↓
//! base      → Primitives (FileId, Position/Span, LineIndex, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → hir → ide → project)
// ============================================================================

/// Foundation types: FileId, Position/Span, LineIndex, language constants
pub mod base;

/// Parser: `mago_syntax` parse plus lowering into [`syntax`]
pub mod parser;

/// Syntax: closed tree types produced by the parser
pub mod syntax;

/// High-level IR: source index, symbols, inheritance, scopes
pub mod hir;

/// IDE features: completion context, candidates, insertion
pub mod ide;

/// Project management: workspace loading
pub mod project;

// Re-export foundation types
pub use base::{FileId, LineIndex, Position, Span, TextRange, TextSize};

// Re-export the entry points most hosts need
pub use ide::{
    AnalysisHost, CompletionCandidate, CompletionConfig, CompletionContext, CompletionMode,
    CompletionProvider, EditorState, TextBuffer,
};
pub use parser::{ParseError, ParseOptions, parse};
pub use project::WorkspaceLoader;
