//! IDE features: cursor-context completion on top of the HIR.
//!
//! ## Flow
//!
//! ```text
//! line text before cursor ──► classify ──► CompletionContext
//!                                              │
//!          ┌───────────────────────────────────┼──────────────────────┐
//!          ▼                                   ▼                      ▼
//!   ScopeWalker (bare variable)   resolve_members (self member)   class table (new)
//!          └───────────────────────────────────┼──────────────────────┘
//!                                              ▼
//!                             CompletionCandidate (filter, dedup, rank)
//!                                              │  on acceptance
//!                                              ▼
//!                                        InsertionPlan
//! ```
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`, or
//! `CompletionProvider` for an editor host:
//!
//! ```
//! use thizer::ide::{CompletionProvider, TextBuffer};
//!
//! let mut provider = CompletionProvider::default();
//! let buffer = TextBuffer::new("/src/a.php", "<?php\n$total = 0;\n$to;").with_cursor(2, 3);
//! let request = provider.has_candidates(&buffer, Some('o')).expect("candidates");
//! assert_eq!(request.candidates[0].insert_text.as_ref(), "$total");
//! ```

mod analysis;
mod completion;
mod config;
mod context;
mod doc;
mod editor;
mod insert;
mod provider;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{
    CLASS_PRIORITY, CandidateKind, CompletionCandidate, INHERITED_PRIORITY, OWN_PRIORITY,
    PREDEFINED_PRIORITY, SUBSTRING_PENALTY, completions, member_text,
};
pub use config::CompletionConfig;
pub use context::{CompletionContext, CompletionMode, classify};
pub use doc::{DocSummary, TRUNCATION_MARKER};
pub use editor::{EditorState, TextBuffer};
pub use insert::InsertionPlan;
pub use provider::{CandidateList, CompletionProvider, CompletionRequest, RequestId};
