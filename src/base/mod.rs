//! Foundation types for the completion engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Dense identifiers for files known to the source index
//! - [`Position`], [`Span`] - Line/column positions for tree nodes and cursors
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - Language constants (sigil, self reference, predefined variables)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod file_id;
mod line_index;
mod position;

pub use file_id::FileId;
pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
