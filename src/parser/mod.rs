//! PHP parser
//!
//! Turns source text into the typed tree in [`crate::syntax`]:
//!
//! ```text
//! Source Text
//!     ↓
//! mago_syntax::parser → arena AST (statements, trivia, errors)
//!     ↓
//! Lowering → ParsedUnit (namespaces, class-likes, members, statements)
//! ```
//!
//! The file is rejected on the first syntax error. Callers that need a tree
//! for a file under edit keep the last successful result (see
//! `hir::SourceIndex`).

mod clauses;
mod comments;
mod error;
mod lower;

pub use error::{ParseError, ParseErrorKind};

use bumpalo::Bump;
use mago_syntax::parser::parse_file_content;

use crate::syntax::ParsedUnit;
use lower::Lowering;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Attach comments to the declarations that follow them.
    pub extract_doc: bool,
    /// Record line/column spans. Scope walking needs them.
    pub with_positions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extract_doc: true,
            with_positions: true,
        }
    }
}

/// Parse a PHP source file.
pub fn parse(source: &str, options: &ParseOptions) -> Result<ParsedUnit, ParseError> {
    let arena = Bump::new();
    let file_id = mago_database::file::FileId::new("input.php");
    let program = parse_file_content(&arena, file_id, source);

    let lowering = Lowering::new(source, options);
    if let Some(error) = program.errors.iter().next() {
        return Err(lowering.error(error));
    }
    Ok(lowering.unit(program.statements.iter()))
}
