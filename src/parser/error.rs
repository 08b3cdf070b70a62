//! Error type returned by [`parse`](super::parse).

use thiserror::Error;

use crate::base::Position;

/// Broad category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token that cannot start or continue the current construct.
    UnexpectedToken,
    /// Input ended inside a declaration or block.
    UnexpectedEof,
}

/// First error encountered while parsing a file.
///
/// The position is 0-indexed; `Display` renders it 1-based the way editors
/// and the PHP CLI report locations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}:{}: {message}", .position.line + 1, .position.column + 1)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }
}
