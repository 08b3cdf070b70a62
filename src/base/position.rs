//! Position tracking for tree nodes and editor cursors
//!
//! Stores the source location (line/column) of nodes so the scope walker and
//! the classifier can compare them against the cursor.

/// A span representing a range in source code (0-indexed, columns counted in chars)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Conservative "inside" test used for block selection: the line must lie
    /// strictly between the opening and the closing line.
    pub fn strictly_contains_line(&self, line: usize) -> bool {
        self.start.line < line && line < self.end.line
    }

    /// True when the span starts on a line before `line`.
    pub fn starts_before_line(&self, line: usize) -> bool {
        self.start.line < line
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
