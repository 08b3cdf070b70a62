//! Byte offset to line/column conversion.

use text_size::TextSize;

use super::Position;

/// Maps byte offsets of a source text to 0-indexed line/column positions.
///
/// Columns are counted in `char`s, which is what editors report for cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a position. `text` must be the text the
    /// index was built from.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = u32::from(self.line_starts[line]) as usize;
        let offset = (u32::from(offset) as usize).min(text.len());
        let column = text
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);
        Position::new(line, column)
    }
}
