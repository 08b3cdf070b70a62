//! Editor collaborator: what the engine reads from and writes to the host's
//! document.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::text_utils::{char_len, text_before_column};
use crate::base::Position;

/// Document and cursor state of the active editor.
pub trait EditorState {
    fn path(&self) -> &Path;

    fn cursor(&self) -> Position;

    /// Text of `line` without its terminator.
    fn line_text(&self, line: usize) -> Option<&str>;

    /// Text between two positions on the same or different lines.
    fn range_text(&self, start: Position, end: Position) -> Option<String>;

    fn is_editable(&self) -> bool;

    /// The buffer has unsaved changes.
    fn is_dirty(&self) -> bool;

    /// Full buffer text.
    fn text(&self) -> Cow<'_, str>;

    /// Replace `start..end` with `text`, moving the cursor to its end.
    fn replace_range(&mut self, start: Position, end: Position, text: &str);
}

/// In-memory document, line based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    path: PathBuf,
    lines: Vec<String>,
    cursor: Position,
    editable: bool,
    dirty: bool,
}

impl TextBuffer {
    pub fn new(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: split_lines(text),
            cursor: Position::default(),
            editable: true,
            dirty: false,
        }
    }

    pub fn with_cursor(mut self, line: usize, column: usize) -> Self {
        self.set_cursor(Position::new(line, column));
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Move the cursor, clamped to the document.
    pub fn set_cursor(&mut self, position: Position) {
        let line = position.line.min(self.lines.len().saturating_sub(1));
        let width = self.lines.get(line).map_or(0, |l| char_len(l));
        self.cursor = Position::new(line, position.column.min(width));
    }

    /// Type `text` at the cursor.
    pub fn insert(&mut self, text: &str) {
        let cursor = self.cursor;
        self.replace_range(cursor, cursor, text);
    }

    /// Forget unsaved state, as after writing to disk.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl EditorState for TextBuffer {
    fn path(&self) -> &Path {
        &self.path
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    fn range_text(&self, start: Position, end: Position) -> Option<String> {
        if end < start {
            return None;
        }
        let first = self.lines.get(start.line)?;
        let last = self.lines.get(end.line)?;
        if start.line == end.line {
            let head = text_before_column(first, start.column);
            let upto = text_before_column(first, end.column);
            return Some(upto[head.len()..].to_string());
        }
        let mut out = first[text_before_column(first, start.column).len()..].to_string();
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(text_before_column(last, end.column));
        Some(out)
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.lines.join("\n"))
    }

    fn replace_range(&mut self, start: Position, end: Position, text: &str) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        let Some(first) = self.lines.get(start.line) else {
            return;
        };
        let last = self.lines.get(end.line).unwrap_or(first);
        let head = text_before_column(first, start.column).to_string();
        let tail = last[text_before_column(last, end.column).len()..].to_string();

        let mut inserted = split_lines(text);
        let cursor_line = start.line + inserted.len() - 1;
        let cursor_column = if inserted.len() == 1 {
            char_len(&head) + char_len(text)
        } else {
            inserted.last().map_or(0, |l| char_len(l))
        };
        if let Some(line) = inserted.first_mut() {
            line.insert_str(0, &head);
        }
        if let Some(line) = inserted.last_mut() {
            line.push_str(&tail);
        }

        let end_line = end.line.min(self.lines.len() - 1);
        self.lines.splice(start.line..=end_line, inserted);
        self.cursor = Position::new(cursor_line, cursor_column);
        self.dirty = true;
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
