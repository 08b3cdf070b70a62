//! Replacement span for an accepted candidate.

use tracing::trace;

use super::completion::CompletionCandidate;
use super::context::{CompletionContext, CompletionMode};
use super::editor::EditorState;
use super::text_utils::{char_len, last_char_index_of, replace_char_range, text_before_column};
use crate::base::Position;
use crate::base::constants::SELF_REFERENCE;

/// Replace `start_column..end_column` of `line` with `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertionPlan {
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub text: String,
}

impl InsertionPlan {
    /// Plan the insertion of `candidate` into `line_text`, the current text
    /// of the cursor line.
    ///
    /// The span starts at the last occurrence of the matched prefix before
    /// the cursor and ends at the cursor. An empty prefix inserts at the
    /// cursor without deleting anything.
    pub fn new(
        context: &CompletionContext,
        line_text: &str,
        candidate: &CompletionCandidate,
    ) -> Self {
        let cursor = context.cursor;
        let (matched, text) = match context.mode {
            CompletionMode::SelfMember if context.has_full_self_reference() => {
                (context.fragment.as_str(), candidate.insert_text.to_string())
            }
            // Partially typed `$this->` is completed along with the member
            CompletionMode::SelfMember => (
                context.token.as_str(),
                format!("{SELF_REFERENCE}{}", candidate.insert_text),
            ),
            CompletionMode::InstanceMember => {
                (context.fragment.as_str(), candidate.insert_text.to_string())
            }
            CompletionMode::BareVariable
            | CompletionMode::NewInstance
            | CompletionMode::Unclassified => {
                (context.token.as_str(), candidate.insert_text.to_string())
            }
        };

        let start_column = if matched.is_empty() {
            cursor.column
        } else {
            let before = text_before_column(line_text, cursor.column);
            last_char_index_of(before, matched)
                .unwrap_or_else(|| cursor.column.saturating_sub(char_len(matched)))
        };
        trace!(
            line = cursor.line,
            start_column,
            end_column = cursor.column,
            "planned insertion"
        );

        Self {
            line: cursor.line,
            start_column,
            end_column: cursor.column,
            text,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.line, self.end_column)
    }

    /// `line` with the plan applied.
    pub fn apply_to_line(&self, line: &str) -> String {
        replace_char_range(line, self.start_column, self.end_column, &self.text)
    }

    /// Apply to the editor. Returns `false` for a read-only document.
    pub fn apply(&self, editor: &mut dyn EditorState) -> bool {
        if !editor.is_editable() {
            return false;
        }
        editor.replace_range(self.start(), self.end(), &self.text);
        true
    }
}
