//! Cursor context classification.
//!
//! Looks only at the text before the cursor on the current line and decides
//! which kind of identifier is being typed.

use tracing::trace;

use super::text_utils::{char_len, ends_with_keyword};
use crate::base::Position;
use crate::base::constants::{MEMBER_ACCESS, NEW_KEYWORD, SELF_REFERENCE, SIGIL, TOKEN_DELIMITERS};

/// Kind of completion request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionMode {
    /// `$this->` (possibly partially typed).
    SelfMember,
    /// `$obj->`; classified but never resolved.
    InstanceMember,
    /// `$name`
    BareVariable,
    /// Name after the `new` keyword.
    NewInstance,
    Unclassified,
}

impl CompletionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionMode::SelfMember => "self-member",
            CompletionMode::InstanceMember => "instance-member",
            CompletionMode::BareVariable => "bare-variable",
            CompletionMode::NewInstance => "new-instance",
            CompletionMode::Unclassified => "unclassified",
        }
    }
}

/// A classified completion request. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionContext {
    pub mode: CompletionMode,
    /// Token immediately before the cursor.
    pub token: String,
    /// Char column where `token` starts.
    pub token_start: usize,
    /// Text candidates are matched against.
    pub fragment: String,
    pub fragment_lower: String,
    pub cursor: Position,
}

impl CompletionContext {
    fn new(mode: CompletionMode, token: &str, fragment: &str, cursor: Position) -> Self {
        Self {
            mode,
            token: token.to_string(),
            token_start: cursor.column.saturating_sub(char_len(token)),
            fragment: fragment.to_string(),
            fragment_lower: fragment.to_lowercase(),
            cursor,
        }
    }

    /// `$this->` has been typed in full.
    pub fn has_full_self_reference(&self) -> bool {
        self.token.starts_with(SELF_REFERENCE)
    }

    pub fn is_unclassified(&self) -> bool {
        self.mode == CompletionMode::Unclassified
    }
}

/// Classify `text_before` (the line up to the cursor column).
pub fn classify(text_before: &str, cursor: Position) -> CompletionContext {
    let token = extract_token(text_before);
    let context = classify_token(text_before, token, cursor);
    trace!(
        mode = context.mode.as_str(),
        token = %context.token,
        fragment = %context.fragment,
        "classified completion context"
    );
    context
}

/// Token after the last delimiter; re-rooted at the last sigil when it has one.
fn extract_token(text: &str) -> &str {
    let start = text
        .char_indices()
        .filter(|(_, c)| c.is_whitespace() || TOKEN_DELIMITERS.contains(c))
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let token = &text[start..];
    match token.rfind(SIGIL) {
        Some(sigil) => &token[sigil..],
        None => token,
    }
}

fn classify_token(text_before: &str, token: &str, cursor: Position) -> CompletionContext {
    use CompletionMode::*;

    if token.is_empty() {
        return CompletionContext::new(Unclassified, token, "", cursor);
    }

    if let Some(rest) = token.strip_prefix(SELF_REFERENCE) {
        // `$this->a->b` is a member of a member: an arbitrary instance
        if let Some((_, member)) = rest.rsplit_once(MEMBER_ACCESS) {
            return CompletionContext::new(InstanceMember, token, member, cursor);
        }
        return CompletionContext::new(SelfMember, token, rest, cursor);
    }
    // A lone `$` is also a prefix of `$this->` but classifies as a bare variable.
    if char_len(token) >= 2 && SELF_REFERENCE.starts_with(token) {
        return CompletionContext::new(SelfMember, token, "", cursor);
    }

    if let Some(rest) = token.strip_prefix(SIGIL) {
        if let Some((_, member)) = rest.rsplit_once(MEMBER_ACCESS) {
            return CompletionContext::new(InstanceMember, token, member, cursor);
        }
        return CompletionContext::new(BareVariable, token, rest, cursor);
    }

    let before_token = &text_before[..text_before.len() - token.len()];
    if ends_with_keyword(before_token.trim_end(), NEW_KEYWORD) {
        return CompletionContext::new(NewInstance, token, token, cursor);
    }

    CompletionContext::new(Unclassified, token, "", cursor)
}
