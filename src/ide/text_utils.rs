//! Text manipulation utilities for the line preceding the cursor.
//!
//! Columns are counted in `char`s, matching [`Position`](crate::base::Position).

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// The first `column` chars of `line`. Columns past the end clamp to the line.
pub fn text_before_column(line: &str, column: usize) -> &str {
    match line.char_indices().nth(column) {
        Some((byte, _)) => &line[..byte],
        None => line,
    }
}

/// Number of chars in `text`.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Char column of the last occurrence of `needle` in `haystack`.
pub fn last_char_index_of(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .rfind(needle)
        .map(|byte| char_len(&haystack[..byte]))
}

/// Check if `text` ends with `keyword` as a whole word (ASCII case-insensitive).
///
/// # Example
/// ```
/// use thizer::ide::text_utils::ends_with_keyword;
///
/// assert!(ends_with_keyword("$a = new", "new"));
/// assert!(ends_with_keyword("NEW", "new"));
/// assert!(!ends_with_keyword("$renew", "new"));
/// ```
pub fn ends_with_keyword(text: &str, keyword: &str) -> bool {
    if text.len() < keyword.len() || !text.is_char_boundary(text.len() - keyword.len()) {
        return false;
    }
    let (head, tail) = text.split_at(text.len() - keyword.len());
    if !tail.eq_ignore_ascii_case(keyword) {
        return false;
    }
    match head.chars().next_back() {
        Some(c) => !is_word_character(c) && c != '$',
        None => true,
    }
}

/// Replace the chars `start..end` of `line` with `replacement`.
pub fn replace_char_range(line: &str, start: usize, end: usize, replacement: &str) -> String {
    let head = text_before_column(line, start);
    let rest = &line[head.len()..];
    let tail = &rest[text_before_column(rest, end.saturating_sub(start)).len()..];
    let mut out = String::with_capacity(head.len() + replacement.len() + tail.len());
    out.push_str(head);
    out.push_str(replacement);
    out.push_str(tail);
    out
}
