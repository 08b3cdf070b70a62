//! Comments attached to a declaration.
//!
//! The syntax tree keeps comments as trivia outside the nodes, so the
//! comments of a declaration are recovered by scanning backwards from its
//! first byte. Only comments separated from the declaration by whitespace or
//! attribute groups belong to it.

use std::ops::Range;

use crate::syntax::CommentKind;

/// Comments directly above `offset`, in source order.
pub(super) fn leading_comments(source: &str, offset: usize) -> Vec<(CommentKind, Range<usize>)> {
    let mut found = Vec::new();
    let mut end = offset.min(source.len());

    while let Some(before) = source.get(..end) {
        let before = before.trim_end();
        let stop = before.len();

        if before.ends_with("*/") {
            let Some(start) = before[..stop - 2].rfind("/*") else {
                break;
            };
            let text = &before[start..];
            let kind = if text.starts_with("/**") && text != "/**/" {
                CommentKind::Doc
            } else {
                CommentKind::Block
            };
            found.push((kind, start..stop));
            end = start;
            continue;
        }

        if before.ends_with(']') {
            if let Some(start) = attribute_start(before) {
                end = start;
                continue;
            }
        }

        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = &before[line_start..];
        let trimmed = line.trim_start();
        let is_line_comment =
            trimmed.starts_with("//") || (trimmed.starts_with('#') && !trimmed.starts_with("#["));
        if !is_line_comment || trimmed.is_empty() {
            break;
        }
        let start = line_start + (line.len() - trimmed.len());
        found.push((CommentKind::Line, start..stop));
        end = start;
    }

    found.reverse();
    found
}

/// Start of the `#[...]` group that ends `text`.
fn attribute_start(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices().rev() {
        match c {
            ']' => depth += 1,
            '[' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return text[..i].ends_with('#').then(|| i - 1);
                }
            }
            _ => {}
        }
    }
    None
}
