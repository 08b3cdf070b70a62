//! Small clauses read from the source text of a node.
//!
//! Declaration headers and import lists are flat word sequences, so they are
//! read from the node's own text rather than its sub-nodes.

use smol_str::SmolStr;

use crate::syntax::{UseItem, UseKind};

/// Modifiers and supertypes written before a class-like body.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct ClassHeader {
    pub is_abstract: bool,
    pub is_final: bool,
    pub extends: Vec<SmolStr>,
    pub implements: Vec<SmolStr>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum HeaderPart {
    Modifiers,
    Name,
    Other,
    Extends,
    Implements,
}

impl ClassHeader {
    /// `header` runs from the start of the declaration to its `{`.
    pub(super) fn parse(header: &str) -> Self {
        let mut parsed = Self::default();
        let mut part = HeaderPart::Modifiers;
        let words = strip_attributes(header);
        for word in words
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|w| !w.is_empty())
        {
            let lower = word.to_ascii_lowercase();
            match (part, lower.as_str()) {
                (HeaderPart::Modifiers, "abstract") => parsed.is_abstract = true,
                (HeaderPart::Modifiers, "final") => parsed.is_final = true,
                (HeaderPart::Modifiers, "class" | "interface" | "trait" | "enum") => {
                    part = HeaderPart::Name;
                }
                (HeaderPart::Modifiers, _) => {}
                (_, "extends") => part = HeaderPart::Extends,
                (_, "implements") => part = HeaderPart::Implements,
                (HeaderPart::Name, _) => part = HeaderPart::Other,
                (HeaderPart::Extends, _) => parsed.extends.push(SmolStr::new(word)),
                (HeaderPart::Implements, _) => parsed.implements.push(SmolStr::new(word)),
                (HeaderPart::Other, _) => {}
            }
        }
        parsed
    }
}

/// Name and braced-ness of a `namespace` declaration.
pub(super) fn namespace_header(text: &str) -> (Option<SmolStr>, bool) {
    let rest = strip_keyword(text, "namespace").unwrap_or(text);
    let end = rest.find([';', '{']).unwrap_or(rest.len());
    let braced = rest[end..].starts_with('{');
    let name = rest[..end].trim().trim_start_matches('\\');
    ((!name.is_empty()).then(|| SmolStr::new(name)), braced)
}

/// Kind and items of a top-level `use` statement, group uses expanded.
pub(super) fn use_clause(text: &str) -> Option<(UseKind, Vec<UseItem>)> {
    let body = strip_keyword(text, "use")?;
    let body = body.trim().trim_end_matches(';').trim();
    let (kind, body) = use_kind(body);

    let mut items = Vec::new();
    for part in split_top_level(body) {
        match part.split_once('{') {
            Some((prefix, inner)) => {
                let prefix = prefix.trim().trim_end_matches('\\');
                for entry in inner.trim_end_matches('}').split(',') {
                    let (_, entry) = use_kind(entry.trim());
                    if let Some(item) = use_item(entry, Some(prefix)) {
                        items.push(item);
                    }
                }
            }
            None => items.extend(use_item(part, None)),
        }
    }
    (!items.is_empty()).then_some((kind, items))
}

fn use_kind(text: &str) -> (UseKind, &str) {
    if let Some(rest) = strip_keyword(text, "function") {
        (UseKind::Function, rest.trim_start())
    } else if let Some(rest) = strip_keyword(text, "const") {
        (UseKind::Const, rest.trim_start())
    } else {
        (UseKind::Class, text)
    }
}

fn use_item(text: &str, prefix: Option<&str>) -> Option<UseItem> {
    let mut words = text.split_whitespace();
    let name = words.next()?.trim_start_matches('\\');
    let alias = match (words.next(), words.next()) {
        (Some(word), Some(alias)) if word.eq_ignore_ascii_case("as") => Some(SmolStr::new(alias)),
        _ => None,
    };
    let name = match prefix {
        Some(prefix) => format!("{}\\{name}", prefix.trim_start_matches('\\')),
        None => name.to_string(),
    };
    Some(UseItem {
        name: SmolStr::new(name),
        alias,
    })
}

/// Names listed by a `use A, B;` or `use A { ... }` trait import.
pub(super) fn trait_names(text: &str) -> Vec<SmolStr> {
    let body = strip_keyword(text, "use").unwrap_or(text);
    let end = body.find([';', '{']).unwrap_or(body.len());
    body[..end]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(SmolStr::new)
        .collect()
}

/// Name and raw value of an enum `case`; the value is empty when absent.
pub(super) fn enum_case(text: &str) -> Option<(SmolStr, String)> {
    let body = strip_keyword(strip_attributes(text).trim_start(), "case")?;
    let body = body.trim().trim_end_matches(';');
    let (name, value) = body.split_once('=').unwrap_or((body, ""));
    let name = name.trim();
    (!name.is_empty()).then(|| (SmolStr::new(name), value.trim().to_string()))
}

/// Class instantiated by a `new Name(...)` expression.
pub(super) fn instantiated_class(expression: &str) -> Option<SmolStr> {
    let rest = strip_keyword(expression.trim_start(), "new")?;
    let name: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '\\')
        .collect();
    (!name.is_empty() && !name.eq_ignore_ascii_case("class")).then(|| SmolStr::new(name))
}

/// Types listed in a `catch (A | B $e)` clause.
pub(super) fn catch_types(text: &str) -> Vec<SmolStr> {
    let Some(open) = text.find('(') else {
        return Vec::new();
    };
    let inner = &text[open + 1..];
    let end = inner.find(['$', ')']).unwrap_or(inner.len());
    inner[..end]
        .split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(SmolStr::new)
        .collect()
}

/// First word of a member declaration, attributes skipped.
pub(super) fn first_keyword(text: &str) -> &str {
    let text = strip_attributes(text);
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    &text[..end]
}

/// `text` after a leading case-insensitive `keyword` followed by a boundary.
fn strip_keyword<'t>(text: &'t str, keyword: &str) -> Option<&'t str> {
    let head = text.get(..keyword.len())?;
    let rest = &text[keyword.len()..];
    let boundary = rest
        .chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
    (head.eq_ignore_ascii_case(keyword) && boundary).then_some(rest)
}

/// `text` after any leading `#[...]` attribute groups.
fn strip_attributes(text: &str) -> &str {
    let mut rest = text.trim_start();
    while let Some(inner) = rest.strip_prefix("#[") {
        let mut depth = 1usize;
        let mut end = None;
        for (i, c) in inner.char_indices() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }
        match end {
            Some(end) => rest = inner[end..].trim_start(),
            None => break,
        }
    }
    rest
}

/// Comma-separated parts, ignoring commas inside `{...}`.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}
