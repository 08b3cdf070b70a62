//! Completion candidates for a classified cursor context.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::config::CompletionConfig;
use super::context::{CompletionContext, CompletionMode};
use super::doc::DocSummary;
use crate::base::{FileId, constants::SIGIL};
use crate::hir::{
    Binding, BindingKind, ClassSymbol, MemberKind, MemberSymbol, ResolvedMember, ScopeWalker,
    SourceIndex, enclosing_class, resolve_members,
};
use crate::syntax::Visibility;

/// Own members and local variables.
pub const OWN_PRIORITY: u32 = 10;
/// Members reached through a parent class or trait.
pub const INHERITED_PRIORITY: u32 = 20;
pub const CLASS_PRIORITY: u32 = 30;
/// Predefined environment variables.
pub const PREDEFINED_PRIORITY: u32 = 40;
/// Added when the fragment matches somewhere other than the start.
pub const SUBSTRING_PENALTY: u32 = 5;

/// Kind of completion candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CandidateKind {
    Method,
    Property,
    Constant,
    Variable,
    Class,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Method => "method",
            CandidateKind::Property => "property",
            CandidateKind::Constant => "constant",
            CandidateKind::Variable => "variable",
            CandidateKind::Class => "class",
        }
    }
}

impl From<MemberKind> for CandidateKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Method => CandidateKind::Method,
            MemberKind::Property => CandidateKind::Property,
            MemberKind::ClassConstant => CandidateKind::Constant,
            MemberKind::Variable => CandidateKind::Variable,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Text shown in the list.
    pub label: Arc<str>,
    /// Text that replaces the matched prefix.
    pub insert_text: Arc<str>,
    /// Text matched against the search fragment.
    pub filter_text: Arc<str>,
    pub kind: CandidateKind,
    pub visibility: Visibility,
    /// Declaring ancestor or trait of an inherited member.
    pub origin: Option<Arc<str>>,
    pub doc: Option<DocSummary>,
    /// Return type, declared type or qualified class name.
    pub detail: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionCandidate {
    /// Create a candidate whose label, insert and filter text are all `label`.
    pub fn new(label: impl Into<Arc<str>>, kind: CandidateKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            filter_text: label.clone(),
            label,
            kind,
            visibility: Visibility::Unknown,
            origin: None,
            doc: None,
            detail: None,
            sort_priority: 100,
        }
    }

    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn with_filter_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.filter_text = text.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_origin(mut self, origin: Option<Arc<str>>) -> Self {
        self.origin = origin;
        self
    }

    /// Attach a summary of `raw` unless it has no content.
    pub fn with_doc(mut self, raw: Option<&str>) -> Self {
        self.doc = raw.map(DocSummary::from_comment).filter(|doc| !doc.is_empty());
        self
    }

    pub fn with_detail(mut self, detail: Option<impl Into<Arc<str>>>) -> Self {
        self.detail = detail.map(Into::into);
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a member visible through `$this->`.
    pub fn from_member(resolved: &ResolvedMember) -> Self {
        let member = &resolved.member;
        let priority = if resolved.is_inherited() {
            INHERITED_PRIORITY
        } else {
            OWN_PRIORITY
        };
        Self::new(member_text(member), member.kind.into())
            .with_filter_text(member.name.as_str())
            .with_visibility(member.visibility)
            .with_origin(resolved.origin.clone())
            .with_doc(member.doc.as_deref())
            .with_detail(member.type_hint.as_deref())
            .with_priority(priority)
    }

    /// Create from a variable binding.
    pub fn from_binding(binding: &Binding) -> Self {
        let priority = match binding.kind {
            BindingKind::Predefined => PREDEFINED_PRIORITY,
            _ => OWN_PRIORITY,
        };
        Self::new(binding.display_name(), CandidateKind::Variable)
            .with_detail(binding.type_hint.as_deref())
            .with_priority(priority)
    }

    /// Create from an instantiable class; `qualified` inserts `\Full\Name`.
    pub fn from_class(class: &ClassSymbol, qualified: bool) -> Self {
        let mut candidate = Self::new(class.name.as_str(), CandidateKind::Class)
            .with_visibility(Visibility::Public)
            .with_doc(class.doc.as_deref())
            .with_detail(Some(class.fqn.clone()))
            .with_priority(CLASS_PRIORITY);
        if qualified {
            let text: Arc<str> = Arc::from(format!("\\{}", class.fqn));
            candidate = candidate.with_insert_text(text.clone()).with_filter_text(text);
        }
        candidate
    }
}

/// Insertable text of a member.
///
/// Methods get a parameter stub, constants their raw value, properties
/// their bare name.
pub fn member_text(member: &MemberSymbol) -> String {
    match member.kind {
        MemberKind::Method => {
            let params: Vec<String> = member.params.iter().map(|p| format!("{SIGIL}{p}")).collect();
            format!("{}({})", member.name, params.join(", "))
        }
        MemberKind::ClassConstant => match member.value_raw.as_deref() {
            Some(raw) if !raw.is_empty() => format!("{} = {}", member.name, raw),
            _ => member.name.to_string(),
        },
        MemberKind::Property | MemberKind::Variable => member.name.to_string(),
    }
}

/// Get completion candidates for `context` in `file`.
///
/// The index is expected to be refreshed; files without a usable tree
/// produce no local candidates.
pub fn completions(
    index: &SourceIndex,
    config: &CompletionConfig,
    file: FileId,
    context: &CompletionContext,
) -> Vec<CompletionCandidate> {
    let candidates = match context.mode {
        CompletionMode::SelfMember => self_member_candidates(index, file, context),
        CompletionMode::BareVariable => variable_candidates(index, config, file, context),
        CompletionMode::NewInstance if config.offer_class_names => {
            class_candidates(index, context)
        }
        CompletionMode::InstanceMember => {
            debug!(token = %context.token, "instance member access is not resolved");
            Vec::new()
        }
        CompletionMode::NewInstance | CompletionMode::Unclassified => Vec::new(),
    };

    let mut items = rank(dedup(filter(candidates, &context.fragment_lower)), &context.fragment_lower);
    if let Some(max) = config.max_candidates {
        items.truncate(max);
    }
    trace!(mode = context.mode.as_str(), count = items.len(), "built candidates");
    items
}

fn self_member_candidates(
    index: &SourceIndex,
    file: FileId,
    context: &CompletionContext,
) -> Vec<CompletionCandidate> {
    let Some(unit) = index.parsed(file) else {
        return Vec::new();
    };
    let Some((_, class)) = enclosing_class(unit, context.cursor.line) else {
        trace!(line = context.cursor.line, "cursor is outside every class");
        return Vec::new();
    };
    let Some(symbol) = index
        .file(file)
        .and_then(|f| {
            f.classes()
                .iter()
                .find(|c| c.span == class.span && c.name == class.name)
        })
    else {
        return Vec::new();
    };

    resolve_members(index, symbol)
        .iter()
        .map(CompletionCandidate::from_member)
        .collect()
}

fn variable_candidates(
    index: &SourceIndex,
    config: &CompletionConfig,
    file: FileId,
    context: &CompletionContext,
) -> Vec<CompletionCandidate> {
    let Some(unit) = index.parsed(file) else {
        return Vec::new();
    };
    ScopeWalker::new(&config.predefined_variables)
        .walk(unit, context.cursor)
        .bindings
        .iter()
        .map(CompletionCandidate::from_binding)
        .collect()
}

fn class_candidates(index: &SourceIndex, context: &CompletionContext) -> Vec<CompletionCandidate> {
    let qualified = context.fragment.starts_with('\\');
    index
        .classes()
        .iter()
        .filter(|class| class.is_instantiable())
        .map(|class| CompletionCandidate::from_class(class, qualified))
        .collect()
}

fn filter(candidates: Vec<CompletionCandidate>, fragment_lower: &str) -> Vec<CompletionCandidate> {
    if fragment_lower.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|c| c.filter_text.to_lowercase().contains(fragment_lower))
        .collect()
}

/// First candidate per insertable text wins.
fn dedup(candidates: Vec<CompletionCandidate>) -> Vec<CompletionCandidate> {
    let mut seen: IndexMap<Arc<str>, CompletionCandidate> = IndexMap::new();
    for candidate in candidates {
        seen.entry(candidate.insert_text.clone()).or_insert(candidate);
    }
    seen.into_values().collect()
}

/// Stable sort: prefix matches first within each priority band.
fn rank(mut candidates: Vec<CompletionCandidate>, fragment_lower: &str) -> Vec<CompletionCandidate> {
    if !fragment_lower.is_empty() {
        for candidate in &mut candidates {
            let text = candidate.filter_text.to_lowercase();
            let text = text.trim_start_matches([SIGIL, '\\']);
            if !text.starts_with(fragment_lower.trim_start_matches([SIGIL, '\\'])) {
                candidate.sort_priority += SUBSTRING_PENALTY;
            }
        }
    }
    candidates.sort_by_key(|c| c.sort_priority);
    candidates
}
