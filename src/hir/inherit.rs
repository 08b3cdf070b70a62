//! Member resolution along a class's ancestry.
//!
//! Own members are collected with every visibility; members reached through
//! `extends` only when public or protected. Trait members are copied into the
//! using class and keep its mask. Interfaces contribute nothing.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::index::SourceIndex;
use super::symbols::{ClassRef, ClassSymbol, MemberKind, MemberSymbol};
use crate::syntax::Visibility;

/// Which declared visibilities a collection step accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityMask {
    public: bool,
    protected: bool,
    private: bool,
}

impl VisibilityMask {
    /// Members declared on the class itself.
    pub const OWN: Self = Self {
        public: true,
        protected: true,
        private: true,
    };

    /// Members reached through a parent class.
    pub const INHERITED: Self = Self {
        public: true,
        protected: true,
        private: false,
    };

    pub fn allows(self, visibility: Visibility) -> bool {
        match visibility {
            Visibility::Public | Visibility::Unknown => self.public,
            Visibility::Protected => self.protected,
            Visibility::Private => self.private,
        }
    }
}

/// A member visible from a class, with the ancestor it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub member: MemberSymbol,
    /// Short name of the declaring ancestor or trait; `None` for own members.
    pub origin: Option<Arc<str>>,
}

impl ResolvedMember {
    pub fn is_inherited(&self) -> bool {
        self.origin.is_some()
    }
}

/// Own plus accessible inherited members of `class`, children first.
///
/// A member redeclared lower in the hierarchy hides the ancestor's. Cyclic
/// `extends` chains end at the first revisited class.
pub fn resolve_members(index: &SourceIndex, class: &ClassSymbol) -> Vec<ResolvedMember> {
    let mut resolver = Resolver {
        index,
        visited: FxHashSet::default(),
        members: IndexMap::new(),
    };
    resolver.collect(class, VisibilityMask::OWN, None);
    resolver.members.into_values().collect()
}

/// Find the class-likes a reference points at.
///
/// The qualified table is authoritative; when it misses, files whose name
/// contains the short name are searched for a declaration of that name.
pub fn lookup_class(index: &SourceIndex, reference: &ClassRef) -> Vec<Arc<ClassSymbol>> {
    if let Some(class) = index.classes().get(&reference.fqn) {
        return vec![class.clone()];
    }

    let short = reference.short_name();
    let found: Vec<_> = index
        .find_by_name_fragment(short)
        .into_iter()
        .flat_map(|file| index.classes().in_file(file).iter().cloned())
        .filter(|class| class.name.eq_ignore_ascii_case(short))
        .collect();

    if found.is_empty() {
        debug!(name = %reference.fqn, "unresolved class reference");
    } else {
        trace!(name = %reference.fqn, matches = found.len(), "resolved by file name");
    }
    found
}

struct Resolver<'a> {
    index: &'a SourceIndex,
    visited: FxHashSet<String>,
    /// (kind, lower-cased name) → first member seen.
    members: IndexMap<(MemberKind, String), ResolvedMember>,
}

impl Resolver<'_> {
    fn collect(&mut self, class: &ClassSymbol, mask: VisibilityMask, origin: Option<Arc<str>>) {
        if !self.visited.insert(class.key()) {
            debug!(class = %class.fqn, "inheritance cycle, stopping");
            return;
        }

        for member in &class.members {
            if !mask.allows(member.visibility) {
                continue;
            }
            let key = (member.kind, member.name.to_lowercase());
            self.members.entry(key).or_insert_with(|| ResolvedMember {
                member: member.clone(),
                origin: origin.clone(),
            });
        }

        for reference in &class.traits {
            for used in lookup_class(self.index, reference) {
                self.collect(&used, mask, Some(Arc::from(used.name.as_str())));
            }
        }

        if let Some(parent) = &class.parent {
            for ancestor in lookup_class(self.index, parent) {
                self.collect(
                    &ancestor,
                    VisibilityMask::INHERITED,
                    Some(Arc::from(ancestor.name.as_str())),
                );
            }
        }
    }
}
