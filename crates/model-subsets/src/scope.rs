use crate::types::{ScopeId, SubsetId};
use serde::Serialize;

///
/// ScopeIndex
///
/// Scope membership accumulated during the build phase. Both the scope
/// order and each membership list follow subset declaration order. Template
/// subsets never appear.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ScopeIndex {
    entries: Vec<ScopeEntry>,
}

///
/// ScopeEntry
///

#[derive(Clone, Debug, Serialize)]
pub struct ScopeEntry {
    pub scope: ScopeId,
    pub members: Vec<SubsetId>,
}

impl ScopeIndex {
    pub(crate) fn append(&mut self, scope: &ScopeId, subset: &SubsetId) {
        match self.entries.iter_mut().find(|e| e.scope == *scope) {
            Some(entry) => entry.members.push(subset.clone()),
            None => self.entries.push(ScopeEntry {
                scope: scope.clone(),
                members: vec![subset.clone()],
            }),
        }
    }

    /// Membership list for a scope; empty for scopes never declared.
    #[must_use]
    pub fn members(&self, scope: &str) -> &[SubsetId] {
        self.entries
            .iter()
            .find(|e| e.scope == scope)
            .map_or(&[], |e| e.members.as_slice())
    }

    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.entries.iter().any(|e| e.scope == scope)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopeEntry> {
        self.entries.iter()
    }

    pub fn scopes(&self) -> impl Iterator<Item = &ScopeId> {
        self.entries.iter().map(|e| &e.scope)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// ScopeRegistrar
///
/// Host-side seam that installs a storage-layer filter for a scope
/// ("instances whose subset is one of these"). Invoked each time a scope's
/// membership grows, with the scope's full current membership. The core
/// never constructs storage queries itself.
///

pub trait ScopeRegistrar {
    fn register(&mut self, scope: &ScopeId, members: &[SubsetId]);
}
