use crate::{
    fieldset::{Fieldset, FieldsetTable},
    group::{self, LabelLookup, SubsetGroup},
    instance::Instance,
    scope::ScopeIndex,
    subset::{SubsetDef, SubsetTable},
    types::{FieldId, FieldsetId, SubsetId},
};
use serde::Serialize;

///
/// Model
///
/// Immutable snapshot produced by [`crate::build::ModelBuilder::build`].
/// Every query is a lock-free read; the snapshot is safe to share across
/// threads for the remaining lifetime of the process.
///

#[derive(Clone, Debug, Serialize)]
pub struct Model {
    fieldsets: FieldsetTable,
    subsets: SubsetTable,
    scopes: ScopeIndex,
}

impl Model {
    pub(crate) const fn new(
        fieldsets: FieldsetTable,
        subsets: SubsetTable,
        scopes: ScopeIndex,
    ) -> Self {
        Self {
            fieldsets,
            subsets,
            scopes,
        }
    }

    /// Public (non-template) subsets in declaration order.
    pub fn subsets(&self) -> impl Iterator<Item = &SubsetDef> {
        self.subsets.iter()
    }

    /// Public lookup; template subsets answer `None`.
    #[must_use]
    pub fn subset(&self, id: &str) -> Option<&SubsetDef> {
        self.subsets.get(id)
    }

    /// Resolved field list of a public subset.
    #[must_use]
    pub fn subset_fields(&self, id: &str) -> Option<&[FieldId]> {
        self.subsets.get(id).map(|def| def.fields.as_slice())
    }

    /// Resolved fieldset selection of a public subset.
    #[must_use]
    pub fn subset_fieldsets(&self, id: &str) -> Option<&[FieldsetId]> {
        self.subsets.get(id).map(|def| def.fieldsets.as_slice())
    }

    /// Subsets belonging to a scope; empty for scopes never declared.
    #[must_use]
    pub fn subsets_scope(&self, scope: &str) -> &[SubsetId] {
        self.scopes.members(scope)
    }

    #[must_use]
    pub const fn subsets_scopes(&self) -> &ScopeIndex {
        &self.scopes
    }

    /// Public subsets bucketed by group display label, sorted for display.
    #[must_use]
    pub fn subsets_groups(&self, labels: &dyn LabelLookup) -> Vec<SubsetGroup> {
        group::grouped_subsets(self, labels)
    }

    #[must_use]
    pub const fn fieldsets(&self) -> &FieldsetTable {
        &self.fieldsets
    }

    #[must_use]
    pub fn fieldset(&self, id: &str) -> Option<&Fieldset> {
        self.fieldsets.get(id)
    }

    /// Read facade over one record's stored subset value.
    #[must_use]
    pub fn instance(&self, subset: impl Into<String>) -> Instance<'_> {
        Instance::new(self, subset)
    }
}
