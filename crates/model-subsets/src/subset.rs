use crate::types::{FieldId, FieldsetId, GroupId, ScopeId, SubsetId};
use serde::Serialize;

///
/// SubsetOptions
///
/// Raw declaration directives for one subset. Every list-valued directive
/// appends, so a singular value is simply a one-element list. Identifier
/// text is validated by `ModelBuilder::declare_subset`, which fails fast on
/// malformed input.
///

#[derive(Clone, Debug, Default)]
pub struct SubsetOptions {
    pub(crate) extends: Vec<String>,
    pub(crate) add: Vec<String>,
    pub(crate) only: Option<Vec<String>>,
    pub(crate) except: Option<Vec<String>>,
    pub(crate) fieldsets: Option<Vec<String>>,
    pub(crate) scopes: Vec<String>,
    pub(crate) group: Option<String>,
    pub(crate) template: bool,
}

impl SubsetOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inherit the resolved options of an already-declared subset. Unknown
    /// parents are skipped silently.
    #[must_use]
    pub fn extends(mut self, id: impl Into<String>) -> Self {
        self.extends.push(id.into());
        self
    }

    /// Add a fieldset after restriction and exclusion have run, so the
    /// addition bypasses `only`/`except`.
    #[must_use]
    pub fn add(mut self, id: impl Into<String>) -> Self {
        self.add.push(id.into());
        self
    }

    /// Restrict the baseline to the listed fieldsets.
    #[must_use]
    pub fn only(mut self, id: impl Into<String>) -> Self {
        self.only.get_or_insert_with(Vec::new).push(id.into());
        self
    }

    /// Exclude a fieldset from the baseline.
    #[must_use]
    pub fn except(mut self, id: impl Into<String>) -> Self {
        self.except.get_or_insert_with(Vec::new).push(id.into());
        self
    }

    /// Replace the baseline with an explicit fieldset list.
    #[must_use]
    pub fn fieldset(mut self, id: impl Into<String>) -> Self {
        self.fieldsets.get_or_insert_with(Vec::new).push(id.into());
        self
    }

    /// Declare membership in a scope.
    #[must_use]
    pub fn scope(mut self, id: impl Into<String>) -> Self {
        self.scopes.push(id.into());
        self
    }

    /// Assign a display group.
    #[must_use]
    pub fn group(mut self, id: impl Into<String>) -> Self {
        self.group = Some(id.into());
        self
    }

    /// Mark the subset usable only as an `extends` source; it is excluded
    /// from all public enumerations.
    #[must_use]
    pub const fn template(mut self) -> Self {
        self.template = true;
        self
    }
}

///
/// SubsetDef
///
/// One resolved subset. Directives are resolved once at declaration time;
/// the definition is immutable afterwards.
///

#[derive(Clone, Debug, Serialize)]
pub struct SubsetDef {
    pub id: SubsetId,

    /// Fieldsets surviving extends/only/except/add, pruned to the fieldsets
    /// known at declaration time, deduplicated.
    pub fieldsets: Vec<FieldsetId>,

    /// Materialized field list: fieldsets expanded in order, first
    /// occurrence of each field preserved.
    pub fields: Vec<FieldId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) group: Option<GroupId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<ScopeId>,

    pub template: bool,
}

impl SubsetDef {
    /// Display group, falling back to the `default` group when undeclared.
    #[must_use]
    pub fn group(&self) -> GroupId {
        self.group.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn has_fieldset(&self, id: &str) -> bool {
        self.fieldsets.iter().any(|f| *f == id)
    }

    #[must_use]
    pub fn has_field(&self, id: &str) -> bool {
        self.fields.iter().any(|f| *f == id)
    }
}

///
/// SubsetTable
///
/// Declaration-ordered registry of resolved subsets. Public accessors hide
/// template subsets; `extends` resolution inside the builder looks through
/// `get_any`.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct SubsetTable {
    entries: Vec<SubsetDef>,
}

impl SubsetTable {
    pub(crate) fn insert(&mut self, def: SubsetDef) {
        self.entries.push(def);
    }

    pub(crate) fn get_any(&self, id: &str) -> Option<&SubsetDef> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub(crate) fn contains_any(&self, id: &str) -> bool {
        self.get_any(id).is_some()
    }

    /// Public lookup; template subsets answer `None`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SubsetDef> {
        self.get_any(id).filter(|def| !def.template)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Public subsets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SubsetDef> {
        self.entries.iter().filter(|e| !e.template)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
