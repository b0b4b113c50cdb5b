use crate::types::{FieldId, FieldsetId};
use serde::Serialize;

///
/// Fieldset
///
/// A named, ordered group of field identifiers. Opt-in fieldsets are left
/// out of the default baseline and must be named explicitly (explicit
/// `fieldsets` list, `extends`, or `add`).
///

#[derive(Clone, Debug, Serialize)]
pub struct Fieldset {
    pub id: FieldsetId,
    pub fields: Vec<FieldId>,
    pub opt_in: bool,
}

///
/// FieldsetOptions
///

#[derive(Clone, Copy, Debug, Default)]
pub struct FieldsetOptions {
    pub opt_in: bool,
}

impl FieldsetOptions {
    #[must_use]
    pub const fn opt_in() -> Self {
        Self { opt_in: true }
    }
}

///
/// FieldsetTable
///
/// Declaration-ordered fieldset registry for one owning type. Re-declaring
/// an id overwrites the entry in place, keeping its table position.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct FieldsetTable {
    entries: Vec<Fieldset>,
}

impl FieldsetTable {
    pub(crate) fn insert(&mut self, fieldset: Fieldset) {
        match self.entries.iter_mut().find(|e| e.id == fieldset.id) {
            Some(entry) => *entry = fieldset,
            None => self.entries.push(fieldset),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Fieldset> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fieldset> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fieldset ids included by default (opt-out), in declaration order.
    #[must_use]
    pub fn default_ids(&self) -> Vec<FieldsetId> {
        self.entries
            .iter()
            .filter(|e| !e.opt_in)
            .map(|e| e.id.clone())
            .collect()
    }

    /// Expand fieldset ids to their concatenated field lists, deduplicated
    /// with first occurrence preserved. Unknown ids contribute nothing.
    #[must_use]
    pub fn materialize(&self, ids: &[FieldsetId]) -> Vec<FieldId> {
        let mut fields = Vec::new();
        for id in ids {
            let Some(fieldset) = self.get(id.as_str()) else {
                continue;
            };
            for field in &fieldset.fields {
                if !fields.contains(field) {
                    fields.push(field.clone());
                }
            }
        }

        fields
    }
}
