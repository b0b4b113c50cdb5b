use crate::{
    model::Model,
    subset::SubsetDef,
    types::{FieldId, FieldsetId},
};

///
/// ErrorSink
///
/// Optional host-side validation-error collector. Invoked only by
/// [`Instance::validate_subset`] on failure.
///

pub trait ErrorSink {
    fn add_error(&mut self, field: &str, kind: &str);
}

///
/// Instance
///
/// Per-instance read API over one record's stored subset value. The raw
/// value is kept verbatim (the stored primitive need not be a well-formed
/// identifier); an unknown or template subset answers every query with
/// absence or `false`, never an error.
///

#[derive(Clone, Debug)]
pub struct Instance<'m> {
    model: &'m Model,
    subset: String,
}

impl<'m> Instance<'m> {
    #[must_use]
    pub fn new(model: &'m Model, subset: impl Into<String>) -> Self {
        Self {
            model,
            subset: subset.into(),
        }
    }

    /// Raw stored subset value.
    #[must_use]
    pub fn subset(&self) -> &str {
        &self.subset
    }

    /// Set the raw subset value. Performs no validation.
    pub fn set_subset(&mut self, subset: impl Into<String>) {
        self.subset = subset.into();
    }

    fn def(&self) -> Option<&'m SubsetDef> {
        self.model.subset(&self.subset)
    }

    /// Whether the stored value names a public subset.
    #[must_use]
    pub fn is_valid_subset(&self) -> bool {
        self.def().is_some()
    }

    /// Validity check that records `(subset, invalid)` through the sink on
    /// failure. Never fails itself.
    pub fn validate_subset(&self, errors: &mut dyn ErrorSink) -> bool {
        let valid = self.is_valid_subset();
        if !valid {
            errors.add_error("subset", "invalid");
        }

        valid
    }

    /// Resolved fieldset selection of the current subset.
    #[must_use]
    pub fn fieldsets(&self) -> Option<&'m [FieldsetId]> {
        self.def().map(|def| def.fieldsets.as_slice())
    }

    #[must_use]
    pub fn has_fieldset(&self, id: &str) -> bool {
        self.def().is_some_and(|def| def.has_fieldset(id))
    }

    /// Resolved field list of the current subset.
    #[must_use]
    pub fn subset_fields(&self) -> Option<&'m [FieldId]> {
        self.def().map(|def| def.fields.as_slice())
    }

    #[must_use]
    pub fn has_field(&self, id: &str) -> bool {
        self.def().is_some_and(|def| def.has_field(id))
    }

    /// Whether the current subset belongs to the scope.
    #[must_use]
    pub fn in_scope(&self, scope: &str) -> bool {
        self.model
            .subsets_scope(scope)
            .iter()
            .any(|s| *s == self.subset.as_str())
    }
}
