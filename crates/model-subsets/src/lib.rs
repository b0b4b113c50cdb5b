//! Declarative fieldset and subset visibility profiles for data models.
//!
//! A model declares named groups of fields (fieldsets) and named visibility
//! profiles (subsets) that select, combine, and filter those groups. The
//! [`build::ModelBuilder`] resolves every subset declaration exactly once,
//! in declaration order, and freezes the result into an immutable
//! [`model::Model`] that answers field-visibility queries for live
//! instances.
//!
//! Storage, query filtering, error collection, and display text stay on the
//! host side of the [`scope::ScopeRegistrar`], [`instance::ErrorSink`], and
//! [`group::LabelLookup`] seams.

pub mod build;
pub mod error;
pub mod fieldset;
pub mod group;
pub mod instance;
pub mod model;
pub mod scope;
pub mod subset;
pub mod types;

/// Maximum length in bytes for declared identifiers.
pub const MAX_IDENT_LEN: usize = 64;

/// Group assigned to subsets that do not declare one.
pub const DEFAULT_GROUP: &str = "default";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        build::ModelBuilder,
        error::ConfigError,
        fieldset::{Fieldset, FieldsetOptions},
        group::{GroupEntry, LabelKind, LabelLookup, SubsetGroup},
        instance::{ErrorSink, Instance},
        model::Model,
        scope::ScopeRegistrar,
        subset::{SubsetDef, SubsetOptions},
        types::{FieldId, FieldsetId, GroupId, ScopeId, SubsetId},
    };
}
