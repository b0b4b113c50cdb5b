use crate::types::{IdentError, IdentKind, SubsetId};
use thiserror::Error as ThisError;

///
/// ConfigError
///
/// Declaration-time configuration failures. These indicate a programming
/// mistake in the model definition and are surfaced immediately by the
/// declaration call that caused them, never deferred.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("subset '{id}' is already declared")]
    DuplicateSubset { id: SubsetId },

    #[error("invalid {kind} identifier: {source}")]
    InvalidIdent {
        kind: IdentKind,
        #[source]
        source: IdentError,
    },
}
