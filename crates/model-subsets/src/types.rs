use crate::{DEFAULT_GROUP, MAX_IDENT_LEN, error::ConfigError};
use derive_more::Display;
use serde::{Serialize, Serializer};
use std::{borrow::Borrow, fmt, str::FromStr, sync::Arc};
use thiserror::Error as ThisError;

///
/// IdentError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum IdentError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier '{ident}' contains invalid character '{found}'")]
    InvalidChar { ident: String, found: char },

    #[error("identifier '{ident}' is longer than {MAX_IDENT_LEN} bytes")]
    TooLong { ident: String },
}

///
/// IdentKind
/// Which identifier namespace a malformed identifier was declared in.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum IdentKind {
    #[display("field")]
    Field,

    #[display("fieldset")]
    Fieldset,

    #[display("group")]
    Group,

    #[display("scope")]
    Scope,

    #[display("subset")]
    Subset,
}

// Identifiers are host-language attribute names: ASCII alphanumeric or
// underscore, not starting with a digit.
fn check_ident(text: &str) -> Result<(), IdentError> {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return Err(IdentError::Empty);
    };
    if text.len() > MAX_IDENT_LEN {
        return Err(IdentError::TooLong {
            ident: text.to_string(),
        });
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(IdentError::InvalidChar {
            ident: text.to_string(),
            found: first,
        });
    }
    if let Some(found) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(IdentError::InvalidChar {
            ident: text.to_string(),
            found,
        });
    }

    Ok(())
}

///
/// ident_type
/// Interned, validated identifier newtypes. Each namespace gets its own
/// type so fieldset/subset/scope/group ids cannot be mixed up silently.
///

macro_rules! ident_type {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Validate and intern the identifier text.
            pub fn new(text: impl AsRef<str>) -> Result<Self, ConfigError> {
                let text = text.as_ref();
                check_ident(text).map_err(|source| ConfigError::InvalidIdent {
                    kind: $kind,
                    source,
                })?;

                Ok(Self(Arc::from(text)))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

ident_type!(
    /// A single field identifier inside a fieldset.
    FieldId,
    IdentKind::Field
);

ident_type!(
    /// Identifier of a declared fieldset.
    FieldsetId,
    IdentKind::Fieldset
);

ident_type!(
    /// Identifier of a declared subset.
    SubsetId,
    IdentKind::Subset
);

ident_type!(
    /// Identifier of a scope partition.
    ScopeId,
    IdentKind::Scope
);

ident_type!(
    /// Identifier of a display group.
    GroupId,
    IdentKind::Group
);

impl Default for GroupId {
    fn default() -> Self {
        Self(Arc::from(DEFAULT_GROUP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for text in ["name", "login_2", "_hidden", "A"] {
            assert!(FieldsetId::new(text).is_ok(), "rejected '{text}'");
        }
    }

    #[test]
    fn rejects_empty_identifier() {
        let err = SubsetId::new("").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidIdent {
                kind: IdentKind::Subset,
                source: IdentError::Empty,
            }
        ));
    }

    #[test]
    fn rejects_invalid_characters() {
        for text in ["with space", "dash-ed", "1leading", "Ünicode"] {
            let err = ScopeId::new(text).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::InvalidIdent {
                        kind: IdentKind::Scope,
                        source: IdentError::InvalidChar { .. },
                    }
                ),
                "'{text}' produced {err:?}"
            );
        }
    }

    #[test]
    fn rejects_overlong_identifier() {
        let text = "f".repeat(MAX_IDENT_LEN + 1);
        let err = FieldId::new(&text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidIdent {
                source: IdentError::TooLong { .. },
                ..
            }
        ));
    }

    #[test]
    fn display_and_parse_round_trip() {
        let id: FieldsetId = "profile".parse().unwrap();
        assert_eq!(id.to_string(), "profile");
        assert_eq!(id, "profile");
    }

    #[test]
    fn group_defaults_to_default() {
        assert_eq!(GroupId::default().as_str(), crate::DEFAULT_GROUP);
    }
}
