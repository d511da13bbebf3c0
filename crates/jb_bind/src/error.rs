//! Error taxonomy of the binding engine.
//!
//! Model-build failures ([`ConfigurationError`]) abort the construction of a
//! class model, nothing partial is cached. Per-value failures propagate to the
//! caller wrapped in [`BindError::Property`] so the offending property is known.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::error::Error;
use core::fmt;

use thiserror::Error;

use crate::format::FormatError;

/// A boxed error raised by user code (getters, setters, creators, adapters).
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

// -----------------------------------------------------------------------------
// ConfigurationError

/// Contradictory customization found while building a class model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("`{member}` is transient and cannot also declare `{annotation}`")]
    TransientConflict {
        member: String,
        annotation: &'static str,
    },
    #[error("`{type_path}` maps both `{first}` and `{second}` to the document key `{name}`")]
    NameClash {
        type_path: &'static str,
        name: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("creator of `{type_path}` declares parameter `{name}` more than once")]
    DuplicateCreatorParameter {
        type_path: &'static str,
        name: String,
    },
    #[error("`{type_path}` writes a property named after its type key `{key}`")]
    DiscriminatorClash { type_path: &'static str, key: String },
    #[error("`{site}` declares an invalid format")]
    InvalidFormat {
        site: String,
        #[source]
        source: FormatError,
    },
}

// -----------------------------------------------------------------------------
// AccessError

/// A resolved accessor failed at call time.
#[derive(Debug, Error)]
#[error("accessing `{member}` failed")]
pub struct AccessError {
    member: String,
    #[source]
    source: BoxError,
}

impl AccessError {
    pub fn new(member: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            member: member.into(),
            source: source.into(),
        }
    }

    /// Identity of the failing member, `Type::member`.
    #[inline]
    pub fn member(&self) -> &str {
        &self.member
    }
}

// -----------------------------------------------------------------------------
// UnsupportedTypeError

/// Why dispatch refused a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnsupportedReason {
    /// The type cannot be encoded as a document key.
    MapKey,
    /// An optional whose content is itself optional.
    NestedOptional,
    /// Decoding needs an instance but the type has neither constructor nor creator.
    NoConstructor,
    /// No built-in or registered strategy encodes the type.
    NoStrategy,
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapKey => f.pad("not supported as a map key"),
            Self::NestedOptional => f.pad("nested optionals are ambiguous"),
            Self::NoConstructor => f.pad("no constructor or creator to instantiate it"),
            Self::NoStrategy => f.pad("no strategy can encode it"),
        }
    }
}

/// Dispatch found no strategy for a type.
#[derive(Debug, Error)]
#[error("unsupported type `{type_path}`: {reason}")]
pub struct UnsupportedTypeError {
    pub type_path: &'static str,
    pub reason: UnsupportedReason,
}

// -----------------------------------------------------------------------------
// CreatorInvocationError

/// The instantiation callback of a creator failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CreatorInvocationError {
    #[error("creator of `{type_path}` failed")]
    Failed {
        type_path: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("creator of `{type_path}` requires parameter `{name}`")]
    MissingParameter {
        type_path: &'static str,
        name: String,
    },
}

// -----------------------------------------------------------------------------
// RecursiveReferenceError

/// A strategy re-entered serialization of an instance still in progress.
#[derive(Debug, Error)]
#[error("recursive reference to an instance of `{type_path}`")]
pub struct RecursiveReferenceError {
    pub type_path: &'static str,
}

// -----------------------------------------------------------------------------
// TypeMismatch

/// A dynamically typed value was not of the expected concrete type.
#[derive(Debug, Clone, Error)]
#[error("expected `{expected}`, found `{found}`")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

impl TypeMismatch {
    #[inline]
    pub fn new<T: ?Sized>(found: &'static str) -> Self {
        Self {
            expected: core::any::type_name::<T>(),
            found,
        }
    }
}

// -----------------------------------------------------------------------------
// DocumentError

/// Failure reported by a document reader or writer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("unexpected end of document")]
    UnexpectedEnd,
    #[error("invalid document structure: {0}")]
    Structure(&'static str),
    #[error("non-finite number `{0}` has no document form")]
    NonFinite(f64),
}

// -----------------------------------------------------------------------------
// BindError

/// Umbrella error of every bind operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),
    #[error(transparent)]
    CreatorInvocation(#[from] CreatorInvocationError),
    #[error(transparent)]
    RecursiveReference(#[from] RecursiveReferenceError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("unknown property `{key}` in `{type_path}`")]
    UnknownProperty { type_path: &'static str, key: String },
    #[error("expected {expected} for `{type_path}`, found {found}")]
    Mismatch {
        type_path: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("property `{property}` of `{owner}`")]
    Property {
        owner: &'static str,
        property: &'static str,
        #[source]
        source: Box<BindError>,
    },
    #[error("unknown alias `{alias}` under the type key `{key}`")]
    UnknownAlias { key: String, alias: String },
    #[error("mapping `{type_path}` from its implementation failed")]
    Mapping {
        type_path: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("adapter of `{type_path}` failed")]
    Adapter {
        type_path: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("{0}")]
    Custom(String),
}

impl BindError {
    /// Build an error from a message, for custom strategies and adapters.
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::Custom(msg.to_string())
    }

    pub(crate) fn mismatch(
        type_path: &'static str,
        expected: &'static str,
        found: impl fmt::Display,
    ) -> Self {
        Self::Mismatch {
            type_path,
            expected,
            found: found.to_string(),
        }
    }

    pub(crate) fn in_property(self, owner: &'static str, property: &'static str) -> Self {
        Self::Property {
            owner,
            property,
            source: Box::new(self),
        }
    }

    /// The innermost error below any property context.
    pub fn root_cause(&self) -> &BindError {
        let mut err = self;
        while let Self::Property { source, .. } = err {
            err = source;
        }
        err
    }

    /// Property identities from the outermost to the innermost, `Owner.property`.
    pub fn property_path(&self) -> alloc::vec::Vec<String> {
        let mut path = alloc::vec::Vec::new();
        let mut err = self;
        while let Self::Property {
            owner,
            property,
            source,
        } = err
        {
            path.push(alloc::format!("{owner}.{property}"));
            err = source;
        }
        path
    }
}

impl From<TypeMismatch> for BindError {
    fn from(value: TypeMismatch) -> Self {
        Self::Mismatch {
            type_path: value.expected,
            expected: "a value of the declared type",
            found: value.found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{BindError, RecursiveReferenceError};

    #[test]
    fn root_cause_unwraps_property_chain() {
        let err = BindError::from(RecursiveReferenceError { type_path: "a::B" })
            .in_property("a::B", "inner")
            .in_property("a::A", "b");

        assert!(matches!(err.root_cause(), BindError::RecursiveReference(_)));
        assert_eq!(err.property_path(), ["a::A.b", "a::B.inner"]);
        assert_eq!(err.to_string(), "property `b` of `a::A`");
    }
}
