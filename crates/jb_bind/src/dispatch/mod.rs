//! Strategies that encode and decode values of one type.
//!
//! ## Menu
//!
//! - [`TypeStrategy`]: encodes a value position, decodes into a fresh value.
//! - [`KeyStrategy`]: encodes a map key as a document key, never wrapped.
//!
//! Strategies are resolved by the [`Engine`](crate::engine::Engine) in this
//! order: the built-in scalar table, optionals, enums, the open "any" type,
//! the supertype chain toward a built-in scalar, then classes, lists and
//! maps. A value whose declared type is open is dispatched on its runtime
//! type, with one cached strategy per runtime type.

// -----------------------------------------------------------------------------
// Modules

mod any;
mod containers;
mod custom;
mod enums;
mod object;
mod optional;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use any::{DynamicStrategy, SiteDynamicStrategy};
pub(crate) use containers::{ListStrategy, MapStrategy};
pub(crate) use custom::{AdapterStrategy, CustomStrategy, MappedStrategy, UpcastStrategy};
pub(crate) use enums::EnumStrategy;
pub(crate) use object::ObjectStrategy;
pub(crate) use optional::{BoxedStrategy, OptionalStrategy};
pub(crate) use scalar::builtin;

pub use scalar::ScalarCodec;

use alloc::boxed::Box;
use alloc::string::String;

use crate::Bindable;
use crate::de::DeserializationContext;
use crate::document::{DocumentReader, DocumentWriter, Event};
use crate::error::BindError;
use crate::ser::SerializationContext;

// -----------------------------------------------------------------------------
// TypeStrategy

/// Encodes and decodes the values of one type.
pub trait TypeStrategy: Send + Sync {
    /// Writes `value`, which is never the null of its type.
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError>;

    /// Reads the value started by `first`.
    ///
    /// `Ok(None)` means the document held a null the type cannot represent;
    /// the target is left untouched.
    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError>;
}

// -----------------------------------------------------------------------------
// KeyStrategy

/// Encodes values of one type as document keys.
pub trait KeyStrategy: Send + Sync {
    fn write_key(&self, key: &dyn Bindable) -> Result<String, BindError>;

    fn read_key(&self, key: &str) -> Result<Box<dyn Bindable>, BindError>;
}
