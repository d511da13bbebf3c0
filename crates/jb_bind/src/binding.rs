//! User-supplied adapters, serializers and deserializers.
//!
//! Bindings are attached to a property through its annotations or
//! registered globally for a type in [`BindConfig`](crate::config::BindConfig).
//! A property annotation always wins over a global binding.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::de::DeserializationContext;
use crate::document::{DocumentReader, DocumentWriter, Event};
use crate::error::{BindError, BoxError, TypeMismatch};
use crate::info::{Type, TypeInfo, Typed};
use crate::ser::SerializationContext;
use crate::{Bindable, downcast};

// -----------------------------------------------------------------------------
// Adapter

/// Converts a type into another one that is bound in its place.
///
/// # Examples
///
/// ```
/// use jb_bind::binding::{Adapter, AdapterBinding};
/// use jb_bind::error::BoxError;
///
/// #[derive(Default)]
/// struct Celsius;
///
/// impl Adapter for Celsius {
///     type Original = f64;
///     type Adapted = String;
///
///     fn adapt_to(&self, value: &f64) -> Result<String, BoxError> {
///         Ok(format!("{value}C"))
///     }
///
///     fn adapt_from(&self, value: String) -> Result<f64, BoxError> {
///         Ok(value.trim_end_matches('C').parse()?)
///     }
/// }
///
/// let binding = AdapterBinding::of::<Celsius>();
/// assert!(binding.original().is::<f64>());
/// ```
pub trait Adapter: Send + Sync + 'static {
    type Original: Typed;
    type Adapted: Typed;

    fn adapt_to(&self, original: &Self::Original) -> Result<Self::Adapted, BoxError>;

    fn adapt_from(&self, adapted: Self::Adapted) -> Result<Self::Original, BoxError>;
}

trait DynAdapter: Send + Sync {
    fn adapt_to(&self, original: &dyn Bindable) -> Result<Box<dyn Bindable>, BoxError>;

    fn adapt_from(&self, adapted: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, BoxError>;
}

impl<A: Adapter> DynAdapter for A {
    fn adapt_to(&self, original: &dyn Bindable) -> Result<Box<dyn Bindable>, BoxError> {
        let original = original
            .downcast_ref::<A::Original>()
            .ok_or_else(|| TypeMismatch::new::<A::Original>(original.type_path()))?;
        Ok(Box::new(Adapter::adapt_to(self, original)?))
    }

    fn adapt_from(&self, adapted: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, BoxError> {
        let adapted = downcast::<A::Adapted>(adapted)?;
        Ok(Box::new(Adapter::adapt_from(self, adapted)?))
    }
}

/// A type-erased [`Adapter`].
#[derive(Clone)]
pub struct AdapterBinding {
    original: Type,
    adapted: Type,
    adapted_info: fn() -> &'static TypeInfo,
    adapter: Arc<dyn DynAdapter>,
}

impl AdapterBinding {
    pub fn new<A: Adapter>(adapter: A) -> Self {
        Self {
            original: Type::of::<A::Original>(),
            adapted: Type::of::<A::Adapted>(),
            adapted_info: <A::Adapted as Typed>::type_info,
            adapter: Arc::new(adapter),
        }
    }

    pub fn of<A: Adapter + Default>() -> Self {
        Self::new(A::default())
    }

    #[inline]
    pub const fn original(&self) -> &Type {
        &self.original
    }

    #[inline]
    pub const fn adapted(&self) -> &Type {
        &self.adapted
    }

    #[inline]
    pub fn adapted_info(&self) -> &'static TypeInfo {
        (self.adapted_info)()
    }

    pub fn adapt_to(&self, original: &dyn Bindable) -> Result<Box<dyn Bindable>, BoxError> {
        self.adapter.adapt_to(original)
    }

    pub fn adapt_from(&self, adapted: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, BoxError> {
        self.adapter.adapt_from(adapted)
    }
}

impl fmt::Debug for AdapterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterBinding")
            .field("original", &self.original)
            .field("adapted", &self.adapted)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Serializer

/// Writes a value of one type in place of the built-in strategy.
///
/// Nested values may be written through
/// [`SerializationContext::serialize`]; re-entering the value being written
/// fails with a recursive reference error.
pub trait Serializer: Send + Sync + 'static {
    type Value: Typed;

    fn serialize(
        &self,
        value: &Self::Value,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError>;
}

trait DynSerializer: Send + Sync {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError>;
}

impl<S: Serializer> DynSerializer for S {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let value = value
            .downcast_ref::<S::Value>()
            .ok_or_else(|| TypeMismatch::new::<S::Value>(value.type_path()))?;
        Serializer::serialize(self, value, writer, ctx)
    }
}

/// A type-erased [`Serializer`].
#[derive(Clone)]
pub struct SerializerBinding {
    ty: Type,
    serializer: Arc<dyn DynSerializer>,
}

impl SerializerBinding {
    pub fn new<S: Serializer>(serializer: S) -> Self {
        Self {
            ty: Type::of::<S::Value>(),
            serializer: Arc::new(serializer),
        }
    }

    pub fn of<S: Serializer + Default>() -> Self {
        Self::new(S::default())
    }

    /// The type written by the serializer.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        self.serializer.serialize(value, writer, ctx)
    }
}

impl fmt::Debug for SerializerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerBinding")
            .field("ty", &self.ty)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Deserializer

/// Reads a value of one type in place of the built-in strategy.
///
/// `first` is the event that starts the value; the deserializer must
/// consume the rest of the value from `reader`, nothing more.
pub trait Deserializer: Send + Sync + 'static {
    type Value: Typed;

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Self::Value, BindError>;
}

trait DynDeserializer: Send + Sync {
    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Box<dyn Bindable>, BindError>;
}

impl<D: Deserializer> DynDeserializer for D {
    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Box<dyn Bindable>, BindError> {
        Ok(Box::new(Deserializer::deserialize(self, first, reader, ctx)?))
    }
}

/// A type-erased [`Deserializer`].
#[derive(Clone)]
pub struct DeserializerBinding {
    ty: Type,
    deserializer: Arc<dyn DynDeserializer>,
}

impl DeserializerBinding {
    pub fn new<D: Deserializer>(deserializer: D) -> Self {
        Self {
            ty: Type::of::<D::Value>(),
            deserializer: Arc::new(deserializer),
        }
    }

    pub fn of<D: Deserializer + Default>() -> Self {
        Self::new(D::default())
    }

    /// The type produced by the deserializer.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Box<dyn Bindable>, BindError> {
        self.deserializer.deserialize(first, reader, ctx)
    }
}

impl fmt::Debug for DeserializerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializerBinding")
            .field("ty", &self.ty)
            .finish()
    }
}
