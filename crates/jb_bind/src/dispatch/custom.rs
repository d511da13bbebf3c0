use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::Bindable;
use crate::binding::{AdapterBinding, DeserializerBinding, SerializerBinding};
use crate::de::DeserializationContext;
use crate::dispatch::TypeStrategy;
use crate::document::{DocumentReader, DocumentWriter, Event, Scalar};
use crate::error::{BindError, TypeMismatch, UnsupportedReason, UnsupportedTypeError};
use crate::info::{ClassInfo, FieldAccess};
use crate::polymorphism::TypeMapping;
use crate::ser::SerializationContext;

// -----------------------------------------------------------------------------
// CustomStrategy

/// User serializer and/or deserializer, falling back to `base` for the
/// direction left unbound.
pub(crate) struct CustomStrategy {
    serializer: Option<SerializerBinding>,
    deserializer: Option<DeserializerBinding>,
    base: Arc<dyn TypeStrategy>,
}

impl CustomStrategy {
    pub(crate) fn new(
        serializer: Option<SerializerBinding>,
        deserializer: Option<DeserializerBinding>,
        base: Arc<dyn TypeStrategy>,
    ) -> Self {
        Self {
            serializer,
            deserializer,
            base,
        }
    }
}

impl TypeStrategy for CustomStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let Some(serializer) = &self.serializer else {
            return self.base.serialize(value, writer, ctx);
        };
        ctx.enter(value)?;
        let result = serializer.serialize(value, writer, ctx);
        ctx.leave();
        result
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match &self.deserializer {
            Some(_) if first == Event::Value(Scalar::Null) => Ok(None),
            Some(deserializer) => deserializer.deserialize(first, reader, ctx).map(Some),
            None => self.base.deserialize(first, reader, ctx),
        }
    }
}

// -----------------------------------------------------------------------------
// AdapterStrategy

/// Binds the adapted type in place of the original one.
pub(crate) struct AdapterStrategy {
    adapter: AdapterBinding,
    adapted: Arc<dyn TypeStrategy>,
}

impl AdapterStrategy {
    pub(crate) fn new(adapter: AdapterBinding, adapted: Arc<dyn TypeStrategy>) -> Self {
        Self { adapter, adapted }
    }

    fn failed(&self, source: crate::error::BoxError) -> BindError {
        BindError::Adapter {
            type_path: self.adapter.original().path(),
            source,
        }
    }
}

impl TypeStrategy for AdapterStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let adapted = self.adapter.adapt_to(value).map_err(|err| self.failed(err))?;
        if adapted.bind_type_info().is_null(&*adapted) {
            writer.write_value(Scalar::Null)?;
            return Ok(());
        }
        self.adapted.serialize(&*adapted, writer, ctx)
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match self.adapted.deserialize(first, reader, ctx)? {
            Some(adapted) => self
                .adapter
                .adapt_from(adapted)
                .map(Some)
                .map_err(|err| self.failed(err)),
            None => Ok(None),
        }
    }
}

// -----------------------------------------------------------------------------
// MappedStrategy

/// Writes the declared type, reads its mapped implementation and converts it.
pub(crate) struct MappedStrategy {
    mapping: TypeMapping,
    declared: Arc<dyn TypeStrategy>,
    implementation: Arc<dyn TypeStrategy>,
}

impl MappedStrategy {
    pub(crate) fn new(
        mapping: TypeMapping,
        declared: Arc<dyn TypeStrategy>,
        implementation: Arc<dyn TypeStrategy>,
    ) -> Self {
        Self {
            mapping,
            declared,
            implementation,
        }
    }
}

impl TypeStrategy for MappedStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        self.declared.serialize(value, writer, ctx)
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match self.implementation.deserialize(first, reader, ctx)? {
            Some(value) => self
                .mapping
                .convert(value)
                .map(Some)
                .map_err(|source| BindError::Mapping {
                    type_path: self.mapping.declared().path(),
                    source,
                }),
            None => Ok(None),
        }
    }
}

// -----------------------------------------------------------------------------
// UpcastStrategy

/// A class whose supertype chain ends in a built-in scalar: encoded as
/// that scalar.
pub(crate) struct UpcastStrategy {
    class: &'static ClassInfo,
    /// Up-casts from the class to the scalar, nearest first.
    lineage: Vec<Arc<dyn FieldAccess>>,
    base: Arc<dyn TypeStrategy>,
}

impl UpcastStrategy {
    pub(crate) fn new(
        class: &'static ClassInfo,
        lineage: Vec<Arc<dyn FieldAccess>>,
        base: Arc<dyn TypeStrategy>,
    ) -> Self {
        Self {
            class,
            lineage,
            base,
        }
    }

    fn mismatch(&self, found: &'static str) -> TypeMismatch {
        TypeMismatch {
            expected: self.class.ty().path(),
            found,
        }
    }
}

impl TypeStrategy for UpcastStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let mut target = value;
        for upcast in &self.lineage {
            target = upcast
                .get(target)
                .ok_or_else(|| self.mismatch(target.type_path()))?;
        }
        self.base.serialize(target, writer, ctx)
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        let Some(base) = self.base.deserialize(first, reader, ctx)? else {
            return Ok(None);
        };
        let constructor = self.class.constructor().ok_or(UnsupportedTypeError {
            type_path: self.class.ty().path(),
            reason: UnsupportedReason::NoConstructor,
        })?;

        let mut instance = constructor();
        let mut target: &mut dyn Bindable = &mut *instance;
        for upcast in &self.lineage {
            let found = target.type_path();
            target = upcast
                .get_mut(target)
                .ok_or_else(|| self.mismatch(found))?;
        }
        target.assign(base)?;
        Ok(Some(instance))
    }
}
