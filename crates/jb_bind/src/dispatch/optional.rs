use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::Bindable;
use crate::de::DeserializationContext;
use crate::dispatch::TypeStrategy;
use crate::document::{DocumentReader, DocumentWriter, Event, Scalar};
use crate::error::{BindError, TypeMismatch};
use crate::info::{BoxedInfo, OptionalInfo};
use crate::ser::SerializationContext;

// -----------------------------------------------------------------------------
// OptionalStrategy

/// `Option<T>`: `None` is the document null, `Some` delegates to `T`.
pub(crate) struct OptionalStrategy {
    info: &'static OptionalInfo,
    inner: Arc<dyn TypeStrategy>,
}

impl OptionalStrategy {
    pub(crate) fn new(info: &'static OptionalInfo, inner: Arc<dyn TypeStrategy>) -> Self {
        Self { info, inner }
    }
}

impl TypeStrategy for OptionalStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let found = value.type_path();
        match (self.info.get)(value) {
            Some(Some(inner)) => self.inner.serialize(inner, writer, ctx),
            Some(None) => Ok(writer.write_value(Scalar::Null)?),
            None => Err(TypeMismatch {
                expected: self.info.ty().path(),
                found,
            }
            .into()),
        }
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        if first == Event::Value(Scalar::Null) {
            return Ok(Some(self.info.none()));
        }
        match self.inner.deserialize(first, reader, ctx)? {
            Some(inner) => Ok(Some(self.info.wrap(inner)?)),
            None => Ok(Some(self.info.none())),
        }
    }
}

// -----------------------------------------------------------------------------
// BoxedStrategy

/// `Box<T>`: the content is encoded in place.
pub(crate) struct BoxedStrategy {
    info: &'static BoxedInfo,
    inner: Arc<dyn TypeStrategy>,
}

impl BoxedStrategy {
    pub(crate) fn new(info: &'static BoxedInfo, inner: Arc<dyn TypeStrategy>) -> Self {
        Self { info, inner }
    }
}

impl TypeStrategy for BoxedStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let inner = (self.info.get)(value).ok_or_else(|| TypeMismatch {
            expected: self.info.ty().path(),
            found: value.type_path(),
        })?;
        self.inner.serialize(inner, writer, ctx)
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match self.inner.deserialize(first, reader, ctx)? {
            Some(inner) => Ok(Some(self.info.wrap(inner)?)),
            None => Ok(None),
        }
    }
}
