use alloc::boxed::Box;
use alloc::string::String;

use crate::Bindable;
use crate::de::DeserializationContext;
use crate::dispatch::{KeyStrategy, TypeStrategy};
use crate::document::{DocumentReader, DocumentWriter, Event, Scalar};
use crate::error::{BindError, TypeMismatch};
use crate::info::EnumInfo;
use crate::ser::SerializationContext;

/// Unit-only enums, encoded as the document name of the constant.
pub(crate) struct EnumStrategy {
    info: &'static EnumInfo,
}

impl EnumStrategy {
    pub(crate) fn new(info: &'static EnumInfo) -> Self {
        Self { info }
    }

    fn name_of(&self, value: &dyn Bindable) -> Result<&'static str, TypeMismatch> {
        self.info
            .constant_of(value)
            .map(|constant| constant.document_name())
            .ok_or_else(|| TypeMismatch {
                expected: self.info.ty().path(),
                found: value.type_path(),
            })
    }

    fn from_name(&self, name: &str) -> Result<Box<dyn Bindable>, BindError> {
        self.info
            .index_of_document_name(name)
            .and_then(|index| self.info.instantiate(index))
            .ok_or_else(|| {
                BindError::mismatch(self.info.ty().path(), "the name of a constant", name)
            })
    }
}

impl TypeStrategy for EnumStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        _ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let name = self.name_of(value)?;
        writer.write_value(Scalar::String(name.into()))?;
        Ok(())
    }

    fn deserialize(
        &self,
        first: Event,
        _reader: &mut dyn DocumentReader,
        _ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match first {
            Event::Value(Scalar::Null) => Ok(None),
            Event::Value(Scalar::String(name)) => self.from_name(&name).map(Some),
            other => Err(BindError::mismatch(
                self.info.ty().path(),
                "a string",
                other.kind_name(),
            )),
        }
    }
}

impl KeyStrategy for EnumStrategy {
    fn write_key(&self, key: &dyn Bindable) -> Result<String, BindError> {
        Ok(self.name_of(key)?.into())
    }

    fn read_key(&self, key: &str) -> Result<Box<dyn Bindable>, BindError> {
        self.from_name(key)
    }
}
