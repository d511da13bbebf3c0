//! Deserialization context handed to strategies and user deserializers.

use alloc::boxed::Box;
use core::fmt;

use crate::config::BindConfig;
use crate::document::{DocumentReader, Event, Scalar};
use crate::engine::Engine;
use crate::error::BindError;
use crate::info::{TypeInfo, Typed};
use crate::{Bindable, downcast};

/// State of one deserialization call.
pub struct DeserializationContext<'a> {
    engine: &'a Engine,
}

impl<'a> DeserializationContext<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self { engine }
    }

    #[inline]
    pub fn engine(&self) -> &'a Engine {
        self.engine
    }

    #[inline]
    pub fn config(&self) -> &'a BindConfig {
        self.engine.config()
    }

    /// Reads a nested value started by `first`.
    pub fn deserialize<T: Typed>(&mut self, first: Event, reader: &mut dyn DocumentReader) -> Result<T, BindError> {
        let value = self.deserialize_dyn(T::type_info(), first, reader)?;
        Ok(downcast::<T>(value)?)
    }

    /// Reads a nested value of type `info` started by `first`.
    ///
    /// A null is only accepted by types that can represent it.
    pub fn deserialize_dyn(
        &mut self,
        info: &'static TypeInfo,
        first: Event,
        reader: &mut dyn DocumentReader,
    ) -> Result<Box<dyn Bindable>, BindError> {
        let strategy = self.engine.resolve(info)?;
        strategy
            .deserialize(first, reader, self)?
            .ok_or_else(|| BindError::mismatch(info.type_path(), "a non-null value", Scalar::Null))
    }
}

impl fmt::Debug for DeserializationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializationContext").finish_non_exhaustive()
    }
}
