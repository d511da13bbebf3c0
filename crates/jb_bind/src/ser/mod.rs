//! Serialization context handed to strategies and user serializers.

// -----------------------------------------------------------------------------
// Modules

mod identity_stack;

use core::fmt;

use identity_stack::IdentityStack;

use crate::Bindable;
use crate::config::BindConfig;
use crate::document::{DocumentWriter, Scalar};
use crate::engine::Engine;
use crate::error::{BindError, RecursiveReferenceError};
use crate::info::Typed;

// -----------------------------------------------------------------------------
// SerializationContext

/// State of one serialization call.
///
/// Tracks the instances being written so a [`Serializer`] that writes
/// its own value again fails instead of recursing forever.
///
/// [`Serializer`]: crate::binding::Serializer
pub struct SerializationContext<'a> {
    engine: &'a Engine,
    stack: IdentityStack,
}

impl<'a> SerializationContext<'a> {
    pub(crate) fn new(engine: &'a Engine) -> Self {
        Self {
            engine,
            stack: IdentityStack::new(),
        }
    }

    #[inline]
    pub fn engine(&self) -> &'a Engine {
        self.engine
    }

    #[inline]
    pub fn config(&self) -> &'a BindConfig {
        self.engine.config()
    }

    /// Number of instances being written.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Writes a nested value with the strategy of its type.
    pub fn serialize<T: Typed>(&mut self, value: &T, writer: &mut dyn DocumentWriter) -> Result<(), BindError> {
        self.serialize_dyn(value, writer)
    }

    /// Writes a nested value with the strategy of its runtime type.
    pub fn serialize_dyn(&mut self, value: &dyn Bindable, writer: &mut dyn DocumentWriter) -> Result<(), BindError> {
        let info = value.bind_type_info();
        if info.is_null(value) {
            writer.write_value(Scalar::Null)?;
            return Ok(());
        }
        let strategy = self.engine.resolve(info)?;
        strategy.serialize(value, writer, self)
    }

    /// Marks `value` as being written.
    pub(crate) fn enter(&mut self, value: &dyn Bindable) -> Result<(), RecursiveReferenceError> {
        if self.stack.push(value) {
            Ok(())
        } else {
            Err(RecursiveReferenceError {
                type_path: value.type_path(),
            })
        }
    }

    pub(crate) fn leave(&mut self) {
        self.stack.pop();
    }
}

impl fmt::Debug for SerializationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializationContext")
            .field("stack", &self.stack)
            .finish()
    }
}
