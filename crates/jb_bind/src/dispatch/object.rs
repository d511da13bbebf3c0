use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use log::warn;

use crate::Bindable;
use crate::de::DeserializationContext;
use crate::dispatch::TypeStrategy;
use crate::document::{DocumentReader, DocumentWriter, Event, Scalar};
use crate::error::{BindError, CreatorInvocationError, DocumentError};
use crate::error::{UnsupportedReason, UnsupportedTypeError};
use crate::model::{ClassModel, CreatorModel, PropertyModel};
use crate::ser::SerializationContext;

/// Structured objects, encoded property by property through the class model.
pub(crate) struct ObjectStrategy {
    model: Arc<ClassModel>,
}

/// Reads the next key of an object, `None` at its end.
fn next_key(reader: &mut dyn DocumentReader) -> Result<Option<String>, BindError> {
    match reader.next_event()? {
        Event::End => Ok(None),
        Event::Key(key) => Ok(Some(key)),
        _ => Err(DocumentError::Structure("expected a key").into()),
    }
}

impl ObjectStrategy {
    pub(crate) fn new(model: Arc<ClassModel>) -> Self {
        Self { model }
    }

    #[inline]
    fn type_path(&self) -> &'static str {
        self.model.ty().path()
    }

    fn write_property(
        &self,
        property: &PropertyModel,
        instance: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let Some(name) = property.write_name() else {
            return Ok(());
        };
        let value = property.accessor().get(instance)?;
        if value.bind_type_info().is_null(&*value) {
            if property.customization().is_nillable() {
                writer.write_key(name)?;
                writer.write_value(Scalar::Null)?;
            }
            return Ok(());
        }

        let route = ctx.engine().serialize_route(property)?;
        writer.write_key(name)?;
        route.serialize(&*value, writer, ctx)
    }

    fn write_object(
        &self,
        instance: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        writer.write_start_object()?;
        if let Some((key, alias)) = ctx.config().type_alias(self.model.ty().id()) {
            writer.write_key(key)?;
            writer.write_value(Scalar::String(alias.into()))?;
        }
        for property in self.model.properties().iter().filter(|p| p.is_readable()) {
            self.write_property(property, instance, writer, ctx)
                .map_err(|err| err.in_property(self.type_path(), property.identity()))?;
        }
        writer.write_end()?;
        Ok(())
    }

    /// Decodes the value of `property`, `None` if the document held a null
    /// the property cannot take.
    fn read_value(
        &self,
        property: &PropertyModel,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        let route = ctx.engine().deserialize_route(property)?;
        route.deserialize(first, reader, ctx)
    }

    /// Applies one key of the document to `instance`.
    fn read_property(
        &self,
        instance: &mut dyn Bindable,
        key: String,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<(), BindError> {
        match self.model.find_by_read_name(&key) {
            Some(property) if property.is_writable() => {
                let identity = property.identity();
                let in_property = |err: BindError| err.in_property(self.type_path(), identity);

                let value = self
                    .read_value(property, first, reader, ctx)
                    .map_err(in_property)?;
                if let Some(value) = value {
                    property
                        .accessor()
                        .set(instance, value)
                        .map_err(|err| in_property(err.into()))?;
                }
                Ok(())
            }
            Some(_) => Ok(reader.skip_value(&first)?),
            None => self.unknown(key, &first, reader, ctx),
        }
    }

    fn unknown(
        &self,
        key: String,
        first: &Event,
        reader: &mut dyn DocumentReader,
        ctx: &DeserializationContext<'_>,
    ) -> Result<(), BindError> {
        let own_type_key = ctx
            .config()
            .type_alias(self.model.ty().id())
            .is_some_and(|(type_key, _)| type_key == key);
        if own_type_key {
            return Ok(reader.skip_value(first)?);
        }
        if ctx.config().fail_on_unknown_properties() {
            return Err(BindError::UnknownProperty {
                type_path: self.type_path(),
                key,
            });
        }
        warn!("ignoring unknown property `{key}` of `{}`", self.type_path());
        Ok(reader.skip_value(first)?)
    }

    fn construct(
        &self,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Box<dyn Bindable>, BindError> {
        let constructor = self
            .model
            .info()
            .constructor()
            .ok_or(UnsupportedTypeError {
                type_path: self.type_path(),
                reason: UnsupportedReason::NoConstructor,
            })?;

        let mut instance = constructor();
        while let Some(key) = next_key(reader)? {
            let first = reader.next_event()?;
            self.read_property(&mut *instance, key, first, reader, ctx)?;
        }
        Ok(instance)
    }

    /// Buffers the creator arguments and the other properties until the
    /// object ends, then invokes the creator and applies the properties.
    fn create(
        &self,
        creator: &CreatorModel,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Box<dyn Bindable>, BindError> {
        let type_path = self.type_path();
        let mut args: Vec<Option<Box<dyn Bindable>>> =
            creator.params().iter().map(|_| None).collect();
        let mut deferred: Vec<(&Arc<PropertyModel>, Box<dyn Bindable>)> = Vec::new();

        while let Some(key) = next_key(reader)? {
            let first = reader.next_event()?;

            if let Some(position) = creator.position(&key) {
                let param = &creator.params()[position];
                let route = ctx.engine().param_route(param)?;
                args[position] = route
                    .deserialize(first, reader, ctx)
                    .map_err(|err| err.in_property(type_path, param.info().identity()))?;
                continue;
            }

            match self.model.find_by_read_name(&key) {
                Some(property) if property.is_writable() => {
                    let value = self
                        .read_value(property, first, reader, ctx)
                        .map_err(|err| err.in_property(type_path, property.identity()))?;
                    if let Some(value) = value {
                        deferred.push((property, value));
                    }
                }
                Some(_) => reader.skip_value(&first)?,
                None => self.unknown(key, &first, reader, ctx)?,
            }
        }

        let required = ctx.config().creator_parameters_required();
        let mut values = Vec::with_capacity(args.len());
        for (param, arg) in creator.params().iter().zip(args) {
            let missing = || CreatorInvocationError::MissingParameter {
                type_path,
                name: param.name().into(),
            };
            let value = match arg {
                Some(value) => value,
                None if required => return Err(missing().into()),
                None => param.info().info().absent_value().ok_or_else(missing)?,
            };
            values.push(value);
        }

        let mut instance = creator
            .info()
            .invoke(values)
            .map_err(|source| CreatorInvocationError::Failed { type_path, source })?;
        for (property, value) in deferred {
            property
                .accessor()
                .set(&mut *instance, value)
                .map_err(|err| BindError::from(err).in_property(type_path, property.identity()))?;
        }
        Ok(instance)
    }
}

impl TypeStrategy for ObjectStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        ctx.enter(value)?;
        let result = self.write_object(value, writer, ctx);
        ctx.leave();
        result
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match first {
            Event::Value(Scalar::Null) => return Ok(None),
            Event::StartObject => {}
            other => {
                return Err(BindError::mismatch(
                    self.type_path(),
                    "an object",
                    other.kind_name(),
                ));
            }
        }
        let instance = match self.model.creator() {
            Some(creator) => self.create(creator, reader, ctx)?,
            None => self.construct(reader, ctx)?,
        };
        Ok(Some(instance))
    }
}
