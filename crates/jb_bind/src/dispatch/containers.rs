use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::Bindable;
use crate::de::DeserializationContext;
use crate::dispatch::{KeyStrategy, TypeStrategy};
use crate::document::{DocumentReader, DocumentWriter, Event, Scalar};
use crate::error::{BindError, DocumentError, TypeMismatch};
use crate::info::{ListInfo, MapInfo};
use crate::ser::SerializationContext;

fn write_item(
    strategy: &dyn TypeStrategy,
    value: &dyn Bindable,
    writer: &mut dyn DocumentWriter,
    ctx: &mut SerializationContext<'_>,
) -> Result<(), BindError> {
    if value.bind_type_info().is_null(value) {
        writer.write_value(Scalar::Null)?;
        return Ok(());
    }
    strategy.serialize(value, writer, ctx)
}

// -----------------------------------------------------------------------------
// ListStrategy

/// Arrays and collections. Null items are kept as `null`.
pub(crate) struct ListStrategy {
    info: &'static ListInfo,
    item: Arc<dyn TypeStrategy>,
}

impl ListStrategy {
    pub(crate) fn new(info: &'static ListInfo, item: Arc<dyn TypeStrategy>) -> Self {
        Self { info, item }
    }
}

impl TypeStrategy for ListStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let items = self.info.items(value).ok_or_else(|| TypeMismatch {
            expected: self.info.ty().path(),
            found: value.type_path(),
        })?;
        writer.write_start_array()?;
        for item in items {
            write_item(&*self.item, item, writer, ctx)?;
        }
        writer.write_end()?;
        Ok(())
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        match first {
            Event::Value(Scalar::Null) => return Ok(None),
            Event::StartArray => {}
            other => {
                return Err(BindError::mismatch(
                    self.info.ty().path(),
                    "an array",
                    other.kind_name(),
                ));
            }
        }

        let mut list = self.info.new_list();
        loop {
            let event = match reader.next_event()? {
                Event::End => break,
                event => event,
            };
            match self.item.deserialize(event, reader, ctx)? {
                Some(item) => self.info.push(&mut *list, item)?,
                None => {
                    return Err(BindError::mismatch(
                        self.info.item_info().type_path(),
                        "a non-null item",
                        Scalar::Null,
                    ));
                }
            }
        }
        Ok(Some(list))
    }
}

// -----------------------------------------------------------------------------
// MapStrategy

/// Key-value shapes, encoded as document objects.
pub(crate) struct MapStrategy {
    info: &'static MapInfo,
    key: Arc<dyn KeyStrategy>,
    value: Arc<dyn TypeStrategy>,
}

impl MapStrategy {
    pub(crate) fn new(
        info: &'static MapInfo,
        key: Arc<dyn KeyStrategy>,
        value: Arc<dyn TypeStrategy>,
    ) -> Self {
        Self { info, key, value }
    }
}

impl TypeStrategy for MapStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let entries = self.info.entries(value).ok_or_else(|| TypeMismatch {
            expected: self.info.ty().path(),
            found: value.type_path(),
        })?;
        writer.write_start_object()?;
        for (key, value) in entries {
            writer.write_key(&self.key.write_key(key)?)?;
            write_item(&*self.value, value, writer, ctx)?;
        }
        writer.write_end()?;
        Ok(())
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
                    self.info.ty().path(),
                    "an object",
                    other.kind_name(),
                ));
            }
        }

        let mut map = self.info.new_map();
        loop {
            let key = match reader.next_event()? {
                Event::End => break,
                Event::Key(key) => self.key.read_key(&key)?,
                _ => return Err(DocumentError::Structure("expected a key").into()),
            };
            let first = reader.next_event()?;
            match self.value.deserialize(first, reader, ctx)? {
                Some(value) => self.info.insert(&mut *map, key, value)?,
                None => {
                    return Err(BindError::mismatch(
                        self.info.value_info().type_path(),
                        "a non-null value",
                        Scalar::Null,
                    ));
                }
            }
        }
        Ok(Some(map))
    }
}
