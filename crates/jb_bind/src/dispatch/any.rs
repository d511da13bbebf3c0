use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use jb_utils::TypeIdOnceMap;
use log::trace;

use crate::Bindable;
use crate::binding::{AdapterBinding, SerializerBinding};
use crate::config::BindConfig;
use crate::de::DeserializationContext;
use crate::dispatch::TypeStrategy;
use crate::document::{DocumentReader, DocumentWriter, Event, ReplayReader, Scalar};
use crate::error::{BindError, DocumentError};
use crate::format::Formats;
use crate::info::TypeInfo;
use crate::ser::SerializationContext;

/// Values whose declared type says nothing about their shape.
///
/// Serialization dispatches on the runtime type of the value, with one
/// strategy built and cached per runtime type. Deserialization builds natural values: numbers,
/// strings, booleans, `Vec<Box<dyn Bindable>>` for arrays and
/// `BTreeMap<String, Box<dyn Bindable>>` for objects. An object naming a
/// configured subtype under its type key decodes as that subtype.
pub(crate) struct DynamicStrategy {
    cache: TypeIdOnceMap<Arc<dyn TypeStrategy>>,
}

impl DynamicStrategy {
    pub(crate) fn new() -> Self {
        Self {
            cache: TypeIdOnceMap::new(),
        }
    }

    /// Number of runtime types seen so far.
    pub(crate) fn cached_types(&self) -> usize {
        self.cache.len()
    }

    pub(crate) fn clear(&self) {
        self.cache.clear();
    }

    /// Unwraps boxed values down to the value they hold.
    fn runtime_value(mut value: &dyn Bindable) -> &dyn Bindable {
        while let Some(inner) = value.downcast_ref::<Box<dyn Bindable>>() {
            value = &**inner;
        }
        value
    }

    /// Reads one value into an open slot. The decoded value is the slot
    /// itself, a `Box<dyn Bindable>`.
    fn read_slot(
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Box<dyn Bindable>, BindError> {
        if first != Event::StartObject || ctx.config().type_inheritances().is_empty() {
            let slot = Self::natural(first, reader)?;
            return Ok(Box::new(slot));
        }

        let mut replay = ReplayReader::capture(first, reader)?;
        let subtype = Self::subtype(&replay, ctx.config())?;
        let first = replay.next_event()?;
        let slot = match subtype {
            Some(info) => {
                trace!("decoding subtype `{}`", info.type_path());
                ctx.deserialize_dyn(info, first, &mut replay)?
            }
            None => Self::natural(first, &mut replay)?,
        };
        Ok(Box::new(slot))
    }

    /// The subtype named by the type key of a captured object, if any.
    ///
    /// Only string values of a top-level type key name a subtype.
    fn subtype(replay: &ReplayReader, config: &BindConfig) -> Result<Option<&'static TypeInfo>, BindError> {
        let mut depth = 0_usize;
        let mut events = replay.events().peekable();
        while let Some(event) = events.next() {
            match event {
                Event::StartObject | Event::StartArray => depth += 1,
                Event::End => depth = depth.saturating_sub(1),
                Event::Key(key) if depth == 1 => {
                    if let Some(inheritance) = config.type_inheritance(key)
                        && let Some(Event::Value(Scalar::String(alias))) = events.peek()
                    {
                        return match inheritance.subtype(alias) {
                            Some(info) => Ok(Some(info)),
                            None => Err(BindError::UnknownAlias {
                                key: key.clone(),
                                alias: alias.clone(),
                            }),
                        };
                    }
                }
                Event::Key(_) | Event::Value(_) => {}
            }
        }
        Ok(None)
    }

    fn null() -> Box<dyn Bindable> {
        Box::new(Option::<Box<dyn Bindable>>::None)
    }

    /// Reads one value into its natural representation.
    fn natural(first: Event, reader: &mut dyn DocumentReader) -> Result<Box<dyn Bindable>, BindError> {
        let value: Box<dyn Bindable> = match first {
            Event::Value(Scalar::Null) => Self::null(),
            Event::Value(Scalar::Bool(v)) => Box::new(v),
            Event::Value(Scalar::Int(v)) => Box::new(v),
            Event::Value(Scalar::UInt(v)) => Box::new(v),
            Event::Value(Scalar::Float(v)) => Box::new(v),
            Event::Value(Scalar::String(v)) => Box::new(v),
            Event::StartArray => {
                let mut items: Vec<Box<dyn Bindable>> = Vec::new();
                loop {
                    match reader.next_event()? {
                        Event::End => break,
                        event => items.push(Self::natural(event, reader)?),
                    }
                }
                Box::new(items)
            }
            Event::StartObject => {
                let mut entries: BTreeMap<String, Box<dyn Bindable>> = BTreeMap::new();
                loop {
                    match reader.next_event()? {
                        Event::End => break,
                        Event::Key(key) => {
                            let first = reader.next_event()?;
                            entries.insert(key, Self::natural(first, reader)?);
                        }
                        _ => return Err(DocumentError::Structure("expected a key").into()),
                    }
                }
                Box::new(entries)
            }
            Event::Key(_) | Event::End => {
                return Err(DocumentError::Structure("expected a value").into());
            }
        };
        Ok(value)
    }
}

impl TypeStrategy for DynamicStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let value = Self::runtime_value(value);
        let info = value.bind_type_info();
        if info.is_null(value) {
            writer.write_value(Scalar::Null)?;
            return Ok(());
        }
        let strategy = self.cache.get_or_install_with(info.ty().id(), || {
            trace!("caching strategy of runtime type `{}`", info.type_path());
            ctx.engine().resolve(info)
        })?;
        strategy.serialize(value, writer, ctx)
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        Self::read_slot(first, reader, ctx).map(Some)
    }
}

// -----------------------------------------------------------------------------
// SiteDynamicStrategy

/// A property whose declared type is a type parameter, carrying its own
/// formats or bindings.
///
/// Each value is resolved on its runtime type with the customization of the
/// property. Those strategies are not cached, the per-type caches only hold
/// default formats.
pub(crate) struct SiteDynamicStrategy {
    formats: Formats,
    serializer: Option<SerializerBinding>,
    adapter: Option<AdapterBinding>,
}

impl SiteDynamicStrategy {
    pub(crate) fn new(
        formats: Formats,
        serializer: Option<SerializerBinding>,
        adapter: Option<AdapterBinding>,
    ) -> Self {
        Self {
            formats,
            serializer,
            adapter,
        }
    }
}

impl TypeStrategy for SiteDynamicStrategy {
    fn serialize(
        &self,
        value: &dyn Bindable,
        writer: &mut dyn DocumentWriter,
        ctx: &mut SerializationContext<'_>,
    ) -> Result<(), BindError> {
        let value = DynamicStrategy::runtime_value(value);
        let info = value.bind_type_info();
        if info.is_null(value) {
            writer.write_value(Scalar::Null)?;
            return Ok(());
        }
        let strategy = ctx.engine().bind_runtime(
            info,
            &self.formats,
            self.serializer.as_ref(),
            self.adapter.as_ref(),
        )?;
        strategy.serialize(value, writer, ctx)
    }

    fn deserialize(
        &self,
        first: Event,
        reader: &mut dyn DocumentReader,
        ctx: &mut DeserializationContext<'_>,
    ) -> Result<Option<Box<dyn Bindable>>, BindError> {
        DynamicStrategy::read_slot(first, reader, ctx).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use serde_json::json;

    use super::DynamicStrategy;
    use crate::document::{DocumentReader, ValueReader};
    use crate::{Bindable, downcast};

    #[test]
    fn natural_values() {
        let mut reader = ValueReader::new(json!({"a": [1, -2, 2.5, "x", null, true]}));
        let first = reader.next_event().unwrap();
        let value = DynamicStrategy::natural(first, &mut reader).unwrap();

        let mut map = downcast::<BTreeMap<String, Box<dyn Bindable>>>(value).unwrap();
        let items = downcast::<Vec<Box<dyn Bindable>>>(map.remove("a").unwrap()).unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!((*items[0]).downcast_ref::<i64>(), Some(&1));
        assert_eq!((*items[1]).downcast_ref::<i64>(), Some(&-2));
        assert_eq!((*items[2]).downcast_ref::<f64>(), Some(&2.5));
        assert_eq!((*items[3]).downcast_ref::<String>().unwrap(), "x");
        assert!((*items[4]).bind_type_info().is_null(&*items[4]));
        assert_eq!((*items[5]).downcast_ref::<bool>(), Some(&true));
    }
}
