//! Strategy resolution and the caches behind it.
//!
//! An [`Engine`] owns every cache built for one configuration:
//!
//! - the [`ClassModelRegistry`];
//! - one strategy per type, for value positions using the default formats;
//! - one key strategy per map key type;
//! - the per-property routes, stored in the property models themselves.
//!
//! Nothing is ever patched in place. A new configuration means a new engine.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use jb_utils::TypeIdOnceMap;
use log::debug;

use crate::Bindable;
use crate::binding::{AdapterBinding, DeserializerBinding, SerializerBinding};
use crate::config::BindConfig;
use crate::customization::{ClassCustomization, resolve_container};
use crate::de::DeserializationContext;
use crate::dispatch::{AdapterStrategy, BoxedStrategy, CustomStrategy, DynamicStrategy, EnumStrategy};
use crate::dispatch::{KeyStrategy, ListStrategy, MapStrategy, MappedStrategy, ObjectStrategy};
use crate::dispatch::OptionalStrategy;
use crate::dispatch::{SiteDynamicStrategy, TypeStrategy, UpcastStrategy, builtin};
use crate::document::{DocumentReader, DocumentWriter};
use crate::error::{BindError, ConfigurationError, DocumentError};
use crate::error::{UnsupportedReason, UnsupportedTypeError};
use crate::format::Formats;
use crate::info::{ClassInfo, TypeInfo, TypeResolution};
use crate::model::{ClassModel, CreatorParam, PropertyModel};
use crate::registry::ClassModelRegistry;
use crate::ser::SerializationContext;

// -----------------------------------------------------------------------------
// SiteBindings

/// User bindings of one direction of one property.
#[derive(Clone, Copy, Default)]
struct SiteBindings<'a> {
    serializer: Option<&'a SerializerBinding>,
    deserializer: Option<&'a DeserializerBinding>,
    adapter: Option<&'a AdapterBinding>,
}

impl SiteBindings<'_> {
    fn is_empty(&self) -> bool {
        self.serializer.is_none() && self.deserializer.is_none() && self.adapter.is_none()
    }

    /// Whether any binding is declared for exactly `ty`.
    fn targets(&self, ty: TypeId) -> bool {
        self.serializer.is_some_and(|s| s.ty().id() == ty)
            || self.deserializer.is_some_and(|d| d.ty().id() == ty)
            || self.adapter.is_some_and(|a| a.original().id() == ty)
    }
}

fn unsupported(info: &TypeInfo, reason: UnsupportedReason) -> BindError {
    UnsupportedTypeError {
        type_path: info.type_path(),
        reason,
    }
    .into()
}

// -----------------------------------------------------------------------------
// Engine

/// Resolves and caches the strategies of one configuration.
pub struct Engine {
    config: Arc<BindConfig>,
    registry: ClassModelRegistry,
    container: ClassCustomization,
    strategies: TypeIdOnceMap<Arc<dyn TypeStrategy>>,
    keys: TypeIdOnceMap<Arc<dyn KeyStrategy>>,
    dynamic: Arc<DynamicStrategy>,
}

impl Engine {
    pub fn new(config: Arc<BindConfig>) -> Self {
        Self {
            registry: ClassModelRegistry::new(config.clone()),
            container: resolve_container(&config),
            config,
            strategies: TypeIdOnceMap::new(),
            keys: TypeIdOnceMap::new(),
            dynamic: Arc::new(DynamicStrategy::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &ClassModelRegistry {
        &self.registry
    }

    /// The model of a class, built on first use.
    pub fn class_model(&self, info: &'static ClassInfo) -> Result<Arc<ClassModel>, ConfigurationError> {
        self.registry.get_or_build(info)
    }

    /// Number of types with a cached value strategy.
    pub fn cached_strategies(&self) -> usize {
        self.strategies.len()
    }

    /// Drops every cached model and strategy.
    pub fn invalidate_all(&self) {
        self.strategies.clear();
        self.keys.clear();
        self.dynamic.clear();
        self.registry.invalidate_all();
    }

    /// Resolves every type configured for eager resolution.
    pub fn prepare(&self) -> Result<(), BindError> {
        for info in self.config.eager_types() {
            debug!("resolving `{}` eagerly", info.type_path());
            self.resolve(info)?;
        }
        Ok(())
    }

    fn dynamic(&self) -> Arc<dyn TypeStrategy> {
        self.dynamic.clone()
    }

    // -------------------------------------------------------------------------
    // Resolution

    /// The strategy of a value position of type `info`, with the default
    /// formats.
    pub fn resolve(&self, info: &'static TypeInfo) -> Result<Arc<dyn TypeStrategy>, BindError> {
        self.strategies
            .get_or_install_with(info.ty().id(), || self.build(info, self.container.formats()))
    }

    /// Like [`resolve`](Self::resolve), with property formats. Only the
    /// default formats are cached per type.
    pub(crate) fn resolve_formats(
        &self,
        info: &'static TypeInfo,
        formats: &Formats,
    ) -> Result<Arc<dyn TypeStrategy>, BindError> {
        if formats == self.container.formats() {
            self.resolve(info)
        } else {
            self.build(info, formats)
        }
    }

    /// The key strategy of a map key type: built-in scalars and enums only.
    pub(crate) fn resolve_key(&self, info: &'static TypeInfo) -> Result<Arc<dyn KeyStrategy>, BindError> {
        self.keys.get_or_install_with(info.ty().id(), || match info {
            TypeInfo::Enum(info) => Ok(Arc::new(EnumStrategy::new(info)) as Arc<dyn KeyStrategy>),
            _ => builtin(info.ty().id())
                .map(|builtin| (builtin.key)())
                .ok_or_else(|| unsupported(info, UnsupportedReason::MapKey)),
        })
    }

    /// Resolution of a type with its global bindings. A mapped type is read
    /// through its implementation.
    fn build(&self, info: &'static TypeInfo, formats: &Formats) -> Result<Arc<dyn TypeStrategy>, BindError> {
        let declared = self.build_bound(info, formats)?;
        let Some(mapping) = self.config.type_mapping(info.ty().id()) else {
            return Ok(declared);
        };
        let implementation = self.build_bound(mapping.implementation_info(), formats)?;
        Ok(Arc::new(MappedStrategy::new(mapping.clone(), declared, implementation)))
    }

    /// Global bindings of the exact type, then the built-in resolution.
    fn build_bound(&self, info: &'static TypeInfo, formats: &Formats) -> Result<Arc<dyn TypeStrategy>, BindError> {
        let ty = info.ty().id();
        let bindings = SiteBindings {
            serializer: self.config.serializer(ty),
            deserializer: self.config.deserializer(ty),
            adapter: self.config.adapter(ty),
        };
        if bindings.is_empty() {
            self.resolve_base(info, formats)
        } else {
            self.wrap_bindings(info, formats, bindings, Self::resolve_base)
        }
    }

    fn resolve_base(&self, info: &'static TypeInfo, formats: &Formats) -> Result<Arc<dyn TypeStrategy>, BindError> {
        if let Some(builtin) = builtin(info.ty().id()) {
            return Ok((builtin.value)(formats.clone()));
        }
        let strategy: Arc<dyn TypeStrategy> = match info {
            TypeInfo::Scalar(_) => return Err(unsupported(info, UnsupportedReason::NoStrategy)),
            TypeInfo::Optional(optional) => {
                let inner = optional.inner_info();
                if matches!(inner, TypeInfo::Optional(_)) {
                    return Err(unsupported(info, UnsupportedReason::NestedOptional));
                }
                Arc::new(OptionalStrategy::new(optional, self.resolve_formats(inner, formats)?))
            }
            TypeInfo::Boxed(boxed) => {
                Arc::new(BoxedStrategy::new(boxed, self.resolve_formats(boxed.inner_info(), formats)?))
            }
            TypeInfo::Enum(info) => Arc::new(EnumStrategy::new(info)),
            TypeInfo::Any(_) => self.dynamic(),
            TypeInfo::Class(class) => self.resolve_class(class, formats)?,
            TypeInfo::List(list) => {
                let item = self.resolve_formats(list.item_info(), formats)?;
                Arc::new(ListStrategy::new(list, item))
            }
            TypeInfo::Map(map) => {
                let key = self.resolve_key(map.key_info())?;
                let value = self.resolve_formats(map.value_info(), formats)?;
                Arc::new(MapStrategy::new(map, key, value))
            }
        };
        Ok(strategy)
    }

    /// Walks the supertype chain toward a built-in scalar, else encodes the
    /// class as an object.
    fn resolve_class(&self, class: &'static ClassInfo, formats: &Formats) -> Result<Arc<dyn TypeStrategy>, BindError> {
        let mut lineage = Vec::new();
        let mut current = class;
        while let Some(link) = current.parent() {
            lineage.push(link.access().clone());
            match link.info() {
                TypeInfo::Class(parent) => current = parent,
                parent => {
                    if let Some(builtin) = builtin(parent.ty().id()) {
                        let base = (builtin.value)(formats.clone());
                        return Ok(Arc::new(UpcastStrategy::new(class, lineage, base)));
                    }
                    break;
                }
            }
        }
        Ok(Arc::new(ObjectStrategy::new(self.registry.get_or_build(class)?)))
    }

    /// Applies user bindings over the strategy `base` would resolve.
    ///
    /// Bindings declared for the content of an optional are applied to the
    /// content, the optional keeps mapping `None` to null.
    fn wrap_bindings(
        &self,
        info: &'static TypeInfo,
        formats: &Formats,
        bindings: SiteBindings<'_>,
        base: fn(&Self, &'static TypeInfo, &Formats) -> Result<Arc<dyn TypeStrategy>, BindError>,
    ) -> Result<Arc<dyn TypeStrategy>, BindError> {
        if let TypeInfo::Optional(optional) = info
            && !bindings.targets(info.ty().id())
        {
            let inner = self.wrap_bindings(optional.inner_info(), formats, bindings, base)?;
            return Ok(Arc::new(OptionalStrategy::new(optional, inner)));
        }

        let strategy = match bindings.adapter {
            Some(adapter) => {
                let adapted = self.resolve_formats(adapter.adapted_info(), formats)?;
                Arc::new(AdapterStrategy::new(adapter.clone(), adapted)) as Arc<dyn TypeStrategy>
            }
            None => base(self, info, formats)?,
        };
        if bindings.serializer.is_none() && bindings.deserializer.is_none() {
            return Ok(strategy);
        }
        Ok(Arc::new(CustomStrategy::new(
            bindings.serializer.cloned(),
            bindings.deserializer.cloned(),
            strategy,
        )))
    }

    /// Strategy of one property site: its own bindings first, then the
    /// strategy of its declared type with its formats.
    fn bind_site(
        &self,
        info: &'static TypeInfo,
        formats: &Formats,
        bindings: SiteBindings<'_>,
    ) -> Result<Arc<dyn TypeStrategy>, BindError> {
        if bindings.is_empty() {
            self.resolve_formats(info, formats)
        } else {
            self.wrap_bindings(info, formats, bindings, Self::resolve_formats)
        }
    }

    // -------------------------------------------------------------------------
    // Property routes

    /// The strategy writing `property`.
    ///
    /// A property whose declared type is a type parameter is dispatched on
    /// the runtime type of each value.
    pub(crate) fn serialize_route(&self, property: &PropertyModel) -> Result<Arc<dyn TypeStrategy>, BindError> {
        property.serialize_route(|property| {
            let customization = property.customization();
            let formats = customization.serialize_formats();
            let bindings = SiteBindings {
                serializer: customization.serializer(),
                adapter: customization.serialize_adapter(),
                ..SiteBindings::default()
            };
            match property.read_site {
                Some(site) if site.resolution == TypeResolution::Concrete => {
                    self.bind_site((site.info)(), formats, bindings)
                }
                _ if bindings.is_empty() && formats == self.container.formats() => Ok(self.dynamic()),
                _ => Ok(Arc::new(SiteDynamicStrategy::new(
                    formats.clone(),
                    bindings.serializer.cloned(),
                    bindings.adapter.cloned(),
                ))),
            }
        })
    }

    /// The strategy of a runtime type written at a property site with its
    /// own formats or bindings. Never cached.
    ///
    /// Bindings apply to values of their type, or optionals of it.
    pub(crate) fn bind_runtime(
        &self,
        info: &'static TypeInfo,
        formats: &Formats,
        serializer: Option<&SerializerBinding>,
        adapter: Option<&AdapterBinding>,
    ) -> Result<Arc<dyn TypeStrategy>, BindError> {
        let applies = |ty: TypeId| {
            ty == info.ty().id()
                || info
                    .as_optional()
                    .is_ok_and(|optional| optional.inner_info().ty().id() == ty)
        };
        let bindings = SiteBindings {
            serializer: serializer.filter(|s| applies(s.ty().id())),
            adapter: adapter.filter(|a| applies(a.original().id())),
            ..SiteBindings::default()
        };
        self.bind_site(info, formats, bindings)
    }

    /// The strategy reading `property`.
    pub(crate) fn deserialize_route(&self, property: &PropertyModel) -> Result<Arc<dyn TypeStrategy>, BindError> {
        property.deserialize_route(|property| {
            let Some(site) = property.write_site else {
                return Ok(self.dynamic());
            };
            let customization = property.customization();
            let bindings = SiteBindings {
                deserializer: customization.deserializer(),
                adapter: customization.deserialize_adapter(),
                ..SiteBindings::default()
            };
            self.bind_site((site.info)(), customization.deserialize_formats(), bindings)
        })
    }

    /// The strategy reading one creator parameter.
    pub(crate) fn param_route(&self, param: &CreatorParam) -> Result<Arc<dyn TypeStrategy>, BindError> {
        param.route(|param| self.resolve_formats(param.info().info(), param.formats()))
    }

    // -------------------------------------------------------------------------
    // Entry points

    /// Writes `value` as one complete document.
    pub fn serialize(&self, value: &dyn Bindable, writer: &mut dyn DocumentWriter) -> Result<(), BindError> {
        SerializationContext::new(self).serialize_dyn(value, writer)
    }

    /// Reads one complete document as a value of type `info`.
    pub fn deserialize(
        &self,
        info: &'static TypeInfo,
        reader: &mut dyn DocumentReader,
    ) -> Result<Box<dyn Bindable>, BindError> {
        let first = reader.next_event()?;
        let value = DeserializationContext::new(self).deserialize_dyn(info, first, reader)?;
        if reader.next()?.is_some() {
            return Err(DocumentError::Structure("content after the root value").into());
        }
        Ok(value)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("models", &self.registry.len())
            .field("strategies", &self.strategies.len())
            .field("keys", &self.keys.len())
            .field("dynamic", &self.dynamic.cached_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use serde_json::{Value, json};

    use super::Engine;
    use crate::Bindable;
    use crate::config::BindConfig;
    use crate::derive::Bindable;
    use crate::document::ValueWriter;
    use crate::error::{BindError, UnsupportedReason, UnsupportedTypeError};
    use crate::info::{TypeInfo, Typed};

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Cell {
        pub value: u8,
    }

    #[derive(PartialEq, Eq, PartialOrd, Ord, Bindable)]
    enum Suit {
        Hearts,
        Spades,
    }

    fn engine() -> Engine {
        Engine::new(Arc::new(BindConfig::new()))
    }

    fn reason(engine: &Engine, info: &'static TypeInfo) -> Option<UnsupportedReason> {
        match engine.resolve(info) {
            Err(BindError::UnsupportedType(UnsupportedTypeError { reason, .. })) => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn strategies_are_computed_once() {
        let engine = engine();
        let a = engine.resolve(Vec::<Cell>::type_info()).unwrap();
        let cached = engine.cached_strategies();
        let b = engine.resolve(Vec::<Cell>::type_info()).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(engine.cached_strategies(), cached);
        assert_eq!(engine.registry().len(), 1);

        engine.invalidate_all();
        assert_eq!(engine.cached_strategies(), 0);
        assert_eq!(engine.registry().len(), 0);
    }

    #[test]
    fn map_keys_must_have_a_textual_form() {
        let engine = engine();
        assert!(engine.resolve(BTreeMap::<Suit, u8>::type_info()).is_ok());
        assert!(engine.resolve(BTreeMap::<u16, Cell>::type_info()).is_ok());
        assert_eq!(
            reason(&engine, BTreeMap::<Vec<u8>, u8>::type_info()),
            Some(UnsupportedReason::MapKey)
        );
    }

    #[test]
    fn nested_optionals_are_refused() {
        let engine = engine();
        assert_eq!(
            reason(&engine, Option::<Option<u8>>::type_info()),
            Some(UnsupportedReason::NestedOptional)
        );
        assert_eq!(reason(&engine, Option::<Vec<u8>>::type_info()), None);
    }

    #[test]
    fn runtime_strategies_are_shared_between_threads() {
        let engine = engine();
        let values: Vec<Box<dyn Bindable>> = vec![
            Box::new(1_u8),
            Box::new(String::from("x")),
            Box::new(Cell { value: 2 }),
            Box::new(vec![3_u16]),
        ];

        let documents: Vec<Value> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let mut writer = ValueWriter::new();
                        engine.serialize(&values, &mut writer).unwrap();
                        writer.into_value().unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        for document in &documents {
            assert_eq!(document, &json!([1, "x", {"value": 2}, [3]]));
        }
        assert_eq!(engine.dynamic.cached_types(), 4);

        engine.invalidate_all();
        assert_eq!(engine.dynamic.cached_types(), 0);
    }
}
