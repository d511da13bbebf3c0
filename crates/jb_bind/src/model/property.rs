use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use std::sync::OnceLock;

use bitflags::bitflags;

use crate::access::PropertyAccessor;
use crate::customization::{Customization, ResolvedProperty};
use crate::dispatch::TypeStrategy;
use crate::error::BindError;
use crate::info::{Type, TypeInfo, TypeResolution};

bitflags! {
    /// Directions a property takes part in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// Serialized: a visible reader and not read transient.
        const READABLE = 1 << 0;
        /// Deserialized: a visible writer and not write transient.
        const WRITABLE = 1 << 1;
    }
}

/// The declared value type of one direction.
#[derive(Clone, Copy)]
pub(crate) struct ValueSite {
    pub ty: Type,
    pub info: fn() -> &'static TypeInfo,
    pub resolution: TypeResolution,
}

/// Metadata of one discovered property.
pub struct PropertyModel {
    pub(crate) owner: Type,
    pub(crate) identity: &'static str,
    pub(crate) read_name: Option<String>,
    pub(crate) write_name: Option<String>,
    pub(crate) read_site: Option<ValueSite>,
    pub(crate) write_site: Option<ValueSite>,
    pub(crate) customization: Customization,
    pub(crate) accessor: PropertyAccessor,
    pub(crate) flags: PropertyFlags,
    serialize_route: OnceLock<Arc<dyn TypeStrategy>>,
    deserialize_route: OnceLock<Arc<dyn TypeStrategy>>,
}

impl PropertyModel {
    pub(crate) fn new(
        owner: Type,
        identity: &'static str,
        resolved: ResolvedProperty,
        read_site: Option<ValueSite>,
        write_site: Option<ValueSite>,
        accessor: PropertyAccessor,
    ) -> Self {
        let ResolvedProperty {
            customization,
            read_name,
            write_name,
        } = resolved;
        let mut flags = PropertyFlags::empty();
        flags.set(
            PropertyFlags::READABLE,
            accessor.can_get() && !customization.is_read_transient() && read_site.is_some(),
        );
        flags.set(
            PropertyFlags::WRITABLE,
            accessor.can_set() && !customization.is_write_transient() && write_site.is_some(),
        );
        Self {
            owner,
            identity,
            read_name,
            write_name,
            read_site,
            write_site,
            customization,
            accessor,
            flags,
            serialize_route: OnceLock::new(),
            deserialize_route: OnceLock::new(),
        }
    }

    /// A copy reached from a subtype; cached routes are not shared.
    pub(crate) fn with_accessor(&self, accessor: PropertyAccessor) -> Self {
        let resolved = ResolvedProperty {
            customization: self.customization.clone(),
            read_name: self.read_name.clone(),
            write_name: self.write_name.clone(),
        };
        Self::new(
            self.owner,
            self.identity,
            resolved,
            self.read_site,
            self.write_site,
            accessor,
        )
    }

    /// The class declaring the property.
    #[inline]
    pub fn owner(&self) -> &Type {
        &self.owner
    }

    /// The default name, as declared.
    #[inline]
    pub fn identity(&self) -> &'static str {
        self.identity
    }

    /// Document key read on deserialization.
    #[inline]
    pub fn read_name(&self) -> Option<&str> {
        self.read_name.as_deref()
    }

    /// Document key written on serialization.
    #[inline]
    pub fn write_name(&self) -> Option<&str> {
        self.write_name.as_deref()
    }

    /// Declared type of the property, as read if readable.
    pub fn value_type(&self) -> Option<&Type> {
        self.read_site
            .as_ref()
            .or(self.write_site.as_ref())
            .map(|site| &site.ty)
    }

    pub fn resolution(&self) -> TypeResolution {
        match (self.read_site, self.write_site) {
            (Some(site), _) | (None, Some(site)) => site.resolution,
            (None, None) => TypeResolution::Concrete,
        }
    }

    #[inline]
    pub fn customization(&self) -> &Customization {
        &self.customization
    }

    #[inline]
    pub fn accessor(&self) -> &PropertyAccessor {
        &self.accessor
    }

    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.flags.contains(PropertyFlags::READABLE)
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.flags.contains(PropertyFlags::WRITABLE)
    }

    /// The serialize strategy, cached when the read type is concrete.
    pub(crate) fn serialize_route(
        &self,
        build: impl FnOnce(&Self) -> Result<Arc<dyn TypeStrategy>, BindError>,
    ) -> Result<Arc<dyn TypeStrategy>, BindError> {
        let cacheable = self
            .read_site
            .is_some_and(|site| site.resolution == TypeResolution::Concrete);
        cached(&self.serialize_route, cacheable, || build(self))
    }

    /// The deserialize strategy, cached when the write type is concrete.
    pub(crate) fn deserialize_route(
        &self,
        build: impl FnOnce(&Self) -> Result<Arc<dyn TypeStrategy>, BindError>,
    ) -> Result<Arc<dyn TypeStrategy>, BindError> {
        let cacheable = self
            .write_site
            .is_some_and(|site| site.resolution == TypeResolution::Concrete);
        cached(&self.deserialize_route, cacheable, || build(self))
    }
}

pub(crate) fn cached(
    cell: &OnceLock<Arc<dyn TypeStrategy>>,
    cacheable: bool,
    build: impl FnOnce() -> Result<Arc<dyn TypeStrategy>, BindError>,
) -> Result<Arc<dyn TypeStrategy>, BindError> {
    if let Some(route) = cell.get() {
        return Ok(route.clone());
    }
    let route = build()?;
    if !cacheable {
        return Ok(route);
    }
    Ok(cell.get_or_init(|| route).clone())
}

impl fmt::Debug for PropertyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyModel")
            .field("owner", &self.owner)
            .field("identity", &self.identity)
            .field("read_name", &self.read_name)
            .field("write_name", &self.write_name)
            .field("flags", &self.flags)
            .field("customization", &self.customization)
            .field("accessor", &self.accessor)
            .finish()
    }
}
