//! Resolved, immutable customization of properties and classes.
//!
//! ## Menu
//!
//! - [`Customization`]: one property, both directions.
//! - [`ClassCustomization`]: one class, or one container type.
//!
//! Resolution merges the annotations of the getter, setter and field of a
//! property with the class, module and global defaults. It runs once per
//! class model build.

// -----------------------------------------------------------------------------
// Modules

mod resolver;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use resolver::{PropertySites, ResolvedProperty};
pub(crate) use resolver::{resolve_class, resolve_container, resolve_property};

use alloc::vec::Vec;

use crate::binding::{AdapterBinding, DeserializerBinding, SerializerBinding};
use crate::format::Formats;

// -----------------------------------------------------------------------------
// Customization

/// Customization of one property.
///
/// Everything on the serialize side is absent when the property is read
/// transient, everything on the deserialize side when it is write transient.
#[derive(Debug, Clone, Default)]
pub struct Customization {
    pub(crate) nillable: bool,
    pub(crate) read_transient: bool,
    pub(crate) write_transient: bool,
    pub(crate) serialize_formats: Formats,
    pub(crate) deserialize_formats: Formats,
    pub(crate) serialize_adapter: Option<AdapterBinding>,
    pub(crate) deserialize_adapter: Option<AdapterBinding>,
    pub(crate) serializer: Option<SerializerBinding>,
    pub(crate) deserializer: Option<DeserializerBinding>,
}

impl Customization {
    /// Whether a null value is written as `null` instead of being skipped.
    #[inline]
    pub fn is_nillable(&self) -> bool {
        self.nillable
    }

    /// Excluded from serialization.
    #[inline]
    pub fn is_read_transient(&self) -> bool {
        self.read_transient
    }

    /// Excluded from deserialization.
    #[inline]
    pub fn is_write_transient(&self) -> bool {
        self.write_transient
    }

    #[inline]
    pub fn serialize_formats(&self) -> &Formats {
        &self.serialize_formats
    }

    #[inline]
    pub fn deserialize_formats(&self) -> &Formats {
        &self.deserialize_formats
    }

    #[inline]
    pub fn serialize_adapter(&self) -> Option<&AdapterBinding> {
        self.serialize_adapter.as_ref()
    }

    #[inline]
    pub fn deserialize_adapter(&self) -> Option<&AdapterBinding> {
        self.deserialize_adapter.as_ref()
    }

    #[inline]
    pub fn serializer(&self) -> Option<&SerializerBinding> {
        self.serializer.as_ref()
    }

    #[inline]
    pub fn deserializer(&self) -> Option<&DeserializerBinding> {
        self.deserializer.as_ref()
    }
}

// -----------------------------------------------------------------------------
// ClassCustomization

/// Customization of one class, or of a container type.
#[derive(Debug, Clone, Default)]
pub struct ClassCustomization {
    nillable: bool,
    container: bool,
    formats: Formats,
    property_order: Vec<&'static str>,
}

impl ClassCustomization {
    pub(crate) fn new(nillable: bool, formats: Formats, property_order: Vec<&'static str>) -> Self {
        Self {
            nillable,
            container: false,
            formats,
            property_order,
        }
    }

    /// Customization of an array, collection or map shape.
    pub(crate) fn container(formats: Formats) -> Self {
        Self {
            nillable: true,
            container: true,
            formats,
            property_order: Vec::new(),
        }
    }

    /// Containers are nillable whatever was declared.
    #[inline]
    pub fn is_nillable(&self) -> bool {
        self.container || self.nillable
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.container
    }

    /// Formatters inherited by the properties of the class.
    #[inline]
    pub fn formats(&self) -> &Formats {
        &self.formats
    }

    /// Identity names serialized first, in this order.
    #[inline]
    pub fn property_order(&self) -> &[&'static str] {
        &self.property_order
    }
}
