//! Polymorphic values.
//!
//! A [`TypeInheritance`] names the runtime type of an object with a
//! discriminator key written before its properties. An open value slot
//! (`Box<dyn Bindable>`) reading an object that carries a known alias decodes
//! the named type instead of a natural map.
//!
//! A [`TypeMapping`] decodes a declared type through another type and a
//! conversion, for declared types that cannot be built from a document
//! themselves.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::error::BoxError;
use crate::info::{Type, TypeInfo, Typed};
use crate::{Bindable, downcast};

// -----------------------------------------------------------------------------
// TypeInheritance

#[derive(Clone)]
struct Subtype {
    alias: String,
    ty: Type,
    info: fn() -> &'static TypeInfo,
}

/// A discriminator key and the classes it can name.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
///
/// use jb_bind::derive::Bindable;
/// use jb_bind::polymorphism::TypeInheritance;
///
/// #[derive(Default, Bindable)]
/// #[bind(default)]
/// struct Dog {
///     pub name: String,
/// }
///
/// let animals = TypeInheritance::new("@type").with_subtype::<Dog>("dog");
///
/// assert_eq!(animals.key(), "@type");
/// assert_eq!(animals.alias_of(TypeId::of::<Dog>()), Some("dog"));
/// assert!(animals.subtype("cat").is_none());
/// ```
#[derive(Clone)]
pub struct TypeInheritance {
    key: String,
    subtypes: Vec<Subtype>,
}

impl TypeInheritance {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            subtypes: Vec::new(),
        }
    }

    /// Names the class `T` with `alias`.
    ///
    /// A later registration of the same alias or the same type replaces the
    /// earlier one.
    pub fn with_subtype<T: Typed>(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let ty = Type::of::<T>();
        self.subtypes
            .retain(|subtype| subtype.alias != alias && subtype.ty.id() != ty.id());
        self.subtypes.push(Subtype {
            alias,
            ty,
            info: T::type_info,
        });
        self
    }

    /// The document key holding the alias.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn alias_of(&self, ty: TypeId) -> Option<&str> {
        self.subtypes
            .iter()
            .find(|subtype| subtype.ty.id() == ty)
            .map(|subtype| subtype.alias.as_str())
    }

    pub fn subtype(&self, alias: &str) -> Option<&'static TypeInfo> {
        self.subtypes
            .iter()
            .find(|subtype| subtype.alias == alias)
            .map(|subtype| (subtype.info)())
    }
}

impl fmt::Debug for TypeInheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInheritance")
            .field("key", &self.key)
            .field(
                "subtypes",
                &self
                    .subtypes
                    .iter()
                    .map(|subtype| (subtype.alias.as_str(), subtype.ty.path()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeMapping

type Convert = dyn Fn(Box<dyn Bindable>) -> Result<Box<dyn Bindable>, BoxError> + Send + Sync;

/// Decodes a declared type through an implementation type.
///
/// Encoding is unaffected, values are written as their declared type.
///
/// # Examples
///
/// ```
/// use jb_bind::Bindable;
/// use jb_bind::polymorphism::TypeMapping;
///
/// let mapping = TypeMapping::new::<Box<dyn Bindable>, u32>(|n| Box::new(n) as Box<dyn Bindable>);
/// assert!(mapping.declared().is::<Box<dyn Bindable>>());
/// assert!(mapping.implementation().is::<u32>());
/// ```
#[derive(Clone)]
pub struct TypeMapping {
    declared: Type,
    implementation: Type,
    implementation_info: fn() -> &'static TypeInfo,
    convert: Arc<Convert>,
}

impl TypeMapping {
    pub fn new<D: Typed, I: Typed>(convert: impl Fn(I) -> D + Send + Sync + 'static) -> Self {
        Self {
            declared: Type::of::<D>(),
            implementation: Type::of::<I>(),
            implementation_info: I::type_info,
            convert: Arc::new(move |value: Box<dyn Bindable>| -> Result<Box<dyn Bindable>, BoxError> {
                let value = downcast::<I>(value)?;
                Ok(Box::new(convert(value)) as Box<dyn Bindable>)
            }),
        }
    }

    /// A mapping converting through `From`.
    pub fn of<D: Typed + From<I>, I: Typed>() -> Self {
        Self::new::<D, I>(<D as From<I>>::from)
    }

    #[inline]
    pub const fn declared(&self) -> &Type {
        &self.declared
    }

    #[inline]
    pub const fn implementation(&self) -> &Type {
        &self.implementation
    }

    #[inline]
    pub fn implementation_info(&self) -> &'static TypeInfo {
        (self.implementation_info)()
    }

    /// Converts a decoded implementation value into the declared type.
    pub fn convert(&self, value: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, BoxError> {
        (self.convert)(value)
    }
}

impl fmt::Debug for TypeMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMapping")
            .field("declared", &self.declared)
            .field("implementation", &self.implementation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::any::TypeId;

    use super::{TypeInheritance, TypeMapping};
    use crate::Bindable;
    use crate::derive::Bindable;

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Dog {
        pub name: String,
    }

    #[derive(Default, Bindable)]
    #[bind(default)]
    struct Cat {
        pub lives: u8,
    }

    #[test]
    fn later_registrations_replace_earlier_ones() {
        let animals = TypeInheritance::new("@type")
            .with_subtype::<Dog>("dog")
            .with_subtype::<Cat>("dog");

        assert_eq!(animals.alias_of(TypeId::of::<Cat>()), Some("dog"));
        assert_eq!(animals.alias_of(TypeId::of::<Dog>()), None);
        assert!(animals.subtype("dog").unwrap().ty().is::<Cat>());
    }

    #[test]
    fn mapping_converts_decoded_values() {
        let mapping = TypeMapping::new::<Box<dyn Bindable>, Dog>(|dog| Box::new(dog) as Box<dyn Bindable>);

        let decoded: Box<dyn Bindable> = Box::new(Dog { name: "rex".into() });
        let converted = mapping.convert(decoded).unwrap();
        let slot = (*converted).downcast_ref::<Box<dyn Bindable>>().unwrap();
        assert_eq!((**slot).downcast_ref::<Dog>().unwrap().name, "rex");

        let wrong: Box<dyn Bindable> = Box::new(7_u8);
        assert!(mapping.convert(wrong).is_err());
    }
}
