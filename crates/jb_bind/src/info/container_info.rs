use alloc::boxed::Box;
use core::fmt;

use crate::error::TypeMismatch;
use crate::info::{Type, TypeInfo, Typed};
use crate::{Bindable, downcast};

/// Type-erased constructor of a boxed value.
pub type NewFn = fn() -> Box<dyn Bindable>;

fn new_boxed<T: Typed + Default>() -> Box<dyn Bindable> {
    Box::new(T::default())
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// A leaf value with a built-in textual or numeric document form.
pub struct ScalarInfo {
    ty: Type,
    pub(crate) default: Option<NewFn>,
}

impl ScalarInfo {
    pub fn new<T: Typed + Default>() -> Self {
        Self {
            ty: Type::of::<T>(),
            default: Some(new_boxed::<T>),
        }
    }

    /// A scalar without a natural absent value.
    pub fn without_default<T: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            default: None,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }
}

impl fmt::Debug for ScalarInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarInfo").field("ty", &self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// `Option<T>`: the empty case maps to the document null.
pub struct OptionalInfo {
    ty: Type,
    pub(crate) inner: fn() -> &'static TypeInfo,
    /// Outer `None` when the value is not of this type.
    pub(crate) get: for<'a> fn(&'a dyn Bindable) -> Option<Option<&'a dyn Bindable>>,
    pub(crate) none: NewFn,
    pub(crate) some: fn(Box<dyn Bindable>) -> Result<Box<dyn Bindable>, TypeMismatch>,
}

fn option_get<T: Typed>(value: &dyn Bindable) -> Option<Option<&dyn Bindable>> {
    value
        .as_any()
        .downcast_ref::<Option<T>>()
        .map(|v| v.as_ref().map(|v| v as &dyn Bindable))
}

fn option_none<T: Typed>() -> Box<dyn Bindable> {
    Box::new(Option::<T>::None)
}

fn option_some<T: Typed>(value: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, TypeMismatch> {
    Ok(Box::new(Some(downcast::<T>(value)?)))
}

impl OptionalInfo {
    pub fn new<T: Typed>() -> Self {
        Self {
            ty: Type::of::<Option<T>>(),
            inner: T::type_info,
            get: option_get::<T>,
            none: option_none::<T>,
            some: option_some::<T>,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Metadata of the wrapped type.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Wraps a decoded inner value.
    pub fn wrap(&self, value: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, TypeMismatch> {
        (self.some)(value)
    }

    pub fn none(&self) -> Box<dyn Bindable> {
        (self.none)()
    }
}

impl fmt::Debug for OptionalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalInfo").field("ty", &self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// BoxedInfo

/// `Box<T>`: bound exactly like `T`, so recursive types can be expressed.
pub struct BoxedInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
    pub(crate) get: for<'a> fn(&'a dyn Bindable) -> Option<&'a dyn Bindable>,
    wrap: fn(Box<dyn Bindable>) -> Result<Box<dyn Bindable>, TypeMismatch>,
}

fn boxed_get<T: Typed>(value: &dyn Bindable) -> Option<&dyn Bindable> {
    value
        .as_any()
        .downcast_ref::<Box<T>>()
        .map(|v| &**v as &dyn Bindable)
}

fn boxed_wrap<T: Typed>(value: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, TypeMismatch> {
    Ok(Box::new(Box::new(downcast::<T>(value)?)))
}

impl BoxedInfo {
    pub fn new<T: Typed>() -> Self {
        Self {
            ty: Type::of::<Box<T>>(),
            inner: T::type_info,
            get: boxed_get::<T>,
            wrap: boxed_wrap::<T>,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Metadata of the boxed type.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Boxes a decoded inner value.
    pub fn wrap(&self, value: Box<dyn Bindable>) -> Result<Box<dyn Bindable>, TypeMismatch> {
        (self.wrap)(value)
    }
}

impl fmt::Debug for BoxedInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedInfo").field("ty", &self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// Sequence / ListInfo

/// An array or collection shape.
///
/// Implemented for `Vec`, `VecDeque`, `BTreeSet` and `HashSet`, and open to
/// other collections.
pub trait Sequence: Typed + Default {
    type Item: Typed;

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Bindable> + '_>;

    fn push_item(&mut self, item: Self::Item);
}

/// Iterator over the items of a type-erased collection.
pub type ItemsIter<'a> = Box<dyn Iterator<Item = &'a dyn Bindable> + 'a>;

pub struct ListInfo {
    ty: Type,
    item: fn() -> &'static TypeInfo,
    pub(crate) iter: for<'a> fn(&'a dyn Bindable) -> Option<ItemsIter<'a>>,
    pub(crate) new: NewFn,
    pub(crate) push: fn(&mut dyn Bindable, Box<dyn Bindable>) -> Result<(), TypeMismatch>,
}

fn list_iter<L: Sequence>(value: &dyn Bindable) -> Option<ItemsIter<'_>> {
    value.as_any().downcast_ref::<L>().map(L::items)
}

fn list_push<L: Sequence>(list: &mut dyn Bindable, item: Box<dyn Bindable>) -> Result<(), TypeMismatch> {
    let found = list.bind_type_info().type_path();
    let list = list
        .as_any_mut()
        .downcast_mut::<L>()
        .ok_or_else(|| TypeMismatch::new::<L>(found))?;
    list.push_item(downcast::<L::Item>(item)?);
    Ok(())
}

impl ListInfo {
    pub fn new<L: Sequence>() -> Self {
        Self {
            ty: Type::of::<L>(),
            item: <L::Item as Typed>::type_info,
            iter: list_iter::<L>,
            new: new_boxed::<L>,
            push: list_push::<L>,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item)()
    }

    pub fn items<'a>(&self, list: &'a dyn Bindable) -> Option<ItemsIter<'a>> {
        (self.iter)(list)
    }

    pub fn new_list(&self) -> Box<dyn Bindable> {
        (self.new)()
    }

    pub fn push(&self, list: &mut dyn Bindable, item: Box<dyn Bindable>) -> Result<(), TypeMismatch> {
        (self.push)(list, item)
    }
}

impl fmt::Debug for ListInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListInfo").field("ty", &self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// Mapping / MapInfo

/// A key-value shape encoded as a document object.
pub trait Mapping: Typed + Default {
    type Key: Typed;
    type Value: Typed;

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Bindable, &dyn Bindable)> + '_>;

    fn insert_entry(&mut self, key: Self::Key, value: Self::Value);
}

/// Iterator over the entries of a type-erased map.
pub type EntriesIter<'a> = Box<dyn Iterator<Item = (&'a dyn Bindable, &'a dyn Bindable)> + 'a>;

pub struct MapInfo {
    ty: Type,
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
    pub(crate) iter: for<'a> fn(&'a dyn Bindable) -> Option<EntriesIter<'a>>,
    pub(crate) new: NewFn,
    pub(crate) insert:
        fn(&mut dyn Bindable, Box<dyn Bindable>, Box<dyn Bindable>) -> Result<(), TypeMismatch>,
}

fn map_iter<M: Mapping>(value: &dyn Bindable) -> Option<EntriesIter<'_>> {
    value.as_any().downcast_ref::<M>().map(M::entries)
}

fn map_insert<M: Mapping>(
    map: &mut dyn Bindable,
    key: Box<dyn Bindable>,
    value: Box<dyn Bindable>,
) -> Result<(), TypeMismatch> {
    let found = map.bind_type_info().type_path();
    let map = map
        .as_any_mut()
        .downcast_mut::<M>()
        .ok_or_else(|| TypeMismatch::new::<M>(found))?;
    map.insert_entry(downcast::<M::Key>(key)?, downcast::<M::Value>(value)?);
    Ok(())
}

impl MapInfo {
    pub fn new<M: Mapping>() -> Self {
        Self {
            ty: Type::of::<M>(),
            key: <M::Key as Typed>::type_info,
            value: <M::Value as Typed>::type_info,
            iter: map_iter::<M>,
            new: new_boxed::<M>,
            insert: map_insert::<M>,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key)()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value)()
    }

    pub fn entries<'a>(&self, map: &'a dyn Bindable) -> Option<EntriesIter<'a>> {
        (self.iter)(map)
    }

    pub fn new_map(&self) -> Box<dyn Bindable> {
        (self.new)()
    }

    pub fn insert(
        &self,
        map: &mut dyn Bindable,
        key: Box<dyn Bindable>,
        value: Box<dyn Bindable>,
    ) -> Result<(), TypeMismatch> {
        (self.insert)(map, key, value)
    }
}

impl fmt::Debug for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapInfo").field("ty", &self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// AnyInfo

/// The open "any object" type, `Box<dyn Bindable>`.
///
/// Its shape is only known from the runtime value it holds.
pub struct AnyInfo {
    ty: Type,
    pub(crate) inner: for<'a> fn(&'a dyn Bindable) -> Option<&'a dyn Bindable>,
    pub(crate) null: NewFn,
}

impl AnyInfo {
    pub(crate) fn new(
        inner: for<'a> fn(&'a dyn Bindable) -> Option<&'a dyn Bindable>,
        null: NewFn,
    ) -> Self {
        Self {
            ty: Type::of::<Box<dyn Bindable>>(),
            inner,
            null,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The value held by an "any" slot.
    pub fn inner<'a>(&self, value: &'a dyn Bindable) -> Option<&'a dyn Bindable> {
        (self.inner)(value)
    }

    /// An "any" slot holding null.
    pub fn null(&self) -> Box<dyn Bindable> {
        (self.null)()
    }
}

impl fmt::Debug for AnyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyInfo").field("ty", &self.ty).finish()
    }
}
