//! Containers for static storage of type information.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed).
//!
//! ## NonGenericTypeInfoCell
//!
//! Internally an [`OnceLock`], almost no additional expense.
//!
//! ## GenericTypeInfoCell
//!
//! The `static CELL` inside a generic function is shared by every
//! instantiation, so the inner of this container is a [`TypeIdMap`]
//! wrapped in a [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use jb_utils::TypeIdMap;

use crate::info::TypeInfo;

/// Static storage of the [`TypeInfo`] of a non-generic type.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first use.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

/// Static storage of the [`TypeInfo`] of a generic type, one per instantiation.
///
/// ```
/// use jb_bind::impls::GenericTypeInfoCell;
/// use jb_bind::info::{ClassInfo, MemberInfo, TypeInfo, Typed};
///
/// #[derive(Default)]
/// struct Wrapper<T> {
///     value: T,
/// }
///
/// impl<T: Typed + Default> Typed for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             TypeInfo::Class(
///                 ClassInfo::new::<Self>(module_path!())
///                     .with_default::<Self>()
///                     .with_member(
///                         MemberInfo::field::<Self, T>("value", |w| &w.value, |w| &mut w.value)
///                             .unresolved(),
///                     ),
///             )
///         })
///     }
/// }
///
/// let a = <Wrapper<u8>>::type_info();
/// let b = <Wrapper<String>>::type_info();
/// assert!(!core::ptr::eq(a, b));
/// assert!(core::ptr::eq(a, <Wrapper<u8>>::type_info()));
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, building it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            // Built outside the lock: `f` may need the info of other
            // instantiations stored in this very cell.
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(info) = map.get(&type_id).copied() {
            return info;
        }
        let info: &'static TypeInfo = Box::leak(Box::new(value));
        map.insert(type_id, info);
        info
    }
}
