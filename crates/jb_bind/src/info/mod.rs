//! Compile-time binding metadata, the statically typed replacement for
//! annotations and reflection.
//!
//! ## Menu
//!
//! - [`Type`]: a [`TypeId`](core::any::TypeId) plus a readable type path.
//! - [`Typed`]: static accessor of a type's [`TypeInfo`].
//! - [`TypeInfo`]: one of the following, selected by [`TypeKind`]:
//!     - [`ScalarInfo`]: built-in leaf values (numbers, strings, dates, ...).
//!     - [`OptionalInfo`]: `Option<T>`, the only nullable shape besides "any".
//!     - [`BoxedInfo`]: `Box<T>`, transparent over `T`.
//!     - [`EnumInfo`]: unit-only enums made of [`EnumConstant`]s.
//!     - [`ClassInfo`]: structured objects, see below.
//!     - [`ListInfo`]: [`Sequence`] shapes (`Vec`, sets, ...).
//!     - [`MapInfo`]: [`Mapping`] shapes (`BTreeMap`, `HashMap`).
//!     - [`AnyInfo`]: the open "any object" type, `Box<dyn Bindable>`.
//!
//! - Class metadata:
//!     - [`MemberInfo`]: a field, getter or setter of a property, with its
//!       [`SiteAnnotations`], [`MemberVisibility`] and [`TypeResolution`].
//!     - [`ParentLink`]: the embedded supertype and its up-cast accessors.
//!     - [`InterfaceInfo`]: accessor methods inherited from a trait.
//!     - [`CreatorInfo`]: a named-parameter instantiation callback.
//!     - [`ClassAnnotations`]: class-level customization.
//!
//! [`Bindable`]: crate::Bindable

// -----------------------------------------------------------------------------
// Modules

mod class_info;
mod container_info;
mod enum_info;
mod member_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use class_info::{ClassAnnotations, ClassInfo, CreatorFn, CreatorInfo, CreatorParamInfo};
pub use class_info::{InterfaceInfo, ParentLink, PolicyFn};
pub use container_info::{AnyInfo, BoxedInfo, ListInfo, MapInfo, OptionalInfo, ScalarInfo};
pub use container_info::{EntriesIter, ItemsIter, Mapping, NewFn, Sequence};
pub use enum_info::{EnumConstant, EnumInfo};
pub use member_info::{FieldAccess, GetterFn, MemberAccess, MemberInfo, SetterFn};
pub use member_info::{MemberKind, MemberVisibility, SiteAnnotations, TypeResolution};
pub use ty::Type;
pub use type_info::{KindError, TypeInfo, TypeKind};
pub use typed::Typed;
