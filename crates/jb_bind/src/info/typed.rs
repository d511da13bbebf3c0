use crate::info::TypeInfo;

/// A static accessor to the binding metadata of a type.
///
/// Implemented by [`#[derive(Bindable)]`](crate::derive::Bindable) and by the
/// built-in value and container impls. Every `Typed` type is also
/// [`Bindable`](crate::Bindable) through a blanket impl.
///
/// # Manual impl
///
/// Store the info in a [`NonGenericTypeInfoCell`] so it is built once:
///
/// ```
/// use jb_bind::impls::NonGenericTypeInfoCell;
/// use jb_bind::info::{ClassInfo, MemberInfo, TypeInfo, Typed};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
/// }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Class(
///                 ClassInfo::new::<Self>(module_path!())
///                     .with_default::<Self>()
///                     .with_member(MemberInfo::field::<Self, i32>("x", |p| &p.x, |p| &mut p.x)),
///             )
///         })
///     }
/// }
///
/// let info = Point::type_info().as_class().unwrap();
/// assert_eq!(info.members().len(), 1);
/// ```
///
/// Generic types use [`GenericTypeInfoCell`] instead, one entry per instantiation.
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: Send + Sync + 'static {
    /// Returns the compile-time binding metadata of this type.
    fn type_info() -> &'static TypeInfo;
}
