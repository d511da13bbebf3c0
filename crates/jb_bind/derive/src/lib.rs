//! `#[derive(Bindable)]`, see [`Bindable`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static BIND_ATTRIBUTE_NAME: &str = "bind";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Binding Metadata Derivation
///
/// `#[derive(Bindable)]` implements `Typed`, which makes the type
/// `Bindable` through the blanket impl. The generated `TypeInfo` lists the
/// members of the type with their declared customizations; how they are
/// named, ordered and encoded is decided by the engine at run time.
///
/// Supported shapes:
///
/// - structs with named fields, bound as classes,
/// - unit structs, bound as classes without properties,
/// - enums made of unit variants, bound as the name of the constant.
///
/// Types with lifetime parameters are rejected. Type parameters are
/// bounded by `Typed`, and fields whose type mentions one are resolved
/// from the runtime value.
///
/// ## Type attributes
///
/// ```rust, ignore
/// #[derive(Default, Bindable)]
/// #[bind(default)]                       // instances start from `Default::default()`
/// #[bind(nillable)]                      // write nulls of every property
/// #[bind(order(id, name))]               // these properties first, in this order
/// #[bind(date_format = "%d.%m.%Y")]      // defaults of every property of the type
/// #[bind(number_format = "#0.00")]
/// #[bind(visibility = FieldsOnly)]       // a `VisibilityPolicy + Default` type
/// #[bind(implements = labelled::<Self>())] // an `InterfaceInfo`, repeatable
/// struct Person { /* ... */ }
/// ```
///
/// `anonymous` marks a type whose properties are never written by the
/// decoder.
///
/// ### Creators
///
/// Types without a usable default are decoded through a creator taking
/// the fields marked `param`, in declaration order:
///
/// ```rust, ignore
/// #[derive(Bindable)]
/// #[bind(creator)]                      // `Self { a, b, other: Default::default() }`
/// struct A {
///     #[bind(param)]
///     a: String,
///     #[bind(param = "bee")]            // explicit parameter name
///     b: u32,
///     other: Vec<u8>,
/// }
///
/// #[derive(Bindable)]
/// #[bind(creator = B::new)]              // `B::new(a)`
/// struct B { #[bind(param)] a: String }
///
/// #[derive(Bindable)]
/// #[bind(creator(with = C::parse, fallible))] // `C::parse(a)?`
/// struct C { #[bind(param)] a: String }
/// ```
///
/// ## Field attributes
///
/// - `name = "..."`: explicit document name.
/// - `nillable`, `nillable = false`: whether a null value is written.
/// - `transient`: the property is neither written nor read.
/// - `date_format = "..."`, `number_format = "..."`.
/// - `adapter = T`, `serializer = T`, `deserializer = T`: a `Default`
///   implementation of `Adapter`, `Serializer` or `Deserializer`.
/// - `skip`: the field is left out entirely.
/// - `extends`: the field holds the supertype, whose properties are
///   inherited.
/// - `param`, `param = "..."`: a creator parameter.
///
/// The visibility of the field is its Rust visibility: `pub` is public,
/// `pub(crate)` and friends are restricted, anything else is private.
///
/// ### Accessors
///
/// A property may also be read through a getter and written through a
/// setter, both taking the field's type:
///
/// ```rust, ignore
/// #[derive(Default, Bindable)]
/// #[bind(default)]
/// struct Counter {
///     #[bind(get = Self::count, set(with = Self::set_count, fallible))]
///     count: u32,
/// }
///
/// impl Counter {
///     fn count(&self) -> u32 { self.count }
///     fn set_count(&mut self, count: u32) -> Result<(), String> { /* ... */ }
/// }
/// ```
///
/// The long form accepts `private` or `restricted` for the accessor's
/// visibility, `fallible`, and every site customization of a field.
///
/// ## Variant attributes
///
/// - `name = "..."`: document name of the constant.
#[proc_macro_derive(Bindable, attributes(bind))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_bind_impls(ast)
}
