//! Cached binding metadata of classes.
//!
//! ## Menu
//!
//! - [`ClassModel`]: one bound class, its ordered and indexed properties.
//! - [`PropertyModel`]: one discovered property with names, accessor and
//!   customization.
//! - [`CreatorModel`]: the named-parameter creator of a class, if any.
//!
//! Models are built by the [`ClassModelRegistry`](crate::registry::ClassModelRegistry)
//! and never mutated once published.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod class;
mod creator;
mod ordering;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use builder::build_class_model;
pub(crate) use property::ValueSite;

pub use class::ClassModel;
pub use creator::{CreatorModel, CreatorParam};
pub use property::{PropertyFlags, PropertyModel};
