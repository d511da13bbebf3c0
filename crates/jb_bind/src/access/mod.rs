//! Uniform get/set over whichever member won visibility resolution.
//!
//! A [`PropertyAccessor`] is selected once while the class model is built.
//! For each of the get and set roles independently it takes:
//!
//! - the getter (or setter) if declared and visible;
//! - else the field if declared and visible;
//! - else nothing, and the property is not readable (or writable).
//!
//! Types marked anonymous are never written, neither through a setter nor
//! through a field.
//!
//! Inherited properties reach the parent value through a chain of up-cast
//! field accessors, so the accessor of a parent property keeps working on
//! instances of every subtype.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::PropertyAccessor;
pub use value::PropertyValue;
