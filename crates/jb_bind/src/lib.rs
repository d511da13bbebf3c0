#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// `#[derive(Bindable)]` resolves the crate through `Manifest`, which names it
// `jb_bind`; this alias makes the derive usable inside the crate itself.
extern crate self as jb_bind;

// -----------------------------------------------------------------------------
// std and alloc

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod bindable;

pub mod access;
pub mod binding;
pub mod config;
pub mod customization;
pub mod de;
pub mod dispatch;
pub mod document;
pub mod engine;
pub mod error;
pub mod format;
pub mod impls;
pub mod info;
pub mod model;
pub mod naming;
pub mod polymorphism;
pub mod registry;
pub mod ser;
pub mod visibility;

mod jsonb;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use bindable::{Bindable, downcast};
pub use jb_bind_derive as derive;
pub use jsonb::Jsonb;
