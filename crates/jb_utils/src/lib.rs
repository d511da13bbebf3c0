//! Shared containers for the binding engine.
//!
//! - [`hash`]: hashing states and re-exports of *hashbrown* and *foldhash*.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`InstallOnceMap`]: a read-mostly concurrent map where the first install of a key wins.

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod once_map;
mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use once_map::{InstallOnceMap, TypeIdOnceMap};
pub use typeid_map::TypeIdMap;
