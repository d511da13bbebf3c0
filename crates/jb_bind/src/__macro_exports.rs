//! Items used by the code of `#[derive(Bindable)]`, so the expansion works
//! in `no_std` crates and never depends on the caller's imports.

pub use alloc::boxed::Box;
pub use alloc::vec;
pub use alloc::vec::Vec;
