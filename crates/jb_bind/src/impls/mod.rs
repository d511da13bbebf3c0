//! Built-in [`Typed`] impls and the cells used to implement it.
//!
//! - [`NonGenericTypeInfoCell`]: used to implement [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`]: used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalars:
//!     - `bool`, `char`, `String`, `PathBuf`
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - chrono: `NaiveDate`, `NaiveTime`, `NaiveDateTime`, `DateTime<Utc>`,
//!       `DateTime<FixedOffset>`
//!     - `Uuid`, `IpAddr`, `SystemTime`, `Url`
//! - `Option<T>`
//! - `Box<T>`, bound as `T`
//! - lists: `Vec<T>`, `VecDeque<T>`, `BTreeSet<T>`, `HashSet<T, S>`
//! - maps: `BTreeMap<K, V>`, `HashMap<K, V, S>`
//! - `Box<dyn Bindable>`, the open "any object" type
//!
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod any;
mod boxed;
mod cell;
mod collections;
mod option;
mod scalars;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
