use alloc::boxed::Box;
use core::fmt;
use core::ops::Deref;

use crate::Bindable;

/// A property value read from an instance.
///
/// Fields are borrowed in place, getters produce an owned value.
pub enum PropertyValue<'a> {
    Borrowed(&'a dyn Bindable),
    Owned(Box<dyn Bindable>),
}

impl Deref for PropertyValue<'_> {
    type Target = dyn Bindable;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }
}

impl fmt::Debug for PropertyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(value) => f.debug_tuple("Borrowed").field(value).finish(),
            Self::Owned(value) => f.debug_tuple("Owned").field(&&**value).finish(),
        }
    }
}
