use alloc::boxed::Box;
use core::any::{Any, type_name};
use core::fmt;

use crate::error::TypeMismatch;
use crate::info::{TypeInfo, Typed};

/// The object-safe view of a value the engine can encode and decode.
///
/// Blanket-implemented for every [`Typed`] type, never implemented by hand.
///
/// Beware that `Box<dyn Bindable>` is itself `Bindable` (it is the open
/// "any object" type). Call methods through `&*boxed` to reach the value
/// inside the box.
pub trait Bindable: Any + Send + Sync {
    /// The [`TypeInfo`] of the concrete type behind this value.
    fn bind_type_info(&self) -> &'static TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn as_bindable(&self) -> &dyn Bindable;

    fn as_bindable_mut(&mut self) -> &mut dyn Bindable;

    /// Replaces `self` with `value` if both have the same concrete type.
    fn assign(&mut self, value: Box<dyn Bindable>) -> Result<(), TypeMismatch>;
}

impl<T: Typed> Bindable for T {
    #[inline]
    fn bind_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn as_bindable(&self) -> &dyn Bindable {
        self
    }

    #[inline]
    fn as_bindable_mut(&mut self) -> &mut dyn Bindable {
        self
    }

    fn assign(&mut self, value: Box<dyn Bindable>) -> Result<(), TypeMismatch> {
        *self = downcast::<T>(value)?;
        Ok(())
    }
}

impl dyn Bindable {
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.bind_type_info().type_path()
    }
}

impl fmt::Debug for dyn Bindable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Bindable<{}>", self.type_path())
    }
}

/// Takes the concrete value out of a boxed [`Bindable`].
///
/// # Examples
///
/// ```
/// use jb_bind::{Bindable, downcast};
///
/// let value: Box<dyn Bindable> = Box::new(7_u16);
/// assert!(downcast::<String>(value).is_err());
///
/// let value: Box<dyn Bindable> = Box::new(7_u16);
/// assert_eq!(downcast::<u16>(value).unwrap(), 7);
/// ```
pub fn downcast<T: Typed>(value: Box<dyn Bindable>) -> Result<T, TypeMismatch> {
    let found = (*value).type_path();
    match value.into_any().downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(TypeMismatch {
            expected: type_name::<T>(),
            found,
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::{Bindable, downcast};

    #[test]
    fn assign_requires_same_type() {
        let mut target = String::from("a");
        let slot: &mut dyn Bindable = &mut target;

        slot.assign(Box::new(String::from("b"))).unwrap();
        let err = slot.assign(Box::new(1_u8)).unwrap_err();
        assert_eq!(err.found, "u8");
        assert_eq!(target, "b");
    }

    #[test]
    fn boxed_any_is_its_own_value() {
        let inner: Box<dyn Bindable> = Box::new(3_i32);
        assert!((*inner).is::<i32>());

        let outer: Box<dyn Bindable> = Box::new(inner);
        assert!((*outer).is::<Box<dyn Bindable>>());
        let inner = downcast::<Box<dyn Bindable>>(outer).unwrap();
        assert_eq!(downcast::<i32>(inner).unwrap(), 3);
    }
}
