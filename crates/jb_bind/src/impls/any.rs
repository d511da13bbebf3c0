use alloc::boxed::Box;

use crate::Bindable;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{AnyInfo, TypeInfo, Typed};

fn any_inner(value: &dyn Bindable) -> Option<&dyn Bindable> {
    value
        .downcast_ref::<Box<dyn Bindable>>()
        .map(|inner| &**inner)
}

fn any_null() -> Box<dyn Bindable> {
    let inner: Box<dyn Bindable> = Box::new(Option::<Box<dyn Bindable>>::None);
    Box::new(inner)
}

/// The open "any object" slot.
///
/// The box itself is the value of the slot. A null slot holds an empty
/// `Option<Box<dyn Bindable>>`.
impl Typed for Box<dyn Bindable> {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Any(AnyInfo::new(any_inner, any_null)))
    }
}
