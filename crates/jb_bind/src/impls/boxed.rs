use alloc::boxed::Box;

use crate::impls::GenericTypeInfoCell;
use crate::info::{BoxedInfo, TypeInfo, Typed};

impl<T: Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Boxed(BoxedInfo::new::<T>()))
    }
}
