use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Bindable;
use crate::info::{Type, Typed};

/// One constant of a unit-only enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumConstant {
    identity: &'static str,
    name: Option<&'static str>,
}

impl EnumConstant {
    #[inline]
    pub const fn new(identity: &'static str) -> Self {
        Self {
            identity,
            name: None,
        }
    }

    /// Overrides the document name of the constant.
    #[inline]
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// The variant name as declared.
    #[inline]
    pub const fn identity(&self) -> &'static str {
        self.identity
    }

    #[inline]
    pub const fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// The explicit name, else the declared one.
    #[inline]
    pub const fn document_name(&self) -> &'static str {
        match self.name {
            Some(name) => name,
            None => self.identity,
        }
    }
}

/// A unit-only enum, encoded as the document name of its constant.
pub struct EnumInfo {
    ty: Type,
    constants: Vec<EnumConstant>,
    index_of: fn(&dyn Bindable) -> Option<usize>,
    from_index: fn(usize) -> Option<Box<dyn Bindable>>,
}

impl EnumInfo {
    pub fn new<T: Typed>(
        constants: Vec<EnumConstant>,
        index_of: fn(&dyn Bindable) -> Option<usize>,
        from_index: fn(usize) -> Option<Box<dyn Bindable>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            constants,
            index_of,
            from_index,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn constants(&self) -> &[EnumConstant] {
        &self.constants
    }

    /// The constant held by `value`, `None` if it is not of this enum.
    pub fn constant_of(&self, value: &dyn Bindable) -> Option<&EnumConstant> {
        (self.index_of)(value).and_then(|index| self.constants.get(index))
    }

    pub fn index_of_document_name(&self, name: &str) -> Option<usize> {
        self.constants
            .iter()
            .position(|constant| constant.document_name() == name)
    }

    pub fn instantiate(&self, index: usize) -> Option<Box<dyn Bindable>> {
        (self.from_index)(index)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("ty", &self.ty)
            .field("constants", &self.constants)
            .finish()
    }
}
