use core::{error, fmt};

use crate::Bindable;
use crate::info::{AnyInfo, BoxedInfo, ClassInfo, EnumInfo, ListInfo};
use crate::info::{MapInfo, OptionalInfo, ScalarInfo, Type};

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a bound type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Optional,
    Boxed,
    Enum,
    Class,
    List,
    Map,
    Any,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Optional => f.pad("Optional"),
            Self::Boxed => f.pad("Boxed"),
            Self::Enum => f.pad("Enum"),
            Self::Class => f.pad("Class"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Any => f.pad("Any"),
        }
    }
}

/// Error returned when a [`TypeInfo`] is not of the expected [`TypeKind`].
#[derive(Debug)]
pub struct KindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for KindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time binding metadata of one type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or,
/// for a value, [`Bindable::bind_type_info`].
#[derive(Debug)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Optional(OptionalInfo),
    Boxed(BoxedInfo),
    Enum(EnumInfo),
    Class(ClassInfo),
    List(ListInfo),
    Map(MapInfo),
    Any(AnyInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to the specific info of its kind.
        pub const fn $name(&self) -> Result<&$info, KindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(KindError {
                    expected: TypeKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_boxed: Boxed => BoxedInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_class: Class => ClassInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_any_info: Any => AnyInfo);

    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Optional(_) => TypeKind::Optional,
            Self::Boxed(_) => TypeKind::Boxed,
            Self::Enum(_) => TypeKind::Enum,
            Self::Class(_) => TypeKind::Class,
            Self::List(_) => TypeKind::List,
            Self::Map(_) => TypeKind::Map,
            Self::Any(_) => TypeKind::Any,
        }
    }

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Boxed(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Class(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Any(info) => info.ty(),
        }
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Array, collection and map shapes, always nillable in a document.
    #[inline]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Whether `value` holds the null of this type.
    ///
    /// Only optionals and the open "any" type have a null, a box holds
    /// one when its content does.
    pub fn is_null(&self, value: &dyn Bindable) -> bool {
        match self {
            Self::Optional(info) => matches!((info.get)(value), Some(None)),
            Self::Boxed(info) => {
                (info.get)(value).is_some_and(|inner| inner.bind_type_info().is_null(inner))
            }
            Self::Any(info) => {
                (info.inner)(value).is_some_and(|inner| inner.bind_type_info().is_null(inner))
            }
            _ => false,
        }
    }

    /// The value used for a creator parameter the document did not supply.
    ///
    /// `None` when the type has no natural absent value.
    pub fn absent_value(&self) -> Option<alloc::boxed::Box<dyn Bindable>> {
        match self {
            Self::Scalar(info) => info.default.map(|new| new()),
            Self::Optional(info) => Some((info.none)()),
            Self::Boxed(info) => info
                .inner_info()
                .absent_value()
                .and_then(|inner| info.wrap(inner).ok()),
            Self::Enum(_) => None,
            Self::Class(info) => info.constructor().map(|new| new()),
            Self::List(info) => Some((info.new)()),
            Self::Map(info) => Some((info.new)()),
            Self::Any(info) => Some((info.null)()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::info::{TypeKind, Typed};
    use crate::{Bindable, downcast};

    #[test]
    fn kinds_and_casts() {
        assert_eq!(i32::type_info().kind(), TypeKind::Scalar);
        assert_eq!(<Option<i32>>::type_info().kind(), TypeKind::Optional);
        assert_eq!(<Vec<String>>::type_info().kind(), TypeKind::List);
        assert_eq!(<Box<dyn Bindable>>::type_info().kind(), TypeKind::Any);

        let err = i32::type_info().as_class().unwrap_err();
        assert_eq!(err.expected, TypeKind::Class);
        assert_eq!(err.received, TypeKind::Scalar);
        assert!(<Vec<u8>>::type_info().is_container());

        let boxed = <Box<u16>>::type_info().as_boxed().unwrap();
        assert_eq!(boxed.inner_info().kind(), TypeKind::Scalar);
    }

    #[test]
    fn null_and_absent_values() {
        let none: Option<u8> = None;
        assert!(<Option<u8>>::type_info().is_null(&none));
        assert!(!<Option<u8>>::type_info().is_null(&Some(1_u8)));

        let any: Box<dyn Bindable> = Box::new(Option::<Box<dyn Bindable>>::None);
        assert!(<Box<dyn Bindable>>::type_info().is_null(&any));

        let zero = i64::type_info().absent_value().unwrap();
        assert_eq!(downcast::<i64>(zero).unwrap(), 0);
        let empty = <Vec<u8>>::type_info().absent_value().unwrap();
        assert!(downcast::<Vec<u8>>(empty).unwrap().is_empty());

        let boxed = <Box<u8>>::type_info().absent_value().unwrap();
        assert_eq!(*downcast::<Box<u8>>(boxed).unwrap(), 0);
        let none: Box<Option<u8>> = Box::new(None);
        assert!(<Box<Option<u8>>>::type_info().is_null(&none));
    }
}
