use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::binding::{AdapterBinding, DeserializerBinding, SerializerBinding};
use crate::error::{BoxError, TypeMismatch};
use crate::info::{Type, TypeInfo, Typed};
use crate::{Bindable, downcast};

// -----------------------------------------------------------------------------
// Kinds

/// The role a member plays for its property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Getter,
    Setter,
}

impl MemberKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Getter => "getter",
            Self::Setter => "setter",
        }
    }
}

/// Declared visibility of a member.
///
/// `Restricted` covers `pub(crate)`, `pub(super)` and `pub(in ..)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberVisibility {
    Public,
    Restricted,
    Private,
}

/// Whether the declared type of a member is fully known.
///
/// A member whose type mentions a type parameter of its declaring type is
/// `Unresolved`: its strategy is chosen per value and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeResolution {
    Concrete,
    Unresolved,
}

// -----------------------------------------------------------------------------
// SiteAnnotations

/// Customization declared on one member.
#[derive(Clone, Default)]
pub struct SiteAnnotations {
    pub name: Option<&'static str>,
    pub nillable: Option<bool>,
    pub transient: bool,
    pub date_format: Option<&'static str>,
    pub number_format: Option<&'static str>,
    pub adapter: Option<AdapterBinding>,
    pub serializer: Option<SerializerBinding>,
    pub deserializer: Option<DeserializerBinding>,
}

impl SiteAnnotations {
    /// Names of the annotations present besides `transient`.
    pub fn declared(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            ("name", self.name.is_some()),
            ("nillable", self.nillable.is_some()),
            ("date_format", self.date_format.is_some()),
            ("number_format", self.number_format.is_some()),
            ("adapter", self.adapter.is_some()),
            ("serializer", self.serializer.is_some()),
            ("deserializer", self.deserializer.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
    }
}

impl fmt::Debug for SiteAnnotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteAnnotations")
            .field("name", &self.name)
            .field("nillable", &self.nillable)
            .field("transient", &self.transient)
            .field("date_format", &self.date_format)
            .field("number_format", &self.number_format)
            .field("adapter", &self.adapter.is_some())
            .field("serializer", &self.serializer.is_some())
            .field("deserializer", &self.deserializer.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Access

/// Borrowing access to one field of a type-erased value.
pub trait FieldAccess: Send + Sync {
    fn get<'a>(&self, this: &'a dyn Bindable) -> Option<&'a dyn Bindable>;

    fn get_mut<'a>(&self, this: &'a mut dyn Bindable) -> Option<&'a mut dyn Bindable>;
}

struct FieldFns<D, T> {
    get: fn(&D) -> &T,
    get_mut: fn(&mut D) -> &mut T,
}

impl<D: 'static, T: Typed> FieldAccess for FieldFns<D, T> {
    fn get<'a>(&self, this: &'a dyn Bindable) -> Option<&'a dyn Bindable> {
        let this = this.as_any().downcast_ref::<D>()?;
        Some((self.get)(this) as &dyn Bindable)
    }

    fn get_mut<'a>(&self, this: &'a mut dyn Bindable) -> Option<&'a mut dyn Bindable> {
        let this = this.as_any_mut().downcast_mut::<D>()?;
        Some((self.get_mut)(this) as &mut dyn Bindable)
    }
}

pub(crate) fn field_access<D: 'static, T: Typed>(
    get: fn(&D) -> &T,
    get_mut: fn(&mut D) -> &mut T,
) -> Arc<dyn FieldAccess> {
    Arc::new(FieldFns { get, get_mut })
}

/// A getter producing an owned value.
pub type GetterFn = Arc<dyn Fn(&dyn Bindable) -> Result<Box<dyn Bindable>, BoxError> + Send + Sync>;

/// A setter consuming a decoded value.
pub type SetterFn =
    Arc<dyn Fn(&mut dyn Bindable, Box<dyn Bindable>) -> Result<(), BoxError> + Send + Sync>;

#[derive(Clone)]
pub enum MemberAccess {
    Field(Arc<dyn FieldAccess>),
    Getter(GetterFn),
    Setter(SetterFn),
}

// -----------------------------------------------------------------------------
// MemberInfo

/// One declaration site of a property: a field, a getter or a setter.
///
/// # Examples
///
/// ```
/// use jb_bind::info::{MemberInfo, MemberKind, MemberVisibility};
///
/// struct Person {
///     name: String,
/// }
///
/// impl Person {
///     fn name(&self) -> String {
///         self.name.clone()
///     }
/// }
///
/// let field = MemberInfo::field::<Person, String>("name", |p| &p.name, |p| &mut p.name)
///     .with_visibility(MemberVisibility::Private);
/// let getter = MemberInfo::getter::<Person, String>("name", "name", |p| Ok(p.name()));
///
/// assert_eq!(field.kind(), MemberKind::Field);
/// assert!(getter.identity().ends_with("Person::name()"));
/// ```
#[derive(Clone)]
pub struct MemberInfo {
    kind: MemberKind,
    property: &'static str,
    member: &'static str,
    declaring: Type,
    value: Type,
    value_info: fn() -> &'static TypeInfo,
    resolution: TypeResolution,
    visibility: MemberVisibility,
    annotations: SiteAnnotations,
    access: MemberAccess,
}

impl MemberInfo {
    fn new<D: ?Sized + 'static, T: Typed>(
        kind: MemberKind,
        property: &'static str,
        member: &'static str,
        access: MemberAccess,
    ) -> Self {
        Self {
            kind,
            property,
            member,
            declaring: Type::of::<D>(),
            value: Type::of::<T>(),
            value_info: T::type_info,
            resolution: TypeResolution::Concrete,
            visibility: MemberVisibility::Public,
            annotations: SiteAnnotations::default(),
            access,
        }
    }

    /// A field; the property takes the field's name.
    pub fn field<D: 'static, T: Typed>(
        name: &'static str,
        get: fn(&D) -> &T,
        get_mut: fn(&mut D) -> &mut T,
    ) -> Self {
        let access = MemberAccess::Field(field_access(get, get_mut));
        Self::new::<D, T>(MemberKind::Field, name, name, access)
    }

    pub fn getter<D: 'static, T: Typed>(
        property: &'static str,
        member: &'static str,
        get: impl Fn(&D) -> Result<T, BoxError> + Send + Sync + 'static,
    ) -> Self {
        let access = MemberAccess::Getter(Arc::new(
            move |this: &dyn Bindable| -> Result<Box<dyn Bindable>, BoxError> {
                let found = this.bind_type_info().type_path();
                let this = this
                    .as_any()
                    .downcast_ref::<D>()
                    .ok_or_else(|| TypeMismatch::new::<D>(found))?;
                let value: Box<dyn Bindable> = Box::new(get(this)?);
                Ok(value)
            },
        ));
        Self::new::<D, T>(MemberKind::Getter, property, member, access)
    }

    pub fn setter<D: 'static, T: Typed>(
        property: &'static str,
        member: &'static str,
        set: impl Fn(&mut D, T) -> Result<(), BoxError> + Send + Sync + 'static,
    ) -> Self {
        let access = MemberAccess::Setter(Arc::new(
            move |this: &mut dyn Bindable, value: Box<dyn Bindable>| -> Result<(), BoxError> {
                let found = this.bind_type_info().type_path();
                let this = this
                    .as_any_mut()
                    .downcast_mut::<D>()
                    .ok_or_else(|| TypeMismatch::new::<D>(found))?;
                set(this, downcast::<T>(value)?)
            },
        ));
        Self::new::<D, T>(MemberKind::Setter, property, member, access)
    }

    pub fn with_visibility(mut self, visibility: MemberVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_annotations(mut self, annotations: SiteAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Marks the declared type as depending on a type parameter.
    pub fn unresolved(mut self) -> Self {
        self.resolution = TypeResolution::Unresolved;
        self
    }

    pub(crate) fn with_declaring(mut self, declaring: Type) -> Self {
        self.declaring = declaring;
        self
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Identity name of the property this member belongs to.
    #[inline]
    pub const fn property(&self) -> &'static str {
        self.property
    }

    #[inline]
    pub const fn member(&self) -> &'static str {
        self.member
    }

    #[inline]
    pub const fn declaring(&self) -> &Type {
        &self.declaring
    }

    /// Declared type of the value read or written.
    #[inline]
    pub const fn value_type(&self) -> &Type {
        &self.value
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    pub(crate) fn value_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.value_info
    }

    #[inline]
    pub const fn resolution(&self) -> TypeResolution {
        self.resolution
    }

    #[inline]
    pub const fn visibility(&self) -> MemberVisibility {
        self.visibility
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == MemberVisibility::Public
    }

    #[inline]
    pub const fn annotations(&self) -> &SiteAnnotations {
        &self.annotations
    }

    #[inline]
    pub const fn access(&self) -> &MemberAccess {
        &self.access
    }

    /// `Type::member` for fields, `Type::member()` for methods.
    pub fn identity(&self) -> String {
        match self.kind {
            MemberKind::Field => format!("{}::{}", self.declaring.path(), self.member),
            MemberKind::Getter | MemberKind::Setter => {
                format!("{}::{}()", self.declaring.path(), self.member)
            }
        }
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("kind", &self.kind)
            .field("property", &self.property)
            .field("member", &self.member)
            .field("declaring", &self.declaring)
            .field("value", &self.value)
            .field("resolution", &self.resolution)
            .field("visibility", &self.visibility)
            .field("annotations", &self.annotations)
            .finish()
    }
}
