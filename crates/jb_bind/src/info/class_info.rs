use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{BoxError, TypeMismatch};
use crate::info::member_info::field_access;
use crate::info::{FieldAccess, MemberInfo, MemberKind, NewFn, Type, TypeInfo, Typed};
use crate::visibility::VisibilityPolicy;
use crate::{Bindable, downcast};

// -----------------------------------------------------------------------------
// ParentLink

/// Link to the embedded supertype of a class.
///
/// The parent value lives in a field of the child; properties inherited
/// from the parent are reached through this field.
pub struct ParentLink {
    ty: Type,
    info: fn() -> &'static TypeInfo,
    member: &'static str,
    access: Arc<dyn FieldAccess>,
}

impl ParentLink {
    pub fn new<D: 'static, P: Typed>(
        member: &'static str,
        get: fn(&D) -> &P,
        get_mut: fn(&mut D) -> &mut P,
    ) -> Self {
        Self {
            ty: Type::of::<P>(),
            info: P::type_info,
            member,
            access: field_access(get, get_mut),
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    /// Name of the field holding the parent.
    #[inline]
    pub const fn member(&self) -> &'static str {
        self.member
    }

    #[inline]
    pub fn access(&self) -> &Arc<dyn FieldAccess> {
        &self.access
    }
}

impl fmt::Debug for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentLink")
            .field("ty", &self.ty)
            .field("member", &self.member)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// InterfaceInfo

/// Accessor methods a class inherits from a trait it implements.
///
/// Usually built by a generic function so each implementing class gets its
/// own accessors:
///
/// ```
/// use jb_bind::info::{InterfaceInfo, MemberInfo};
///
/// trait Labelled {
///     fn label(&self) -> String {
///         String::from("unnamed")
///     }
/// }
///
/// fn labelled<T: Labelled + 'static>() -> InterfaceInfo {
///     InterfaceInfo::new::<dyn Labelled>()
///         .with_member(MemberInfo::getter::<T, String>("label", "label", |t| Ok(t.label())))
/// }
/// # struct A;
/// # impl Labelled for A {}
/// # assert_eq!(labelled::<A>().members().len(), 1);
/// ```
#[derive(Debug)]
pub struct InterfaceInfo {
    ty: Type,
    members: Vec<MemberInfo>,
    extends: Vec<InterfaceInfo>,
}

impl InterfaceInfo {
    pub fn new<I: ?Sized + 'static>() -> Self {
        Self {
            ty: Type::of::<I>(),
            members: Vec::new(),
            extends: Vec::new(),
        }
    }

    /// Adds a member, declared by this interface.
    pub fn with_member(mut self, member: MemberInfo) -> Self {
        self.members.push(member.with_declaring(self.ty));
        self
    }

    /// Adds a super-interface.
    pub fn with_extends(mut self, interface: InterfaceInfo) -> Self {
        self.extends.push(interface);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    #[inline]
    pub fn extends(&self) -> &[InterfaceInfo] {
        &self.extends
    }
}

// -----------------------------------------------------------------------------
// CreatorInfo

/// One named parameter of a creator.
#[derive(Clone)]
pub struct CreatorParamInfo {
    identity: &'static str,
    name: Option<&'static str>,
    ty: Type,
    info: fn() -> &'static TypeInfo,
    date_format: Option<&'static str>,
    number_format: Option<&'static str>,
}

impl CreatorParamInfo {
    pub fn new<T: Typed>(identity: &'static str) -> Self {
        Self {
            identity,
            name: None,
            ty: Type::of::<T>(),
            info: T::type_info,
            date_format: None,
            number_format: None,
        }
    }

    /// Explicit document name; the naming strategy is skipped.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_date_format(mut self, pattern: &'static str) -> Self {
        self.date_format = Some(pattern);
        self
    }

    pub fn with_number_format(mut self, pattern: &'static str) -> Self {
        self.number_format = Some(pattern);
        self
    }

    #[inline]
    pub const fn identity(&self) -> &'static str {
        self.identity
    }

    #[inline]
    pub const fn name(&self) -> Option<&'static str> {
        self.name
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    #[inline]
    pub const fn date_format(&self) -> Option<&'static str> {
        self.date_format
    }

    #[inline]
    pub const fn number_format(&self) -> Option<&'static str> {
        self.number_format
    }
}

impl fmt::Debug for CreatorParamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorParamInfo")
            .field("identity", &self.identity)
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

/// Instantiation callback of a creator, receiving positional arguments.
pub type CreatorFn =
    Arc<dyn Fn(Vec<Box<dyn Bindable>>) -> Result<Box<dyn Bindable>, BoxError> + Send + Sync>;

/// A named-parameter instantiation contract.
#[derive(Clone)]
pub struct CreatorInfo {
    member: &'static str,
    params: Vec<CreatorParamInfo>,
    invoke: CreatorFn,
}

impl CreatorInfo {
    pub fn new(
        member: &'static str,
        params: Vec<CreatorParamInfo>,
        invoke: impl Fn(Vec<Box<dyn Bindable>>) -> Result<Box<dyn Bindable>, BoxError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            member,
            params,
            invoke: Arc::new(invoke),
        }
    }

    /// Takes the next positional argument as a `T`.
    pub fn arg<T: Typed>(
        args: &mut impl Iterator<Item = Box<dyn Bindable>>,
    ) -> Result<T, BoxError> {
        let arg = args.next().ok_or_else(|| TypeMismatch::new::<T>("nothing"))?;
        Ok(downcast::<T>(arg)?)
    }

    /// Name of the function invoked, for diagnostics.
    #[inline]
    pub const fn member(&self) -> &'static str {
        self.member
    }

    #[inline]
    pub fn params(&self) -> &[CreatorParamInfo] {
        &self.params
    }

    pub fn invoke(&self, args: Vec<Box<dyn Bindable>>) -> Result<Box<dyn Bindable>, BoxError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for CreatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorInfo")
            .field("member", &self.member)
            .field("params", &self.params)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassAnnotations

/// Builds the visibility policy declared on a class.
pub type PolicyFn = fn() -> Arc<dyn VisibilityPolicy>;

fn make_policy<P: VisibilityPolicy + Default + 'static>() -> Arc<dyn VisibilityPolicy> {
    Arc::new(P::default())
}

/// Customization declared on a class.
#[derive(Clone, Default)]
pub struct ClassAnnotations {
    pub nillable: Option<bool>,
    /// Identity names serialized first, in this order.
    pub property_order: Vec<&'static str>,
    pub date_format: Option<&'static str>,
    pub number_format: Option<&'static str>,
    pub visibility: Option<PolicyFn>,
}

impl ClassAnnotations {
    pub fn policy<P: VisibilityPolicy + Default + 'static>() -> PolicyFn {
        make_policy::<P>
    }
}

impl fmt::Debug for ClassAnnotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassAnnotations")
            .field("nillable", &self.nillable)
            .field("property_order", &self.property_order)
            .field("date_format", &self.date_format)
            .field("number_format", &self.number_format)
            .field("visibility", &self.visibility.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassInfo

/// A structured object encoded as a document object of named properties.
pub struct ClassInfo {
    ty: Type,
    module_path: &'static str,
    members: Vec<MemberInfo>,
    parent: Option<ParentLink>,
    interfaces: Vec<InterfaceInfo>,
    constructor: Option<NewFn>,
    creator: Option<CreatorInfo>,
    annotations: ClassAnnotations,
    anonymous: bool,
}

fn default_boxed<T: Typed + Default>() -> Box<dyn Bindable> {
    Box::new(T::default())
}

impl ClassInfo {
    /// `module_path` is the module declaring the type, usually `module_path!()`.
    pub fn new<T: Typed>(module_path: &'static str) -> Self {
        Self {
            ty: Type::of::<T>(),
            module_path,
            members: Vec::new(),
            parent: None,
            interfaces: Vec::new(),
            constructor: None,
            creator: None,
            annotations: ClassAnnotations::default(),
            anonymous: false,
        }
    }

    pub fn with_member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_parent(mut self, parent: ParentLink) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_interface(mut self, interface: InterfaceInfo) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_constructor(mut self, constructor: NewFn) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Instances are created with `T::default()`.
    pub fn with_default<T: Typed + Default>(self) -> Self {
        self.with_constructor(default_boxed::<T>)
    }

    pub fn with_creator(mut self, creator: CreatorInfo) -> Self {
        self.creator = Some(creator);
        self
    }

    pub fn with_annotations(mut self, annotations: ClassAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Anonymous types are never written through setters or fields.
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn module_path(&self) -> &'static str {
        self.module_path
    }

    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// The member playing `kind` for `property`, if declared.
    pub fn member(&self, kind: MemberKind, property: &str) -> Option<&MemberInfo> {
        self.members
            .iter()
            .find(|m| m.kind() == kind && m.property() == property)
    }

    #[inline]
    pub const fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn interfaces(&self) -> &[InterfaceInfo] {
        &self.interfaces
    }

    #[inline]
    pub const fn constructor(&self) -> Option<NewFn> {
        self.constructor
    }

    #[inline]
    pub const fn creator(&self) -> Option<&CreatorInfo> {
        self.creator.as_ref()
    }

    #[inline]
    pub const fn annotations(&self) -> &ClassAnnotations {
        &self.annotations
    }

    #[inline]
    pub const fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("ty", &self.ty)
            .field("module_path", &self.module_path)
            .field("members", &self.members)
            .field("parent", &self.parent)
            .field("interfaces", &self.interfaces)
            .field("creator", &self.creator)
            .field("annotations", &self.annotations)
            .field("anonymous", &self.anonymous)
            .finish()
    }
}
