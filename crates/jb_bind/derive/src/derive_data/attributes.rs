//! Parsing of `#[bind(...)]` attributes.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, LitBool, LitStr, Path, Token, Type};

use crate::BIND_ATTRIBUTE_NAME;

fn duplicate(meta: &ParseNestedMeta) -> syn::Error {
    let name = meta
        .path
        .get_ident()
        .map(ToString::to_string)
        .unwrap_or_default();
    meta.error(format!("duplicate `{name}` attribute"))
}

/// `flag` or `flag = true|false`.
fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        Ok(meta.value()?.parse::<LitBool>()?.value)
    } else {
        Ok(true)
    }
}

fn set_once<T>(slot: &mut Option<T>, meta: &ParseNestedMeta, value: T) -> syn::Result<()> {
    if slot.is_some() {
        return Err(duplicate(meta));
    }
    *slot = Some(value);
    Ok(())
}

/// Runs `f` on every item of every `#[bind(...)]` attribute.
pub(crate) fn for_each_bind_meta(
    attrs: &[Attribute],
    mut f: impl FnMut(ParseNestedMeta) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(BIND_ATTRIBUTE_NAME) {
            attr.parse_nested_meta(&mut f)?;
        }
    }
    Ok(())
}

fn option_tokens<T: quote::ToTokens>(value: Option<&T>) -> TokenStream {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}

// -----------------------------------------------------------------------------
// SiteAttributes

/// Customizations that may be declared on one member.
///
/// This corresponds to `jb_bind::info::SiteAnnotations`.
#[derive(Default)]
pub(crate) struct SiteAttributes {
    pub name: Option<LitStr>,
    pub nillable: Option<bool>,
    pub transient: bool,
    pub date_format: Option<LitStr>,
    pub number_format: Option<LitStr>,
    pub adapter: Option<Type>,
    pub serializer: Option<Type>,
    pub deserializer: Option<Type>,
}

impl SiteAttributes {
    /// Consumes `meta` if it is a site customization, returns `false` otherwise.
    pub fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<bool> {
        let Some(ident) = meta.path.get_ident() else {
            return Ok(false);
        };
        match ident.to_string().as_str() {
            "name" => {
                let value = meta.value()?.parse()?;
                set_once(&mut self.name, meta, value)?;
            }
            "nillable" => {
                let value = parse_flag(meta)?;
                set_once(&mut self.nillable, meta, value)?;
            }
            "transient" => self.transient = true,
            "date_format" => {
                let value = meta.value()?.parse()?;
                set_once(&mut self.date_format, meta, value)?;
            }
            "number_format" => {
                let value = meta.value()?.parse()?;
                set_once(&mut self.number_format, meta, value)?;
            }
            "adapter" => {
                let value = meta.value()?.parse()?;
                set_once(&mut self.adapter, meta, value)?;
            }
            "serializer" => {
                let value = meta.value()?.parse()?;
                set_once(&mut self.serializer, meta, value)?;
            }
            "deserializer" => {
                let value = meta.value()?.parse()?;
                set_once(&mut self.deserializer, meta, value)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.nillable.is_none()
            && !self.transient
            && self.date_format.is_none()
            && self.number_format.is_none()
            && self.adapter.is_none()
            && self.serializer.is_none()
            && self.deserializer.is_none()
    }

    /// Empty if nothing was declared, otherwise:
    ///
    /// ```ignore
    /// .with_annotations(_path_::SiteAnnotations { ... })
    /// ```
    pub fn with_annotations_expression(&self, jb_bind_path: &Path) -> TokenStream {
        if self.is_empty() {
            return TokenStream::new();
        }
        let site_annotations_ = crate::path::site_annotations_(jb_bind_path);

        let binding = |ty: Option<&Type>, name: &str| {
            let binding_ = crate::path::binding_(jb_bind_path, name);
            let value = ty.map(|ty| quote!(#binding_::of::<#ty>()));
            option_tokens(value.as_ref())
        };

        let name = option_tokens(self.name.as_ref());
        let nillable = option_tokens(self.nillable.as_ref());
        let transient = self.transient;
        let date_format = option_tokens(self.date_format.as_ref());
        let number_format = option_tokens(self.number_format.as_ref());
        let adapter = binding(self.adapter.as_ref(), "AdapterBinding");
        let serializer = binding(self.serializer.as_ref(), "SerializerBinding");
        let deserializer = binding(self.deserializer.as_ref(), "DeserializerBinding");

        quote! {
            .with_annotations(#site_annotations_ {
                name: #name,
                nillable: #nillable,
                transient: #transient,
                date_format: #date_format,
                number_format: #number_format,
                adapter: #adapter,
                serializer: #serializer,
                deserializer: #deserializer,
            })
        }
    }
}

// -----------------------------------------------------------------------------
// AccessorAttributes

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessorVisibility {
    Public,
    Restricted,
    Private,
}

/// A getter or setter attached to a field: `get = path` or
/// `get(with = path, private, fallible, name = "..")`.
pub(crate) struct AccessorAttributes {
    pub with: Path,
    pub visibility: AccessorVisibility,
    /// The accessor returns a `Result` whose error converts into `BoxError`.
    pub fallible: bool,
    pub site: SiteAttributes,
}

impl AccessorAttributes {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        if meta.input.peek(Token![=]) {
            return Ok(Self {
                with: meta.value()?.parse()?,
                visibility: AccessorVisibility::Public,
                fallible: false,
                site: SiteAttributes::default(),
            });
        }

        let mut with: Option<Path> = None;
        let mut visibility = AccessorVisibility::Public;
        let mut fallible = false;
        let mut site = SiteAttributes::default();
        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("with") {
                let value = inner.value()?.parse()?;
                return set_once(&mut with, &inner, value);
            }
            if inner.path.is_ident("private") {
                visibility = AccessorVisibility::Private;
                return Ok(());
            }
            if inner.path.is_ident("restricted") {
                visibility = AccessorVisibility::Restricted;
                return Ok(());
            }
            if inner.path.is_ident("fallible") {
                fallible = true;
                return Ok(());
            }
            if site.parse_meta(&inner)? {
                return Ok(());
            }
            Err(inner.error("unknown accessor attribute"))
        })?;

        let with = with.ok_or_else(|| meta.error("missing `with = path`"))?;
        Ok(Self {
            with,
            visibility,
            fallible,
            site,
        })
    }

    /// Name of the function, used as the member name.
    pub fn member_name(&self) -> String {
        self.with
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default()
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub site: SiteAttributes,
    /// The field is left out of the binding metadata.
    pub skip: Option<Span>,
    /// The field holds the supertype.
    pub extends: Option<Span>,
    pub getter: Option<AccessorAttributes>,
    pub setter: Option<AccessorAttributes>,
    /// Creator parameter, with an optional explicit document name.
    pub param: Option<Option<LitStr>>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_bind_meta(attrs, |meta| {
            if this.site.parse_meta(&meta)? {
                return Ok(());
            }
            if meta.path.is_ident("skip") {
                this.skip = Some(meta.path.require_ident()?.span());
                return Ok(());
            }
            if meta.path.is_ident("extends") {
                this.extends = Some(meta.path.require_ident()?.span());
                return Ok(());
            }
            if meta.path.is_ident("get") {
                let value = AccessorAttributes::parse(&meta)?;
                return set_once(&mut this.getter, &meta, value);
            }
            if meta.path.is_ident("set") {
                let value = AccessorAttributes::parse(&meta)?;
                return set_once(&mut this.setter, &meta, value);
            }
            if meta.path.is_ident("param") {
                let name: Option<LitStr> = if meta.input.peek(Token![=]) {
                    Some(meta.value()?.parse()?)
                } else {
                    None
                };
                return set_once(&mut this.param, &meta, name);
            }
            Err(meta.error("unknown field attribute"))
        })?;

        if let Some(span) = this.skip
            && (this.extends.is_some() || this.param.is_some())
        {
            return Err(syn::Error::new(
                span,
                "`skip` cannot be combined with `extends` or `param`",
            ));
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// `creator`, `creator = path` or `creator(with = path, fallible)`.
pub(crate) struct CreatorAttribute {
    /// `None` builds the struct literal from the parameters.
    pub with: Option<Path>,
    pub fallible: bool,
    pub span: Span,
}

impl CreatorAttribute {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let span = meta.path.require_ident()?.span();
        if meta.input.peek(Token![=]) {
            return Ok(Self {
                with: Some(meta.value()?.parse()?),
                fallible: false,
                span,
            });
        }
        let mut this = Self {
            with: None,
            fallible: false,
            span,
        };
        if meta.input.peek(syn::token::Paren) {
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("with") {
                    let value = inner.value()?.parse()?;
                    return set_once(&mut this.with, &inner, value);
                }
                if inner.path.is_ident("fallible") {
                    this.fallible = true;
                    return Ok(());
                }
                Err(inner.error("unknown creator attribute"))
            })?;
        }
        Ok(this)
    }
}

#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// Instances are created with `Default::default()`.
    pub default: Option<Span>,
    pub nillable: Option<bool>,
    pub order: Vec<LitStr>,
    pub date_format: Option<LitStr>,
    pub number_format: Option<LitStr>,
    pub visibility: Option<Type>,
    pub anonymous: bool,
    pub creator: Option<CreatorAttribute>,
    /// Calls producing an `InterfaceInfo`.
    pub implements: Vec<Expr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_bind_meta(attrs, |meta| {
            let Some(ident) = meta.path.get_ident() else {
                return Err(meta.error("unknown type attribute"));
            };
            match ident.to_string().as_str() {
                "default" => this.default = Some(ident.span()),
                "nillable" => {
                    let value = parse_flag(&meta)?;
                    set_once(&mut this.nillable, &meta, value)?;
                }
                "order" => meta.parse_nested_meta(|inner| {
                    let ident = inner.path.require_ident()?;
                    this.order.push(LitStr::new(&ident.to_string(), ident.span()));
                    Ok(())
                })?,
                "date_format" => {
                    let value = meta.value()?.parse()?;
                    set_once(&mut this.date_format, &meta, value)?;
                }
                "number_format" => {
                    let value = meta.value()?.parse()?;
                    set_once(&mut this.number_format, &meta, value)?;
                }
                "visibility" => {
                    let value = meta.value()?.parse()?;
                    set_once(&mut this.visibility, &meta, value)?;
                }
                "anonymous" => this.anonymous = true,
                "creator" => {
                    let value = CreatorAttribute::parse(&meta)?;
                    set_once(&mut this.creator, &meta, value)?;
                }
                "implements" => this.implements.push(meta.value()?.parse()?),
                _ => return Err(meta.error("unknown type attribute")),
            }
            Ok(())
        })?;
        Ok(this)
    }

    fn has_annotations(&self) -> bool {
        self.nillable.is_some()
            || !self.order.is_empty()
            || self.date_format.is_some()
            || self.number_format.is_some()
            || self.visibility.is_some()
    }

    /// Empty if nothing was declared, otherwise:
    ///
    /// ```ignore
    /// .with_annotations(_path_::ClassAnnotations { ... })
    /// ```
    pub fn with_annotations_expression(&self, jb_bind_path: &Path) -> TokenStream {
        if !self.has_annotations() {
            return TokenStream::new();
        }
        let class_annotations_ = crate::path::class_annotations_(jb_bind_path);
        let macro_exports_ = crate::path::macro_exports_(jb_bind_path);

        let nillable = option_tokens(self.nillable.as_ref());
        let order = &self.order;
        let date_format = option_tokens(self.date_format.as_ref());
        let number_format = option_tokens(self.number_format.as_ref());
        let visibility = self
            .visibility
            .as_ref()
            .map(|ty| quote!(#class_annotations_::policy::<#ty>()));
        let visibility = option_tokens(visibility.as_ref());

        quote! {
            .with_annotations(#class_annotations_ {
                nillable: #nillable,
                property_order: #macro_exports_::vec![#(#order),*],
                date_format: #date_format,
                number_format: #number_format,
                visibility: #visibility,
            })
        }
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub name: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_bind_meta(attrs, |meta| {
            if meta.path.is_ident("name") {
                let value = meta.value()?.parse()?;
                return set_once(&mut this.name, &meta, value);
            }
            Err(meta.error("unknown variant attribute"))
        })?;
        Ok(this)
    }
}
