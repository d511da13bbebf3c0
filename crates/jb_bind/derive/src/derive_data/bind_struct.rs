use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Field, Ident, Type, Visibility};

use super::{BindMeta, FieldAttributes};

// -----------------------------------------------------------------------------
// Define

pub(crate) struct BindStruct<'a> {
    pub meta: BindMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

/// A named field with its parsed attributes.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub ident: &'a Ident,
    pub attrs: FieldAttributes,
    /// The declared type mentions a type parameter.
    pub unresolved: bool,
}

// -----------------------------------------------------------------------------
// Implementation

fn mentions(tokens: TokenStream, params: &[&Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => params.iter().any(|param| **param == ident),
        TokenTree::Group(group) => mentions(group.stream(), params),
        _ => false,
    })
}

impl<'a> StructField<'a> {
    pub fn new(data: &'a Field, ident: &'a Ident, params: &[&Ident]) -> syn::Result<Self> {
        Ok(Self {
            data,
            ident,
            attrs: FieldAttributes::parse_attrs(&data.attrs)?,
            unresolved: mentions(data.ty.to_token_stream(), params),
        })
    }

    #[inline]
    pub fn ty(&self) -> &'a Type {
        &self.data.ty
    }

    #[inline]
    pub fn vis(&self) -> &'a Visibility {
        &self.data.vis
    }

    /// The field is bound as a property (or through its accessors).
    #[inline]
    pub fn is_member(&self) -> bool {
        self.attrs.skip.is_none() && self.attrs.extends.is_none()
    }
}

impl<'a> BindStruct<'a> {
    /// Fields bound as properties.
    pub fn members(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_member())
    }

    /// Fields passed to the creator, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.param.is_some())
    }

    pub fn parent(&self) -> syn::Result<Option<&StructField<'a>>> {
        let mut parents = self.fields.iter().filter(|f| f.attrs.extends.is_some());
        let parent = parents.next();
        if let Some(extra) = parents.next()
            && let Some(span) = extra.attrs.extends
        {
            return Err(syn::Error::new(span, "a type extends at most one parent"));
        }
        Ok(parent)
    }
}
