use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, Path, parse_quote};

use super::TypeAttributes;

/// What every derive needs besides the fields: the crate path, the type
/// and its type-level attributes.
pub(crate) struct BindMeta<'a> {
    jb_bind_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
}

impl core::fmt::Debug for BindMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BindMeta")
            .field("jb_bind_path", &self.jb_bind_path.to_token_stream())
            .field("ident", &self.ident)
            .finish()
    }
}

impl<'a> BindMeta<'a> {
    pub fn new(ident: &'a Ident, generics: &'a Generics, attrs: TypeAttributes) -> Self {
        Self {
            jb_bind_path: crate::path::jb_bind(),
            ident,
            generics,
            attrs,
        }
    }

    #[inline]
    pub fn jb_bind_path(&self) -> &Path {
        &self.jb_bind_path
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    /// The type has type parameters, one info is stored per instantiation.
    #[inline]
    pub fn is_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    pub fn type_params(&self) -> Vec<&'a Ident> {
        self.generics.type_params().map(|param| &param.ident).collect()
    }

    /// Split generics for `impl Typed`, each type parameter bounded by
    /// `Typed` (and the type by `Default` when instances are defaulted).
    pub fn split_generics(&self) -> (TokenStream, TokenStream, TokenStream) {
        let typed_ = crate::path::typed_(&self.jb_bind_path);
        let ident = self.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();

        let mut generics = self.generics.clone();
        let where_clause = generics.make_where_clause();
        for param in self.generics.type_params() {
            let param = &param.ident;
            where_clause.predicates.push(parse_quote!(#param: #typed_));
        }
        if self.attrs.default.is_some() && self.is_generic() {
            where_clause
                .predicates
                .push(parse_quote!(#ident #ty_generics: ::core::default::Default));
        }

        let (impl_generics, _, where_clause) = generics.split_for_impl();
        (
            impl_generics.to_token_stream(),
            ty_generics.to_token_stream(),
            quote!(#where_clause),
        )
    }
}
