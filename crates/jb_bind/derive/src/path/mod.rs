//! Paths of the `jb_bind` items named by the generated code.
//!
//! Kept in one place so a change of the `jb_bind` layout only touches
//! this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `jb_bind` crate.
///
/// 1. For crates that depend on `jb_bind`, `::jb_bind` is returned.
/// 2. For crates that depend on `jb_core`, `::jb_core::bind` is returned.
/// 3. Otherwise `::jb_bind` is returned, which `jb_bind` itself resolves
///    through `extern crate self as jb_bind`.
///
/// Reading the manifest is not cheap, so the path is resolved once per
/// derive and passed along.
pub(crate) fn jb_bind() -> syn::Path {
    jb_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("jb_bind"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;

#[inline(always)]
pub(crate) fn macro_exports_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn bindable_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::Bindable
    }
}

#[inline(always)]
pub(crate) fn box_error_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::error::BoxError
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::impls::GenericTypeInfoCell
    }
}

/// `binding::{AdapterBinding, SerializerBinding, DeserializerBinding}`
#[inline(always)]
pub(crate) fn binding_(jb_bind_path: &syn::Path, name: &str) -> TokenStream {
    let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
    quote! {
        #jb_bind_path::binding::#ident
    }
}
