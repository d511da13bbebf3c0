use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BindMeta;

/// Generate implementation code for `Typed`.
///
/// `type_info_tokens` builds the `TypeInfo`, evaluated once per type (or
/// per instantiation of a generic type).
pub(crate) fn impl_trait_typed(meta: &BindMeta, type_info_tokens: TokenStream) -> TokenStream {
    let jb_bind_path = meta.jb_bind_path();
    let typed_ = crate::path::typed_(jb_bind_path);
    let type_info_ = crate::path::type_info_(jb_bind_path);

    let inner_cell_tokens = if meta.is_generic() {
        let info_cell = crate::path::generic_type_info_cell_(jb_bind_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(jb_bind_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
