use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BindStruct;

/// Implements `Typed` for a struct with named fields, as a class.
pub(crate) fn impl_struct(info: &BindStruct) -> syn::Result<TokenStream> {
    let meta = &info.meta;
    let jb_bind_path = meta.jb_bind_path();
    let attrs = meta.attrs();

    let type_info_ = crate::path::type_info_(jb_bind_path);
    let class_info_ = crate::path::class_info_(jb_bind_path);

    let with_annotations = attrs.with_annotations_expression(jb_bind_path);
    let with_default = attrs
        .default
        .map(|_| quote!(.with_default::<Self>()))
        .unwrap_or_default();
    let with_parent = super::with_parent_expression(info)?;
    let interfaces = &attrs.implements;
    let members = info
        .members()
        .flat_map(|field| super::field_member_expressions(jb_bind_path, field));
    let with_creator = super::with_creator_expression(info)?;
    let anonymous = if attrs.anonymous {
        quote!(.anonymous())
    } else {
        TokenStream::new()
    };

    let type_info_tokens = quote! {
        #type_info_::Class(
            #class_info_::new::<Self>(::core::module_path!())
                #with_annotations
                #with_default
                #with_parent
                #(.with_interface(#interfaces))*
                #(.with_member(#members))*
                #with_creator
                #anonymous
        )
    };

    Ok(super::impl_trait_typed(meta, type_info_tokens))
}
