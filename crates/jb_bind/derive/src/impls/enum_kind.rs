use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BindEnum;

/// Implements `Typed` for a unit-only enum.
///
/// ```ignore
/// _path_::TypeInfo::Enum(_path_::EnumInfo::new::<Self>(
///     vec![_path_::EnumConstant::new("A").with_name("a"), ..],
///     |value| match value.downcast_ref::<Self>() { Some(Self::A) => Some(0), .. },
///     |index| match index { 0 => Some(Box::new(Self::A)), .. },
/// ))
/// ```
pub(crate) fn impl_enum(info: &BindEnum) -> TokenStream {
    let meta = &info.meta;
    let jb_bind_path = meta.jb_bind_path();

    let type_info_ = crate::path::type_info_(jb_bind_path);
    let enum_info_ = crate::path::enum_info_(jb_bind_path);
    let enum_constant_ = crate::path::enum_constant_(jb_bind_path);
    let macro_exports_ = crate::path::macro_exports_(jb_bind_path);
    let bindable_ = crate::path::bindable_(jb_bind_path);

    let constants = info.variants.iter().map(|variant| {
        let identity = variant.ident.to_string();
        let with_name = variant.attrs.name.as_ref().map(|name| quote!(.with_name(#name)));
        quote!(#enum_constant_::new(#identity) #with_name)
    });
    let idents: Vec<_> = info.variants.iter().map(|variant| variant.ident).collect();
    let indices: Vec<_> = (0..idents.len()).collect();

    let type_info_tokens = quote! {
        #type_info_::Enum(#enum_info_::new::<Self>(
            #macro_exports_::vec![#(#constants),*],
            |value: &dyn #bindable_| -> ::core::option::Option<usize> {
                match value.downcast_ref::<Self>()? {
                    #(Self::#idents => ::core::option::Option::Some(#indices),)*
                }
            },
            |index: usize| -> ::core::option::Option<#macro_exports_::Box<dyn #bindable_>> {
                match index {
                    #(#indices => ::core::option::Option::Some(#macro_exports_::Box::new(Self::#idents)),)*
                    _ => ::core::option::Option::None,
                }
            },
        ))
    };

    super::impl_trait_typed(meta, type_info_tokens)
}
