use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BindMeta;

/// `struct T;` is a class without properties, created from the unit value.
pub(crate) fn impl_unit(meta: &BindMeta) -> TokenStream {
    let jb_bind_path = meta.jb_bind_path();
    let type_info_ = crate::path::type_info_(jb_bind_path);
    let class_info_ = crate::path::class_info_(jb_bind_path);
    let macro_exports_ = crate::path::macro_exports_(jb_bind_path);
    let bindable_ = crate::path::bindable_(jb_bind_path);

    let with_annotations = meta.attrs().with_annotations_expression(jb_bind_path);
    let interfaces = &meta.attrs().implements;

    let type_info_tokens = quote! {
        #type_info_::Class(
            #class_info_::new::<Self>(::core::module_path!())
                #with_annotations
                .with_constructor(|| -> #macro_exports_::Box<dyn #bindable_> {
                    #macro_exports_::Box::new(Self)
                })
                #(.with_interface(#interfaces))*
        )
    };

    super::impl_trait_typed(meta, type_info_tokens)
}
