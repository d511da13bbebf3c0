use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::BindDerive;

/// Provided for `#[derive(Bindable)]`.
pub(crate) fn match_bind_impls(ast: DeriveInput) -> TokenStream {
    let bind_derive = match BindDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let bind_impls = match bind_derive {
        BindDerive::Struct(info) => super::impl_struct(&info),
        BindDerive::UnitStruct(meta) => Ok(super::impl_unit(&meta)),
        BindDerive::Enum(info) => Ok(super::impl_enum(&info)),
    };

    match bind_impls {
        Ok(bind_impls) => TokenStream::from(quote! {
            const _: () = {
                #bind_impls
            };
        }),
        Err(err) => err.into_compile_error().into(),
    }
}
