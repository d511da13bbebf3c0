use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::derive_data::{BindStruct, CreatorAttribute};

/// Empty without a `creator` attribute, otherwise:
///
/// ```ignore
/// .with_creator(_path_::CreatorInfo::new(
///     "new",
///     vec![_path_::CreatorParamInfo::new::<T>("field"), ..],
///     |args| { /* take each argument, then call the creator */ },
/// ))
/// ```
///
/// The parameters are the fields marked `param`, in declaration order.
pub(crate) fn with_creator_expression(info: &BindStruct) -> syn::Result<TokenStream> {
    let Some(creator) = &info.meta.attrs().creator else {
        return Ok(TokenStream::new());
    };
    let jb_bind_path = info.meta.jb_bind_path();
    let creator_info_ = crate::path::creator_info_(jb_bind_path);
    let creator_param_info_ = crate::path::creator_param_info_(jb_bind_path);
    let macro_exports_ = crate::path::macro_exports_(jb_bind_path);
    let bindable_ = crate::path::bindable_(jb_bind_path);
    let box_error_ = crate::path::box_error_(jb_bind_path);

    let params: Vec<_> = info.params().collect();
    if params.is_empty() {
        return Err(syn::Error::new(
            creator.span,
            "a creator needs at least one field marked `param`",
        ));
    }

    let param_infos = params.iter().map(|field| {
        let ty = field.ty();
        let identity = field.ident.to_string();
        let with_name = field
            .attrs
            .param
            .as_ref()
            .and_then(Option::as_ref)
            .map(|name| quote!(.with_name(#name)));
        let with_date_format = field
            .attrs
            .site
            .date_format
            .as_ref()
            .map(|pattern| quote!(.with_date_format(#pattern)));
        let with_number_format = field
            .attrs
            .site
            .number_format
            .as_ref()
            .map(|pattern| quote!(.with_number_format(#pattern)));
        quote! {
            #creator_param_info_::new::<#ty>(#identity)
                #with_name
                #with_date_format
                #with_number_format
        }
    });

    let args: Vec<_> = (0..params.len()).map(|i| format_ident!("__arg_{}", i)).collect();
    let tys: Vec<_> = params.iter().map(|field| field.ty()).collect();
    let member = creator_member(info, creator);
    let construct = construct_expression(info, creator, &args);

    Ok(quote! {
        .with_creator(#creator_info_::new(
            #member,
            #macro_exports_::vec![#(#param_infos),*],
            |args: #macro_exports_::Vec<#macro_exports_::Box<dyn #bindable_>>|
                -> ::core::result::Result<#macro_exports_::Box<dyn #bindable_>, #box_error_>
            {
                let mut args = ::core::iter::IntoIterator::into_iter(args);
                #(
                    let #args: #tys = #creator_info_::arg::<#tys>(&mut args)?;
                )*
                let value: Self = #construct;
                ::core::result::Result::Ok(#macro_exports_::Box::new(value))
            },
        ))
    })
}

fn creator_member(info: &BindStruct, creator: &CreatorAttribute) -> String {
    match &creator.with {
        Some(path) => path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default(),
        None => info.meta.ident().to_string(),
    }
}

/// A call of the creator function, or a struct literal whose other fields
/// take their default value.
fn construct_expression(
    info: &BindStruct,
    creator: &CreatorAttribute,
    args: &[syn::Ident],
) -> TokenStream {
    if let Some(with) = &creator.with {
        return if creator.fallible {
            quote!(#with(#(#args),*)?)
        } else {
            quote!(#with(#(#args),*))
        };
    }

    let mut args = args.iter();
    let fields = info.fields.iter().map(|field| {
        let ident = field.ident;
        match field.attrs.param {
            Some(_) => {
                let arg = args.next();
                quote!(#ident: #arg)
            }
            None => quote!(#ident: ::core::default::Default::default()),
        }
    });
    quote!(Self { #(#fields),* })
}
