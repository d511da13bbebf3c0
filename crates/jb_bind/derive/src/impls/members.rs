use proc_macro2::TokenStream;
use quote::quote;
use syn::{Path, Type, Visibility};

use crate::derive_data::{AccessorAttributes, AccessorVisibility, BindStruct, StructField};

fn field_visibility(vis: &Visibility) -> &'static str {
    match vis {
        Visibility::Public(_) => "Public",
        Visibility::Restricted(_) => "Restricted",
        Visibility::Inherited => "Private",
    }
}

fn accessor_visibility(vis: AccessorVisibility) -> &'static str {
    match vis {
        AccessorVisibility::Public => "Public",
        AccessorVisibility::Restricted => "Restricted",
        AccessorVisibility::Private => "Private",
    }
}

fn with_visibility(jb_bind_path: &Path, name: &str) -> TokenStream {
    let member_visibility_ = crate::path::member_visibility_(jb_bind_path);
    let variant = syn::Ident::new(name, proc_macro2::Span::call_site());
    quote!(.with_visibility(#member_visibility_::#variant))
}

fn unresolved(field: &StructField) -> TokenStream {
    if field.unresolved {
        quote!(.unresolved())
    } else {
        TokenStream::new()
    }
}

/// ```ignore
/// _path_::MemberInfo::getter::<Self, T>("prop", "func", |this: &Self| -> Result<T, _> { .. })
/// ```
fn getter_expression(
    jb_bind_path: &Path,
    field: &StructField,
    getter: &AccessorAttributes,
) -> TokenStream {
    let member_info_ = crate::path::member_info_(jb_bind_path);
    let box_error_ = crate::path::box_error_(jb_bind_path);

    let ty: &Type = field.ty();
    let property = field.ident.to_string();
    let member = getter.member_name();
    let with = &getter.with;
    let value = if getter.fallible {
        quote!(#with(this)?)
    } else {
        quote!(#with(this))
    };
    let visibility = with_visibility(jb_bind_path, accessor_visibility(getter.visibility));
    let unresolved = unresolved(field);
    let annotations = getter.site.with_annotations_expression(jb_bind_path);

    quote! {
        #member_info_::getter::<Self, #ty>(
            #property,
            #member,
            |this: &Self| -> ::core::result::Result<#ty, #box_error_> {
                ::core::result::Result::Ok(#value)
            },
        )
        #visibility
        #unresolved
        #annotations
    }
}

fn setter_expression(
    jb_bind_path: &Path,
    field: &StructField,
    setter: &AccessorAttributes,
) -> TokenStream {
    let member_info_ = crate::path::member_info_(jb_bind_path);
    let box_error_ = crate::path::box_error_(jb_bind_path);

    let ty: &Type = field.ty();
    let property = field.ident.to_string();
    let member = setter.member_name();
    let with = &setter.with;
    let call = if setter.fallible {
        quote!(#with(this, value)?;)
    } else {
        quote!(#with(this, value);)
    };
    let visibility = with_visibility(jb_bind_path, accessor_visibility(setter.visibility));
    let unresolved = unresolved(field);
    let annotations = setter.site.with_annotations_expression(jb_bind_path);

    quote! {
        #member_info_::setter::<Self, #ty>(
            #property,
            #member,
            |this: &mut Self, value: #ty| -> ::core::result::Result<(), #box_error_> {
                #call
                ::core::result::Result::Ok(())
            },
        )
        #visibility
        #unresolved
        #annotations
    }
}

/// The field itself, then its getter and setter if declared.
pub(crate) fn field_member_expressions(jb_bind_path: &Path, field: &StructField) -> Vec<TokenStream> {
    let member_info_ = crate::path::member_info_(jb_bind_path);

    let ty = field.ty();
    let ident = field.ident;
    let name = ident.to_string();
    let visibility = with_visibility(jb_bind_path, field_visibility(field.vis()));
    let unresolved = unresolved(field);
    let annotations = field.attrs.site.with_annotations_expression(jb_bind_path);

    let mut members = vec![quote! {
        #member_info_::field::<Self, #ty>(
            #name,
            |this| &this.#ident,
            |this| &mut this.#ident,
        )
        #visibility
        #unresolved
        #annotations
    }];
    if let Some(getter) = &field.attrs.getter {
        members.push(getter_expression(jb_bind_path, field, getter));
    }
    if let Some(setter) = &field.attrs.setter {
        members.push(setter_expression(jb_bind_path, field, setter));
    }
    members
}

/// Empty without an `extends` field, otherwise:
///
/// ```ignore
/// .with_parent(_path_::ParentLink::new::<Self, P>("base", |this| &this.base, ..))
/// ```
pub(crate) fn with_parent_expression(info: &BindStruct) -> syn::Result<TokenStream> {
    let Some(parent) = info.parent()? else {
        return Ok(TokenStream::new());
    };
    let parent_link_ = crate::path::parent_link_(info.meta.jb_bind_path());
    let ty = parent.ty();
    let ident = parent.ident;
    let name = ident.to_string();

    Ok(quote! {
        .with_parent(#parent_link_::new::<Self, #ty>(
            #name,
            |this| &this.#ident,
            |this| &mut this.#ident,
        ))
    })
}
