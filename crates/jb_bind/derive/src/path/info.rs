use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn typed_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn class_info_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::ClassInfo
    }
}

#[inline(always)]
pub(crate) fn class_annotations_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::ClassAnnotations
    }
}

#[inline(always)]
pub(crate) fn member_info_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::MemberInfo
    }
}

#[inline(always)]
pub(crate) fn member_visibility_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::MemberVisibility
    }
}

#[inline(always)]
pub(crate) fn site_annotations_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::SiteAnnotations
    }
}

#[inline(always)]
pub(crate) fn parent_link_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::ParentLink
    }
}

#[inline(always)]
pub(crate) fn creator_info_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::CreatorInfo
    }
}

#[inline(always)]
pub(crate) fn creator_param_info_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::CreatorParamInfo
    }
}

#[inline(always)]
pub(crate) fn enum_info_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::EnumInfo
    }
}

#[inline(always)]
pub(crate) fn enum_constant_(jb_bind_path: &syn::Path) -> TokenStream {
    quote! {
        #jb_bind_path::info::EnumConstant
    }
}
