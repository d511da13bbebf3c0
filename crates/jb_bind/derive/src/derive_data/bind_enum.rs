use syn::Ident;

use super::{BindMeta, VariantAttributes};

pub(crate) struct BindEnum<'a> {
    pub meta: BindMeta<'a>,
    pub variants: Vec<EnumVariant<'a>>,
}

/// A unit variant, bound as an enum constant.
pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    pub attrs: VariantAttributes,
}
