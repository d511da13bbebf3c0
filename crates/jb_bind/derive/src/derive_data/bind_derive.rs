use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use super::{BindEnum, BindMeta, BindStruct, EnumVariant, StructField};
use super::{TypeAttributes, VariantAttributes};

/// The parsed input of `#[derive(Bindable)]`.
pub(crate) enum BindDerive<'a> {
    Struct(BindStruct<'a>),
    UnitStruct(BindMeta<'a>),
    Enum(BindEnum<'a>),
}

impl<'a> BindDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "bindable types must be 'static, lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = BindMeta::new(&input.ident, &input.generics, attrs);

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let params = meta.type_params();
                    let fields = named
                        .named
                        .iter()
                        .filter_map(|field| field.ident.as_ref().map(|ident| (field, ident)))
                        .map(|(field, ident)| StructField::new(field, ident, &params))
                        .collect::<syn::Result<Vec<_>>>()?;
                    let this = BindStruct { meta, fields };
                    this.parent()?;
                    Ok(Self::Struct(this))
                }
                Fields::Unit => Ok(Self::UnitStruct(meta)),
                Fields::Unnamed(unnamed) => Err(syn::Error::new(
                    unnamed.span(),
                    "tuple structs are not supported, name the fields",
                )),
            },
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "enums without variants cannot be bound",
                    ));
                }
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| {
                        if !matches!(variant.fields, Fields::Unit) {
                            return Err(syn::Error::new(
                                variant.fields.span(),
                                "only unit variants can be bound",
                            ));
                        }
                        Ok(EnumVariant {
                            ident: &variant.ident,
                            attrs: VariantAttributes::parse_attrs(&variant.attrs)?,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Enum(BindEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "unions are not supported",
            )),
        }
    }
}
