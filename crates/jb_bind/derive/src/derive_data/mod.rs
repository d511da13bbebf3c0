//! Provide some tools for parsing the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bind_derive;
mod bind_enum;
mod bind_meta;
mod bind_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{AccessorAttributes, AccessorVisibility, CreatorAttribute};
pub(crate) use attributes::{FieldAttributes, TypeAttributes, VariantAttributes};

pub(crate) use bind_derive::BindDerive;
pub(crate) use bind_enum::{BindEnum, EnumVariant};
pub(crate) use bind_meta::BindMeta;
pub(crate) use bind_struct::{BindStruct, StructField};
