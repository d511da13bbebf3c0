// -----------------------------------------------------------------------------
// Modules

mod match_bind;

mod enum_kind;
mod struct_kind;
mod unit_kind;

mod creator;
mod members;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_bind::match_bind_impls;

use creator::with_creator_expression;
use enum_kind::impl_enum;
use members::{field_member_expressions, with_parent_expression};
use struct_kind::impl_struct;
use trait_typed::impl_trait_typed;
use unit_kind::impl_unit;
