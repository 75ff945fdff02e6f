//! Derive macro for `gendoc_core::Describe`.
//!
//! - structs with named fields become records, fields in declaration order
//! - single-field tuple structs describe their inner value
//! - enums whose variants are all unit variants are described as strings
//!
//! Field attributes, `#[gendoc(...)]`:
//!
//! | attribute            | effect                                        |
//! |----------------------|-----------------------------------------------|
//! | `rename = "Name"`    | public name (`rename` tag)                    |
//! | `validate = "..."`   | validation rules (`validate` tag)             |
//! | `comment = "..."`    | description (`comment` tag)                   |
//! | `skip`               | hide the field (`rename = "-"`)               |
//! | `flatten`            | splice the member's fields into the parent    |
//! | `key = "value"`      | any other tag, for custom extraction policies |
//!
//! `#[serde(rename, rename_all, skip, skip_serializing, flatten)]` are read
//! too so the documented names match the serialized sample; `#[gendoc]`
//! wins when both are present. Doc comments are kept under the `doc` tag.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod expand;

/// Derive `Describe`.
///
/// ```ignore
/// #[derive(Serialize, Describe)]
/// #[serde(rename_all = "camelCase")]
/// pub struct CreateUser {
///     #[serde(flatten)]
///     pub common: Common,
///     #[gendoc(validate = "required", comment = "Login name")]
///     pub user_name: String,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(gendoc))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
