/*!
Derive macros for `switchboard`. Use them through the re-exports in the
`switchboard` crate, which the generated code refers to by name.
*/

mod common;
mod parameters;
mod value;

use proc_macro::TokenStream;

/**
Derive `switchboard::Parameters` for a struct with named fields.

- `#[command(name = "...")]` on the struct sets the command name. The default
  is the kebab-case type name.
- `#[param]` marks a field as a parameter; other fields are left alone.
  `#[param(...)]` accepts `name = "..."` (default: the kebab-case field name),
  `short = "..."`, `app_setting`, `connection_string`, `environment_variable`
  and `required`.
- Doc comments on parameter fields become their description.

Names and short names are checked for collisions at compile time.
*/
#[proc_macro_derive(Parameters, attributes(command, param))]
pub fn derive_parameters(item: TokenStream) -> TokenStream {
    match parameters::derive_parameters_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `switchboard::parameter::Value` for a unit-only enum (matched case
/// insensitively against kebab-case variant names, or `#[value(name = "...")]`)
/// or a newtype struct (delegating to the wrapped type).
#[proc_macro_derive(Value, attributes(value))]
pub fn derive_value(item: TokenStream) -> TokenStream {
    match value::derive_value_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
