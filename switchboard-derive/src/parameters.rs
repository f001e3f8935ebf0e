use std::collections::HashMap;

use darling::{FromAttributes, util::SpannedValue};
use heck::ToKebabCase as _;
use itertools::Itertools as _;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Field, Fields, Type, spanned::Spanned as _};

use crate::common::{
    IdentString, check_switch_name, compute_docs, detect_collision, has_attribute,
    list_attributes, reject_generics,
};

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(command))]
struct RawCommandAttr {
    name: Option<SpannedValue<String>>,
}

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(param))]
struct RawParamAttr {
    name: Option<SpannedValue<String>>,
    short: Option<SpannedValue<String>>,
    app_setting: Option<()>,
    connection_string: Option<()>,
    environment_variable: Option<()>,
    required: Option<()>,
}

struct ParamFieldInfo<'a> {
    ident: IdentString<'a>,
    ty: &'a Type,
    name: SpannedValue<String>,
    short: Option<SpannedValue<String>>,
    app_setting: bool,
    connection_string: bool,
    environment_variable: bool,
    required: bool,
    docs: String,
}

impl<'a> ParamFieldInfo<'a> {
    /// Fields without a `#[param]` attribute aren't parameters; they're left
    /// however the command was constructed.
    fn from_field(field: &'a Field) -> syn::Result<Option<Self>> {
        if !has_attribute(&field.attrs, "param") {
            return Ok(None);
        }

        let ident = field
            .ident
            .as_ref()
            .map(IdentString::new)
            .ok_or_else(|| syn::Error::new(field.span(), "parameters must be named fields"))?;

        let parsed = RawParamAttr::from_attributes(&list_attributes(&field.attrs))?;

        let name = check_switch_name(parsed.name.unwrap_or_else(|| {
            SpannedValue::new(ident.as_str().to_kebab_case(), field.span())
        }))?;

        let short = parsed.short.map(check_switch_name).transpose()?;

        Ok(Some(Self {
            ident,
            ty: &field.ty,
            name,
            short,
            app_setting: parsed.app_setting.is_some(),
            connection_string: parsed.connection_string.is_some(),
            environment_variable: parsed.environment_variable.is_some(),
            required: parsed.required.is_some(),
            docs: compute_docs(&field.attrs)?,
        }))
    }

    fn spec_tokens(&self) -> TokenStream2 {
        let name = self.name.as_str();
        let ty = self.ty;
        let docs = self.docs.as_str();

        let short = self.short.as_ref().map(|short| {
            let short = short.as_str();
            quote! { .short(#short) }
        });

        let app_setting = self.app_setting.then(|| quote! { .allow_app_setting() });
        let connection_string = self
            .connection_string
            .then(|| quote! { .allow_connection_string() });
        let environment_variable = self
            .environment_variable
            .then(|| quote! { .allow_environment_variable() });
        let required = self.required.then(|| quote! { .required() });

        quote! {
            ::switchboard::spec::ParameterSpec::new(#name)
                .kind(<#ty as ::switchboard::parameter::Value>::KIND)
                .description(#docs)
                #short
                #app_setting
                #connection_string
                #environment_variable
                #required
        }
    }

    fn assign_arm(&self) -> TokenStream2 {
        let name = self.name.as_str();
        let ident = &self.ident;
        let ty = self.ty;

        quote! {
            #name => {
                self.#ident = <#ty as ::switchboard::parameter::Value>::from_arg::<
                    ::switchboard::errors::ParameterError
                >(value)?;
                ::core::result::Result::Ok(())
            }
        }
    }
}

fn compute_command_name(input: &DeriveInput) -> syn::Result<String> {
    let parsed = RawCommandAttr::from_attributes(&list_attributes(&input.attrs))?;

    let name = parsed.name.unwrap_or_else(|| {
        SpannedValue::new(input.ident.to_string().to_kebab_case(), input.ident.span())
    });

    if name.is_empty() {
        Err(syn::Error::new(name.span(), "command names can't be empty"))
    } else if name.starts_with(switchboard_parser::PREFIX) {
        Err(syn::Error::new(
            name.span(),
            "command names can't start with '-', or they'd be parsed as a switch",
        ))
    } else if name.contains(char::is_whitespace) {
        Err(syn::Error::new(
            name.span(),
            "command names shouldn't include whitespace",
        ))
    } else {
        Ok(name.as_str().to_owned())
    }
}

pub fn derive_parameters_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;
    reject_generics(&input.generics)?;

    let fields: Vec<&Field> = match input.data {
        syn::Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => fields.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(ref fields) => {
                return Err(syn::Error::new(
                    fields.span(),
                    "can't derive `Parameters` on a tuple struct",
                ));
            }
        },
        syn::Data::Enum(_) => {
            return Err(syn::Error::new(
                input.span(),
                "can't derive `Parameters` on an enum",
            ));
        }
        syn::Data::Union(_) => {
            return Err(syn::Error::new(
                input.span(),
                "can't derive `Parameters` on a union",
            ));
        }
    };

    let command_name = compute_command_name(&input)?;

    let params: Vec<ParamFieldInfo> = fields
        .into_iter()
        .map(ParamFieldInfo::from_field)
        .filter_map_ok(|info| info)
        .try_collect()?;

    {
        let mut tags = HashMap::new();

        for param in &params {
            detect_collision(&mut tags, Some(&param.name))?;
            detect_collision(&mut tags, param.short.as_ref())?;
        }
    }

    let ident = &input.ident;
    let specs = params.iter().map(ParamFieldInfo::spec_tokens);
    let assign_arms = params.iter().map(ParamFieldInfo::assign_arm);

    Ok(quote! {
        impl ::switchboard::command::Parameters for #ident {
            fn spec() -> &'static ::switchboard::spec::CommandSpec {
                const PARAMETERS: &[::switchboard::spec::ParameterSpec] = &[
                    #(#specs,)*
                ];

                static SPEC: ::switchboard::spec::CommandSpec =
                    ::switchboard::spec::CommandSpec::new_unchecked(#command_name, PARAMETERS);

                &SPEC
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                parameter: &str,
                value: &str,
            ) -> ::core::result::Result<(), ::switchboard::errors::ParameterError> {
                match parameter {
                    #(#assign_arms)*
                    _ => ::core::result::Result::Err(
                        ::switchboard::errors::ParameterError::unknown(parameter),
                    ),
                }
            }
        }
    })
}
