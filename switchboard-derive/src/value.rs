use darling::{FromAttributes, util::SpannedValue};
use heck::ToKebabCase as _;
use itertools::Itertools as _;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, Ident, Token, Variant, punctuated::Punctuated,
    spanned::Spanned as _,
};

use crate::common::{detect_collision, list_attributes, reject_generics};

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(value))]
struct RawVariantAttr {
    name: Option<SpannedValue<String>>,
}

fn compute_variant_name(variant: &Variant) -> syn::Result<SpannedValue<String>> {
    let parsed = RawVariantAttr::from_attributes(&list_attributes(&variant.attrs))?;

    let name = parsed.name.unwrap_or_else(|| {
        SpannedValue::new(variant.ident.to_string().to_kebab_case(), variant.ident.span())
    });

    match name.trim().is_empty() {
        true => Err(syn::Error::new(name.span(), "value names can't be empty")),
        false => Ok(name),
    }
}

fn derive_value_enum(
    ident: &Ident,
    variants: &Punctuated<Variant, Token![,]>,
    span: Span,
) -> syn::Result<TokenStream2> {
    if variants.is_empty() {
        return Err(syn::Error::new(
            span,
            "can't derive `Value` on an enum with no variants",
        ));
    }

    let analyzed: Vec<(SpannedValue<String>, &Ident)> = variants
        .iter()
        .map(|variant| match variant.fields {
            Fields::Unit => Ok((compute_variant_name(variant)?, &variant.ident)),
            _ => Err(syn::Error::new(
                variant.span(),
                "`Value` enums can only have unit variants",
            )),
        })
        .try_collect()?;

    // Matching is case insensitive, so names that differ only by case collide
    {
        let lowered: Vec<SpannedValue<String>> = analyzed
            .iter()
            .map(|(name, _)| SpannedValue::new(name.to_lowercase(), name.span()))
            .collect();
        let mut known = std::collections::HashMap::new();

        for name in &lowered {
            detect_collision(&mut known, Some(name))?;
        }
    }

    let arms = analyzed.iter().map(|(name, variant)| {
        let name = name.as_str();
        quote! {
            if argument.eq_ignore_ascii_case(#name) {
                return ::core::result::Result::Ok(Self::#variant);
            }
        }
    });

    let names = analyzed.iter().map(|(name, _)| name.as_str());

    Ok(quote! {
        impl ::switchboard::parameter::Value for #ident {
            fn from_arg<E: ::switchboard::parameter::Error>(
                argument: &str,
            ) -> ::core::result::Result<Self, E> {
                #(#arms)*

                ::core::result::Result::Err(
                    ::switchboard::parameter::Error::should_be(argument, &[ #(#names,)* ])
                )
            }
        }
    })
}

fn derive_value_newtype(ident: &Ident, field: &Field) -> TokenStream2 {
    let ty = &field.ty;

    let struct_body = match field.ident {
        Some(ref field) => quote! { { #field: value } },
        None => quote! { ( value ) },
    };

    quote! {
        impl ::switchboard::parameter::Value for #ident {
            const KIND: ::switchboard::parameter::ValueKind =
                <#ty as ::switchboard::parameter::Value>::KIND;

            fn from_arg<E: ::switchboard::parameter::Error>(
                argument: &str,
            ) -> ::core::result::Result<Self, E> {
                match <#ty as ::switchboard::parameter::Value>::from_arg(argument) {
                    ::core::result::Result::Ok(value) => ::core::result::Result::Ok(
                        Self #struct_body
                    ),
                    ::core::result::Result::Err(err) => ::core::result::Result::Err(err),
                }
            }
        }
    }
}

pub fn derive_value_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;
    reject_generics(&input.generics)?;

    match input.data {
        Data::Struct(ref data) => {
            let field = data.fields.iter().exactly_one().map_err(|_| {
                syn::Error::new(
                    input.span(),
                    "can only derive `Value` on structs with exactly one field",
                )
            })?;

            Ok(derive_value_newtype(&input.ident, field))
        }
        Data::Enum(ref data) => derive_value_enum(&input.ident, &data.variants, input.span()),
        Data::Union(_) => Err(syn::Error::new(
            input.span(),
            "can't derive `Value` on a union",
        )),
    }
}
