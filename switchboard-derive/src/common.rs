use std::collections::{HashMap, hash_map::Entry};

use darling::util::SpannedValue;
use itertools::Itertools as _;
use lazy_format::lazy_format;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::ToTokens;
use syn::{Attribute, Expr, Generics, Ident, Meta, spanned::Spanned as _};

pub struct IdentString<'a> {
    raw: &'a Ident,
    string: String,
}

impl<'a> IdentString<'a> {
    pub fn new(ident: &'a Ident) -> Self {
        Self {
            string: ident.to_string(),
            raw: ident,
        }
    }

    pub fn as_str(&self) -> &str {
        self.string.as_str()
    }
}

impl ToTokens for IdentString<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        self.raw.to_tokens(tokens);
    }
}

/// darling wants `#[param(...)]`, but a bare `#[param]` is how you mark a
/// field that needs no configuration. Path-style attributes carry nothing,
/// so they're dropped before darling sees them.
pub fn list_attributes(attrs: &[Attribute]) -> Vec<Attribute> {
    attrs
        .iter()
        .filter(|attr| !matches!(attr.meta, Meta::Path(_)))
        .cloned()
        .collect()
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

pub fn reject_generics(generics: &Generics) -> syn::Result<()> {
    match generics.params.is_empty() {
        true => Ok(()),
        false => Err(syn::Error::new(
            generics.params.span(),
            "switchboard can't derive traits for generic types",
        )),
    }
}

/// Doc comments, one trimmed line each, with surrounding blank lines removed
pub fn compute_docs(attrs: &[Attribute]) -> syn::Result<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| match attr.meta {
            Meta::NameValue(ref meta) => Some(meta),
            _ => None,
        })
        .filter(|meta| meta.path.is_ident("doc"))
        .map(|meta| match meta.value {
            Expr::Lit(ref lit) => match lit.lit {
                syn::Lit::Str(ref lit) => Ok(lit.value().trim().to_owned()),
                _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
            },
            Expr::Macro(ref expr) => Err(syn::Error::new(
                expr.span(),
                "macro #[doc] attributes aren't supported",
            )),
            _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
        })
        .try_collect()?;

    Ok(lines.join("\n").trim().to_owned())
}

/// Check that a switch name or short name would survive tokenizing: the
/// tokenizer must hand it back unchanged, with no value split off.
pub fn check_switch_name(name: SpannedValue<String>) -> syn::Result<SpannedValue<String>> {
    let message = if name.is_empty() {
        Some("switch names can't be empty")
    } else if name.starts_with(switchboard_parser::PREFIX) {
        Some("switch names don't start with '-'; this is handled automatically")
    } else if name.contains(char::is_whitespace) {
        Some("switch names shouldn't include whitespace")
    } else if name.contains([':', '=', '"']) {
        Some("switch names must not include ':', '=' or '\"', as they separate the value")
    } else if switchboard_parser::split_switch(&name) != (name.as_str(), None) {
        Some("switch names can't have a letter directly followed by a digit; in -n23 the digits are the value")
    } else {
        None
    };

    match message {
        Some(message) => Err(syn::Error::new(name.span(), message)),
        None => Ok(name),
    }
}

/// Names and short names share a namespace, since a switch key is matched
/// against both.
pub fn detect_collision<'a>(
    known_tags: &mut HashMap<&'a str, Span>,
    new_tag: Option<&'a SpannedValue<String>>,
) -> syn::Result<()> {
    match new_tag {
        Some(tag) => match known_tags.entry(tag.as_str()) {
            Entry::Occupied(entry) => {
                let mut err1 = syn::Error::new(
                    tag.span(),
                    lazy_format!(
                        "duplicate switch {prefix}{tag}",
                        prefix = switchboard_parser::PREFIX,
                        tag = tag.as_str()
                    ),
                );
                let err2 = syn::Error::new(*entry.get(), "original use here");

                err1.combine(err2);
                Err(err1)
            }
            Entry::Vacant(entry) => {
                entry.insert(tag.span());
                Ok(())
            }
        },
        None => Ok(()),
    }
}
