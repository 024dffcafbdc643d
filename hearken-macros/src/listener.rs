//! Listener-related macros.
//!
//! This module contains:
//! - `#[listener]` - Attribute macro for creating Listener implementations from functions

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, FnArg, Ident, ItemFn, LitStr, ReturnType, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments for the `#[listener]` macro.
pub(crate) struct ListenerArgs {
    pub name: Option<String>,
}

impl Parse for ListenerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ListenerArgs { name })
    }
}

/// Implementation of the `#[listener]` attribute macro.
pub fn listener_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ListenerArgs);
    let input = parse_macro_input!(item as ItemFn);

    generate_listener(&args, &input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Attributes that describe an item rather than a function body. These move
/// to the generated struct; everything else (`#[inline]`, ...) stays on
/// `on_event`.
fn is_item_attr(attr: &Attribute) -> bool {
    ["doc", "cfg", "cfg_attr", "allow", "warn", "deny", "expect", "deprecated"]
        .iter()
        .any(|name| attr.path().is_ident(name))
}

pub(crate) fn generate_listener(
    args: &ListenerArgs,
    input: &ItemFn,
) -> syn::Result<proc_macro2::TokenStream> {
    let sig = &input.sig;
    let fn_name = &sig.ident;
    let fn_vis = &input.vis;
    let fn_block = &input.block;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "Listener functions run synchronously and cannot be async",
        ));
    }

    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "Listener functions cannot be generic; the event type must be concrete",
        ));
    }

    if let ReturnType::Type(_, ty) = &sig.output {
        return Err(syn::Error::new_spanned(
            ty,
            "Listener functions must not return a value",
        ));
    }

    if sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            sig,
            "Listener function must take exactly one argument: fn(event: &mut Event)",
        ));
    }

    let (event_pat, event_type) = match sig.inputs.first() {
        Some(FnArg::Typed(pat_type)) => match &*pat_type.ty {
            Type::Reference(type_ref) if type_ref.mutability.is_some() => {
                (&pat_type.pat, &type_ref.elem)
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Listener event argument must be a mutable reference (&mut Event)",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.inputs,
                "Listener function must take an event argument: fn(event: &mut Event)",
            ));
        }
    };

    let struct_name = match &args.name {
        Some(custom_name) => syn::parse_str::<Ident>(custom_name)
            .map(|ident| Ident::new(&ident.to_string(), fn_name.span()))
            .map_err(|_| {
                syn::Error::new_spanned(
                    fn_name,
                    format!("`{}` is not a valid listener name", custom_name),
                )
            })?,
        None => fn_name.clone(),
    };

    let (item_attrs, fn_attrs): (Vec<&Attribute>, Vec<&Attribute>) =
        input.attrs.iter().partition(|attr| is_item_attr(attr));
    let default_doc = if item_attrs.iter().any(|attr| attr.path().is_ident("doc")) {
        quote! {}
    } else {
        quote! {
            #[doc = concat!("Listener generated by `#[hearken::listener]` on `", stringify!(#fn_name), "`")]
        }
    };

    Ok(quote! {
        #(#item_attrs)*
        #default_doc
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #fn_vis struct #struct_name;

        impl ::hearken::Listener<#event_type> for #struct_name {
            #(#fn_attrs)*
            fn on_event(&self, #event_pat: &mut #event_type) {
                #fn_block
            }
        }
    })
}
