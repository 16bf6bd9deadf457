//! Implementation of the `#[derive(Accessors)]` macro.
//!
//! For a struct `Owner` this emits one inherent impl block holding a token
//! per field, plus an implementation of `fieldlens::accessor::Record`
//! exposing the field table that reflective tokens read through.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, format_ident, quote};
use syn::ext::IdentExt;
use syn::{DeriveInput, GenericParam, parse_macro_input, parse_quote};

use crate::model::{FieldModel, RecordModel};
use crate::options::DefaultValue;

/// Main implementation of the Accessors derive macro.
pub fn derive_accessors_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    TokenStream::from(generate(&input))
}

/// Generates the token impl block and the `Record` impl, or a
/// `compile_error!` for malformed input.
pub fn generate(input: &DeriveInput) -> TokenStream2 {
    match RecordModel::analyze(input) {
        Ok(model) => {
            let tokens = generate_token_impl(&model);
            let record = generate_record_impl(&model);
            quote! {
                #tokens
                #record
            }
        }
        Err(error) => error.to_compile_error(),
    }
}

fn generate_token_impl(model: &RecordModel<'_>) -> TokenStream2 {
    let owner = model.ident;
    let owner_name = owner.unraw().to_string();
    let items: Vec<TokenStream2> = model
        .fields
        .iter()
        .map(|field| generate_field_items(model, field, &owner_name))
        .collect();

    let (impl_generics, type_generics, where_clause) = model.generics.split_for_impl();

    quote! {
        #[automatically_derived]
        #[allow(dead_code, clippy::redundant_closure_for_method_calls)]
        impl #impl_generics #owner #type_generics #where_clause {
            #(#items)*
        }
    }
}

fn generate_field_items(
    model: &RecordModel<'_>,
    field: &FieldModel<'_>,
    owner_name: &str,
) -> TokenStream2 {
    let options = &model.options;
    let visibility = if options.public {
        quote!(pub)
    } else {
        field.visibility.to_token_stream()
    };
    let name = &field.name;
    let constant = field.constant_name();
    let member = quote! {
        ::fieldlens::accessor::MemberId::new(
            ::core::concat!(::core::module_path!(), "::", #owner_name),
            #name,
        )
    };

    let token_type = if field.is_bool {
        quote!(::fieldlens::accessor::PredicateToken<Self>)
    } else {
        let ty = field.ty;
        quote!(::fieldlens::accessor::FieldToken<Self, #ty>)
    };
    let body = generate_token_body(model, field, &member);
    let extra = &options.extra;
    let doc = format!("Accessor token of the `{name}` field.");

    let token = if model.is_generic() {
        let factory = format_ident!("{}_field", name);
        let bounds = generic_bounds(model, field);
        let where_clause = if bounds.is_empty() {
            quote!()
        } else {
            quote!(where #(#bounds),*)
        };
        quote! {
            #[doc = #doc]
            #(#extra)*
            #[inline]
            #[must_use]
            #visibility const fn #factory() -> #token_type #where_clause {
                #body
            }
        }
    } else {
        let constant = format_ident!("{}", constant);
        quote! {
            #[doc = #doc]
            #(#extra)*
            #visibility const #constant: #token_type = #body;
        }
    };

    let member_item = options.member_accessor.then(|| {
        let item = format_ident!("{}_MEMBER", constant);
        let doc = format!("Identity of the `{name}` member.");
        quote! {
            #[doc = #doc]
            #visibility const #item: ::fieldlens::accessor::MemberId = #member;
        }
    });
    let name_item = options.member_name_accessor.then(|| {
        let item = format_ident!("{}_FIELD_NAME", constant);
        let doc = format!("Name of the `{name}` field.");
        quote! {
            #[doc = #doc]
            #visibility const #item: &'static str = #name;
        }
    });

    quote! {
        #token
        #member_item
        #name_item
    }
}

fn generate_token_body(
    model: &RecordModel<'_>,
    field: &FieldModel<'_>,
    member: &TokenStream2,
) -> TokenStream2 {
    let ty = field.ty;
    let ident = field.ident;

    let (slot, constructor) = if field.is_reflective() {
        (
            quote! {
                fn slot() -> &'static ::fieldlens::__private::HandleSlot {
                    static SLOT: ::fieldlens::__private::HandleSlot = ::std::sync::OnceLock::new();
                    &SLOT
                }
            },
            quote! {
                ::fieldlens::accessor::FieldToken::<Self, #ty>::reflective(
                    #member,
                    slot,
                    ::fieldlens::__private::locate_field::<Self>,
                    ::fieldlens::__private::read_field::<Self, #ty>,
                )
            },
        )
    } else {
        (
            quote!(),
            quote! {
                ::fieldlens::accessor::FieldToken::<Self, #ty>::direct(
                    #member,
                    |source: &Self| ::core::clone::Clone::clone(&source.#ident),
                )
            },
        )
    };

    let mut modifiers = Vec::new();
    match &field.options.default {
        DefaultValue::Inferred if field.has_optional_default() => {
            modifiers.push(quote!(.with_default(|| ::core::option::Option::None)));
            modifiers.push(quote!(.with_placeholder(|| ::core::option::Option::None)));
        }
        DefaultValue::Trait => {
            modifiers.push(quote!(.with_default(<#ty as ::core::default::Default>::default)));
        }
        DefaultValue::Supplier(path) => {
            modifiers.push(quote!(.with_default(#path)));
        }
        DefaultValue::Inferred | DefaultValue::Disabled => {}
    }
    if model.options.member_initializer || field.is_reflective() {
        let declared = field.declared_type();
        modifiers.push(quote!(.with_declared_type(#declared)));
    }

    let token = quote!(#constructor #(#modifiers)*);
    let token = if field.is_bool {
        quote!(::fieldlens::accessor::PredicateToken::new(#token))
    } else {
        token
    };

    quote! {
        {
            #slot
            #token
        }
    }
}

/// Bounds of a generic token factory: the field is cloned on every read,
/// and the field table of a reflective read needs `'static` owner parameters.
fn generic_bounds(model: &RecordModel<'_>, field: &FieldModel<'_>) -> Vec<TokenStream2> {
    let mut bounds = Vec::new();
    if field.mentions_owner_params {
        let ty = field.ty;
        bounds.push(quote!(#ty: ::core::clone::Clone));
    }
    if field.is_reflective() {
        bounds.extend(model.generics.type_params().map(|param| {
            let ident = &param.ident;
            quote!(#ident: 'static)
        }));
    }
    bounds
}

fn generate_record_impl(model: &RecordModel<'_>) -> TokenStream2 {
    let owner = model.ident;
    let names: Vec<&str> = model.fields.iter().map(|field| field.name.as_str()).collect();
    let arms = model.fields.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        quote!(#index => ::core::option::Option::Some(&self.#ident))
    });

    let mut generics = model.generics.clone();
    let static_bounds: Vec<syn::WherePredicate> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => {
                let ident = &param.ident;
                Some(parse_quote!(#ident: 'static))
            }
            GenericParam::Lifetime(_) | GenericParam::Const(_) => None,
        })
        .collect();
    generics.make_where_clause().predicates.extend(static_bounds);
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics ::fieldlens::accessor::Record for #owner #type_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[#(#names),*];

            fn field_ref(&self, index: usize) -> ::core::option::Option<&dyn ::core::any::Any> {
                match index {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
