//! The analyzed shape of a record the accessors are generated for.

use std::collections::{HashMap, HashSet};

use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{
    Data, DeriveInput, Fields, GenericArgument, GenericParam, Generics, Ident, PathArguments,
    Type, Visibility,
};

use crate::options::{DefaultValue, FieldOptions, RecordOptions};

/// A struct with named fields, ready for code generation.
pub struct RecordModel<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub options: RecordOptions,
    pub fields: Vec<FieldModel<'a>>,
}

/// One named, non-skipped field of a record.
pub struct FieldModel<'a> {
    pub ident: &'a Ident,
    /// The field name without a raw identifier prefix.
    pub name: String,
    pub ty: &'a Type,
    pub visibility: &'a Visibility,
    pub options: FieldOptions,
    pub is_bool: bool,
    pub is_option: bool,
    /// The declared type names at least one owner type parameter.
    pub mentions_owner_params: bool,
}

impl<'a> RecordModel<'a> {
    pub fn analyze(input: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "Accessors can only be derived for structs with named fields, not tuple structs.",
                    ));
                }
                Fields::Unit => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "Accessors cannot be derived for unit structs (structs with no fields).",
                    ));
                }
            },
            Data::Enum(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Accessors can only be derived for structs, not enums.",
                ));
            }
            Data::Union(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Accessors cannot be derived for unions.",
                ));
            }
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "Accessors cannot be derived for structs with lifetime parameters.",
            ));
        }

        let options = RecordOptions::from_attributes(&input.attrs)?;
        let owner_params: HashSet<String> = input
            .generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(param) => Some(param.ident.to_string()),
                GenericParam::Const(param) => Some(param.ident.to_string()),
                GenericParam::Lifetime(_) => None,
            })
            .collect();

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let field_options = FieldOptions::from_attributes(&field.attrs)?;
            if field_options.skip {
                continue;
            }
            let Some(ident) = field.ident.as_ref() else {
                return Err(syn::Error::new_spanned(field, "expected a named field"));
            };
            fields.push(FieldModel {
                ident,
                name: ident.unraw().to_string(),
                ty: &field.ty,
                visibility: &field.vis,
                options: field_options,
                is_bool: is_bool(&field.ty),
                is_option: option_argument(&field.ty).is_some(),
                mentions_owner_params: mentions_any(field.ty.to_token_stream(), &owner_params),
            });
        }

        let model = Self {
            ident: &input.ident,
            generics: &input.generics,
            options,
            fields,
        };
        model.check_item_names()?;
        Ok(model)
    }

    /// The names of the associated items generated for `field`.
    pub fn item_names(&self, field: &FieldModel<'_>) -> Vec<String> {
        let constant = field.constant_name();
        let mut names = Vec::with_capacity(3);
        if self.is_generic() {
            names.push(format!("{}_field", field.name));
        } else {
            names.push(constant.clone());
        }
        if self.options.member_accessor {
            names.push(format!("{constant}_MEMBER"));
        }
        if self.options.member_name_accessor {
            names.push(format!("{constant}_FIELD_NAME"));
        }
        names
    }

    /// Two fields must not generate the same item, e.g. `zipCode` and
    /// `zip_code`, or `id_member` next to `id` with `member_accessor`.
    fn check_item_names(&self) -> syn::Result<()> {
        let mut generated: HashMap<String, &str> = HashMap::new();
        for field in &self.fields {
            for item in self.item_names(field) {
                if let Some(first) = generated.get(&item) {
                    return Err(syn::Error::new_spanned(
                        field.ident,
                        format!(
                            "field `{}` generates the item `{item}`, which field `{first}` \
                             already generates",
                            field.name
                        ),
                    ));
                }
                generated.insert(item, &field.name);
            }
        }
        Ok(())
    }

    /// The owner has type or const parameters, so one token value cannot
    /// serve every instantiation.
    pub fn is_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }
}

impl FieldModel<'_> {
    /// Fields visible outside the defining module are read directly; private
    /// ones go through the record's field table.
    pub const fn is_reflective(&self) -> bool {
        matches!(self.visibility, Visibility::Inherited)
    }

    /// The token carries `None` as its default and placeholder.
    pub const fn has_optional_default(&self) -> bool {
        self.is_option && matches!(self.options.default, DefaultValue::Inferred)
    }

    /// The name of the token constant, `first_name` becomes `FIRST_NAME`.
    pub fn constant_name(&self) -> String {
        to_upper_snake_case(&self.name)
    }

    /// The declared type as source text, without token spacing.
    pub fn declared_type(&self) -> String {
        compact_type_name(&self.ty.to_token_stream().to_string())
    }
}

fn is_bool(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    if type_path.qself.is_some() {
        return false;
    }
    let segments: Vec<String> = type_path
        .path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let plain = type_path
        .path
        .segments
        .iter()
        .all(|segment| segment.arguments.is_none());

    plain
        && matches!(
            segments.iter().map(String::as_str).collect::<Vec<_>>().as_slice(),
            ["bool"] | ["std" | "core", "primitive", "bool"]
        )
}

/// Returns the type argument of a syntactic `Option<..>`.
fn option_argument(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segments: Vec<_> = type_path.path.segments.iter().collect();
    let prefix: Vec<String> = segments[..segments.len().saturating_sub(1)]
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let prefix_allowed = matches!(
        prefix.iter().map(String::as_str).collect::<Vec<_>>().as_slice(),
        [] | ["std" | "core", "option"]
    );
    let last = segments.last()?;
    if !prefix_allowed || last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &last.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(argument) if arguments.args.len() == 1 => Some(argument),
        _ => None,
    }
}

fn mentions_any(tokens: TokenStream2, names: &HashSet<String>) -> bool {
    if names.is_empty() {
        return false;
    }
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => names.contains(&ident.to_string()),
        TokenTree::Group(group) => mentions_any(group.stream(), names),
        TokenTree::Punct(_) | TokenTree::Literal(_) => false,
    })
}

fn to_upper_snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for character in name.chars() {
        if character.is_uppercase() && previous_lower {
            result.push('_');
        }
        previous_lower = character.is_lowercase() || character.is_ascii_digit();
        result.extend(character.to_uppercase());
    }
    result
}

fn compact_type_name(spaced: &str) -> String {
    const TIGHT: &[char] = &['<', '>', ':', '(', ')', '[', ']', '&', ',', ';'];

    let characters: Vec<char> = spaced.chars().collect();
    let mut result = String::with_capacity(characters.len());
    for (index, character) in characters.iter().enumerate() {
        if *character == ' ' {
            let before = index.checked_sub(1).map(|previous| characters[previous]);
            let after = characters.get(index + 1).copied();
            let drop = before.is_some_and(|c| TIGHT.contains(&c) && c != ',')
                || after.is_some_and(|c| TIGHT.contains(&c));
            if drop {
                continue;
            }
        }
        result.push(*character);
    }
    result
}
