//! Parsing of the `#[accessors(...)]` and `#[accessor(...)]` attributes.

use syn::{Attribute, LitStr, Path, Token};

/// Struct-level configuration from `#[accessors(...)]`.
#[derive(Debug, Default)]
pub struct RecordOptions {
    /// Every token is `pub`, whatever the field visibility.
    pub public: bool,
    /// Emit a `<FIELD>_MEMBER` constant per field.
    pub member_accessor: bool,
    /// Attach the declared field type to every token.
    pub member_initializer: bool,
    /// Emit a `<FIELD>_FIELD_NAME` constant per field.
    pub member_name_accessor: bool,
    /// Attributes copied onto every token item.
    pub extra: Vec<Attribute>,
}

impl RecordOptions {
    pub fn from_attributes(attributes: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();

        for attribute in attributes
            .iter()
            .filter(|attribute| attribute.path().is_ident("accessors"))
        {
            attribute.parse_nested_meta(|meta| {
                if meta.path.is_ident("public") {
                    options.public = true;
                } else if meta.path.is_ident("member_accessor") {
                    options.member_accessor = true;
                } else if meta.path.is_ident("member_initializer") {
                    options.member_initializer = true;
                } else if meta.path.is_ident("member_name_accessor") {
                    options.member_name_accessor = true;
                } else if meta.path.is_ident("extra") {
                    let line: LitStr = meta.value()?.parse()?;
                    let parsed = line.parse_with(Attribute::parse_outer).map_err(|error| {
                        syn::Error::new(line.span(), format!("unparsable extra line: {error}"))
                    })?;
                    options.extra.extend(parsed);
                } else {
                    return Err(meta.error(
                        "unknown accessors option, expected one of `public`, `member_accessor`, \
                         `member_initializer`, `member_name_accessor`, `extra`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(options)
    }
}

/// Where the builder default of a field comes from.
#[derive(Debug, Default)]
pub enum DefaultValue {
    /// `None` for `Option` fields, no default otherwise.
    #[default]
    Inferred,
    /// `#[accessor(default)]`: `Default::default`.
    Trait,
    /// `#[accessor(default = path)]`: a supplier function.
    Supplier(Path),
    /// `#[accessor(no_default)]`.
    Disabled,
}

/// Field-level configuration from `#[accessor(...)]`.
#[derive(Debug, Default)]
pub struct FieldOptions {
    pub skip: bool,
    pub default: DefaultValue,
}

impl FieldOptions {
    pub fn from_attributes(attributes: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        let mut default_seen = false;

        for attribute in attributes
            .iter()
            .filter(|attribute| attribute.path().is_ident("accessor"))
        {
            attribute.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                    return Ok(());
                }

                let default = if meta.path.is_ident("default") {
                    if meta.input.peek(Token![=]) {
                        DefaultValue::Supplier(meta.value()?.parse()?)
                    } else {
                        DefaultValue::Trait
                    }
                } else if meta.path.is_ident("no_default") {
                    DefaultValue::Disabled
                } else {
                    return Err(meta.error(
                        "unknown accessor option, expected one of `skip`, `default`, `no_default`",
                    ));
                };

                if default_seen {
                    return Err(meta.error("conflicting default options"));
                }
                default_seen = true;
                options.default = default;
                Ok(())
            })?;
        }

        Ok(options)
    }
}
