//! Derive macro for fieldlens accessor tokens.
//!
//! This crate provides `#[derive(Accessors)]`, which generates one
//! statically typed accessor token per named field of a struct, plus the
//! `Record` field table that tokens of private fields read through.
//!
//! Use it through the `fieldlens` crate, which re-exports the macro and
//! provides the runtime types the generated code refers to.
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldlens::prelude::*;
//!
//! #[derive(Clone, Accessors)]
//! struct Person {
//!     pub name: String,
//!     age: Option<u32>,
//! }
//!
//! // Generated items:
//! // - Person::NAME: FieldToken<Person, String>       (direct read)
//! // - Person::AGE: FieldToken<Person, Option<u32>>   (reflective read, defaults to None)
//!
//! let person = Person { name: "Ann".to_string(), age: Some(41) };
//! assert_eq!(Person::NAME.get(&person), "Ann");
//! assert_eq!(Person::AGE.get(&person), Some(41));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod accessors;
mod model;
mod options;

use proc_macro::TokenStream;

/// Derive macro generating accessor tokens for the named fields of a struct.
///
/// # Generated Code
///
/// For a non-generic struct, each field `foo: T` becomes an associated
/// constant named after the field in upper snake case:
///
/// ```rust,ignore
/// impl Owner {
///     const FOO: FieldToken<Owner, T> = ...;
/// }
/// ```
///
/// A struct with type or const parameters gets a factory per field instead,
/// since one constant cannot serve every instantiation:
///
/// ```rust,ignore
/// impl<P> Owner<P> {
///     const fn foo_field() -> FieldToken<Self, T> { ... }
/// }
/// ```
///
/// Fields of type `bool` yield a `PredicateToken<Owner>`. Each token has the
/// visibility of its field. Fields declared with any `pub` visibility are
/// read directly; private fields are read through the generated
/// `fieldlens::accessor::Record` implementation.
///
/// A field whose type is written `Option<..>` defaults to `None` in the
/// builder.
///
/// # Struct Attributes
///
/// `#[accessors(...)]` accepts:
///
/// - `public`: every token is `pub`
/// - `member_accessor`: also emit `FOO_MEMBER: MemberId`
/// - `member_initializer`: attach the declared field type to every token
/// - `member_name_accessor`: also emit `FOO_FIELD_NAME: &'static str`
/// - `extra = "#[...]"`: attributes copied onto every token (repeatable)
///
/// # Field Attributes
///
/// `#[accessor(...)]` accepts:
///
/// - `skip`: no token for this field
/// - `default`: the builder default is `Default::default()`
/// - `default = path`: the builder default is `path()`
/// - `no_default`: an `Option` field is required like any other
///
/// # Errors
///
/// Enums, unions, tuple structs, unit structs, structs with lifetime
/// parameters, unknown attribute keys and unparsable `extra` lines are
/// reported as compile errors.
///
/// # Example
///
/// ```rust,ignore
/// use fieldlens::prelude::*;
///
/// #[derive(Clone, Accessors)]
/// #[accessors(public, member_name_accessor)]
/// struct Server {
///     host: String,
///     #[accessor(default = default_port)]
///     port: u16,
///     tls: bool,
/// }
///
/// fn default_port() -> u16 {
///     8080
/// }
///
/// assert_eq!(Server::PORT_FIELD_NAME, "port");
/// assert_eq!(Server::PORT.default_value(), Some(8080));
/// ```
#[proc_macro_derive(Accessors, attributes(accessors, accessor))]
pub fn derive_accessors(input: TokenStream) -> TokenStream {
    accessors::derive_accessors_impl(input)
}
