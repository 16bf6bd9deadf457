//! # fieldlens
//!
//! Typed field references for immutable Rust records.
//!
//! ## Overview
//!
//! The crate is built around three pieces:
//!
//! - **Accessor tokens**: one statically typed value per record field,
//!   generated by `#[derive(Accessors)]`. A token reads its field from any
//!   instance of the record and is identified by `(owner, field name)`.
//! - **Builder**: a closed-world, persistent builder keyed by accessor tokens
//!   that assembles a record from per-field overrides.
//! - **Optics**: composable [`Lens`](optics::Lens) and
//!   [`Setter`](optics::Setter) values for nested immutable updates, tuple
//!   slots, `Either` branches, keyed maps and collection traversals.
//!
//! ## Feature Flags
//!
//! - `accessor`: Accessor tokens and the record field table
//! - `builder`: The token-keyed [`Builder`](builder::Builder)
//! - `optics`: Lens, Setter and traversal combinators
//! - `derive`: Re-exports `#[derive(Accessors)]`
//! - `control`: The [`Either`](control::Either) sum type
//! - `persistent`: Persistent list and sorted set used by the builder and optics
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use fieldlens::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq, Accessors)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! let builder = Builder::of(
//!     (Person::NAME, Person::AGE),
//!     |(name, age)| Person { name, age },
//! );
//!
//! let ann = builder
//!     .with(&Person::NAME, "Ann".to_string())
//!     .and_then(|builder| builder.build())
//!     .unwrap();
//! assert_eq!(ann, Person { name: "Ann".to_string(), age: None });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use fieldlens::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "accessor")]
    pub use crate::accessor::*;

    #[cfg(feature = "builder")]
    pub use crate::builder::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "optics")]
    pub use crate::optics::*;

    #[cfg(feature = "derive")]
    pub use crate::Accessors;
}

#[cfg(feature = "accessor")]
pub mod accessor;

#[cfg(feature = "builder")]
pub mod builder;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "optics")]
pub mod optics;

#[cfg(feature = "derive")]
pub use fieldlens_derive::Accessors;

#[doc(hidden)]
#[cfg(feature = "accessor")]
pub mod __private {
    pub use crate::accessor::reflective::{HandleSlot, locate_field, read_field};
}
