//! Accessor tokens: typed, identity-carrying references to record fields.
//!
//! An accessor token is a value that stands for "read field `F` of record
//! type `T`". Tokens are usually generated by `#[derive(Accessors)]`, one per
//! field, as associated items of the record:
//!
//! ```rust
//! use fieldlens::accessor::Accessor;
//! use fieldlens::Accessors;
//!
//! #[derive(Clone, Debug, PartialEq, Accessors)]
//! struct Point {
//!     pub x: i32,
//!     pub y: i32,
//! }
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(Point::X.get(&point), 10);
//! assert_eq!(Point::Y.member().name(), "y");
//! ```
//!
//! # Identity
//!
//! Every token carries a [`MemberId`] made of the owning type and the field
//! name. Equality and hashing of tokens use this identity only, which is what
//! the [`Builder`](crate::builder::Builder) relies on for membership checks
//! and override lookup.
//!
//! # Access Paths
//!
//! A [`FieldToken`] reads its field through one of two variants of
//! [`Access`]:
//!
//! - [`Access::Direct`]: a plain read function, infallible.
//! - [`Access::Reflective`]: a by-name read through the record's
//!   [`Record`] field table. The handle is resolved at most once and every
//!   failure is reported as the opaque [`AccessError`].

mod error;
mod predicate;
pub(crate) mod reflective;
mod token;

use std::any::Any;
use std::fmt;

pub use error::AccessError;
pub use predicate::And;
pub use predicate::Not;
pub use predicate::Or;
pub use predicate::Predicate;
pub use predicate::PredicateToken;
pub use reflective::ReflectiveAccessor;
pub use token::Access;
pub use token::DirectAccessor;
pub use token::FieldToken;
pub use token::FnAccessor;

/// Identity of a record member: the owning type and the field name.
///
/// # Examples
///
/// ```rust
/// use fieldlens::accessor::MemberId;
///
/// let member = MemberId::new("Person", "name");
/// assert_eq!(member.owner(), "Person");
/// assert_eq!(member.name(), "name");
/// assert_eq!(member.to_string(), "Person.name");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId {
    owner: &'static str,
    name: &'static str,
}

impl MemberId {
    /// Creates a member identity from an owner type name and a field name.
    #[inline]
    #[must_use]
    pub const fn new(owner: &'static str, name: &'static str) -> Self {
        Self { owner, name }
    }

    /// Returns the name of the owning type.
    #[inline]
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    /// Returns the field name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}.{}", self.owner, self.name)
    }
}

/// A typed read capability for one field of `T`.
///
/// # Type Parameters
///
/// - `T`: The record type the field belongs to
///
/// # Contract
///
/// `get` is total and side-effect free for every well-formed `T`. Two
/// accessors with the same [`MemberId`] denote the same member.
pub trait Accessor<T> {
    /// The type of the field this accessor reads.
    type Field;

    /// Returns the identity of the member.
    fn member(&self) -> MemberId;

    /// Reads the field, reporting reflective read failures.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when a reflective read cannot be performed.
    /// Direct accessors never fail.
    fn try_get(&self, source: &T) -> Result<Self::Field, AccessError>;

    /// Reads the field.
    ///
    /// # Panics
    ///
    /// Panics with the [`AccessError`] message when a reflective read fails,
    /// which only happens when a record's field table disagrees with its
    /// generated tokens.
    fn get(&self, source: &T) -> Self::Field {
        match self.try_get(source) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }

    /// Returns the value used by [`Builder::build`](crate::builder::Builder::build)
    /// when no override was given for this member.
    ///
    /// `None` means the member is required.
    fn default_value(&self) -> Option<Self::Field> {
        None
    }

    /// Returns the absent value substituted by
    /// [`Builder::build_allow_incomplete`](crate::builder::Builder::build_allow_incomplete).
    fn placeholder(&self) -> Option<Self::Field> {
        None
    }

    /// Returns the declared type of the field as written in the record, if known.
    fn declared_type(&self) -> Option<&'static str> {
        None
    }
}

impl<T, A> Accessor<T> for &A
where
    A: Accessor<T> + ?Sized,
{
    type Field = A::Field;

    fn member(&self) -> MemberId {
        (**self).member()
    }

    fn try_get(&self, source: &T) -> Result<Self::Field, AccessError> {
        (**self).try_get(source)
    }

    fn get(&self, source: &T) -> Self::Field {
        (**self).get(source)
    }

    fn default_value(&self) -> Option<Self::Field> {
        (**self).default_value()
    }

    fn placeholder(&self) -> Option<Self::Field> {
        (**self).placeholder()
    }

    fn declared_type(&self) -> Option<&'static str> {
        (**self).declared_type()
    }
}

/// A record exposing a by-index table of its fields.
///
/// This is the one visibility-bypassing read path: reflective tokens of
/// private fields read through it. `#[derive(Accessors)]` implements it.
pub trait Record: 'static {
    /// Field names in declaration order.
    const FIELDS: &'static [&'static str];

    /// Returns the field at `index` as a dynamically typed reference.
    fn field_ref(&self, index: usize) -> Option<&dyn Any>;
}
