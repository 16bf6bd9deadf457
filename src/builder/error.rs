//! Builder error type definition

use thiserror::Error;

use crate::accessor::MemberId;

/// The ways a [`Builder`](super::Builder) call can fail.
///
/// # Examples
///
/// ```
/// use fieldlens::accessor::MemberId;
/// use fieldlens::builder::BuilderError;
///
/// let error = BuilderError::Incomplete(MemberId::new("Person", "name"));
/// assert_eq!(error.to_string(), "Missing value for member Person.name");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum BuilderError {
    /// The accessor is not one of the builder's members, or its field type
    /// does not match the member's.
    #[error("{0} is not a member of this builder")]
    ForeignMember(MemberId),
    /// A required member has neither an override nor a default.
    #[error("Missing value for member {0}")]
    Incomplete(MemberId),
}

impl BuilderError {
    /// Returns the member the error is about.
    #[must_use]
    pub const fn member(&self) -> MemberId {
        match self {
            Self::ForeignMember(member) | Self::Incomplete(member) => *member,
        }
    }
}
