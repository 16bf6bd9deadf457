//! Error type for reflective field reads.

use thiserror::Error;

use super::MemberId;

/// A reflective field read could not be performed.
///
/// The cause is deliberately not exposed: a missing table entry and a type
/// mismatch are reported the same way, and callers are not expected to
/// recover field-specific behavior from it.
///
/// # Examples
///
/// ```rust
/// use fieldlens::accessor::{AccessError, MemberId};
///
/// let error = AccessError::new(MemberId::new("Person", "age"));
/// assert_eq!(error.to_string(), "field Person.age could not be read");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("field {member} could not be read")]
pub struct AccessError {
    member: MemberId,
}

impl AccessError {
    /// Creates an access error for the given member.
    #[must_use]
    pub const fn new(member: MemberId) -> Self {
        Self { member }
    }

    /// Returns the member whose read failed.
    #[must_use]
    pub const fn member(&self) -> MemberId {
        self.member
    }
}
