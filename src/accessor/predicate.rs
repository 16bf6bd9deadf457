//! Predicate-shaped tokens for boolean fields.
//!
//! A `bool` field gets a [`PredicateToken`] instead of a plain
//! [`FieldToken`]. It reads the same way, and it also implements
//! [`Predicate`], so it composes with `and`, `or` and `not`.
//!
//! # Examples
//!
//! ```rust
//! use fieldlens::accessor::{FieldToken, MemberId, Predicate, PredicateToken};
//!
//! struct Account { active: bool, verified: bool }
//!
//! const ACTIVE: PredicateToken<Account> = PredicateToken::new(
//!     FieldToken::direct(MemberId::new("Account", "active"), |account: &Account| account.active),
//! );
//! const VERIFIED: PredicateToken<Account> = PredicateToken::new(
//!     FieldToken::direct(MemberId::new("Account", "verified"), |account: &Account| account.verified),
//! );
//!
//! let pending = ACTIVE.and(VERIFIED.not());
//! assert!(pending.test(&Account { active: true, verified: false }));
//! assert!(!pending.test(&Account { active: true, verified: true }));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{AccessError, Accessor, FieldToken, MemberId};

/// A boolean test over `T`.
pub trait Predicate<T> {
    /// Evaluates the predicate.
    fn test(&self, source: &T) -> bool;

    /// Returns a predicate that holds when both hold.
    fn and<P>(self, other: P) -> And<Self, P>
    where
        Self: Sized,
        P: Predicate<T>,
    {
        And {
            first: self,
            second: other,
        }
    }

    /// Returns a predicate that holds when either holds.
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Predicate<T>,
    {
        Or {
            first: self,
            second: other,
        }
    }

    /// Returns the negation of this predicate.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not { inner: self }
    }
}

impl<T, G> Predicate<T> for G
where
    G: Fn(&T) -> bool,
{
    fn test(&self, source: &T) -> bool {
        self(source)
    }
}

/// Conjunction of two predicates.
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2> {
    first: P1,
    second: P2,
}

impl<T, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for And<P1, P2> {
    fn test(&self, source: &T) -> bool {
        self.first.test(source) && self.second.test(source)
    }
}

/// Disjunction of two predicates.
#[derive(Clone, Copy, Debug)]
pub struct Or<P1, P2> {
    first: P1,
    second: P2,
}

impl<T, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for Or<P1, P2> {
    fn test(&self, source: &T) -> bool {
        self.first.test(source) || self.second.test(source)
    }
}

/// Negation of a predicate.
#[derive(Clone, Copy, Debug)]
pub struct Not<P> {
    inner: P,
}

impl<T, P: Predicate<T>> Predicate<T> for Not<P> {
    fn test(&self, source: &T) -> bool {
        !self.inner.test(source)
    }
}

/// The accessor token of a `bool` field.
///
/// Same contract as [`FieldToken<T, bool>`], distinct nominal type.
pub struct PredicateToken<T> {
    token: FieldToken<T, bool>,
}

impl<T> PredicateToken<T> {
    /// Wraps a boolean field token.
    #[must_use]
    pub const fn new(token: FieldToken<T, bool>) -> Self {
        Self { token }
    }

    /// Returns the underlying field token.
    #[must_use]
    pub const fn token(&self) -> &FieldToken<T, bool> {
        &self.token
    }
}

impl<T> Accessor<T> for PredicateToken<T> {
    type Field = bool;

    fn member(&self) -> MemberId {
        self.token.member()
    }

    fn try_get(&self, source: &T) -> Result<bool, AccessError> {
        self.token.try_get(source)
    }

    fn default_value(&self) -> Option<bool> {
        self.token.default_value()
    }

    fn placeholder(&self) -> Option<bool> {
        self.token.placeholder()
    }

    fn declared_type(&self) -> Option<&'static str> {
        self.token.declared_type()
    }
}

impl<T> Predicate<T> for PredicateToken<T> {
    fn test(&self, source: &T) -> bool {
        self.token.get(source)
    }
}

impl<T> Predicate<T> for &PredicateToken<T> {
    fn test(&self, source: &T) -> bool {
        self.token.get(source)
    }
}

impl<T> Clone for PredicateToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PredicateToken<T> {}

impl<T> PartialEq for PredicateToken<T> {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl<T> Eq for PredicateToken<T> {}

impl<T> Hash for PredicateToken<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

impl<T> fmt::Debug for PredicateToken<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("PredicateToken")
            .field(&self.token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Flags {
        enabled: bool,
        visible: bool,
    }

    const ENABLED: PredicateToken<Flags> = PredicateToken::new(FieldToken::direct(
        MemberId::new("Flags", "enabled"),
        |flags: &Flags| flags.enabled,
    ));
    const VISIBLE: PredicateToken<Flags> = PredicateToken::new(FieldToken::direct(
        MemberId::new("Flags", "visible"),
        |flags: &Flags| flags.visible,
    ));

    #[rstest]
    #[case(true, true, true, true)]
    #[case(true, false, false, true)]
    #[case(false, true, false, true)]
    #[case(false, false, false, false)]
    fn test_predicate_combinators(
        #[case] enabled: bool,
        #[case] visible: bool,
        #[case] both: bool,
        #[case] either: bool,
    ) {
        let flags = Flags { enabled, visible };

        assert_eq!(ENABLED.and(VISIBLE).test(&flags), both);
        assert_eq!(ENABLED.or(VISIBLE).test(&flags), either);
        assert_eq!(ENABLED.not().test(&flags), !enabled);
    }

    #[rstest]
    fn test_predicate_token_reads_like_field_token() {
        let flags = Flags {
            enabled: true,
            visible: false,
        };
        assert!(ENABLED.get(&flags));
        assert_eq!(VISIBLE.member(), MemberId::new("Flags", "visible"));
        assert_eq!(ENABLED.token().get(&flags), ENABLED.get(&flags));
    }

    #[rstest]
    fn test_predicate_composes_with_closures() {
        let hidden = |flags: &Flags| !flags.visible;
        let flags = Flags {
            enabled: true,
            visible: false,
        };
        assert!(ENABLED.and(hidden).test(&flags));
    }
}
