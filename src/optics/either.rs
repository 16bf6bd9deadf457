//! Lenses focusing on one branch of an [`Either`].
//!
//! [`left`] and [`right`] read their branch as `Some` and the other branch as
//! `None`. Modifying never changes which branch is active: in the other
//! branch the value is returned untouched, and a function returning `None`
//! leaves the current value in place.
//!
//! # Examples
//!
//! ```
//! use fieldlens::control::Either;
//! use fieldlens::optics::{left, Lens, Setter};
//!
//! let number: Either<i32, String> = Either::Left(4);
//! assert_eq!(left().get(&number), Some(4));
//! assert_eq!(left().modify(number, |n: Option<i32>| n.map(|n| n * 10)), Either::Left(40));
//!
//! let text: Either<i32, String> = Either::Right("four".to_string());
//! assert_eq!(left().get(&text), None);
//! assert_eq!(left().set(text.clone(), Some(1)), text);
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::{Lens, Setter};
use crate::control::Either;

/// The lens on the `Left` branch of an `Either<L, R>`.
pub struct LeftLens<L, R> {
    _marker: PhantomData<fn(Either<L, R>) -> Either<L, R>>,
}

/// The lens on the `Right` branch of an `Either<L, R>`.
pub struct RightLens<L, R> {
    _marker: PhantomData<fn(Either<L, R>) -> Either<L, R>>,
}

/// Returns the lens on the `Left` branch.
#[must_use]
pub const fn left<L, R>() -> LeftLens<L, R> {
    LeftLens {
        _marker: PhantomData,
    }
}

/// Returns the lens on the `Right` branch.
#[must_use]
pub const fn right<L, R>() -> RightLens<L, R> {
    RightLens {
        _marker: PhantomData,
    }
}

fn modify_branch<V: Clone, F>(current: V, mut function: F) -> V
where
    F: FnMut(Option<V>) -> Option<V>,
{
    function(Some(current.clone())).unwrap_or(current)
}

impl<L: Clone, R> Setter<Either<L, R>, Option<L>> for LeftLens<L, R> {
    fn modify<F>(&self, source: Either<L, R>, function: F) -> Either<L, R>
    where
        F: FnMut(Option<L>) -> Option<L>,
    {
        source.map_left(|value| modify_branch(value, function))
    }
}

impl<L: Clone, R> Lens<Either<L, R>, Option<L>> for LeftLens<L, R> {
    fn get(&self, source: &Either<L, R>) -> Option<L> {
        source.left_ref().cloned()
    }
}

impl<L, R: Clone> Setter<Either<L, R>, Option<R>> for RightLens<L, R> {
    fn modify<F>(&self, source: Either<L, R>, function: F) -> Either<L, R>
    where
        F: FnMut(Option<R>) -> Option<R>,
    {
        source.map_right(|value| modify_branch(value, function))
    }
}

impl<L, R: Clone> Lens<Either<L, R>, Option<R>> for RightLens<L, R> {
    fn get(&self, source: &Either<L, R>) -> Option<R> {
        source.right_ref().cloned()
    }
}

impl<L, R> Clone for LeftLens<L, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, R> Copy for LeftLens<L, R> {}

impl<L, R> Clone for RightLens<L, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, R> Copy for RightLens<L, R> {}

impl<L, R> fmt::Debug for LeftLens<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LeftLens")
    }
}

impl<L, R> fmt::Debug for RightLens<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("RightLens")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    type Value = Either<i32, String>;

    #[rstest]
    #[case(Either::Left(1), Either::Left(2))]
    #[case(Either::Right("one".to_string()), Either::Right("one".to_string()))]
    fn test_left_modify_keeps_branch(#[case] source: Value, #[case] expected: Value) {
        let incremented = left().modify(source, |value: Option<i32>| value.map(|n| n + 1));
        assert_eq!(incremented, expected);
    }

    #[rstest]
    fn test_right_modify_in_other_branch_does_not_call_function() {
        let mut calls = 0;
        let source: Value = Either::Left(1);
        let result = right().modify(source, |value: Option<String>| {
            calls += 1;
            value
        });
        assert_eq!(result, Either::Left(1));
        assert_eq!(calls, 0);
    }

    #[rstest]
    fn test_none_result_keeps_current_value() {
        let source: Value = Either::Right("kept".to_string());
        assert_eq!(
            right().set(source, None),
            Either::Right("kept".to_string())
        );
    }

    #[rstest]
    fn test_get_reads_branch() {
        let source: Value = Either::Right("r".to_string());
        assert_eq!(right().get(&source), Some("r".to_string()));
        assert_eq!(left().get(&source), None);
    }
}
