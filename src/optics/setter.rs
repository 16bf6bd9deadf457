//! Setter optics: the modify half of a lens.
//!
//! A [`Setter<S, A>`] rewrites every `A` focused inside an `S`. Unlike a
//! [`Lens`](super::Lens) it has no getter, which lets it focus on many
//! values at once; the traversals in [`each`](super::each) are setters.
//!
//! # Laws
//!
//! 1. **Identity**: `setter.modify(source, |a| a) == source`
//! 2. **Composition**: `setter.modify(setter.modify(source, f), g)
//!    == setter.modify(source, |a| g(f(a)))`
//!
//! # Examples
//!
//! ```
//! use fieldlens::optics::{FunctionSetter, Setter};
//!
//! let each_doubled = FunctionSetter::new(|values: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
//!     values.into_iter().map(|value| function(value)).collect()
//! });
//!
//! assert_eq!(each_doubled.modify(vec![1, 2, 3], |n| n * 2), vec![2, 4, 6]);
//! ```

use std::fmt;
use std::marker::PhantomData;

/// Rewrites the values of type `A` focused inside an `S`.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The focused type
pub trait Setter<S, A> {
    /// Applies `function` to every focused value, returning a new source.
    ///
    /// # Arguments
    ///
    /// * `source` - The source structure (consumed)
    /// * `function` - The function to apply to each focused value
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnMut(A) -> A;

    /// Replaces every focused value with `value`.
    fn set(&self, source: S, value: A) -> S
    where
        A: Clone,
    {
        self.modify(source, |_| value.clone())
    }

    /// Focuses further into the focused values with `other`.
    ///
    /// The result is a [`Lens`](super::Lens) when both sides are lenses.
    /// Composition is associative.
    ///
    /// # Example
    ///
    /// ```
    /// use fieldlens::optics::{Lens, Setter};
    /// use fieldlens::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Address { street: String }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Person { address: Address }
    ///
    /// let street = lens!(Person, address).and_then(lens!(Address, street));
    /// let person = Person { address: Address { street: "Main St".to_string() } };
    ///
    /// assert_eq!(street.get(&person), "Main St");
    /// let moved = street.set(person, "Oak Ave".to_string());
    /// assert_eq!(moved.address.street, "Oak Ave");
    /// ```
    fn and_then<B, O>(self, other: O) -> Composed<Self, O, A>
    where
        Self: Sized,
        O: Setter<A, B>,
    {
        Composed::new(self, other)
    }
}

/// A setter built from a modify function.
pub struct FunctionSetter<S, A, M>
where
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    modifier: M,
    _marker: PhantomData<fn(S, A) -> S>,
}

impl<S, A, M> FunctionSetter<S, A, M>
where
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    /// Creates a setter from a modify function.
    #[must_use]
    pub const fn new(modifier: M) -> Self {
        Self {
            modifier,
            _marker: PhantomData,
        }
    }
}

impl<S, A, M> Setter<S, A> for FunctionSetter<S, A, M>
where
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    fn modify<F>(&self, source: S, mut function: F) -> S
    where
        F: FnMut(A) -> A,
    {
        (self.modifier)(source, &mut function)
    }
}

impl<S, A, M> Clone for FunctionSetter<S, A, M>
where
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.modifier.clone())
    }
}

impl<S, A, M> fmt::Debug for FunctionSetter<S, A, M>
where
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FunctionSetter")
            .finish_non_exhaustive()
    }
}

/// Two optics applied one after the other.
///
/// Created by [`Setter::and_then`].
pub struct Composed<O1, O2, A> {
    pub(crate) first: O1,
    pub(crate) second: O2,
    _marker: PhantomData<fn(A) -> A>,
}

impl<O1, O2, A> Composed<O1, O2, A> {
    /// Composes `first` with `second`.
    #[must_use]
    pub const fn new(first: O1, second: O2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, O1, O2> Setter<S, B> for Composed<O1, O2, A>
where
    O1: Setter<S, A>,
    O2: Setter<A, B>,
{
    fn modify<F>(&self, source: S, mut function: F) -> S
    where
        F: FnMut(B) -> B,
    {
        self.first
            .modify(source, |inner| self.second.modify(inner, &mut function))
    }
}

impl<O1: Clone, O2: Clone, A> Clone for Composed<O1, O2, A> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<O1: fmt::Debug, O2: fmt::Debug, A> fmt::Debug for Composed<O1, O2, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Composed")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn each_element() -> impl Setter<Vec<i32>, i32> + Clone {
        FunctionSetter::new(|values: Vec<i32>, function: &mut dyn FnMut(i32) -> i32| {
            values.into_iter().map(|value| function(value)).collect()
        })
    }

    #[rstest]
    fn test_setter_identity_law() {
        assert_eq!(each_element().modify(vec![1, 2], |n| n), vec![1, 2]);
    }

    #[rstest]
    fn test_setter_set_replaces_every_focus() {
        assert_eq!(each_element().set(vec![1, 2, 3], 0), vec![0, 0, 0]);
    }

    #[rstest]
    fn test_setter_modify_sees_every_focus_in_order() {
        let mut seen = Vec::new();
        let _ = each_element().modify(vec![3, 1, 2], |n| {
            seen.push(n);
            n
        });
        assert_eq!(seen, vec![3, 1, 2]);
    }

    #[rstest]
    fn test_composed_setters_reach_nested_values() {
        let each_row = FunctionSetter::new(
            |rows: Vec<Vec<i32>>, function: &mut dyn FnMut(Vec<i32>) -> Vec<i32>| {
                rows.into_iter().map(|row| function(row)).collect()
            },
        );
        let each_cell = each_row.and_then(each_element());
        assert_eq!(
            each_cell.modify(vec![vec![1, 2], vec![3]], |n| n + 10),
            vec![vec![11, 12], vec![13]]
        );
    }
}
