//! Lens optics for focusing on a single value.
//!
//! A Lens is a [`Setter`] that can also read its focus. Reads return an
//! owned value, which lets a lens focus on something that is computed or
//! may be absent, such as the value under a map key.
//!
//! # Laws
//!
//! Every Lens must satisfy three laws:
//!
//! 1. **GetPut Law**: Getting and setting back yields the original.
//!    ```text
//!    lens.set(source.clone(), lens.get(&source)) == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value.clone())) == value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(lens.set(source, v1), v2) == lens.set(source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use fieldlens::optics::{Lens, Setter};
//! use fieldlens::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.get(&point), 10);
//!
//! let updated = x_lens.set(point, 100);
//! assert_eq!(updated.x, 100);
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::setter::{Composed, Setter};

/// A Lens focuses on a single value within a larger structure.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused value)
pub trait Lens<S, A>: Setter<S, A> {
    /// Reads the focused value.
    fn get(&self, source: &S) -> A;
}

impl<S, A, B, O1, O2> Lens<S, B> for Composed<O1, O2, A>
where
    O1: Lens<S, A>,
    O2: Lens<A, B>,
{
    fn get(&self, source: &S) -> B {
        self.second.get(&self.first.get(source))
    }
}

/// A lens built from a getter and a modify function.
///
/// # Examples
///
/// ```
/// use fieldlens::optics::{FunctionLens, Lens, Setter};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Celsius(f64);
///
/// let fahrenheit = FunctionLens::new(
///     |c: &Celsius| c.0 * 9.0 / 5.0 + 32.0,
///     |c: Celsius, function: &mut dyn FnMut(f64) -> f64| {
///         Celsius((function(c.0 * 9.0 / 5.0 + 32.0) - 32.0) * 5.0 / 9.0)
///     },
/// );
///
/// assert_eq!(fahrenheit.get(&Celsius(100.0)), 212.0);
/// assert_eq!(fahrenheit.set(Celsius(0.0), 50.0), Celsius(10.0));
/// ```
pub struct FunctionLens<S, A, G, M>
where
    G: Fn(&S) -> A,
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    getter: G,
    modifier: M,
    _marker: PhantomData<fn(S, A) -> S>,
}

impl<S, A, G, M> FunctionLens<S, A, G, M>
where
    G: Fn(&S) -> A,
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    /// Creates a new `FunctionLens` from a getter and a modify function.
    ///
    /// # Arguments
    ///
    /// * `getter` - Reads the focused value
    /// * `modifier` - Rebuilds the source with the focused value transformed
    #[must_use]
    pub const fn new(getter: G, modifier: M) -> Self {
        Self {
            getter,
            modifier,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, M> Setter<S, A> for FunctionLens<S, A, G, M>
where
    G: Fn(&S) -> A,
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    fn modify<F>(&self, source: S, mut function: F) -> S
    where
        F: FnMut(A) -> A,
    {
        (self.modifier)(source, &mut function)
    }
}

impl<S, A, G, M> Lens<S, A> for FunctionLens<S, A, G, M>
where
    G: Fn(&S) -> A,
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }
}

impl<S, A, G, M> Clone for FunctionLens<S, A, G, M>
where
    G: Fn(&S) -> A + Clone,
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.getter.clone(), self.modifier.clone())
    }
}

impl<S, A, G, M> fmt::Debug for FunctionLens<S, A, G, M>
where
    G: Fn(&S) -> A,
    M: Fn(S, &mut dyn FnMut(A) -> A) -> S,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// The lens focusing on the whole value.
pub struct Identity<S> {
    _marker: PhantomData<fn(S) -> S>,
}

impl<S> Clone for Identity<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Identity<S> {}

impl<S> fmt::Debug for Identity<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Identity")
    }
}

/// Returns the identity lens.
///
/// `identity().and_then(lens)` and `lens.and_then(identity())` behave like
/// `lens`.
#[must_use]
pub const fn identity<S>() -> Identity<S> {
    Identity {
        _marker: PhantomData,
    }
}

impl<S> Setter<S, S> for Identity<S> {
    fn modify<F>(&self, source: S, mut function: F) -> S
    where
        F: FnMut(S) -> S,
    {
        function(source)
    }
}

impl<S: Clone> Lens<S, S> for Identity<S> {
    fn get(&self, source: &S) -> S {
        source.clone()
    }
}

/// Creates a lens for a struct field.
///
/// The field type must be `Clone`; the getter returns a clone of the field.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// lens!(StructType<T>, field_name)
/// lens!(path::to::StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use fieldlens::lens;
/// use fieldlens::optics::{Lens, Setter};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = lens!(Point, x);
/// let point = Point { x: 10, y: 20 };
///
/// assert_eq!(x_lens.get(&point), 10);
/// assert_eq!(x_lens.modify(point, |x| x + 1).x, 11);
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, function| {
                source.$field = function(source.$field);
                source
            },
        )
    };
    ($struct_type:ident < $($generic:tt),+ >, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type<$($generic),+>| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type<$($generic),+>, function| {
                source.$field = function(source.$field);
                source
            },
        )
    };
    ($struct_type:path, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::core::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, function| {
                source.$field = function(source.$field);
                source
            },
        )
    };
}
