//! Traversal combinators for element-wise updates of collections.
//!
//! Each combinator takes an outer [`Setter`] focusing on a collection and an
//! element-level [`Setter`], and returns a [`Setter`] applying the element
//! setter to every element. The whole collection is rebuilt eagerly on every
//! call, in iteration order.
//!
//! | combinator          | collection                                        |
//! |---------------------|---------------------------------------------------|
//! | [`each_collection`] | any `C: IntoIterator + FromIterator`              |
//! | [`each_list`]       | `Vec<E>`                                          |
//! | [`each_set`]        | `HashSet<E>`                                      |
//! | [`each_sorted_set`] | [`SortedSet<E>`], keeping its comparator          |
//! | [`each_iterable`]   | collections iterated by reference, like [`PersistentList<E>`](crate::persistent::PersistentList) |
//!
//! # Examples
//!
//! ```
//! use fieldlens::lens;
//! use fieldlens::optics::{each_list, identity, Setter};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Order { quantities: Vec<u32> }
//!
//! let every_quantity = each_list(lens!(Order, quantities), identity::<u32>());
//! let doubled = every_quantity.modify(Order { quantities: vec![1, 2, 3] }, |q| q * 2);
//! assert_eq!(doubled.quantities, vec![2, 4, 6]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Setter;
use crate::persistent::SortedSet;

type Rebuild<C, E> = fn(C, &mut dyn FnMut(E) -> E) -> C;

/// A setter applying an element setter to every element of a collection.
///
/// Created by the `each_*` functions of this module.
pub struct Each<O, I, C, E> {
    outer: O,
    inner: I,
    rebuild: Rebuild<C, E>,
    _marker: PhantomData<fn(C) -> E>,
}

impl<O, I, C, E> Each<O, I, C, E> {
    const fn new(outer: O, inner: I, rebuild: Rebuild<C, E>) -> Self {
        Self {
            outer,
            inner,
            rebuild,
            _marker: PhantomData,
        }
    }
}

impl<D, S, O, I, C, E> Setter<D, S> for Each<O, I, C, E>
where
    O: Setter<D, C>,
    I: Setter<E, S>,
{
    fn modify<F>(&self, source: D, mut function: F) -> D
    where
        F: FnMut(S) -> S,
    {
        self.outer.modify(source, |collection| {
            (self.rebuild)(collection, &mut |element| {
                self.inner.modify(element, &mut function)
            })
        })
    }
}

impl<O: Clone, I: Clone, C, E> Clone for Each<O, I, C, E> {
    fn clone(&self) -> Self {
        Self::new(self.outer.clone(), self.inner.clone(), self.rebuild)
    }
}

impl<O: fmt::Debug, I: fmt::Debug, C, E> fmt::Debug for Each<O, I, C, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Each")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

fn rebuild_owned<C, E>(collection: C, function: &mut dyn FnMut(E) -> E) -> C
where
    C: IntoIterator<Item = E> + FromIterator<E>,
{
    collection.into_iter().map(function).collect()
}

fn rebuild_sorted<E: Clone>(set: SortedSet<E>, function: &mut dyn FnMut(E) -> E) -> SortedSet<E> {
    SortedSet::from_iter_with(
        Arc::clone(set.comparator()),
        set.iter().cloned().map(function),
    )
}

fn rebuild_borrowed<C, E>(collection: C, function: &mut dyn FnMut(E) -> E) -> C
where
    for<'a> &'a C: IntoIterator<Item = &'a E>,
    C: FromIterator<E>,
    E: Clone,
{
    (&collection).into_iter().cloned().map(function).collect()
}

/// Traverses any collection that can be consumed and collected back.
#[must_use]
pub fn each_collection<D, C, E, S, O, I>(outer: O, inner: I) -> Each<O, I, C, E>
where
    O: Setter<D, C>,
    I: Setter<E, S>,
    C: IntoIterator<Item = E> + FromIterator<E>,
{
    Each::new(outer, inner, rebuild_owned::<C, E>)
}

/// Traverses the elements of a `Vec`, keeping their order.
#[must_use]
pub fn each_list<D, E, S, O, I>(outer: O, inner: I) -> Each<O, I, Vec<E>, E>
where
    O: Setter<D, Vec<E>>,
    I: Setter<E, S>,
{
    Each::new(outer, inner, rebuild_owned::<Vec<E>, E>)
}

/// Traverses the elements of a `HashSet`.
///
/// Elements mapped to equal values collapse into one.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use fieldlens::optics::{each_set, identity, Setter};
///
/// let every_tag = each_set(identity::<HashSet<String>>(), identity::<String>());
/// let tags = HashSet::from(["Rust".to_string(), "rust".to_string()]);
///
/// let lowered = every_tag.modify(tags, |tag| tag.to_lowercase());
/// assert_eq!(lowered, HashSet::from(["rust".to_string()]));
/// ```
#[must_use]
pub fn each_set<D, E, S, O, I>(outer: O, inner: I) -> Each<O, I, HashSet<E>, E>
where
    O: Setter<D, HashSet<E>>,
    I: Setter<E, S>,
    E: Eq + Hash,
{
    Each::new(outer, inner, rebuild_owned::<HashSet<E>, E>)
}

/// Traverses the elements of a [`SortedSet`].
///
/// The rebuilt set keeps the comparator of the original one.
#[must_use]
pub fn each_sorted_set<D, E, S, O, I>(outer: O, inner: I) -> Each<O, I, SortedSet<E>, E>
where
    O: Setter<D, SortedSet<E>>,
    I: Setter<E, S>,
    E: Clone,
{
    Each::new(outer, inner, rebuild_sorted::<E>)
}

/// Traverses a collection iterated by reference, cloning each element.
///
/// # Examples
///
/// ```
/// use fieldlens::optics::{each_iterable, identity, Setter};
/// use fieldlens::persistent::PersistentList;
///
/// let every_name = each_iterable(identity::<PersistentList<String>>(), identity::<String>());
/// let names: PersistentList<String> = ["ann", "bo"].map(String::from).into_iter().collect();
///
/// let shouted = every_name.modify(names.clone(), |name| name.to_uppercase());
/// assert_eq!(shouted.iter().collect::<Vec<_>>(), ["ANN", "BO"]);
/// assert_eq!(names.head().map(String::as_str), Some("ann"));
/// ```
#[must_use]
pub fn each_iterable<D, C, E, S, O, I>(outer: O, inner: I) -> Each<O, I, C, E>
where
    O: Setter<D, C>,
    I: Setter<E, S>,
    for<'a> &'a C: IntoIterator<Item = &'a E>,
    C: FromIterator<E>,
    E: Clone,
{
    Each::new(outer, inner, rebuild_borrowed::<C, E>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{_2, identity};
    use rstest::rstest;
    use std::collections::BTreeSet;

    #[rstest]
    fn test_each_list_applies_to_every_element() {
        let every = each_list(identity::<Vec<i32>>(), identity::<i32>());
        assert_eq!(every.modify(vec![1, 2, 3], |n| n + 1), vec![2, 3, 4]);
    }

    #[rstest]
    fn test_each_list_identity_law() {
        let every = each_list(identity::<Vec<i32>>(), identity::<i32>());
        assert_eq!(every.modify(vec![4, 5], |n| n), vec![4, 5]);
    }

    #[rstest]
    fn test_each_collection_rebuilds_same_kind() {
        let every = each_collection(identity::<BTreeSet<i32>>(), identity::<i32>());
        let negated = every.modify(BTreeSet::from([1, 2, 3]), |n| -n);
        assert_eq!(negated, BTreeSet::from([-3, -2, -1]));
    }

    #[rstest]
    fn test_each_with_element_lens() {
        let every_count = each_list(identity::<Vec<(String, u32)>>(), _2::<(String, u32)>());
        let rows = vec![("a".to_string(), 1), ("b".to_string(), 2)];
        assert_eq!(
            every_count.modify(rows, |count| count * 10),
            vec![("a".to_string(), 10), ("b".to_string(), 20)]
        );
    }

    #[rstest]
    fn test_each_sorted_set_keeps_comparator() {
        let descending = SortedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        let set = descending.insert(1).insert(2).insert(3);
        let every = each_sorted_set(identity::<SortedSet<i32>>(), identity::<i32>());

        let shifted = every.modify(set.clone(), |n| n + 10);
        assert!(shifted.same_ordering(&set));
        assert_eq!(shifted.len(), set.len());
        assert_eq!(shifted.iter().copied().collect::<Vec<_>>(), vec![13, 12, 11]);
    }

    #[rstest]
    fn test_each_is_eager_and_visits_all() {
        let every = each_list(identity::<Vec<i32>>(), identity::<i32>());
        let mut visits = 0;
        let _ = every.modify(vec![0; 5], |n| {
            visits += 1;
            n
        });
        assert_eq!(visits, 5);
    }
}
