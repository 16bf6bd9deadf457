//! Sorted set ordered by a runtime comparator.
//!
//! [`SortedSet`] keeps its elements in a sorted, deduplicated vector shared
//! through `Arc`. Unlike `BTreeSet`, the ordering is a value carried by the
//! set, so two sets of the same element type can be ordered differently and
//! a set rebuilt from another one can keep the original ordering.
//!
//! # Examples
//!
//! ```rust
//! use fieldlens::persistent::SortedSet;
//!
//! let descending = SortedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! let set = descending.insert(1).insert(3).insert(2).insert(3);
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
//! assert!(set.same_ordering(&descending));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// The shared ordering of a [`SortedSet`].
pub type Comparator<E> = Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// A persistent sorted set with a runtime comparator.
///
/// Elements comparing `Equal` under the comparator are duplicates; the first
/// one inserted is kept.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `contains` | O(log n)   |
/// | `insert`   | O(n)       |
/// | `len`      | O(1)       |
pub struct SortedSet<E> {
    elements: Arc<Vec<E>>,
    comparator: Comparator<E>,
}

impl<E> SortedSet<E> {
    /// Creates an empty set ordered by `comparator`.
    #[must_use]
    pub fn with_comparator<C>(comparator: C) -> Self
    where
        C: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        Self::empty(Arc::new(comparator))
    }

    /// Creates an empty set sharing an existing comparator.
    #[must_use]
    pub fn empty(comparator: Comparator<E>) -> Self {
        Self {
            elements: Arc::new(Vec::new()),
            comparator,
        }
    }

    /// Builds a set from `iter`, ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use fieldlens::persistent::{Comparator, SortedSet};
    ///
    /// let by_length: Comparator<String> = Arc::new(|a, b| a.len().cmp(&b.len()));
    /// let set = SortedSet::from_iter_with(
    ///     by_length,
    ///     ["ccc", "a", "bb", "dd"].map(String::from),
    /// );
    ///
    /// assert_eq!(set.len(), 3);
    /// assert_eq!(set.iter().next().map(String::as_str), Some("a"));
    /// ```
    #[must_use]
    pub fn from_iter_with<I>(comparator: Comparator<E>, iter: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut elements: Vec<E> = iter.into_iter().collect();
        // Stable sort keeps the first of equal elements in front for dedup.
        elements.sort_by(|a, b| comparator(a, b));
        elements.dedup_by(|later, earlier| comparator(earlier, later) == Ordering::Equal);
        Self {
            elements: Arc::new(elements),
            comparator,
        }
    }

    /// Returns `true` if an element equal under the comparator is present.
    #[must_use]
    pub fn contains(&self, element: &E) -> bool {
        self.position(element).is_ok()
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates the elements in comparator order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// Returns the comparator of this set.
    #[must_use]
    pub fn comparator(&self) -> &Comparator<E> {
        &self.comparator
    }

    /// Returns `true` when both sets use the same comparator instance.
    #[must_use]
    pub fn same_ordering(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.comparator, &other.comparator)
    }

    fn position(&self, element: &E) -> Result<usize, usize> {
        self.elements
            .binary_search_by(|item| (self.comparator)(item, element))
    }
}

impl<E: Clone> SortedSet<E> {
    /// Returns a new set with `element` added.
    ///
    /// The receiver is unchanged; inserting a duplicate returns an equal set.
    #[must_use]
    pub fn insert(&self, element: E) -> Self {
        match self.position(&element) {
            Ok(_) => self.clone(),
            Err(position) => {
                let mut elements = Vec::with_capacity(self.elements.len() + 1);
                elements.extend_from_slice(&self.elements[..position]);
                elements.push(element);
                elements.extend_from_slice(&self.elements[position..]);
                Self {
                    elements: Arc::new(elements),
                    comparator: Arc::clone(&self.comparator),
                }
            }
        }
    }
}

impl<E: Ord + 'static> SortedSet<E> {
    /// Creates an empty set in natural order.
    #[must_use]
    pub fn natural() -> Self {
        Self::with_comparator(E::cmp)
    }
}

impl<E> Clone for SortedSet<E> {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
            comparator: Arc::clone(&self.comparator),
        }
    }
}

impl<E: Ord + Send + Sync + 'static> FromIterator<E> for SortedSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_iter_with(Arc::new(E::cmp), iter)
    }
}

impl<'a, E> IntoIterator for &'a SortedSet<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: PartialEq> PartialEq for SortedSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<E: fmt::Debug> fmt::Debug for SortedSet<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_from_iter_sorts_and_deduplicates() {
        let set: SortedSet<i32> = [5, 1, 3, 1, 5].into_iter().collect();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[rstest]
    #[case(0, false)]
    #[case(3, true)]
    #[case(6, false)]
    fn test_contains(#[case] element: i32, #[case] expected: bool) {
        let set: SortedSet<i32> = [1, 3, 5].into_iter().collect();
        assert_eq!(set.contains(&element), expected);
    }

    #[rstest]
    fn test_insert_is_persistent() {
        let base: SortedSet<i32> = [1, 3].into_iter().collect();
        let extended = base.insert(2);
        assert_eq!(base.len(), 2);
        assert_eq!(extended.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(extended.same_ordering(&base));
    }

    #[rstest]
    fn test_duplicates_keep_first_inserted() {
        let by_first: Comparator<(i32, &str)> = Arc::new(|a, b| a.0.cmp(&b.0));
        let set = SortedSet::from_iter_with(by_first, [(1, "first"), (1, "second")]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![&(1, "first")]);
        assert_eq!(set.insert((1, "third")).len(), 1);
    }

    #[rstest]
    fn test_natural_orders_owned_elements_ascending() {
        let set = SortedSet::<String>::natural()
            .insert("pear".to_string())
            .insert("apple".to_string())
            .insert("fig".to_string());
        assert_eq!(set.iter().map(String::as_str).collect::<Vec<_>>(), ["apple", "fig", "pear"]);
        assert!(set.contains(&"fig".to_string()));
    }

    #[rstest]
    fn test_distinct_comparators_are_distinct_orderings() {
        let left = SortedSet::<i32>::natural();
        let right = SortedSet::<i32>::natural();
        assert!(!left.same_ordering(&right));
        assert!(left.same_ordering(&left.clone()));
    }
}
