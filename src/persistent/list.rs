//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], an immutable singly-linked list
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PersistentList` is a cons-list. It provides:
//!
//! - O(1) prepend (`cons`)
//! - O(1) head access
//! - O(1) tail access
//! - O(n) search from the front
//!
//! Nodes are shared through `Arc`, so a list and every list derived from it
//! can be sent across threads as long as the elements can.
//!
//! # Examples
//!
//! ```rust
//! use fieldlens::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//! assert_eq!(list.len(), 3);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```
//!
//! # Structural Sharing
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

struct Node<T> {
    element: T,
    next: Option<Arc<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `new`     | O(1)       |
/// | `cons`    | O(1)       |
/// | `head`    | O(1)       |
/// | `tail`    | O(1)       |
/// | `len`     | O(1)       |
/// | `find`    | O(n)       |
///
/// # Examples
///
/// ```rust
/// use fieldlens::persistent::PersistentList;
///
/// let list = PersistentList::singleton(42);
/// assert_eq!(list.head(), Some(&42));
/// ```
pub struct PersistentList<T> {
    head: Option<Arc<Node<T>>>,
    length: usize,
}

impl<T> PersistentList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldlens::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = PersistentList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let length = elements.len();
        let mut head: Option<Arc<Node<T>>> = None;
        while let Some(element) = elements.pop() {
            head = Some(Arc::new(Node {
                element,
                next: head,
            }));
        }
        Self { head, length }
    }

    /// Prepends an element to the front of the list.
    ///
    /// The new list shares every node of `self`.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldlens::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element of the list.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the list without its first element.
    ///
    /// An empty list yields an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldlens::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// let tail = list.tail();
    /// assert_eq!(tail.head(), Some(&2));
    /// assert_eq!(tail.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Returns the first element matching `predicate`, searching from the front.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldlens::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(("a", 1)).cons(("b", 2)).cons(("a", 3));
    /// assert_eq!(list.find(|(key, _)| *key == "a"), Some(&("a", 3)));
    /// assert_eq!(list.find(|(key, _)| *key == "c"), None);
    /// ```
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|element| predicate(element))
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_ref(),
            remaining: self.length,
        }
    }
}

impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

// Unlinks uniquely owned nodes one by one so long lists do not recurse on drop.
impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            current = Arc::into_inner(node).and_then(|mut node| node.next.take());
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a Arc<Node<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            self.remaining = self.remaining.saturating_sub(1);
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentListIterator<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build_from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}
