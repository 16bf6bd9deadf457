//! Persistent (immutable) data structures.
//!
//! - [`PersistentList`]: Persistent singly-linked list, used for builder overrides
//! - [`SortedSet`]: Sorted set carrying its own comparator
//!
//! # Structural Sharing
//!
//! Both structures share their storage through `Arc`, so deriving a new
//! version never copies the old one in place and every version stays valid.
//!
//! # Examples
//!
//! ```rust
//! use fieldlens::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```

mod list;
mod sorted_set;

pub use list::PersistentList;
pub use list::PersistentListIterator;
pub use sorted_set::Comparator;
pub use sorted_set::SortedSet;
