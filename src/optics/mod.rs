//! Optics for immutable data manipulation.
//!
//! Optics are composable accessors that read and rewrite values nested
//! inside immutable structures. Every update returns a new structure; the
//! source is consumed and never mutated in place.
//!
//! # Optics Hierarchy
//!
//! ```text
//! Lens <: Setter
//! ```
//!
//! - [`Setter`]: rewrites every focused value (`modify`, `set`)
//! - [`Lens`]: a setter on exactly one value that can also `get` it
//!
//! [`Setter::and_then`] composes two optics. The composition of two lenses
//! is a lens; the composition of a lens with any setter is a setter.
//!
//! # Available Optics
//!
//! - [`FunctionLens`] and the [`lens!`](crate::lens) macro: struct fields
//! - [`BuilderLens`]: fields read by an accessor and rebuilt by a `Builder`
//! - [`_1`] through [`_32`]: tuple positions
//! - [`left`] and [`right`]: branches of an [`Either`](crate::control::Either)
//! - [`map_value`]: the value under a fixed map key
//! - [`each_list`], [`each_set`] and friends: every element of a collection
//!
//! # Example
//!
//! ```
//! use fieldlens::lens;
//! use fieldlens::optics::{each_list, Lens, Setter};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Line { sku: String, quantity: u32 }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Order { id: u64, lines: Vec<Line> }
//!
//! let quantities = each_list(lens!(Order, lines), lens!(Line, quantity));
//!
//! let order = Order {
//!     id: 7,
//!     lines: vec![
//!         Line { sku: "bolt".to_string(), quantity: 2 },
//!         Line { sku: "nut".to_string(), quantity: 5 },
//!     ],
//! };
//!
//! let doubled = quantities.modify(order, |quantity| quantity * 2);
//! assert_eq!(doubled.lines[0].quantity, 4);
//! assert_eq!(doubled.lines[1].quantity, 10);
//! assert_eq!(doubled.id, 7);
//! ```

#[cfg(feature = "builder")]
mod builder_lens;
mod each;
mod either;
mod lens;
mod map;
mod setter;
mod tuple;

pub use setter::Composed;
pub use setter::FunctionSetter;
pub use setter::Setter;

pub use lens::FunctionLens;
pub use lens::Identity;
pub use lens::Lens;
pub use lens::identity;

#[cfg(feature = "builder")]
pub use builder_lens::BuilderLens;

pub use tuple::{
    _1, _2, _3, _4, _5, _6, _7, _8, _9, _10, _11, _12, _13, _14, _15, _16, _17, _18, _19, _20,
    _21, _22, _23, _24, _25, _26, _27, _28, _29, _30, _31, _32,
};
pub use tuple::{Slot, SlotLens, slot};

pub use either::{LeftLens, RightLens, left, right};

pub use map::{KeyedMap, MapValueLens, map_value};

pub use each::{Each, each_collection, each_iterable, each_list, each_set, each_sorted_set};
