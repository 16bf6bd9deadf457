//! Control structures.
//!
//! - [`Either`]: A value in one of two branches, focused by the branch lenses

mod either;

pub use either::Either;
